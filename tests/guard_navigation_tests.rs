//! Integration tests for the guard pipeline
//!
//! Drives the demo application through entry guards, exit guards,
//! parameterized views, and the default redirect.

mod common;

use common::*;
use guard_navigator::app::{FormView, ProductView};
use guard_navigator::*;

// ============================================================================
// Default route
// ============================================================================

#[test]
fn test_empty_path_redirects_home() {
    let (mut router, confirm) = demo_router([]);

    let result = router.navigate("");
    assert_eq!(result.view().unwrap(), "home");
    assert_active(&router, "/home", "home");
    assert_eq!(confirm.prompt_count(), 0);
}

#[test]
fn test_root_path_redirects_home() {
    let (mut router, _) = demo_router([]);
    router.navigate("/");
    assert_active(&router, "/home", "home");
}

// ============================================================================
// Entry guard
// ============================================================================

#[test]
fn test_dashboard_activates_when_confirmed() {
    let (mut router, confirm) = demo_router_at("/home");
    confirm.push_answer(true);

    let result = router.navigate("/dashboard");
    assert!(result.is_activated());
    assert_active(&router, "/dashboard", "dashboard");
    assert_eq!(confirm.prompts(), vec![ConfirmGuard::LOGGED_IN_QUESTION]);
}

#[test]
fn test_dashboard_denied_keeps_current_view() {
    let (mut router, confirm) = demo_router_at("/about");
    confirm.push_answer(false);

    let result = router.navigate("/dashboard");
    assert_eq!(
        result,
        NavigationResult::Cancelled {
            reason: "Declined: Are you logged in?".to_string()
        }
    );
    // No fallback to home on denial.
    assert_active(&router, "/about", "about");
}

#[test]
fn test_dashboard_denied_on_first_navigation() {
    let (mut router, _) = demo_router([false]);

    assert!(router.navigate("/dashboard").is_cancelled());
    assert!(router.active_view().is_none());
    assert!(router.current_path().is_none());
}

#[test]
fn test_entry_guard_asks_every_time() {
    let (mut router, confirm) = demo_router_at("/home");
    for answer in [true, false, true] {
        confirm.push_answer(answer);
    }

    assert!(router.navigate("/dashboard").is_activated());
    router.navigate("/home");
    assert!(router.navigate("/dashboard").is_cancelled());
    assert!(router.navigate("/dashboard").is_activated());
    assert_eq!(confirm.prompt_count(), 3);
}

#[test]
fn test_activation_iff_guard_returns_true() {
    for answer in [true, false] {
        let (mut router, confirm) = demo_router_at("/home");
        confirm.push_answer(answer);

        let activated = router.navigate("/dashboard").is_activated();
        assert_eq!(activated, answer);
        assert_eq!(router.current_path() == Some("/dashboard"), answer);
    }
}

// ============================================================================
// Exit guard
// ============================================================================

#[test]
fn test_clean_form_leaves_without_prompt() {
    let (mut router, confirm) = demo_router_at("/form");
    router.view_state_mut::<FormView>().unwrap().save();

    assert!(router.navigate("/about").is_activated());
    assert_eq!(confirm.prompt_count(), 0);
}

#[test]
fn test_dirty_form_leaves_when_confirmed() {
    let (mut router, confirm) = demo_router_at("/form");
    confirm.push_answer(true);

    assert!(router.navigate("/home").is_activated());
    assert_active(&router, "/home", "home");
    assert_eq!(confirm.prompts(), vec![UnsavedChangesGuard::DEFAULT_QUESTION]);
}

#[test]
fn test_dirty_form_stays_when_declined() {
    let (mut router, confirm) = demo_router_at("/form");
    confirm.push_answer(false);

    let result = router.navigate("/home");
    assert!(result.is_cancelled());
    assert_active(&router, "/form", "form");

    let form = router.view_state::<FormView>().unwrap();
    assert!(form.has_unsaved_changes());
}

#[test]
fn test_form_state_survives_cancelled_departure() {
    let (mut router, confirm) = demo_router_at("/form");
    router.view_state_mut::<FormView>().unwrap().set_unsaved_changes(true);
    confirm.push_answer(false);
    router.navigate("/about");

    // Still the same instance: saving it now lets us leave without a prompt.
    router.view_state_mut::<FormView>().unwrap().save();
    assert!(router.navigate("/about").is_activated());
    assert_eq!(confirm.prompt_count(), 1);
}

#[test]
fn test_form_state_is_fresh_on_each_visit() {
    let (mut router, confirm) = demo_router_at("/form");
    router.view_state_mut::<FormView>().unwrap().save();
    router.navigate("/home");

    router.navigate("/form");
    assert!(router.view_state::<FormView>().unwrap().has_unsaved_changes());
    assert_eq!(confirm.prompt_count(), 0);
}

#[test]
fn test_exit_denial_skips_entry_guard() {
    let (mut router, confirm) = demo_router_at("/form");
    confirm.push_answer(false);

    assert!(router.navigate("/dashboard").is_cancelled());
    assert_eq!(confirm.prompts(), vec![UnsavedChangesGuard::DEFAULT_QUESTION]);
    assert_active(&router, "/form", "form");
}

#[test]
fn test_exit_guard_runs_before_entry_guard() {
    let (mut router, confirm) = demo_router_at("/form");
    confirm.push_answer(true);
    confirm.push_answer(true);

    assert!(router.navigate("/dashboard").is_activated());
    assert_eq!(
        confirm.prompts(),
        vec![
            UnsavedChangesGuard::DEFAULT_QUESTION,
            ConfirmGuard::LOGGED_IN_QUESTION
        ]
    );
}

#[test]
fn test_entry_denial_after_exit_approval_keeps_form() {
    let (mut router, confirm) = demo_router_at("/form");
    confirm.push_answer(true);
    confirm.push_answer(false);

    assert!(router.navigate("/dashboard").is_cancelled());
    assert_active(&router, "/form", "form");
    assert!(router.view_state::<FormView>().unwrap().has_unsaved_changes());
}

// ============================================================================
// Parameterized view
// ============================================================================

#[test]
fn test_product_receives_id() {
    let (mut router, _) = demo_router_at("/home");

    let result = router.navigate("/product/42");
    assert_eq!(result.view().unwrap(), "product");
    assert_param_equals(result.params().unwrap(), "id", "42");

    let product = router.view_state::<ProductView>().unwrap();
    assert_eq!(product.product_id(), Some("42"));
}

#[test]
fn test_product_id_is_not_validated() {
    let (mut router, _) = demo_router_at("/home");
    router.navigate("/product/not-a-number");
    assert_eq!(
        router.view_state::<ProductView>().unwrap().product_id(),
        Some("not-a-number")
    );
}

#[test]
fn test_product_id_is_percent_decoded() {
    let (mut router, _) = demo_router_at("/home");
    router.navigate("/product/blue%20shirt");
    assert_eq!(
        router.view_state::<ProductView>().unwrap().product_id(),
        Some("blue shirt")
    );
}

#[test]
fn test_product_id_keeps_literal_plus() {
    let (mut router, _) = demo_router_at("/home");

    let result = router.navigate("/product/a+b");
    assert_param_equals(result.params().unwrap(), "id", "a+b");
    assert_eq!(
        router.view_state::<ProductView>().unwrap().product_id(),
        Some("a+b")
    );
}

#[test]
fn test_query_plus_decodes_to_space() {
    let (mut router, _) = demo_router_at("/home");
    router.navigate("/product/a+b?q=blue+mug");

    let active = router.active_view().unwrap();
    assert_eq!(active.query().get("q"), Some("blue mug"));
    assert_param_equals(active.params(), "id", "a+b");
}

#[test]
fn test_switching_products_reactivates_view() {
    let (mut router, _) = demo_router_at("/product/1");

    router.navigate("/product/2");
    assert_eq!(
        router.view_state::<ProductView>().unwrap().product_id(),
        Some("2")
    );
    assert_eq!(router.state().history(), ["/product/1", "/product/2"]);
}

#[test]
fn test_query_is_kept_apart_from_params() {
    let (mut router, _) = demo_router_at("/home");
    router.navigate("/product/7?color=red#reviews");

    let active = router.active_view().unwrap();
    assert_eq!(active.path(), "/product/7");
    assert_eq!(active.location(), "/product/7?color=red");
    assert_eq!(active.query().get("color"), Some("red"));
    assert!(!active.params().contains("color"));
}

// ============================================================================
// Unmatched paths and no-ops
// ============================================================================

#[test]
fn test_unmatched_path_is_not_found() {
    let (mut router, confirm) = demo_router_at("/form");

    let result = router.navigate("/nowhere");
    assert_eq!(
        result,
        NavigationResult::NotFound {
            path: "/nowhere".to_string()
        }
    );
    assert_active(&router, "/form", "form");
    assert_eq!(confirm.prompt_count(), 0);
    assert_eq!(router.state().history(), ["/form"]);
}

#[test]
fn test_product_without_id_is_not_found() {
    let (mut router, _) = demo_router_at("/home");
    assert!(router.navigate("/product").is_not_found());
    assert!(router.navigate("/product/1/2").is_not_found());
}

#[test]
fn test_same_path_is_noop() {
    let (mut router, confirm) = demo_router_at("/form");

    let result = router.navigate("form/");
    assert!(result.is_activated());
    assert_eq!(confirm.prompt_count(), 0);
    assert_eq!(router.state().history().len(), 1);
}

#[test]
fn test_same_guarded_path_does_not_prompt_again() {
    let (mut router, confirm) = demo_router([true]);
    router.navigate("/dashboard");

    assert!(router.navigate("/dashboard").is_activated());
    assert_eq!(confirm.prompt_count(), 1);
}

// ============================================================================
// Not-found route
// ============================================================================

#[test]
fn test_not_found_route_catches_unmatched() {
    let table = RouteTable::builder()
        .route(Route::new("/home", "home"))
        .route(Route::redirect("", "/home"))
        .not_found("missing")
        .build()
        .unwrap();
    let mut router = Router::new(table, NeverConfirm);

    let result = router.navigate("/nowhere");
    assert_eq!(result.view().unwrap(), "missing");
    assert_eq!(router.current_path(), Some("/nowhere"));
}

// ============================================================================
// Listeners
// ============================================================================

#[test]
fn test_listener_sees_every_outcome() {
    let (mut router, confirm) = demo_router_at("/home");
    let (listener, events) = recording_listener();
    router.add_listener(listener);

    confirm.push_answer(false);
    router.navigate("/dashboard");
    router.navigate("/nowhere");
    router.navigate("/product/5");

    let events = events.borrow();
    assert_eq!(events.len(), 3);
    assert!(matches!(
        &events[0],
        NavigationEvent::Cancelled { to, .. } if to == "/dashboard"
    ));
    assert!(matches!(
        &events[1],
        NavigationEvent::NotFound { from: Some(from), .. } if from == "/home"
    ));
    match &events[2] {
        NavigationEvent::Activated { from, view, params, .. } => {
            assert_eq!(from.as_deref(), Some("/home"));
            assert_eq!(view, "product");
            assert_param_equals(params, "id", "5");
        }
        other => panic!("expected activation, got {other:?}"),
    }
}
