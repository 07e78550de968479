//! Test utilities for navigation tests
//!
//! Provides the demo router wired to a scripted confirmation channel, an
//! event-recording listener, and assertion helpers.

#![allow(dead_code)]

use guard_navigator::app;
use guard_navigator::*;
use std::cell::RefCell;
use std::rc::Rc;

/// Demo router whose prompts are answered from `answers`, in order.
///
/// Once the queue runs out every further prompt is answered "no".
pub fn demo_router(answers: impl IntoIterator<Item = bool>) -> (Router, Rc<ScriptedConfirm>) {
    let confirm = Rc::new(ScriptedConfirm::new(answers));
    let router = Router::new(
        app::routes().expect("demo table is valid"),
        Rc::clone(&confirm),
    );
    (router, confirm)
}

/// Demo router already sitting on `path`, with no prompts recorded.
///
/// `path` must not be guarded by an entry guard.
pub fn demo_router_at(path: &str) -> (Router, Rc<ScriptedConfirm>) {
    let (mut router, confirm) = demo_router([]);
    let result = router.navigate(path);
    assert!(result.is_activated(), "setup navigation failed: {result:?}");
    assert_eq!(confirm.prompt_count(), 0);
    (router, confirm)
}

/// Listener that records every event it receives.
pub fn recording_listener() -> (impl NavigationListener, Rc<RefCell<Vec<NavigationEvent>>>) {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    let listener = listener_fn(move |event: &NavigationEvent| {
        sink.borrow_mut().push(event.clone());
    });
    (listener, events)
}

/// Assert that the router shows `view` at `path`.
pub fn assert_active(router: &Router, path: &str, view: &str) {
    let active = router.active_view().expect("a view should be active");
    assert_eq!(active.path(), path, "wrong active path");
    assert_eq!(active.view(), view, "wrong active view");
}

/// Assert that route parameters contain expected key-value pair
pub fn assert_param_equals(params: &RouteParams, key: &str, expected: &str) {
    let value = params.get(key);
    assert!(
        value.is_some(),
        "Parameter '{}' not found in RouteParams",
        key
    );
    assert_eq!(
        value.unwrap(),
        expected,
        "Parameter '{}' has wrong value",
        key
    );
}
