//! The router: runs the guard pipeline and owns the active view.
//!
//! - [`Router`] holds the immutable [`RouteTable`], the injected [`Confirm`]
//!   capability, the [`RouterState`] (active view + history), listeners, and
//!   the optional resolution cache.
//! - [`NavigationRequest`] describes one navigation and is what guards see.
//! - [`RouterOptions`] carries the runtime knobs.
//!
//! # Pipeline
//!
//! 1. Resolve the target against the table (static redirects followed)
//! 2. Unmatched → [`NavigationResult::NotFound`], nothing else happens
//! 3. Same location as the active view → no-op success
//! 4. Exit guards of the active route, given its [`ViewState`](crate::ViewState)
//! 5. Entry guards of the target route
//! 6. Swap views, hand parameters to the new one, record history
//! 7. Notify listeners
//!
//! A denial at step 4 or 5 returns [`NavigationResult::Cancelled`] and leaves
//! the active view, its state, and the history untouched. A denied exit guard
//! means entry guards never run.
//!
//! ```
//! use guard_navigator::{ConfirmGuard, Route, RouteTable, Router, ScriptedConfirm};
//!
//! let table = RouteTable::new([
//!     Route::new("/home", "home"),
//!     Route::new("/dashboard", "dashboard").entry_guard(ConfirmGuard::logged_in()),
//!     Route::redirect("", "/home"),
//! ])
//! .unwrap();
//!
//! let mut router = Router::new(table, ScriptedConfirm::new([false]));
//! assert!(router.navigate("").is_activated());
//! assert!(router.navigate("/dashboard").is_cancelled());
//! assert_eq!(router.current_path(), Some("/home"));
//! ```

#[cfg(feature = "cache")]
use crate::cache::{CacheStats, RouteCache};
use crate::confirm::Confirm;
use crate::error::{NavigationError, NavigationResult};
use crate::guards::{run_entry_guards, run_exit_guards};
use crate::lifecycle::{NavigationAction, ViewState};
use crate::listener::{NavigationEvent, NavigationListener};
use crate::matching::{normalize_path, split_target};
use crate::params::{QueryParams, RouteParams};
use crate::state::{ActiveView, NavigationDirection, RouterState};
use crate::table::{Resolved, RouteTable};
use crate::{debug_log, error_log, info_log, trace_log, warn_log};
#[cfg(feature = "cache")]
use std::num::NonZeroUsize;

// ============================================================================
// NavigationRequest
// ============================================================================

/// Request for navigation.
///
/// Passed to guards so they can inspect the source and destination.
///
/// ```
/// use guard_navigator::NavigationRequest;
///
/// let request = NavigationRequest::new("/dashboard").with_from("/home");
/// assert_eq!(request.to, "/dashboard");
/// assert_eq!(request.from.as_deref(), Some("/home"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationRequest {
    /// The path we're navigating from, if a view is active.
    pub from: Option<String>,

    /// The normalized path we're navigating to, after static redirects.
    pub to: String,

    /// Route parameters extracted from `to`.
    pub params: RouteParams,

    /// Query parameters of the target.
    pub query: QueryParams,

    /// The path originally asked for, when a redirect changed it.
    pub redirected_from: Option<String>,
}

impl NavigationRequest {
    /// Create a request for `to` with no parameters.
    pub fn new(to: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            ..Self::default()
        }
    }

    /// Set the originating path.
    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    /// Set route parameters.
    pub fn with_params(mut self, params: RouteParams) -> Self {
        self.params = params;
        self
    }

    /// Set query parameters.
    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }
}

// ============================================================================
// RouterOptions
// ============================================================================

/// Runtime configuration of a [`Router`].
///
/// ```
/// use guard_navigator::RouterOptions;
///
/// let options = RouterOptions::new().max_redirect_depth(3).history_limit(50);
/// assert_eq!(options.redirect_depth(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct RouterOptions {
    max_redirect_depth: usize,
    history_limit: Option<usize>,
    cache_capacity: usize,
}

impl RouterOptions {
    /// Default limit on guard redirect chains.
    pub const DEFAULT_MAX_REDIRECT_DEPTH: usize = 5;

    /// Default options.
    pub fn new() -> Self {
        Self {
            max_redirect_depth: Self::DEFAULT_MAX_REDIRECT_DEPTH,
            history_limit: None,
            cache_capacity: 1000,
        }
    }

    /// Limit how many guard redirects one navigation may follow.
    pub fn max_redirect_depth(mut self, depth: usize) -> Self {
        self.max_redirect_depth = depth;
        self
    }

    /// Keep at most `limit` history entries (at least one is always kept).
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }

    /// Number of resolved paths kept by the resolution cache. Zero disables
    /// caching.
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Configured guard redirect limit.
    pub fn redirect_depth(&self) -> usize {
        self.max_redirect_depth
    }

    /// Configured history limit.
    pub fn history_size(&self) -> Option<usize> {
        self.history_limit
    }

    /// Configured cache capacity.
    pub fn cache_size(&self) -> usize {
        self.cache_capacity
    }
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Router
// ============================================================================

/// Runs navigations against a [`RouteTable`].
///
/// Single-threaded: every navigation runs to completion on the caller's
/// thread, blocking inside [`Confirm`] while a guard waits for an answer.
pub struct Router {
    table: RouteTable,
    confirm: Box<dyn Confirm>,
    state: RouterState,
    listeners: Vec<Box<dyn NavigationListener>>,
    options: RouterOptions,
    #[cfg(feature = "cache")]
    cache: Option<RouteCache>,
}

impl Router {
    /// Create a router with default options. No view is active until the
    /// first navigation.
    pub fn new(table: RouteTable, confirm: impl Confirm + 'static) -> Self {
        Self::with_options(table, confirm, RouterOptions::default())
    }

    /// Create a router with explicit options.
    pub fn with_options(
        table: RouteTable,
        confirm: impl Confirm + 'static,
        options: RouterOptions,
    ) -> Self {
        info_log!(
            "Router created with {} routes (redirect depth {}, history limit {:?})",
            table.len(),
            options.max_redirect_depth,
            options.history_limit
        );
        Self {
            #[cfg(feature = "cache")]
            cache: NonZeroUsize::new(options.cache_capacity).map(RouteCache::with_capacity),
            state: RouterState::with_history_limit(options.history_limit),
            table,
            confirm: Box::new(confirm),
            listeners: Vec::new(),
            options,
        }
    }

    /// Register a listener notified after every navigation attempt.
    pub fn add_listener<L: NavigationListener>(&mut self, listener: L) {
        debug_log!("Registered listener '{}'", listener.name());
        self.listeners.push(Box::new(listener));
    }

    // ========================================================================
    // Navigation pipeline
    // ========================================================================

    /// Navigate to `target`, pushing a history entry on success.
    ///
    /// `target` may carry a query string (`/product/42?tab=reviews`).
    pub fn navigate(&mut self, target: impl AsRef<str>) -> NavigationResult {
        self.navigate_with_pipeline(target.as_ref(), NavigationDirection::Forward, 0)
    }

    /// Navigate to `target`, overwriting the current history entry on success.
    pub fn replace(&mut self, target: impl AsRef<str>) -> NavigationResult {
        self.navigate_with_pipeline(target.as_ref(), NavigationDirection::Replace, 0)
    }

    /// Go back one history entry, running the same guards as `navigate`.
    ///
    /// Returns `None` when there is nothing to go back to.
    pub fn back(&mut self) -> Option<NavigationResult> {
        let target = self.state.peek_back()?.to_string();
        Some(self.navigate_with_pipeline(&target, NavigationDirection::Back, 0))
    }

    /// Go forward one history entry, running the same guards as `navigate`.
    pub fn forward(&mut self) -> Option<NavigationResult> {
        let target = self.state.peek_forward()?.to_string();
        Some(self.navigate_with_pipeline(&target, NavigationDirection::Redo, 0))
    }

    /// Core navigation method that runs the full pipeline.
    fn navigate_with_pipeline(
        &mut self,
        target: &str,
        direction: NavigationDirection,
        redirect_depth: usize,
    ) -> NavigationResult {
        let from = self.current_path().map(str::to_string);

        if redirect_depth > self.options.max_redirect_depth {
            error_log!(
                "Redirect loop detected (depth {}) navigating to '{}'",
                redirect_depth,
                target
            );
            let error = NavigationError::RedirectLoop {
                path: target.to_string(),
                depth: redirect_depth,
            };
            return self.fail(from, target.to_string(), error);
        }

        info_log!("Navigation {:?}: {:?} -> '{}'", direction, from, target);

        let (raw_path, raw_query) = split_target(target);
        let query = raw_query.map(QueryParams::from_query_string).unwrap_or_default();

        // Step 1: Resolve
        let resolved = match self.resolve(raw_path) {
            Ok(Some(resolved)) => resolved,
            Ok(None) => {
                let path = normalize_path(raw_path).into_owned();
                warn_log!("No route matches '{}'", path);
                self.notify(&NavigationEvent::NotFound {
                    from,
                    to: path.clone(),
                });
                return NavigationResult::NotFound { path };
            }
            Err(err) => {
                error_log!("Failed to resolve '{}': {}", target, err);
                return self.fail(from, normalize_path(raw_path).into_owned(), err);
            }
        };

        let location = match raw_query.filter(|q| !q.is_empty()) {
            Some(q) => format!("{}?{}", resolved.path, q),
            None => resolved.path.clone(),
        };

        // Step 2: Same location is a no-op
        if let Some(active) = self.state.active() {
            let explicit = matches!(
                direction,
                NavigationDirection::Forward | NavigationDirection::Replace
            );
            if explicit && active.location == location {
                debug_log!("'{}' is already active", location);
                return NavigationResult::Activated {
                    path: active.path.clone(),
                    view: active.view.clone(),
                    params: active.params.clone(),
                };
            }
        }

        let request = NavigationRequest {
            from: from.clone(),
            to: resolved.path.clone(),
            params: resolved.params.clone(),
            query,
            redirected_from: resolved.redirected_from.clone(),
        };

        // Step 3: Exit guards of the active route
        if let Some(active) = self.state.active() {
            let exit = match self.table.route(active.route_index) {
                Some(route) => run_exit_guards(
                    route.exit_guards(),
                    self.confirm.as_ref(),
                    active.state(),
                    &request,
                ),
                None => NavigationAction::Continue,
            };
            if let Some(result) = self.handle_guard_action(exit, &request, redirect_depth) {
                return result;
            }
        }

        // Step 4: Entry guards of the target route
        let entry = match self.table.route(resolved.index) {
            Some(route) => run_entry_guards(route.entry_guards(), self.confirm.as_ref(), &request),
            None => NavigationAction::Continue,
        };
        if let Some(result) = self.handle_guard_action(entry, &request, redirect_depth) {
            return result;
        }

        // Step 5: Swap views
        self.activate(resolved, request, location, direction)
    }

    /// Turn a guard verdict into a final result, or `None` to keep going.
    fn handle_guard_action(
        &mut self,
        action: NavigationAction,
        request: &NavigationRequest,
        redirect_depth: usize,
    ) -> Option<NavigationResult> {
        match action {
            NavigationAction::Continue => None,
            NavigationAction::Deny { reason } => {
                warn_log!("Navigation to '{}' cancelled: {}", request.to, reason);
                self.notify(&NavigationEvent::Cancelled {
                    from: request.from.clone(),
                    to: request.to.clone(),
                    reason: reason.clone(),
                });
                Some(NavigationResult::Cancelled { reason })
            }
            NavigationAction::Redirect { to, reason } => {
                debug_log!(
                    "Guard redirecting from '{}' to '{}': {:?}",
                    request.to,
                    to,
                    reason
                );
                Some(self.navigate_with_pipeline(
                    &to,
                    NavigationDirection::Forward,
                    redirect_depth + 1,
                ))
            }
        }
    }

    fn activate(
        &mut self,
        resolved: Resolved,
        request: NavigationRequest,
        location: String,
        direction: NavigationDirection,
    ) -> NavigationResult {
        // A built table only resolves to view routes.
        let target = self
            .table
            .route(resolved.index)
            .and_then(|route| Some((route.view()?.clone(), route.create_view()?)));
        let Some((view, mut state)) = target else {
            error_log!("Route #{} has no view to activate", resolved.index);
            self.notify(&NavigationEvent::NotFound {
                from: request.from,
                to: request.to.clone(),
            });
            return NavigationResult::NotFound { path: request.to };
        };

        if let Some(previous) = self.state.active_mut() {
            trace_log!("Deactivating view '{}'", previous.view);
            previous.state.on_deactivate();
        }

        state.on_activate(&request);
        let active = ActiveView {
            route_index: resolved.index,
            path: resolved.path.clone(),
            location,
            view: view.clone(),
            params: resolved.params.clone(),
            query: request.query,
            state,
        };
        drop(self.state.activate(active, direction));

        info_log!(
            "Activated view '{}' at '{}' with {}",
            view,
            resolved.path,
            resolved.params
        );
        self.notify(&NavigationEvent::Activated {
            from: request.from,
            to: resolved.path.clone(),
            view: view.clone(),
            params: resolved.params.clone(),
        });

        NavigationResult::Activated {
            path: resolved.path,
            view,
            params: resolved.params,
        }
    }

    /// Resolve a path through the cache when enabled.
    fn resolve(&mut self, path: &str) -> Result<Option<Resolved>, NavigationError> {
        #[cfg(feature = "cache")]
        {
            let key = normalize_path(path).into_owned();
            if let Some(cache) = self.cache.as_mut() {
                if let Some(hit) = cache.get(&key) {
                    return Ok(Some(hit));
                }
            }
            let resolved = self.table.resolve(&key)?;
            if let (Some(cache), Some(resolved)) = (self.cache.as_mut(), resolved.as_ref()) {
                cache.insert(key, resolved.clone());
            }
            Ok(resolved)
        }
        #[cfg(not(feature = "cache"))]
        {
            self.table.resolve(path)
        }
    }

    fn fail(&self, from: Option<String>, to: String, error: NavigationError) -> NavigationResult {
        self.notify(&NavigationEvent::Error {
            from,
            to,
            error: error.clone(),
        });
        NavigationResult::Error(error)
    }

    fn notify(&self, event: &NavigationEvent) {
        for listener in &self.listeners {
            trace_log!("Notifying listener '{}'", listener.name());
            listener.on_event(event);
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Normalized path of the active view.
    pub fn current_path(&self) -> Option<&str> {
        self.state.active().map(ActiveView::path)
    }

    /// The active view.
    pub fn active_view(&self) -> Option<&ActiveView> {
        self.state.active()
    }

    /// Typed access to the active view's state.
    ///
    /// `None` when no view is active or its state is not a `V`.
    pub fn view_state<V: ViewState>(&self) -> Option<&V> {
        let active = self.state.active()?;
        active.state().as_any().downcast_ref::<V>()
    }

    /// Typed mutable access to the active view's state, for user interaction
    /// inside the view.
    pub fn view_state_mut<V: ViewState>(&mut self) -> Option<&mut V> {
        let active = self.state.active_mut()?;
        active.state_mut().as_any_mut().downcast_mut::<V>()
    }

    /// Check if `back()` has somewhere to go.
    pub fn can_go_back(&self) -> bool {
        self.state.can_go_back()
    }

    /// Check if `forward()` has somewhere to go.
    pub fn can_go_forward(&self) -> bool {
        self.state.can_go_forward()
    }

    /// The route table.
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Router state (active view and history).
    pub fn state(&self) -> &RouterState {
        &self.state
    }

    /// The options the router was built with.
    pub fn options(&self) -> &RouterOptions {
        &self.options
    }

    /// Resolution cache statistics, `None` when caching is disabled.
    #[cfg(feature = "cache")]
    pub fn cache_stats(&self) -> Option<&CacheStats> {
        self.cache.as_ref().map(RouteCache::stats)
    }

    /// Drop all cached resolutions.
    #[cfg(feature = "cache")]
    pub fn clear_cache(&mut self) {
        if let Some(cache) = self.cache.as_mut() {
            cache.clear();
        }
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("table", &self.table)
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confirm::{AlwaysConfirm, ScriptedConfirm};
    use crate::guards::{entry_guard_fn, ConfirmGuard, UnsavedChangesGuard};
    use crate::route::Route;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[derive(Default)]
    struct Draft {
        dirty: bool,
    }

    impl ViewState for Draft {
        fn has_unsaved_changes(&self) -> bool {
            self.dirty
        }
    }

    fn table() -> RouteTable {
        RouteTable::new([
            Route::new("/home", "home"),
            Route::new("/about", "about"),
            Route::new("/secret", "secret").entry_guard(ConfirmGuard::logged_in()),
            Route::with_state("/draft", "draft", Draft::default)
                .exit_guard(UnsavedChangesGuard::new()),
            Route::new("/item/:id", "item"),
            Route::redirect("", "/home"),
        ])
        .unwrap()
    }

    #[test]
    fn test_first_navigation_activates() {
        let mut router = Router::new(table(), AlwaysConfirm);
        assert!(router.current_path().is_none());

        let result = router.navigate("");
        assert_eq!(result.view().unwrap(), "home");
        assert_eq!(router.current_path(), Some("/home"));
    }

    #[test]
    fn test_query_is_parsed_and_recorded() {
        let mut router = Router::new(table(), AlwaysConfirm);
        router.navigate("/item/7?tab=reviews");
        let active = router.active_view().unwrap();
        assert_eq!(active.params().get("id"), Some("7"));
        assert_eq!(active.query().get("tab"), Some("reviews"));
        assert_eq!(active.location(), "/item/7?tab=reviews");
    }

    #[test]
    fn test_same_location_is_noop() {
        let script = Rc::new(ScriptedConfirm::new([]));
        let mut router = Router::new(table(), Rc::clone(&script));
        router.navigate("/draft");
        router.view_state_mut::<Draft>().unwrap().dirty = true;

        let result = router.navigate("/draft/");
        assert!(result.is_activated());
        assert_eq!(script.prompt_count(), 0);
        assert!(router.view_state::<Draft>().unwrap().dirty);
    }

    struct Tracked {
        deactivated: Rc<Cell<bool>>,
    }

    impl ViewState for Tracked {
        fn on_deactivate(&mut self) {
            self.deactivated.set(true);
        }
    }

    #[test]
    fn test_deactivate_hook_runs_on_swap() {
        let deactivated = Rc::new(Cell::new(false));
        let flag = Rc::clone(&deactivated);
        let table = RouteTable::new([
            Route::with_state("/tracked", "tracked", move || Tracked {
                deactivated: Rc::clone(&flag),
            }),
            Route::new("/home", "home"),
            Route::redirect("", "/tracked"),
        ])
        .unwrap();

        let mut router = Router::new(table, AlwaysConfirm);
        router.navigate("/");
        assert!(router.view_state::<Tracked>().is_some());
        assert!(!deactivated.get());

        assert!(router.navigate("/home").is_activated());
        assert!(deactivated.get());
        assert!(router.view_state::<Tracked>().is_none());
    }

    #[test]
    fn test_entry_guard_sees_request() {
        let seen = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&seen);
        let table = RouteTable::new([
            Route::new("/home", "home"),
            Route::new("/item/:id", "item").entry_guard(entry_guard_fn(move |_, request| {
                *sink.borrow_mut() = Some(request.clone());
                NavigationAction::Continue
            })),
            Route::redirect("", "/home"),
        ])
        .unwrap();

        let mut router = Router::new(table, AlwaysConfirm);
        router.navigate("");
        router.navigate("/item/9?x=1");

        let request = seen.borrow().clone().unwrap();
        assert_eq!(request.from.as_deref(), Some("/home"));
        assert_eq!(request.to, "/item/9");
        assert_eq!(request.params.get("id"), Some("9"));
        assert_eq!(request.query.get("x"), Some("1"));
    }

    #[test]
    fn test_guard_redirect_loop_is_error() {
        let table = RouteTable::new([
            Route::new("/a", "a")
                .entry_guard(entry_guard_fn(|_, _| NavigationAction::redirect("/b"))),
            Route::new("/b", "b")
                .entry_guard(entry_guard_fn(|_, _| NavigationAction::redirect("/a"))),
            Route::new("/home", "home"),
            Route::redirect("", "/home"),
        ])
        .unwrap();
        let options = RouterOptions::new().max_redirect_depth(3);
        let mut router = Router::with_options(table, AlwaysConfirm, options);
        router.navigate("/");

        let result = router.navigate("/a");
        assert!(matches!(
            result,
            NavigationResult::Error(NavigationError::RedirectLoop { .. })
        ));
        assert_eq!(router.current_path(), Some("/home"));
    }

    #[test]
    fn test_redirect_loop_notifies_listeners() {
        let table = RouteTable::new([
            Route::new("/a", "a")
                .entry_guard(entry_guard_fn(|_, _| NavigationAction::redirect("/a"))),
            Route::new("/home", "home"),
            Route::redirect("", "/home"),
        ])
        .unwrap();
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let mut router = Router::new(table, AlwaysConfirm);
        router.navigate("/");
        router.add_listener(crate::listener::listener_fn(move |event: &NavigationEvent| {
            sink.borrow_mut().push(event.clone());
        }));

        assert!(router.navigate("/a").is_error());

        let events = events.borrow();
        assert_eq!(events.len(), 1);
        match &events[0] {
            NavigationEvent::Error { from, to, error } => {
                assert_eq!(from.as_deref(), Some("/home"));
                assert_eq!(to, "/a");
                assert!(matches!(error, NavigationError::RedirectLoop { .. }));
            }
            other => panic!("expected error event, got {other:?}"),
        }
    }

    #[test]
    fn test_guard_redirect_is_followed() {
        let table = RouteTable::new([
            Route::new("/home", "home"),
            Route::new("/secret", "secret")
                .entry_guard(ConfirmGuard::logged_in().with_redirect("/about")),
            Route::new("/about", "about"),
            Route::redirect("", "/home"),
        ])
        .unwrap();
        let mut router = Router::new(table, ScriptedConfirm::new([false]));
        router.navigate("");

        let result = router.navigate("/secret");
        assert_eq!(result.view().unwrap(), "about");
        assert_eq!(router.current_path(), Some("/about"));
    }

    #[cfg(feature = "cache")]
    #[test]
    fn test_resolution_cache() {
        let mut router = Router::new(table(), AlwaysConfirm);
        router.navigate("/home");
        router.navigate("/about");
        router.navigate("/home");

        let stats = router.cache_stats().unwrap();
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.hits, 1);

        router.clear_cache();
        assert_eq!(router.cache_stats().unwrap().invalidations, 1);
    }

    #[cfg(feature = "cache")]
    #[test]
    fn test_zero_capacity_disables_cache() {
        let options = RouterOptions::new().cache_capacity(0);
        let router = Router::with_options(table(), AlwaysConfirm, options);
        assert!(router.cache_stats().is_none());
    }
}
