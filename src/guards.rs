//! Entry and exit guards.
//!
//! Guards decide whether a navigation may proceed. They come in two kinds,
//! stored side by side on a [`Route`](crate::Route) as tagged [`RouteGuard`]
//! values:
//!
//! - [`EntryGuard`] runs before the route's view is activated.
//! - [`ExitGuard`] runs before the route's active view is left, and sees that
//!   view's [`ViewState`].
//!
//! All guard methods are **synchronous**. A guard that needs the user's
//! opinion asks the injected [`Confirm`] capability and blocks until it
//! answers.
//!
//! # Built-in guards
//!
//! | Guard | Kind | Purpose |
//! |-------|------|---------|
//! | [`ConfirmGuard`] | entry | Asks a yes/no question, continues on yes |
//! | [`UnsavedChangesGuard`] | exit | Asks before discarding unsaved input |
//! | [`Guards`] | entry | AND of several entry guards |
//! | [`NotGuard`] | entry | Inverts allow/deny |
//!
//! Closures become guards through [`entry_guard_fn`] and [`exit_guard_fn`].
//!
//! # Execution order
//!
//! Within one kind, guards run in **priority order** (higher value first).
//! The first non-[`Continue`](NavigationAction::Continue) result
//! short-circuits evaluation.
//!
//! # Example
//!
//! ```
//! use guard_navigator::{ConfirmGuard, Route, UnsavedChangesGuard};
//!
//! let dashboard = Route::new("/dashboard", "dashboard").entry_guard(ConfirmGuard::logged_in());
//! let form = Route::new("/form", "form").exit_guard(UnsavedChangesGuard::new());
//! ```

use crate::confirm::Confirm;
use crate::lifecycle::{NavigationAction, ViewState};
use crate::NavigationRequest;
use std::fmt;

// ============================================================================
// Guard traits
// ============================================================================

/// Guard consulted before a route's view is activated.
///
/// ```
/// use guard_navigator::{Confirm, EntryGuard, NavigationAction, NavigationRequest};
///
/// struct OnlyNumericIds;
///
/// impl EntryGuard for OnlyNumericIds {
///     fn check(&self, _confirm: &dyn Confirm, request: &NavigationRequest) -> NavigationAction {
///         match request.params.get_as::<u64>("id") {
///             Some(_) => NavigationAction::Continue,
///             None => NavigationAction::redirect("/home"),
///         }
///     }
/// }
/// ```
pub trait EntryGuard: 'static {
    /// Decide whether `request` may activate the guarded route.
    ///
    /// Returns:
    /// - [`NavigationAction::Continue`] to allow navigation
    /// - [`NavigationAction::Deny`] to cancel it
    /// - [`NavigationAction::Redirect`] to navigate elsewhere instead
    fn check(&self, confirm: &dyn Confirm, request: &NavigationRequest) -> NavigationAction;

    /// Guard name for debugging and log output.
    fn name(&self) -> &'static str {
        "EntryGuard"
    }

    /// Priority for execution order. Higher runs first. Default is 0.
    fn priority(&self) -> i32 {
        0
    }
}

/// Guard consulted before the active view of a route is left.
///
/// `view` is the state of the view about to be torn down. A denied exit
/// guard leaves that state untouched.
pub trait ExitGuard: 'static {
    /// Decide whether the active view may be left for `request`.
    fn check(
        &self,
        confirm: &dyn Confirm,
        view: &dyn ViewState,
        request: &NavigationRequest,
    ) -> NavigationAction;

    /// Guard name for debugging and log output.
    fn name(&self) -> &'static str {
        "ExitGuard"
    }

    /// Priority for execution order. Higher runs first. Default is 0.
    fn priority(&self) -> i32 {
        0
    }
}

/// A guard attached to a route, tagged with the transition it protects.
pub enum RouteGuard {
    /// Checked before activating the route.
    Entry(Box<dyn EntryGuard>),
    /// Checked before leaving the route.
    Exit(Box<dyn ExitGuard>),
}

impl RouteGuard {
    /// Wrap an entry guard.
    pub fn entry<G: EntryGuard>(guard: G) -> Self {
        Self::Entry(Box::new(guard))
    }

    /// Wrap an exit guard.
    pub fn exit<G: ExitGuard>(guard: G) -> Self {
        Self::Exit(Box::new(guard))
    }

    /// Name of the wrapped guard.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Entry(guard) => guard.name(),
            Self::Exit(guard) => guard.name(),
        }
    }

    /// Priority of the wrapped guard.
    pub fn priority(&self) -> i32 {
        match self {
            Self::Entry(guard) => guard.priority(),
            Self::Exit(guard) => guard.priority(),
        }
    }

    /// Return `true` for an entry guard.
    pub fn is_entry(&self) -> bool {
        matches!(self, Self::Entry(_))
    }

    /// Return `true` for an exit guard.
    pub fn is_exit(&self) -> bool {
        matches!(self, Self::Exit(_))
    }
}

impl fmt::Debug for RouteGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_entry() { "Entry" } else { "Exit" };
        f.debug_struct("RouteGuard")
            .field("kind", &kind)
            .field("name", &self.name())
            .field("priority", &self.priority())
            .finish()
    }
}

/// Run entry guards in priority order; the first non-continue result wins.
pub(crate) fn run_entry_guards<'a>(
    guards: impl IntoIterator<Item = &'a dyn EntryGuard>,
    confirm: &dyn Confirm,
    request: &NavigationRequest,
) -> NavigationAction {
    let mut sorted: Vec<&dyn EntryGuard> = guards.into_iter().collect();
    sorted.sort_by_key(|g| std::cmp::Reverse(g.priority()));

    for guard in sorted {
        let result = guard.check(confirm, request);
        crate::trace_log!(
            "Entry guard '{}' (priority {}) for '{}' -> {:?}",
            guard.name(),
            guard.priority(),
            request.to,
            result
        );
        if !result.is_continue() {
            return result;
        }
    }
    NavigationAction::Continue
}

/// Run exit guards in priority order; the first non-continue result wins.
pub(crate) fn run_exit_guards<'a>(
    guards: impl IntoIterator<Item = &'a dyn ExitGuard>,
    confirm: &dyn Confirm,
    view: &dyn ViewState,
    request: &NavigationRequest,
) -> NavigationAction {
    let mut sorted: Vec<&dyn ExitGuard> = guards.into_iter().collect();
    sorted.sort_by_key(|g| std::cmp::Reverse(g.priority()));

    for guard in sorted {
        let result = guard.check(confirm, view, request);
        crate::trace_log!(
            "Exit guard '{}' (priority {}) leaving for '{}' -> {:?}",
            guard.name(),
            guard.priority(),
            request.to,
            result
        );
        if !result.is_continue() {
            return result;
        }
    }
    NavigationAction::Continue
}

// ============================================================================
// Closure guards
// ============================================================================

/// Create an entry guard from a closure.
///
/// ```
/// use guard_navigator::{entry_guard_fn, NavigationAction};
///
/// let guard = entry_guard_fn(|confirm, _request| {
///     NavigationAction::from_answer(confirm.confirm("Continue?"), "declined")
/// });
/// ```
pub const fn entry_guard_fn<F>(f: F) -> FnEntryGuard<F>
where
    F: Fn(&dyn Confirm, &NavigationRequest) -> NavigationAction + 'static,
{
    FnEntryGuard { f }
}

/// Entry guard created from a closure by [`entry_guard_fn`].
pub struct FnEntryGuard<F> {
    f: F,
}

impl<F> EntryGuard for FnEntryGuard<F>
where
    F: Fn(&dyn Confirm, &NavigationRequest) -> NavigationAction + 'static,
{
    fn check(&self, confirm: &dyn Confirm, request: &NavigationRequest) -> NavigationAction {
        (self.f)(confirm, request)
    }

    fn name(&self) -> &'static str {
        "FnEntryGuard"
    }
}

/// Create an exit guard from a closure.
///
/// ```
/// use guard_navigator::{exit_guard_fn, NavigationAction};
///
/// let guard = exit_guard_fn(|_confirm, view, _request| {
///     if view.has_unsaved_changes() {
///         NavigationAction::deny("save first")
///     } else {
///         NavigationAction::Continue
///     }
/// });
/// ```
pub const fn exit_guard_fn<F>(f: F) -> FnExitGuard<F>
where
    F: Fn(&dyn Confirm, &dyn ViewState, &NavigationRequest) -> NavigationAction + 'static,
{
    FnExitGuard { f }
}

/// Exit guard created from a closure by [`exit_guard_fn`].
pub struct FnExitGuard<F> {
    f: F,
}

impl<F> ExitGuard for FnExitGuard<F>
where
    F: Fn(&dyn Confirm, &dyn ViewState, &NavigationRequest) -> NavigationAction + 'static,
{
    fn check(
        &self,
        confirm: &dyn Confirm,
        view: &dyn ViewState,
        request: &NavigationRequest,
    ) -> NavigationAction {
        (self.f)(confirm, view, request)
    }

    fn name(&self) -> &'static str {
        "FnExitGuard"
    }
}

// ============================================================================
// ConfirmGuard
// ============================================================================

/// Entry guard that asks the user a yes/no question and obeys the answer.
///
/// The question is asked on every navigation to the guarded route; nothing
/// is remembered between attempts.
#[derive(Debug, Clone)]
pub struct ConfirmGuard {
    question: String,
    redirect_on_deny: Option<String>,
}

impl ConfirmGuard {
    /// Question asked by [`logged_in`](Self::logged_in).
    pub const LOGGED_IN_QUESTION: &'static str = "Are you logged in?";

    /// Guard asking `question`.
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            redirect_on_deny: None,
        }
    }

    /// The authentication check of the dashboard: "Are you logged in?".
    pub fn logged_in() -> Self {
        Self::new(Self::LOGGED_IN_QUESTION)
    }

    /// Redirect to `path` instead of cancelling when the user says no.
    pub fn with_redirect(mut self, path: impl Into<String>) -> Self {
        self.redirect_on_deny = Some(path.into());
        self
    }

    /// The question this guard asks.
    pub fn question(&self) -> &str {
        &self.question
    }
}

impl EntryGuard for ConfirmGuard {
    fn check(&self, confirm: &dyn Confirm, _request: &NavigationRequest) -> NavigationAction {
        if confirm.confirm(&self.question) {
            return NavigationAction::Continue;
        }
        let reason = format!("Declined: {}", self.question);
        match &self.redirect_on_deny {
            Some(path) => NavigationAction::redirect_with_reason(path, reason),
            None => NavigationAction::deny(reason),
        }
    }

    fn name(&self) -> &'static str {
        "ConfirmGuard"
    }

    fn priority(&self) -> i32 {
        100
    }
}

// ============================================================================
// UnsavedChangesGuard
// ============================================================================

/// Exit guard protecting unsaved input.
///
/// A view without unsaved changes is left without asking anything. Otherwise
/// the user is asked whether to leave anyway, and navigation proceeds only on
/// yes.
#[derive(Debug, Clone)]
pub struct UnsavedChangesGuard {
    question: String,
}

impl UnsavedChangesGuard {
    /// Default question.
    pub const DEFAULT_QUESTION: &'static str = "You have unsaved changes. Leave anyway?";

    /// Guard asking the default question.
    pub fn new() -> Self {
        Self::with_question(Self::DEFAULT_QUESTION)
    }

    /// Guard asking a custom question.
    pub fn with_question(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
        }
    }
}

impl Default for UnsavedChangesGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl ExitGuard for UnsavedChangesGuard {
    fn check(
        &self,
        confirm: &dyn Confirm,
        view: &dyn ViewState,
        _request: &NavigationRequest,
    ) -> NavigationAction {
        if !view.has_unsaved_changes() {
            return NavigationAction::Continue;
        }
        NavigationAction::from_answer(confirm.confirm(&self.question), "Unsaved changes kept")
    }

    fn name(&self) -> &'static str {
        "UnsavedChangesGuard"
    }
}

// ============================================================================
// Guard Composition
// ============================================================================

/// Combines multiple entry guards with AND logic.
///
/// All guards must return [`NavigationAction::Continue`] for navigation to
/// proceed. Guards run in priority order and the first non-continue result
/// is returned immediately, so later guards never prompt.
///
/// ```
/// use guard_navigator::{ConfirmGuard, Guards};
///
/// let guard = Guards::builder()
///     .guard(ConfirmGuard::logged_in())
///     .guard(ConfirmGuard::new("Are you an admin?"))
///     .build();
/// ```
pub struct Guards {
    guards: Vec<Box<dyn EntryGuard>>,
}

impl Guards {
    /// Create a new AND composition from boxed guards.
    pub fn new(guards: Vec<Box<dyn EntryGuard>>) -> Self {
        Self { guards }
    }

    /// Start building a guard composition.
    pub fn builder() -> GuardBuilder {
        GuardBuilder::new()
    }
}

impl EntryGuard for Guards {
    fn check(&self, confirm: &dyn Confirm, request: &NavigationRequest) -> NavigationAction {
        run_entry_guards(self.guards.iter().map(|g| g.as_ref()), confirm, request)
    }

    fn name(&self) -> &'static str {
        "Guards"
    }

    fn priority(&self) -> i32 {
        self.guards.iter().map(|g| g.priority()).max().unwrap_or(0)
    }
}

/// Builder for [`Guards`].
#[must_use]
#[derive(Default)]
pub struct GuardBuilder {
    guards: Vec<Box<dyn EntryGuard>>,
}

impl GuardBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a guard to the composition.
    pub fn guard<G: EntryGuard>(mut self, guard: G) -> Self {
        self.guards.push(Box::new(guard));
        self
    }

    /// Build the final [`Guards`].
    pub fn build(self) -> Guards {
        Guards::new(self.guards)
    }
}

/// Inverts an entry guard.
///
/// - `Continue` becomes `Deny`
/// - `Deny` becomes `Continue`
/// - `Redirect` is preserved as-is
pub struct NotGuard {
    guard: Box<dyn EntryGuard>,
}

impl NotGuard {
    /// Wrap `guard`.
    pub fn new<G: EntryGuard>(guard: G) -> Self {
        Self {
            guard: Box::new(guard),
        }
    }
}

impl EntryGuard for NotGuard {
    fn check(&self, confirm: &dyn Confirm, request: &NavigationRequest) -> NavigationAction {
        match self.guard.check(confirm, request) {
            NavigationAction::Continue => {
                NavigationAction::deny(format!("Inverted '{}' allowed", self.guard.name()))
            }
            NavigationAction::Deny { .. } => NavigationAction::Continue,
            redirect @ NavigationAction::Redirect { .. } => redirect,
        }
    }

    fn name(&self) -> &'static str {
        "NotGuard"
    }

    fn priority(&self) -> i32 {
        self.guard.priority()
    }
}

// ============================================================================
// Tests
// ============================================================================
