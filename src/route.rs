//! Route entries.
//!
//! A [`Route`] binds a path pattern to a view. It may carry entry and exit
//! guards, or instead redirect to another path (the empty path of a table
//! always does).
//!
//! ```
//! use guard_navigator::{ConfirmGuard, Route, UnsavedChangesGuard};
//!
//! let routes = vec![
//!     Route::new("/home", "home"),
//!     Route::new("/dashboard", "dashboard").entry_guard(ConfirmGuard::logged_in()),
//!     Route::new("/product/:id", "product"),
//!     Route::new("/form", "form").exit_guard(UnsavedChangesGuard::new()),
//!     Route::redirect("", "/home"),
//! ];
//! assert!(routes[4].is_redirect());
//! ```

use crate::guards::{EntryGuard, ExitGuard, RouteGuard};
use crate::lifecycle::{StatelessView, ViewState};
use crate::matching::{match_path, normalize_path};
use crate::params::RouteParams;
use std::fmt;
use std::rc::Rc;

/// Identifier of the view a route activates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(String);

impl ViewId {
    /// Create a view identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ViewId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ViewId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl PartialEq<str> for ViewId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ViewId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Creates fresh view state every time a route activates.
pub type ViewFactory = Rc<dyn Fn() -> Box<dyn ViewState>>;

/// What a route does once matched.
#[derive(Clone)]
pub enum RouteTarget {
    /// Activate a view.
    View {
        /// Which view.
        id: ViewId,
        /// Builds the view's state on activation.
        factory: ViewFactory,
    },
    /// Resolve another path instead.
    Redirect(String),
}

impl fmt::Debug for RouteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::View { id, .. } => f.debug_tuple("View").field(id).finish(),
            Self::Redirect(to) => f.debug_tuple("Redirect").field(to).finish(),
        }
    }
}

/// A single entry of a [`RouteTable`](crate::RouteTable).
pub struct Route {
    pattern: String,
    target: RouteTarget,
    guards: Vec<RouteGuard>,
}

impl Route {
    /// Route activating `view` with [`StatelessView`] state.
    pub fn new(pattern: impl Into<String>, view: impl Into<ViewId>) -> Self {
        Self::with_state(pattern, view, || StatelessView)
    }

    /// Route activating `view` whose state is built by `factory`.
    ///
    /// ```
    /// use guard_navigator::{Route, ViewState};
    ///
    /// #[derive(Default)]
    /// struct Draft {
    ///     dirty: bool,
    /// }
    ///
    /// impl ViewState for Draft {
    ///     fn has_unsaved_changes(&self) -> bool {
    ///         self.dirty
    ///     }
    /// }
    ///
    /// let route = Route::with_state("/draft", "draft", Draft::default);
    /// assert_eq!(route.view().unwrap(), "draft");
    /// ```
    pub fn with_state<V, F>(pattern: impl Into<String>, view: impl Into<ViewId>, factory: F) -> Self
    where
        V: ViewState,
        F: Fn() -> V + 'static,
    {
        Self {
            pattern: pattern.into(),
            target: RouteTarget::View {
                id: view.into(),
                factory: Rc::new(move || Box::new(factory()) as Box<dyn ViewState>),
            },
            guards: Vec::new(),
        }
    }

    /// Route that resolves `to` instead of activating a view of its own.
    pub fn redirect(pattern: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            target: RouteTarget::Redirect(to.into()),
            guards: Vec::new(),
        }
    }

    /// Attach an entry guard.
    pub fn entry_guard<G: EntryGuard>(mut self, guard: G) -> Self {
        self.guards.push(RouteGuard::entry(guard));
        self
    }

    /// Attach an exit guard.
    pub fn exit_guard<G: ExitGuard>(mut self, guard: G) -> Self {
        self.guards.push(RouteGuard::exit(guard));
        self
    }

    /// Attach an already tagged guard.
    pub fn guard(mut self, guard: RouteGuard) -> Self {
        self.guards.push(guard);
        self
    }

    /// The path pattern as declared.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The normalized path pattern, used for uniqueness checks.
    pub fn normalized_pattern(&self) -> String {
        normalize_path(&self.pattern).into_owned()
    }

    /// What the route does once matched.
    pub fn target(&self) -> &RouteTarget {
        &self.target
    }

    /// The view this route activates, `None` for redirects.
    pub fn view(&self) -> Option<&ViewId> {
        match &self.target {
            RouteTarget::View { id, .. } => Some(id),
            RouteTarget::Redirect(_) => None,
        }
    }

    /// The redirect target, `None` for view routes.
    pub fn redirect_to(&self) -> Option<&str> {
        match &self.target {
            RouteTarget::Redirect(to) => Some(to),
            RouteTarget::View { .. } => None,
        }
    }

    /// Return `true` if the route redirects.
    pub fn is_redirect(&self) -> bool {
        matches!(self.target, RouteTarget::Redirect(_))
    }

    /// All guards, both kinds, in declaration order.
    pub fn guards(&self) -> &[RouteGuard] {
        &self.guards
    }

    /// Entry guards only.
    pub fn entry_guards(&self) -> impl Iterator<Item = &dyn EntryGuard> {
        self.guards.iter().filter_map(|guard| match guard {
            RouteGuard::Entry(g) => Some(g.as_ref()),
            RouteGuard::Exit(_) => None,
        })
    }

    /// Exit guards only.
    pub fn exit_guards(&self) -> impl Iterator<Item = &dyn ExitGuard> {
        self.guards.iter().filter_map(|guard| match guard {
            RouteGuard::Exit(g) => Some(g.as_ref()),
            RouteGuard::Entry(_) => None,
        })
    }

    /// Match `path` against this route's pattern.
    pub fn matches(&self, path: &str) -> Option<RouteParams> {
        match_path(path, &self.pattern)
    }

    /// Build fresh view state, `None` for redirects.
    pub(crate) fn create_view(&self) -> Option<Box<dyn ViewState>> {
        match &self.target {
            RouteTarget::View { factory, .. } => Some(factory()),
            RouteTarget::Redirect(_) => None,
        }
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("pattern", &self.pattern)
            .field("target", &self.target)
            .field("guards", &self.guards)
            .finish()
    }
}
