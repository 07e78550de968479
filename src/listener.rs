//! Navigation listeners.
//!
//! Listeners observe the outcome of every navigation attempt, failed ones
//! included. Unlike guards, they cannot influence it: by the time a listener
//! runs, the view has already been swapped, or the navigation has already
//! been cancelled or rejected.
//!
//! Typical uses are analytics, updating a shell's address bar, or logging.
//!
//! ```
//! use guard_navigator::{listener_fn, NavigationEvent};
//!
//! let listener = listener_fn(|event: &NavigationEvent| {
//!     if let NavigationEvent::Activated { view, .. } = event {
//!         println!("now showing {view}");
//!     }
//! });
//! ```

use crate::error::NavigationError;
use crate::params::RouteParams;
use crate::route::ViewId;

/// What happened to a navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationEvent {
    /// A view was activated.
    Activated {
        /// Path that was active before, if any.
        from: Option<String>,
        /// Path now active.
        to: String,
        /// View now active.
        view: ViewId,
        /// Parameters handed to the view.
        params: RouteParams,
    },
    /// A guard cancelled the navigation.
    Cancelled {
        /// Path that stays active.
        from: Option<String>,
        /// Path that was requested.
        to: String,
        /// Reason reported by the guard.
        reason: String,
    },
    /// No route matched the requested path.
    NotFound {
        /// Path that stays active.
        from: Option<String>,
        /// Path that was requested.
        to: String,
    },
    /// Navigation failed, for example on a guard redirect loop.
    Error {
        /// Path that stays active.
        from: Option<String>,
        /// Path that was requested.
        to: String,
        /// What went wrong.
        error: NavigationError,
    },
}

impl NavigationEvent {
    /// The requested (or activated) path.
    pub fn to(&self) -> &str {
        match self {
            Self::Activated { to, .. }
            | Self::Cancelled { to, .. }
            | Self::NotFound { to, .. }
            | Self::Error { to, .. } => to,
        }
    }
}

/// Observer notified after each navigation attempt.
pub trait NavigationListener: 'static {
    /// Called once per navigation attempt, after the outcome is settled.
    fn on_event(&self, event: &NavigationEvent);

    /// Listener name for debugging.
    fn name(&self) -> &'static str {
        "NavigationListener"
    }
}

/// Create a listener from a closure.
pub const fn listener_fn<F>(f: F) -> FnListener<F>
where
    F: Fn(&NavigationEvent) + 'static,
{
    FnListener { f }
}

/// Listener created from a closure by [`listener_fn`].
pub struct FnListener<F> {
    f: F,
}

impl<F> NavigationListener for FnListener<F>
where
    F: Fn(&NavigationEvent) + 'static,
{
    fn on_event(&self, event: &NavigationEvent) {
        (self.f)(event);
    }

    fn name(&self) -> &'static str {
        "FnListener"
    }
}
