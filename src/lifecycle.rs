//! View lifecycle and the navigation action type.
//!
//! - [`NavigationAction`] is what every guard returns: continue, deny, or
//!   redirect somewhere else.
//! - [`ViewState`] is the per-activation state owned by the active view. It
//!   is created when the view activates, receives the route parameters, is
//!   read by exit guards, and is dropped when the view deactivates.
//!
//! # Navigation pipeline
//!
//! When a navigation request is made, the router executes steps in this order:
//!
//! 1. **Resolve** the target path against the route table (redirects followed)
//! 2. **Exit guards** of the active route, given the active [`ViewState`]
//! 3. **Entry guards** of the target route
//! 4. **Deactivate** the current view ([`ViewState::on_deactivate`], then drop)
//! 5. **Activate** the target view ([`ViewState::on_activate`] with its params)
//! 6. **Notify** navigation listeners

use crate::NavigationRequest;
use std::any::Any;

/// Result of a guard check.
///
/// A plain yes/no guard maps `true` to [`Continue`](Self::Continue) and
/// `false` to [`Deny`](Self::Deny) via [`NavigationAction::from_answer`].
///
/// ```
/// use guard_navigator::NavigationAction;
///
/// let action = NavigationAction::deny("Not logged in");
/// assert!(action.is_deny());
///
/// let action = NavigationAction::redirect("/home");
/// assert_eq!(action.redirect_path(), Some("/home"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationAction {
    /// Allow navigation to proceed.
    Continue,

    /// Deny navigation with a reason.
    Deny {
        /// Human-readable reason for denying navigation.
        reason: String,
    },

    /// Redirect to a different path.
    Redirect {
        /// Path to redirect to.
        to: String,
        /// Optional human-readable reason for redirecting.
        reason: Option<String>,
    },
}

impl NavigationAction {
    /// Allow navigation (alias for [`Continue`](Self::Continue)).
    pub fn allow() -> Self {
        Self::Continue
    }

    /// Block navigation with a human-readable reason.
    pub fn deny(reason: impl Into<String>) -> Self {
        Self::Deny {
            reason: reason.into(),
        }
    }

    /// Redirect navigation to a different path.
    pub fn redirect(to: impl Into<String>) -> Self {
        Self::Redirect {
            to: to.into(),
            reason: None,
        }
    }

    /// Redirect with a human-readable reason.
    pub fn redirect_with_reason(to: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Redirect {
            to: to.into(),
            reason: Some(reason.into()),
        }
    }

    /// Map a yes/no answer: `true` continues, `false` denies with `reason`.
    pub fn from_answer(answer: bool, reason: impl Into<String>) -> Self {
        if answer {
            Self::Continue
        } else {
            Self::deny(reason)
        }
    }

    /// Check if this action allows navigation to continue.
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue)
    }

    /// Check if this action denies navigation.
    pub fn is_deny(&self) -> bool {
        matches!(self, Self::Deny { .. })
    }

    /// Check if this action redirects navigation.
    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect { .. })
    }

    /// Get the redirect path, if this is a redirect action.
    pub fn redirect_path(&self) -> Option<&str> {
        match self {
            Self::Redirect { to, .. } => Some(to.as_str()),
            _ => None,
        }
    }
}

/// Upcast helper so the router can hand out typed access to view state.
///
/// Implemented for every `'static` type; never implement it by hand.
pub trait AsAny: Any {
    /// View as `&dyn Any`.
    fn as_any(&self) -> &dyn Any;
    /// View as `&mut dyn Any`.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// State owned by an active view.
///
/// Only views that can lose user input need to override
/// [`has_unsaved_changes`](Self::has_unsaved_changes); exit guards such as
/// [`UnsavedChangesGuard`](crate::UnsavedChangesGuard) read it.
///
/// ```
/// use guard_navigator::ViewState;
///
/// #[derive(Default)]
/// struct Editor {
///     dirty: bool,
/// }
///
/// impl ViewState for Editor {
///     fn has_unsaved_changes(&self) -> bool {
///         self.dirty
///     }
/// }
///
/// let editor = Editor { dirty: true };
/// assert!(editor.has_unsaved_changes());
/// ```
pub trait ViewState: AsAny {
    /// Called once, right after the view becomes active.
    fn on_activate(&mut self, _request: &NavigationRequest) {}

    /// Called once, right before the view is dropped after a successful
    /// navigation away.
    fn on_deactivate(&mut self) {}

    /// Whether leaving now would discard user input.
    fn has_unsaved_changes(&self) -> bool {
        false
    }
}

/// State of a view that keeps nothing between activations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatelessView;

impl ViewState for StatelessView {}
