//! Navigation outcomes and errors.
//!
//! - [`NavigationResult`] is the outcome of every navigation: the target view
//!   was activated, the navigation was cancelled by a guard, or no route
//!   matched. Cancellation is a normal outcome, not an error.
//! - [`NavigationError`] covers the genuinely broken cases: a route table that
//!   violates its invariants, or a redirect loop at navigation time.
//!
//! # Examples
//!
//! ```
//! use guard_navigator::{NavigationError, NavigationResult};
//!
//! let cancelled = NavigationResult::Cancelled { reason: "Declined".into() };
//! assert!(cancelled.is_cancelled());
//!
//! let err = NavigationError::DuplicateRoute { pattern: "/home".into() };
//! assert_eq!(err.to_string(), "Duplicate route: /home");
//! ```

use crate::params::RouteParams;
use crate::route::ViewId;
use std::fmt;

// ============================================================================
// Navigation Result Types
// ============================================================================

/// Outcome of a navigation attempt through the guard pipeline.
///
/// Every call to [`Router::navigate`](crate::Router::navigate) (and
/// `back`/`forward`) returns this enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationResult {
    /// The target view is now active.
    Activated {
        /// Normalized path that was activated, after redirects.
        path: String,
        /// The view now active.
        view: ViewId,
        /// Parameters handed to the view.
        params: RouteParams,
    },
    /// A guard denied the navigation; the previous view is still active.
    Cancelled {
        /// Reason reported by the guard.
        reason: String,
    },
    /// No route matched; the previous view is still active.
    NotFound {
        /// Normalized path that failed to match.
        path: String,
    },
    /// Navigation failed.
    Error(NavigationError),
}

impl NavigationResult {
    /// Check if a view was activated.
    pub fn is_activated(&self) -> bool {
        matches!(self, NavigationResult::Activated { .. })
    }

    /// Check if a guard cancelled the navigation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, NavigationResult::Cancelled { .. })
    }

    /// Check if no route matched.
    pub fn is_not_found(&self) -> bool {
        matches!(self, NavigationResult::NotFound { .. })
    }

    /// Check if there was an error.
    pub fn is_error(&self) -> bool {
        matches!(self, NavigationResult::Error(_))
    }

    /// The activated view, if any.
    pub fn view(&self) -> Option<&ViewId> {
        match self {
            NavigationResult::Activated { view, .. } => Some(view),
            _ => None,
        }
    }

    /// The parameters handed to the activated view, if any.
    pub fn params(&self) -> Option<&RouteParams> {
        match self {
            NavigationResult::Activated { params, .. } => Some(params),
            _ => None,
        }
    }
}

/// Errors raised by route table construction and navigation.
///
/// Implements [`std::error::Error`] and [`Display`](std::fmt::Display).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// Two routes declare the same path pattern.
    DuplicateRoute { pattern: String },

    /// The table has no entry for the empty path.
    MissingDefaultRoute,

    /// The empty-path entry activates a view instead of redirecting.
    InvalidDefaultRoute { view: ViewId },

    /// A redirect entry points nowhere, or its chain never reaches a view.
    InvalidRedirect { from: String, to: String },

    /// A route pattern is malformed (for example `/product/:`).
    InvalidPattern { pattern: String, message: String },

    /// Redirects chained deeper than the configured maximum.
    RedirectLoop { path: String, depth: usize },
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationError::DuplicateRoute { pattern } => {
                write!(f, "Duplicate route: {}", pattern)
            }
            NavigationError::MissingDefaultRoute => {
                write!(f, "Route table has no entry for the empty path")
            }
            NavigationError::InvalidDefaultRoute { view } => {
                write!(f, "Empty path must redirect, but activates view '{}'", view)
            }
            NavigationError::InvalidRedirect { from, to } => {
                write!(f, "Redirect from '{}' to '{}' does not reach a view", from, to)
            }
            NavigationError::InvalidPattern { pattern, message } => {
                write!(f, "Invalid route pattern '{}': {}", pattern, message)
            }
            NavigationError::RedirectLoop { path, depth } => {
                write!(f, "Redirect loop detected (depth {}): target '{}'", depth, path)
            }
        }
    }
}

impl std::error::Error for NavigationError {}

impl From<NavigationError> for NavigationResult {
    fn from(error: NavigationError) -> Self {
        NavigationResult::Error(error)
    }
}

// ============================================================================
// Tests
// ============================================================================
