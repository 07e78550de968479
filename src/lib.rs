//! # Guard Navigator
//!
//! A small single-page-application router built around navigation guards:
//!
//! - **Route Table** - Ordered, validated path → view bindings with `:name` parameters
//! - **Entry Guards** - Checks run before a protected view activates
//! - **Exit Guards** - Checks run before leaving a view that holds unsaved state
//! - **Confirmation Channel** - Yes/no prompts injected through the [`Confirm`] trait
//! - **History** - Back/forward through activated locations, guarded like any navigation
//! - **Listeners** - Observers notified after every navigation attempt
//!
//! Rendering is not part of this crate. A view is a [`ViewId`] plus optional
//! [`ViewState`] that the router creates on activation and drops on exit.
//!
//! # Quick Start
//!
//! ```
//! use guard_navigator::*;
//!
//! #[derive(Default)]
//! struct Editor {
//!     dirty: bool,
//! }
//!
//! impl ViewState for Editor {
//!     fn has_unsaved_changes(&self) -> bool {
//!         self.dirty
//!     }
//! }
//!
//! let table = RouteTable::new([
//!     Route::new("/home", "home"),
//!     Route::new("/dashboard", "dashboard").entry_guard(ConfirmGuard::logged_in()),
//!     Route::with_state("/editor", "editor", Editor::default)
//!         .exit_guard(UnsavedChangesGuard::new()),
//!     Route::new("/product/:id", "product"),
//!     Route::redirect("", "/home"),
//! ])?;
//!
//! // Answers "no" to the first question, "yes" to the second.
//! let mut router = Router::new(table, ScriptedConfirm::new([false, true]));
//!
//! assert_eq!(router.navigate("").view().unwrap(), "home");
//! assert!(router.navigate("/dashboard").is_cancelled());
//! assert_eq!(router.current_path(), Some("/home"));
//!
//! let result = router.navigate("/product/42");
//! assert_eq!(result.params().unwrap().get("id"), Some("42"));
//!
//! router.navigate("/editor");
//! router.view_state_mut::<Editor>().unwrap().dirty = true;
//! assert!(router.navigate("/home").is_activated());
//! # Ok::<(), NavigationError>(())
//! ```
//!
//! # Guards
//!
//! Guards return a [`NavigationAction`]: continue, deny, or redirect.
//!
//! ```
//! use guard_navigator::*;
//!
//! let admin_only = Guards::builder()
//!     .guard(ConfirmGuard::logged_in())
//!     .guard(ConfirmGuard::new("Are you an administrator?"))
//!     .build();
//!
//! Route::new("/admin", "admin").entry_guard(admin_only);
//! ```
//!
//! # Feature Flags
//!
//! - `log` (default) - Uses the standard `log` crate for logging
//! - `tracing` - Uses the `tracing` crate for structured logging (mutually exclusive with `log`)
//! - `cache` (default) - LRU cache for route resolution

#![doc(html_root_url = "https://docs.rs/guard-navigator/0.1.0")]
#![cfg_attr(docsrs, feature(doc_cfg))]
// Lints are configured in Cargo.toml [lints] section

// Logging abstraction
pub mod logging;

// Cache (optional)
#[cfg(feature = "cache")]
pub mod cache;

// Core routing modules
pub mod matching;
pub mod params;
pub mod route;
pub mod state;
pub mod table;

// Error handling
pub mod error;

// View lifecycle
pub mod lifecycle;

// Guards and the confirmation channel
pub mod confirm;
pub mod guards;

// Navigation
pub mod listener;
pub mod router;

// Demo application
pub mod app;

// Re-export main types for convenient access
#[cfg(feature = "cache")]
pub use cache::{CacheStats, RouteCache};
pub use confirm::{confirm_fn, AlwaysConfirm, Confirm, FnConfirm, NeverConfirm, ScriptedConfirm};
pub use error::{NavigationError, NavigationResult};
pub use guards::{
    entry_guard_fn, exit_guard_fn, ConfirmGuard, EntryGuard, ExitGuard, FnEntryGuard,
    FnExitGuard, GuardBuilder, Guards, NotGuard, RouteGuard, UnsavedChangesGuard,
};
pub use lifecycle::{AsAny, NavigationAction, StatelessView, ViewState};
pub use listener::{listener_fn, FnListener, NavigationEvent, NavigationListener};
pub use matching::normalize_path;
pub use params::{QueryParams, RouteParams};
pub use route::{Route, RouteTarget, ViewFactory, ViewId};
pub use router::{NavigationRequest, Router, RouterOptions};
pub use state::{ActiveView, NavigationDirection, RouterState};
pub use table::{Resolved, RouteTable, RouteTableBuilder, MAX_REDIRECT_DEPTH};
