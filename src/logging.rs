//! Logging facade.
//!
//! The router never talks to a logging crate directly. Every message goes
//! through the macros below, which forward to [`log`](https://docs.rs/log)
//! or [`tracing`](https://docs.rs/tracing) depending on the enabled feature.
//! Enable at most one of the two.
//!
//! | Feature    | Backend         | Default |
//! |------------|-----------------|---------|
//! | `log`      | `log` crate     | yes     |
//! | `tracing`  | `tracing` crate | no      |
//!
//! With neither feature enabled the macros expand to nothing and the
//! arguments are not evaluated.
//!
//! ```ignore
//! use guard_navigator::{debug_log, info_log, warn_log};
//!
//! info_log!("Activated view '{}'", view);
//! debug_log!("Entry guard '{}' denied '{}'", guard.name(), path);
//! warn_log!("Navigation to '{}' cancelled", path);
//! ```

/// Dispatch a message at the given level to the enabled backend.
///
/// Internal building block for the level-specific macros.
#[doc(hidden)]
#[macro_export]
macro_rules! __nav_log {
    ($level:ident, $($arg:tt)*) => {{
        #[cfg(feature = "tracing")]
        ::tracing::$level!($($arg)*);
        #[cfg(feature = "log")]
        ::log::$level!($($arg)*);
    }};
}

/// Emit a **trace**-level message (per-segment matching, cache lookups).
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => { $crate::__nav_log!(trace, $($arg)*) };
}

/// Emit a **debug**-level message (guard decisions, redirects).
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => { $crate::__nav_log!(debug, $($arg)*) };
}

/// Emit an **info**-level message (route registration, activations).
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => { $crate::__nav_log!(info, $($arg)*) };
}

/// Emit a **warn**-level message (cancelled or unmatched navigations).
#[macro_export]
macro_rules! warn_log {
    ($($arg:tt)*) => { $crate::__nav_log!(warn, $($arg)*) };
}

/// Emit an **error**-level message (redirect loops, broken tables).
#[macro_export]
macro_rules! error_log {
    ($($arg:tt)*) => { $crate::__nav_log!(error, $($arg)*) };
}
