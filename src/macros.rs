//! Logging macros for ergonomic message formatting.
//!
//! These macros provide a convenient interface for logging with automatic
//! string formatting, similar to `println!` and `format!`.
//!
//! # Examples
//!
//! ```
//! use sievelog::prelude::*;
//! use sievelog::info;
//!
//! let logger = Logger::new();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! ```

/// Log a message at a given severity with automatic formatting.
///
/// # Examples
///
/// ```
/// # use sievelog::prelude::*;
/// # let logger = Logger::new();
/// use sievelog::log;
/// log!(logger, Severity::Info, "Simple message");
/// log!(logger, Severity::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $severity:expr, $($arg:tt)+) => {
        $logger.dispatch(
            $severity,
            $crate::core::Payload::Text(format!($($arg)+)),
            None,
            $crate::core::Fields::new(),
        )
    };
}

/// Log a debug-severity message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::Severity::Debug, $($arg)+)
    };
}

/// Log an info-severity message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::Severity::Info, $($arg)+)
    };
}

/// Log a trace-severity message.
///
/// Trace events default to a high verbosity level and stay hidden unless
/// the filter raises the effective level.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::Severity::Trace, $($arg)+)
    };
}

/// Log an error-severity message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::Severity::Error, $($arg)+)
    };
}
