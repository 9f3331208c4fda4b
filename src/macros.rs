//! Formatting macros for the `*f` logger methods.
//!
//! Each macro forwards `format_args!` to the matching method, so arguments are
//! only formatted when the driver actually emits the record.
//!
//! # Examples
//!
//! ```
//! use rust_logger_facade::prelude::*;
//! use rust_logger_facade::infof;
//!
//! let logger = null_logger();
//! let port = 8080;
//! infof!(logger, "Server listening on port {}", port);
//! ```

/// Emit at the driver's default level.
///
/// ```
/// # use rust_logger_facade::prelude::*;
/// # let logger = null_logger();
/// use rust_logger_facade::printf;
/// printf!(logger, "{} workers started", 4);
/// ```
#[macro_export]
macro_rules! printf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.printf(format_args!($($arg)+))
    };
}

/// Emit a debug-level message.
///
/// ```
/// # use rust_logger_facade::prelude::*;
/// # let logger = null_logger();
/// use rust_logger_facade::debugf;
/// debugf!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debugf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.debugf(format_args!($($arg)+))
    };
}

/// Emit an info-level message.
#[macro_export]
macro_rules! infof {
    ($logger:expr, $($arg:tt)+) => {
        $logger.infof(format_args!($($arg)+))
    };
}

/// Emit a warning-level message.
#[macro_export]
macro_rules! warnf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.warnf(format_args!($($arg)+))
    };
}

/// Emit an error-level message.
///
/// ```
/// # use rust_logger_facade::prelude::*;
/// # let logger = null_logger();
/// use rust_logger_facade::errorf;
/// errorf!(logger, "Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! errorf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.errorf(format_args!($($arg)+))
    };
}

/// Emit a fatal-level message. Real drivers exit the process afterwards.
#[macro_export]
macro_rules! fatalf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.fatalf(format_args!($($arg)+))
    };
}
