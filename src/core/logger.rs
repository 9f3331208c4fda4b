//! The logger capability contract
//!
//! Every driver hands out an `Arc<dyn Logger>`. Emission methods have side
//! effects; the `with_*` builder methods never mutate the receiver and return
//! a new logger instead, so a logger can be branched into independently
//! enriched children.

use super::{context::Context, error::Result, fields::FieldValue, fields::Fields};
use std::error::Error;
use std::fmt;
use std::sync::{Arc, LazyLock};

/// Capability set every logging backend must provide
///
/// # Example
///
/// ```
/// use rust_logger_facade::prelude::*;
///
/// fn handle(logger: &dyn Logger, ctx: &Context) {
///     let log = logger.with_context(ctx).with_field("route", "/health".into());
///     log.info("request handled");
///     log.debugf(format_args!("took {}ms", 3));
/// }
///
/// handle(null_logger().as_ref(), &Context::new().with_request_id("r1"));
/// ```
pub trait Logger: Send + Sync {
    /// Emit at the driver's default level
    fn print(&self, message: &str);
    fn printf(&self, args: fmt::Arguments<'_>);
    fn println(&self, message: &str);

    fn debug(&self, message: &str);
    fn debugf(&self, args: fmt::Arguments<'_>);
    fn info(&self, message: &str);
    fn infof(&self, args: fmt::Arguments<'_>);
    fn warn(&self, message: &str);
    fn warnf(&self, args: fmt::Arguments<'_>);
    fn error(&self, message: &str);
    fn errorf(&self, args: fmt::Arguments<'_>);

    /// Emit, then terminate the process. Drivers must not return normally.
    fn fatal(&self, message: &str);
    fn fatalf(&self, args: fmt::Arguments<'_>);

    /// A logger carrying the fields extracted from `ctx`
    fn with_context(&self, ctx: &Context) -> Arc<dyn Logger>;

    fn with_field(&self, key: &str, value: FieldValue) -> Arc<dyn Logger>;

    /// Merge `fields` over the current ones; later values win per key
    fn with_fields(&self, fields: Fields) -> Arc<dyn Logger>;

    /// Attach `err` under the `error` field. `None` yields an equivalent logger.
    fn with_error(&self, err: Option<&(dyn Error + 'static)>) -> Arc<dyn Logger>;

    /// Flush buffered output. Safe to call repeatedly.
    fn sync(&self) -> Result<()>;
}

static NULL_LOGGER: LazyLock<Arc<dyn Logger>> = LazyLock::new(|| Arc::new(NullLogger));

/// The shared no-op logger
///
/// Returned wherever a logger is missing, so callers never need to check for
/// absence. Chaining builder methods on it keeps returning the same instance.
pub fn null_logger() -> Arc<dyn Logger> {
    Arc::clone(&NULL_LOGGER)
}

/// Logger that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn print(&self, _message: &str) {}
    fn printf(&self, _args: fmt::Arguments<'_>) {}
    fn println(&self, _message: &str) {}
    fn debug(&self, _message: &str) {}
    fn debugf(&self, _args: fmt::Arguments<'_>) {}
    fn info(&self, _message: &str) {}
    fn infof(&self, _args: fmt::Arguments<'_>) {}
    fn warn(&self, _message: &str) {}
    fn warnf(&self, _args: fmt::Arguments<'_>) {}
    fn error(&self, _message: &str) {}
    fn errorf(&self, _args: fmt::Arguments<'_>) {}
    fn fatal(&self, _message: &str) {}
    fn fatalf(&self, _args: fmt::Arguments<'_>) {}

    fn with_context(&self, _ctx: &Context) -> Arc<dyn Logger> {
        null_logger()
    }

    fn with_field(&self, _key: &str, _value: FieldValue) -> Arc<dyn Logger> {
        null_logger()
    }

    fn with_fields(&self, _fields: Fields) -> Arc<dyn Logger> {
        null_logger()
    }

    fn with_error(&self, _err: Option<&(dyn Error + 'static)>) -> Arc<dyn Logger> {
        null_logger()
    }

    fn sync(&self) -> Result<()> {
        Ok(())
    }
}
