//! # Rust Logger Facade
//!
//! A backend-agnostic structured logging facade. Application code depends on
//! the [`Logger`] trait and the [`Context`] propagation protocol; concrete
//! backends plug in through a [`DriverRegistry`].
//!
//! ## Features
//!
//! - **Pluggable Drivers**: Name-keyed constructors, first registration wins
//! - **Immutable Builders**: `with_field`, `with_fields`, `with_context` and
//!   `with_error` return new loggers and never mutate the receiver
//! - **Context Extraction**: Request, user and trace ids (or any custom field)
//!   flow from a request-scoped context into log records
//! - **Null Object**: A missing logger is always a safe no-op
//!
//! ## Example
//!
//! ```
//! use rust_logger_facade::prelude::*;
//!
//! let registry = DriverRegistry::with_builtin_drivers();
//! let logger = registry.create(WRITER_DRIVER, Config::new(Output::stdout()))?;
//!
//! let ctx = Context::new()
//!     .with_request_id("req-7")
//!     .with_logger(logger);
//!
//! from_context(&ctx)
//!     .with_context(&ctx)
//!     .with_field("status", 200.into())
//!     .info("request served");
//! # Ok::<(), LoggerError>(())
//! ```

pub mod core;
pub mod drivers;
pub mod macros;

pub mod prelude {
    pub use crate::core::{
        default_extractors, extract_fields, from_context, get_caller, null_logger, Caller,
        Config, Context, DriverRegistry, FieldExtractor, FieldValue, Fields, Level, Logger,
        LoggerError, NullLogger, Output, Result,
    };
    pub use crate::drivers::{WriterLogger, WRITER_DRIVER};
}

pub use crate::core::{
    cached_call_sites, default_extractors, extract_fields, from_context, get_caller,
    null_logger, Caller, Config, Constructor, Context, DriverRegistry, FieldExtractor,
    FieldValue, Fields, Level, Logger, LoggerError, NullLogger, Output, OutputFormat, Record,
    RequestIdExtractor, Result, TimestampFormat, TraceIdExtractor, UserIdExtractor,
    FIELD_ERROR, FIELD_REQUEST_ID, FIELD_TRACE_ID, FIELD_USER_ID,
};
pub use crate::drivers::{WriterLogger, WriterOptions, WRITER_DRIVER};
