//! Core facade types and traits

pub mod caller;
pub mod config;
pub mod context;
pub mod error;
pub mod fields;
pub mod level;
pub mod logger;
pub mod output_format;
pub mod record;
pub mod registry;
pub mod timestamp;

pub use caller::{cached_call_sites, get_caller, Caller};
pub use config::{Config, Output};
pub use context::{from_context, Context};
pub use error::{LoggerError, Result};
pub use fields::{
    default_extractors, extract_fields, FieldExtractor, FieldValue, Fields, RequestIdExtractor,
    TraceIdExtractor, UserIdExtractor, FIELD_ERROR, FIELD_REQUEST_ID, FIELD_TRACE_ID,
    FIELD_USER_ID,
};
pub use level::Level;
pub use logger::{null_logger, Logger, NullLogger};
pub use output_format::OutputFormat;
pub use record::Record;
pub use registry::{Constructor, DriverRegistry};
pub use timestamp::TimestampFormat;
