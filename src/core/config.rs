//! Driver configuration
//!
//! A [`Config`] is consumed by a driver constructor. The core only checks that
//! an output sink is present; every other field is interpreted by the driver.

use super::{
    error::{LoggerError, Result},
    fields::FieldExtractor,
    level::Level,
};
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

/// Cloneable, thread-safe handle over a writable sink
#[derive(Clone)]
pub struct Output {
    inner: Arc<Mutex<Box<dyn Write + Send>>>,
    name: &'static str,
}

impl Output {
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Box::new(writer))),
            name: "writer",
        }
    }

    pub fn stdout() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Box::new(io::stdout()))),
            name: "stdout",
        }
    }

    pub fn stderr() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Box::new(io::stderr()))),
            name: "stderr",
        }
    }

    /// Write `line` followed by a newline as one locked operation
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut writer = self.inner.lock();
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")
    }

    pub fn flush(&self) -> io::Result<()> {
        self.inner.lock().flush()
    }

    pub fn name(&self) -> &str {
        self.name
    }
}

impl fmt::Debug for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Output").field("name", &self.name).finish()
    }
}

/// Configuration handed to a driver constructor
///
/// # Example
///
/// ```
/// use rust_logger_facade::prelude::*;
///
/// let config = Config::new(Output::stderr())
///     .level(Level::Debug)
///     .time_layout("%H:%M:%S")
///     .with_caller(true)
///     .extra("format", "json");
///
/// assert!(config.validate().is_ok());
/// assert!(Config::default().validate().is_err());
/// ```
#[derive(Clone, Default)]
pub struct Config {
    /// Minimum level that gets emitted
    pub level: Level,

    /// Destination sink (required)
    pub output: Option<Output>,

    /// Timestamp layout, interpreted by the driver
    pub time_layout: String,

    /// Whether to record the calling file, line and function
    pub with_caller: bool,

    /// Extractors run by `with_context`; empty means the default set
    pub field_extractors: Vec<Arc<dyn FieldExtractor>>,

    /// Driver-specific options, decoded by the driver with [`Config::decode_extra`]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Config {
    /// Create a config writing to `output`, everything else at defaults
    pub fn new(output: Output) -> Self {
        Self {
            output: Some(output),
            ..Self::default()
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn output(mut self, output: Output) -> Self {
        self.output = Some(output);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn time_layout(mut self, layout: impl Into<String>) -> Self {
        self.time_layout = layout.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_caller(mut self, enabled: bool) -> Self {
        self.with_caller = enabled;
        self
    }

    /// Append an extractor; order of calls is the merge order
    #[must_use = "builder methods return a new value"]
    pub fn field_extractor<E: FieldExtractor + 'static>(mut self, extractor: E) -> Self {
        self.field_extractors.push(Arc::new(extractor));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn extra(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Check the fields the core depends on
    pub fn validate(&self) -> Result<()> {
        if self.output.is_none() {
            return Err(LoggerError::invalid_config("output is required"));
        }
        Ok(())
    }

    /// Decode the `extra` bag into a driver's own option type
    pub fn decode_extra<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(serde_json::Value::Object(self.extra.clone()))
            .map_err(|e| LoggerError::invalid_config(format!("extra: {}", e)))
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("level", &self.level)
            .field("output", &self.output)
            .field("time_layout", &self.time_layout)
            .field("with_caller", &self.with_caller)
            .field("field_extractors", &self.field_extractors.len())
            .field("extra", &self.extra)
            .finish()
    }
}
