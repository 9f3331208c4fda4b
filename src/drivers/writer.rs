//! Line-oriented driver writing formatted records to the config's output
//!
//! Driver options (`Config::extra`):
//! - `format`: `"text"` (default), `"json"` or `"logfmt"`
//! - `color`: colour the level in text output (requires the `color` feature)

use crate::core::{
    extract_fields, get_caller, Config, Context, FieldExtractor, FieldValue, Fields, Level,
    Logger, LoggerError, Output, OutputFormat, Record, Result, TimestampFormat, FIELD_ERROR,
};
use serde::Deserialize;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Registry name of this driver
pub const WRITER_DRIVER: &str = "writer";

// emit -> Logger method -> application code
const CALLER_SKIP: usize = 2;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WriterOptions {
    pub format: OutputFormat,
    pub color: bool,
}

struct Shared {
    output: Output,
    level: Level,
    timestamp_format: TimestampFormat,
    with_caller: bool,
    extractors: Vec<Arc<dyn FieldExtractor>>,
    options: WriterOptions,
}

/// Logger that renders each record as one line on an [`Output`]
///
/// Cloning is cheap; the sink and settings are shared, the field set is
/// copied on write by the builder methods.
#[derive(Clone)]
pub struct WriterLogger {
    shared: Arc<Shared>,
    fields: Arc<Fields>,
}

impl WriterLogger {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let options: WriterOptions = config.decode_extra()?;
        let output = config
            .output
            .ok_or_else(|| LoggerError::invalid_config("output is required"))?;

        Ok(Self {
            shared: Arc::new(Shared {
                output,
                level: config.level,
                timestamp_format: TimestampFormat::from_layout(&config.time_layout),
                with_caller: config.with_caller,
                extractors: config.field_extractors,
                options,
            }),
            fields: Arc::new(Fields::new()),
        })
    }

    /// Fields attached to this logger
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn level(&self) -> Level {
        self.shared.level
    }

    fn derive(&self, fields: Fields) -> Arc<dyn Logger> {
        Arc::new(Self {
            shared: Arc::clone(&self.shared),
            fields: Arc::new(fields),
        })
    }

    fn merged(&self, extra: Fields) -> Arc<dyn Logger> {
        if extra.is_empty() {
            return Arc::new(self.clone());
        }
        let mut fields = (*self.fields).clone();
        fields.extend(extra);
        self.derive(fields)
    }

    #[inline(never)]
    fn emit(&self, level: Level, args: fmt::Arguments<'_>) {
        if !self.shared.level.enabled(level) {
            return;
        }

        let caller = if self.shared.with_caller {
            get_caller(CALLER_SKIP)
        } else {
            None
        };
        let message = match args.as_str() {
            Some(text) => Record::new(level, text),
            None => Record::new(level, &args.to_string()),
        };
        let record = message.with_fields(&self.fields).with_caller(caller);

        let line = self.render(&record);
        if let Err(e) = self.shared.output.write_line(&line) {
            eprintln!(
                "[LOGGER ERROR] Writer output '{}' failed: {}",
                self.shared.output.name(),
                e
            );
        }
    }

    fn render(&self, record: &Record) -> String {
        let format = self.shared.options.format;
        #[cfg(feature = "color")]
        if self.shared.options.color {
            return format.format_colored(record, &self.shared.timestamp_format);
        }
        format.format(record, &self.shared.timestamp_format)
    }

    fn exit_after_fatal(&self) -> ! {
        if let Err(e) = self.sync() {
            eprintln!("[LOGGER ERROR] Flush before exit failed: {}", e);
        }
        std::process::exit(1)
    }
}

impl Logger for WriterLogger {
    #[inline(never)]
    fn print(&self, message: &str) {
        self.emit(Level::Info, format_args!("{}", message));
    }

    #[inline(never)]
    fn printf(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Info, args);
    }

    #[inline(never)]
    fn println(&self, message: &str) {
        self.emit(Level::Info, format_args!("{}", message.trim_end_matches('\n')));
    }

    #[inline(never)]
    fn debug(&self, message: &str) {
        self.emit(Level::Debug, format_args!("{}", message));
    }

    #[inline(never)]
    fn debugf(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Debug, args);
    }

    #[inline(never)]
    fn info(&self, message: &str) {
        self.emit(Level::Info, format_args!("{}", message));
    }

    #[inline(never)]
    fn infof(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Info, args);
    }

    #[inline(never)]
    fn warn(&self, message: &str) {
        self.emit(Level::Warn, format_args!("{}", message));
    }

    #[inline(never)]
    fn warnf(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Warn, args);
    }

    #[inline(never)]
    fn error(&self, message: &str) {
        self.emit(Level::Error, format_args!("{}", message));
    }

    #[inline(never)]
    fn errorf(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Error, args);
    }

    #[inline(never)]
    fn fatal(&self, message: &str) {
        self.emit(Level::Fatal, format_args!("{}", message));
        self.exit_after_fatal()
    }

    #[inline(never)]
    fn fatalf(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Fatal, args);
        self.exit_after_fatal()
    }

    fn with_context(&self, ctx: &Context) -> Arc<dyn Logger> {
        self.merged(extract_fields(ctx, &self.shared.extractors))
    }

    fn with_field(&self, key: &str, value: FieldValue) -> Arc<dyn Logger> {
        let mut fields = (*self.fields).clone();
        fields.insert(key.to_string(), value);
        self.derive(fields)
    }

    fn with_fields(&self, fields: Fields) -> Arc<dyn Logger> {
        self.merged(fields)
    }

    fn with_error(&self, err: Option<&(dyn Error + 'static)>) -> Arc<dyn Logger> {
        match err {
            Some(err) => self.with_field(FIELD_ERROR, FieldValue::String(err.to_string())),
            None => Arc::new(self.clone()),
        }
    }

    fn sync(&self) -> Result<()> {
        self.shared.output.flush().map_err(|e| {
            LoggerError::io_operation(
                "flushing output",
                format!("sink '{}' rejected flush", self.shared.output.name()),
                e,
            )
        })
    }
}

/// Driver constructor registered under [`WRITER_DRIVER`]
pub fn new_writer_logger(config: Config) -> Result<Arc<dyn Logger>> {
    Ok(Arc::new(WriterLogger::new(config)?))
}
