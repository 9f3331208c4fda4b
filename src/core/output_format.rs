//! Output format configuration for log records
//!
//! Provides different output formats for log records:
//! - Text: Human-readable format (default)
//! - Json: Machine-readable JSON format
//! - Logfmt: Key-value format compatible with log aggregation tools

use super::fields::FieldValue;
use super::record::Record;
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};

/// Output format for log records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text format (default)
    ///
    /// Example: `2025-01-08T10:30:45.123Z [INFO ] Request processed request_id=r1`
    #[default]
    Text,

    /// JSON format for machine processing
    ///
    /// Example: `{"time":"2025-01-08T10:30:45.123Z","level":"info","msg":"Request processed"}`
    Json,

    /// Logfmt format (key=value pairs)
    ///
    /// Example: `time=2025-01-08T10:30:45.123Z level=info msg="Request processed"`
    Logfmt,
}

impl OutputFormat {
    /// Format a record according to this output format
    pub fn format(&self, record: &Record, timestamp_format: &TimestampFormat) -> String {
        match self {
            OutputFormat::Text => self.format_text(record, timestamp_format, false),
            OutputFormat::Json => self.format_json(record, timestamp_format),
            OutputFormat::Logfmt => self.format_logfmt(record, timestamp_format),
        }
    }

    /// Like [`format`](Self::format), colouring the level in text output
    #[cfg(feature = "color")]
    pub fn format_colored(&self, record: &Record, timestamp_format: &TimestampFormat) -> String {
        match self {
            OutputFormat::Text => self.format_text(record, timestamp_format, true),
            _ => self.format(record, timestamp_format),
        }
    }

    fn format_text(
        &self,
        record: &Record,
        timestamp_format: &TimestampFormat,
        colored_level: bool,
    ) -> String {
        let level = format!("{:5}", record.level.as_str().to_uppercase());
        #[cfg(feature = "color")]
        let level = if colored_level {
            use colored::Colorize;
            level.color(record.level.color_code()).to_string()
        } else {
            level
        };
        #[cfg(not(feature = "color"))]
        let _ = colored_level;

        let mut line = format!(
            "{} [{}] {}",
            timestamp_format.format(&record.timestamp),
            level,
            record.message
        );

        for (key, value) in &record.fields {
            line.push(' ');
            line.push_str(&format!("{}={}", key, value));
        }

        if let Some(ref caller) = record.caller {
            line.push_str(&format!(
                " caller={}:{} func={}",
                caller.file_name(),
                caller.line,
                caller.function
            ));
        }

        line
    }

    fn format_json(&self, record: &Record, timestamp_format: &TimestampFormat) -> String {
        let mut json_obj = serde_json::Map::new();

        // Fields first so the reserved keys below cannot be overwritten
        for (key, value) in &record.fields {
            json_obj.insert(key.clone(), value.to_json_value());
        }

        json_obj.insert(
            "time".to_string(),
            timestamp_format.to_json_value(&record.timestamp),
        );
        json_obj.insert(
            "level".to_string(),
            serde_json::Value::String(record.level.as_str().to_string()),
        );
        json_obj.insert(
            "msg".to_string(),
            serde_json::Value::String(record.message.clone()),
        );

        if let Some(ref caller) = record.caller {
            json_obj.insert(
                "caller".to_string(),
                serde_json::Value::String(format!("{}:{}", caller.file_name(), caller.line)),
            );
            json_obj.insert(
                "func".to_string(),
                serde_json::Value::String(caller.function.clone()),
            );
        }

        serde_json::to_string(&serde_json::Value::Object(json_obj)).unwrap_or_default()
    }

    fn format_logfmt(&self, record: &Record, timestamp_format: &TimestampFormat) -> String {
        let mut parts = Vec::with_capacity(record.fields.len() + 4);

        parts.push(format!(
            "time={}",
            self.escape_logfmt_value(&timestamp_format.format(&record.timestamp))
        ));
        parts.push(format!("level={}", record.level.as_str()));

        // Message is always quoted
        parts.push(format!("msg={}", self.quote_logfmt_value(&record.message)));

        for (key, value) in &record.fields {
            let formatted_value = match value {
                FieldValue::String(s) => self.escape_logfmt_value(s),
                other => other.to_string(),
            };
            parts.push(format!("{}={}", self.escape_logfmt_key(key), formatted_value));
        }

        if let Some(ref caller) = record.caller {
            parts.push(format!(
                "caller={}:{}",
                self.escape_logfmt_value(caller.file_name()),
                caller.line
            ));
            parts.push(format!("func={}", self.escape_logfmt_value(&caller.function)));
        }

        parts.join(" ")
    }

    /// Escape a logfmt key (remove spaces and special chars)
    fn escape_logfmt_key(&self, key: &str) -> String {
        key.chars()
            .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
            .collect()
    }

    /// Escape a logfmt value (quote if contains spaces)
    fn escape_logfmt_value(&self, value: &str) -> String {
        if value.is_empty() || value.contains(' ') || value.contains('"') || value.contains('=') {
            self.quote_logfmt_value(value)
        } else {
            value.to_string()
        }
    }

    fn quote_logfmt_value(&self, value: &str) -> String {
        format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
    }
}
