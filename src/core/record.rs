//! A single log record as seen by a formatter

use super::caller::Caller;
use super::fields::{FieldValue, Fields};
use super::level::Level;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct Record {
    pub level: Level,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    /// Structured fields, sorted by key for stable output
    pub fields: BTreeMap<String, FieldValue>,
    pub caller: Option<Caller>,
}

impl Record {
    /// Sanitize log text to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// so one record always renders as one line. Applies to the message,
    /// field keys and string field values.
    fn sanitize(text: &str) -> String {
        text
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(level: Level, message: &str) -> Self {
        Self {
            level,
            message: Self::sanitize(message),
            timestamp: Utc::now(),
            fields: BTreeMap::new(),
            caller: None,
        }
    }

    pub fn with_fields(mut self, fields: &Fields) -> Self {
        self.fields.extend(fields.iter().map(|(k, v)| {
            let value = match v {
                FieldValue::String(s) => FieldValue::String(Self::sanitize(s)),
                other => other.clone(),
            };
            (Self::sanitize(k), value)
        }));
        self
    }

    pub fn with_caller(mut self, caller: Option<Caller>) -> Self {
        self.caller = caller;
        self
    }
}
