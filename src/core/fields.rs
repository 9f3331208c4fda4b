//! Structured field values and the context field-extraction pipeline
//!
//! This module provides:
//! - `FieldValue`: the value type of a structured field
//! - `FieldExtractor`: recovers a field map from a [`Context`]
//! - `extract_fields`: runs an ordered list of extractors and merges the results

use super::context::Context;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

pub const FIELD_REQUEST_ID: &str = "request_id";
pub const FIELD_USER_ID: &str = "user_id";
pub const FIELD_TRACE_ID: &str = "trace_id";
pub const FIELD_ERROR: &str = "error";

/// String-keyed structured fields
pub type Fields = HashMap<String, FieldValue>;

/// Value type for structured logging fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Null => write!(f, "null"),
        }
    }
}

impl FieldValue {
    /// Convert to serde_json::Value for JSON serialization
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            FieldValue::String(s) => serde_json::Value::String(s.clone()),
            FieldValue::Int(i) => serde_json::Value::Number((*i).into()),
            FieldValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            FieldValue::Bool(b) => serde_json::Value::Bool(*b),
            FieldValue::Null => serde_json::Value::Null,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<u32> for FieldValue {
    fn from(i: u32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

/// Recovers structured fields from a request-scoped [`Context`].
///
/// Returning `None` (or an empty map) means the extractor has nothing to
/// contribute. Any `Fn(&Context) -> Option<Fields>` closure is an extractor:
///
/// ```
/// use rust_logger_facade::{extract_fields, Context, FieldExtractor, Fields};
/// use std::sync::Arc;
///
/// let tenant = |ctx: &Context| {
///     ctx.field("tenant")
///         .map(|v| Fields::from([("tenant".to_string(), v.clone())]))
/// };
/// let extractors: Vec<Arc<dyn FieldExtractor>> = vec![Arc::new(tenant)];
///
/// let ctx = Context::new().with_field("tenant", "acme");
/// let fields = extract_fields(&ctx, &extractors);
/// assert_eq!(fields["tenant"], "acme".into());
/// ```
pub trait FieldExtractor: Send + Sync {
    fn extract(&self, ctx: &Context) -> Option<Fields>;
}

impl<F> FieldExtractor for F
where
    F: Fn(&Context) -> Option<Fields> + Send + Sync,
{
    fn extract(&self, ctx: &Context) -> Option<Fields> {
        self(ctx)
    }
}

fn single_field(key: &str, value: &str) -> Option<Fields> {
    if value.is_empty() {
        return None;
    }
    let mut fields = Fields::with_capacity(1);
    fields.insert(key.to_string(), FieldValue::from(value));
    Some(fields)
}

/// Emits `request_id` when the context carries one
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestIdExtractor;

impl FieldExtractor for RequestIdExtractor {
    fn extract(&self, ctx: &Context) -> Option<Fields> {
        single_field(FIELD_REQUEST_ID, ctx.request_id())
    }
}

/// Emits `user_id` when the context carries one
#[derive(Debug, Clone, Copy, Default)]
pub struct UserIdExtractor;

impl FieldExtractor for UserIdExtractor {
    fn extract(&self, ctx: &Context) -> Option<Fields> {
        single_field(FIELD_USER_ID, ctx.user_id())
    }
}

/// Emits `trace_id` when the context carries one
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceIdExtractor;

impl FieldExtractor for TraceIdExtractor {
    fn extract(&self, ctx: &Context) -> Option<Fields> {
        single_field(FIELD_TRACE_ID, ctx.trace_id())
    }
}

/// The extractors used when a config supplies none: request, user, trace
pub fn default_extractors() -> Vec<Arc<dyn FieldExtractor>> {
    vec![
        Arc::new(RequestIdExtractor),
        Arc::new(UserIdExtractor),
        Arc::new(TraceIdExtractor),
    ]
}

/// Run `extractors` over `ctx` in order and merge their output.
///
/// Later extractors overwrite earlier ones on key collision. An empty list is
/// replaced by [`default_extractors`].
pub fn extract_fields(ctx: &Context, extractors: &[Arc<dyn FieldExtractor>]) -> Fields {
    if extractors.is_empty() {
        return merge_extracted(ctx, &default_extractors());
    }
    merge_extracted(ctx, extractors)
}

fn merge_extracted(ctx: &Context, extractors: &[Arc<dyn FieldExtractor>]) -> Fields {
    let mut fields = Fields::new();
    for extractor in extractors {
        if let Some(extracted) = extractor.extract(ctx) {
            fields.extend(extracted);
        }
    }
    fields
}
