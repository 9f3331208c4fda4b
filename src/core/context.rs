//! Request-scoped context propagation
//!
//! A [`Context`] is an immutable chain of values. Attaching a value returns a
//! child context and leaves the parent untouched, so a context can be shared
//! freely across threads. Lookups return the value stored by the nearest
//! ancestor.
//!
//! Well-known slots (logger, request id, user id, trace id) and arbitrary named
//! fields live under separate typed keys. Two callers that pick the same field
//! name will see each other's values; they can never clobber a well-known slot.

use super::fields::FieldValue;
use super::logger::{null_logger, Logger};
use std::fmt;
use std::sync::Arc;

#[derive(Debug, PartialEq, Eq)]
enum ContextKey {
    Logger,
    RequestId,
    UserId,
    TraceId,
    Field(String),
}

enum ContextValue {
    Logger(Arc<dyn Logger>),
    Text(String),
    Field(FieldValue),
}

struct Node {
    key: ContextKey,
    value: ContextValue,
    parent: Option<Arc<Node>>,
}

/// Immutable, cheaply cloneable request-scoped context
///
/// # Example
///
/// ```
/// use rust_logger_facade::Context;
///
/// let root = Context::new();
/// let ctx = root.with_request_id("req-42").with_field("tenant", "acme");
///
/// assert_eq!(ctx.request_id(), "req-42");
/// assert_eq!(root.request_id(), "");
/// assert!(ctx.field("tenant").is_some());
/// ```
#[derive(Clone, Default)]
pub struct Context {
    head: Option<Arc<Node>>,
}

impl Context {
    /// Create an empty root context
    pub fn new() -> Self {
        Self { head: None }
    }

    fn with_value(&self, key: ContextKey, value: ContextValue) -> Self {
        Self {
            head: Some(Arc::new(Node {
                key,
                value,
                parent: self.head.clone(),
            })),
        }
    }

    fn lookup(&self, key: &ContextKey) -> Option<&ContextValue> {
        let mut node = self.head.as_deref();
        while let Some(current) = node {
            if current.key == *key {
                return Some(&current.value);
            }
            node = current.parent.as_deref();
        }
        None
    }

    fn text(&self, key: &ContextKey) -> &str {
        match self.lookup(key) {
            Some(ContextValue::Text(text)) => text,
            _ => "",
        }
    }

    /// Attach a logger
    #[must_use]
    pub fn with_logger(&self, logger: Arc<dyn Logger>) -> Self {
        self.with_value(ContextKey::Logger, ContextValue::Logger(logger))
    }

    /// The attached logger, or the shared null logger when none was attached
    pub fn logger(&self) -> Arc<dyn Logger> {
        match self.lookup(&ContextKey::Logger) {
            Some(ContextValue::Logger(logger)) => Arc::clone(logger),
            _ => null_logger(),
        }
    }

    #[must_use]
    pub fn with_request_id(&self, id: impl Into<String>) -> Self {
        self.with_value(ContextKey::RequestId, ContextValue::Text(id.into()))
    }

    /// The request id, or `""` when unset
    pub fn request_id(&self) -> &str {
        self.text(&ContextKey::RequestId)
    }

    #[must_use]
    pub fn with_user_id(&self, id: impl Into<String>) -> Self {
        self.with_value(ContextKey::UserId, ContextValue::Text(id.into()))
    }

    /// The user id, or `""` when unset
    pub fn user_id(&self) -> &str {
        self.text(&ContextKey::UserId)
    }

    #[must_use]
    pub fn with_trace_id(&self, id: impl Into<String>) -> Self {
        self.with_value(ContextKey::TraceId, ContextValue::Text(id.into()))
    }

    /// The distributed trace id, or `""` when unset
    pub fn trace_id(&self) -> &str {
        self.text(&ContextKey::TraceId)
    }

    /// Attach an arbitrary named field
    #[must_use]
    pub fn with_field<K, V>(&self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.with_value(
            ContextKey::Field(key.into()),
            ContextValue::Field(value.into()),
        )
    }

    pub fn field(&self, key: &str) -> Option<&FieldValue> {
        let mut node = self.head.as_deref();
        while let Some(current) = node {
            if let (ContextKey::Field(name), ContextValue::Field(value)) =
                (&current.key, &current.value)
            {
                if name == key {
                    return Some(value);
                }
            }
            node = current.parent.as_deref();
        }
        None
    }

    /// Number of values attached along the chain, shadowed ones included
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut node = self.head.as_deref();
        while let Some(current) = node {
            depth += 1;
            node = current.parent.as_deref();
        }
        depth
    }
}

/// The logger attached to `ctx`, falling back to the null logger
pub fn from_context(ctx: &Context) -> Arc<dyn Logger> {
    ctx.logger()
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys = Vec::new();
        let mut node = self.head.as_deref();
        while let Some(current) = node {
            keys.push(&current.key);
            node = current.parent.as_deref();
        }
        f.debug_struct("Context").field("keys", &keys).finish()
    }
}

impl Drop for Context {
    // Unlink iteratively so very long chains do not overflow the stack
    fn drop(&mut self) {
        let mut next = self.head.take();
        while let Some(node) = next {
            match Arc::try_unwrap(node) {
                Ok(mut node) => next = node.parent.take(),
                Err(_) => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::logger::NullLogger;

    #[test]
    fn test_string_slots_default_to_empty() {
        let ctx = Context::new();
        assert_eq!(ctx.request_id(), "");
        assert_eq!(ctx.user_id(), "");
        assert_eq!(ctx.trace_id(), "");
        assert!(ctx.field("anything").is_none());
    }

    #[test]
    fn test_round_trip() {
        let ctx = Context::new()
            .with_request_id("r1")
            .with_user_id("u1")
            .with_trace_id("t1");

        assert_eq!(ctx.request_id(), "r1");
        assert_eq!(ctx.user_id(), "u1");
        assert_eq!(ctx.trace_id(), "t1");
    }

    #[test]
    fn test_parent_is_not_mutated() {
        let parent = Context::new().with_request_id("parent");
        let child = parent.with_request_id("child");

        assert_eq!(parent.request_id(), "parent");
        assert_eq!(child.request_id(), "child");
        assert_eq!(parent.depth(), 1);
        assert_eq!(child.depth(), 2);
    }

    #[test]
    fn test_nearest_ancestor_wins() {
        let ctx = Context::new()
            .with_field("k", 1)
            .with_user_id("u1")
            .with_field("k", 2);

        assert_eq!(ctx.field("k"), Some(&FieldValue::Int(2)));
        assert_eq!(ctx.user_id(), "u1");
    }

    #[test]
    fn test_custom_fields_do_not_shadow_wellknown_slots() {
        let ctx = Context::new()
            .with_request_id("real")
            .with_field("request_id", "impostor");

        assert_eq!(ctx.request_id(), "real");
        assert_eq!(ctx.field("request_id"), Some(&FieldValue::from("impostor")));
    }

    #[test]
    fn test_missing_logger_is_null_object() {
        let logger = from_context(&Context::new());
        assert!(Arc::ptr_eq(&logger, &null_logger()));

        logger.info("dropped");
        logger.errorf(format_args!("dropped {}", 1));
        assert!(logger.sync().is_ok());
    }

    #[test]
    fn test_attached_logger_is_returned() {
        let logger: Arc<dyn Logger> = Arc::new(NullLogger);
        let ctx = Context::new().with_logger(Arc::clone(&logger));

        assert!(Arc::ptr_eq(&ctx.logger(), &logger));
    }

    #[test]
    fn test_shared_across_threads() {
        let ctx = Context::new().with_trace_id("t-shared");
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let ctx = ctx.clone();
                std::thread::spawn(move || {
                    let child = ctx.with_user_id(format!("u{}", i));
                    assert_eq!(child.trace_id(), "t-shared");
                    child.user_id().to_string()
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap(), format!("u{}", i));
        }
        assert_eq!(ctx.user_id(), "");
    }

    #[test]
    fn test_long_chain_drops_cleanly() {
        let mut ctx = Context::new();
        for i in 0..100_000 {
            ctx = ctx.with_field("n", i);
        }
        assert_eq!(ctx.field("n"), Some(&FieldValue::Int(99_999)));
        drop(ctx);
    }
}
