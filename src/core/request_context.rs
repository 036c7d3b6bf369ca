//! Request-scoped context attached to logger handles
//!
//! The logger stores a `RequestContext` but never reads it on its own; a
//! [`ContextEnricher`] configured on the root logger decides which parts of
//! it end up in emitted records.

use super::fields::{FieldValue, Fields};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Correlation data for one request or unit of work
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestContext {
    /// Trace ID for request correlation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,

    /// Span ID for this operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span_id: Option<String>,

    /// Parent span ID (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_span_id: Option<String>,

    /// Arbitrary request-scoped values
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub values: BTreeMap<String, FieldValue>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context carrying a trace and span id
    pub fn traced(trace_id: impl Into<String>, span_id: impl Into<String>) -> Self {
        Self {
            trace_id: Some(trace_id.into()),
            span_id: Some(span_id.into()),
            ..Self::default()
        }
    }

    /// Set parent span ID
    pub fn with_parent(mut self, parent_span_id: impl Into<String>) -> Self {
        self.parent_span_id = Some(parent_span_id.into());
        self
    }

    /// Attach an arbitrary value
    pub fn with_value<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn value(&self, key: &str) -> Option<&FieldValue> {
        self.values.get(key)
    }
}

/// Hook that turns a handle's request context into record fields
///
/// Enriched fields never replace reserved record keys or fields set through
/// `with_fields`.
pub type ContextEnricher = Arc<dyn Fn(&RequestContext) -> Fields + Send + Sync>;

/// Enricher that copies trace/span ids and every context value into the record
///
/// # Example
///
/// ```
/// use rust_context_logger::prelude::*;
///
/// let buffer = SharedBuffer::new();
/// let logger = Logger::builder()
///     .writer(buffer.clone())
///     .enricher(tracing_enricher())
///     .build();
///
/// logger
///     .with_context(RequestContext::traced("trace-1", "span-1"))
///     .info("handled");
///
/// assert!(buffer.contents().contains(r#""trace_id":"trace-1""#));
/// ```
pub fn tracing_enricher() -> ContextEnricher {
    Arc::new(|ctx: &RequestContext| {
        let mut fields = Fields::new();
        if let Some(trace_id) = &ctx.trace_id {
            fields.insert("trace_id", trace_id.as_str());
        }
        if let Some(span_id) = &ctx.span_id {
            fields.insert("span_id", span_id.as_str());
        }
        if let Some(parent) = &ctx.parent_span_id {
            fields.insert("parent_span_id", parent.as_str());
        }
        for (key, value) in &ctx.values {
            fields.insert(key.clone(), value.clone());
        }
        fields
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_traced_context() {
        let ctx = RequestContext::traced("trace-abc", "span-123").with_parent("span-000");

        assert_eq!(ctx.trace_id.as_deref(), Some("trace-abc"));
        assert_eq!(ctx.span_id.as_deref(), Some("span-123"));
        assert_eq!(ctx.parent_span_id.as_deref(), Some("span-000"));
    }

    #[test]
    fn test_context_values() {
        let ctx = RequestContext::new()
            .with_value("tenant", "acme")
            .with_value("attempt", 2);

        assert_eq!(ctx.value("tenant"), Some(&FieldValue::from("acme")));
        assert_eq!(ctx.value("attempt"), Some(&FieldValue::Int(2)));
        assert_eq!(ctx.value("missing"), None);
    }

    #[test]
    fn test_tracing_enricher_fields() {
        let ctx = RequestContext::traced("t", "s").with_value("tenant", "acme");
        let fields = tracing_enricher()(&ctx);

        assert_eq!(fields.len(), 3);
        assert_eq!(fields.get("trace_id"), Some(&FieldValue::from("t")));
        assert!(!fields.contains_key("parent_span_id"));
    }

    #[test]
    fn test_context_json_skips_empty() {
        let json = serde_json::to_string(&RequestContext::traced("t", "s")).unwrap();
        assert_eq!(json, r#"{"trace_id":"t","span_id":"s"}"#);
    }
}
