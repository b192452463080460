//! Outbound request construction and host-context encoding.
//!
//! The Zellij host performs the HTTP call and hands back the settlement along
//! with an opaque string map (the request context). Truthlens stores the
//! request id and the issuing span's trace context there so settlements can
//! be matched to the in-flight request and correlated in traces.

use crate::domain::error::Result;
use crate::domain::AnalysisRequest;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Context key holding the request id.
pub const CONTEXT_REQUEST_ID: &str = "truthlens.request_id";

/// Context key holding the issuing trace id.
pub const CONTEXT_TRACE_ID: &str = "truthlens.trace_id";

/// Context key holding the issuing span id.
pub const CONTEXT_PARENT_SPAN_ID: &str = "truthlens.parent_span_id";

/// Distributed tracing context carried across the HTTP round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Span ID of the dispatch span that issued the request.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the trace and span IDs of the current tracing span.
    ///
    /// Returns `None` when no OpenTelemetry layer is installed or the span
    /// context is invalid.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }

    /// Rebuilds an OpenTelemetry context whose remote parent is the issuing
    /// span, so the settlement span joins the dispatch trace.
    ///
    /// Returns `None` if either id is not valid hex.
    #[must_use]
    pub fn to_parent_context(&self) -> Option<opentelemetry::Context> {
        use opentelemetry::trace::{
            SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
        };

        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(opentelemetry::Context::new().with_remote_span_context(span_context))
    }
}

/// A fully prepared classification request, ready for the host to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    /// Token matching the settlement back to the dispatch that issued it.
    pub request_id: u64,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    /// JSON-encoded [`AnalysisRequest`].
    pub body: Vec<u8>,
    pub trace_context: Option<TraceContext>,
}

impl PendingRequest {
    /// Builds a JSON POST for `request` against `url`.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the body cannot be encoded.
    pub fn new(request_id: u64, url: &str, request: &AnalysisRequest) -> Result<Self> {
        let body = serde_json::to_vec(request)?;

        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        Ok(Self {
            request_id,
            url: url.to_string(),
            headers,
            body,
            trace_context: TraceContext::from_current(),
        })
    }

    /// Encodes the request id and trace context for the host.
    #[must_use]
    pub fn context(&self) -> BTreeMap<String, String> {
        let mut context = BTreeMap::new();
        context.insert(CONTEXT_REQUEST_ID.to_string(), self.request_id.to_string());
        if let Some(trace) = &self.trace_context {
            context.insert(CONTEXT_TRACE_ID.to_string(), trace.trace_id.clone());
            context.insert(
                CONTEXT_PARENT_SPAN_ID.to_string(),
                trace.parent_span_id.clone(),
            );
        }
        context
    }
}

/// Extracts the request id from a settlement context.
///
/// Returns `None` for settlements that were not issued by Truthlens or whose
/// id does not parse.
#[must_use]
pub fn request_id_from_context(context: &BTreeMap<String, String>) -> Option<u64> {
    context.get(CONTEXT_REQUEST_ID)?.parse().ok()
}

/// Extracts the trace context from a settlement context, if both ids are present.
#[must_use]
pub fn trace_context_from_context(context: &BTreeMap<String, String>) -> Option<TraceContext> {
    Some(TraceContext {
        trace_id: context.get(CONTEXT_TRACE_ID)?.clone(),
        parent_span_id: context.get(CONTEXT_PARENT_SPAN_ID)?.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_json_post() {
        let request = AnalysisRequest::new("Breaking: moon made of cheese");
        let pending = PendingRequest::new(7, "http://127.0.0.1:8000/predict", &request).unwrap();

        assert_eq!(pending.url, "http://127.0.0.1:8000/predict");
        assert_eq!(
            pending.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
        let body: serde_json::Value = serde_json::from_slice(&pending.body).unwrap();
        assert_eq!(body, serde_json::json!({"text": "Breaking: moon made of cheese"}));
    }

    #[test]
    fn context_carries_request_id_and_trace() {
        let mut pending =
            PendingRequest::new(42, "http://localhost/predict", &AnalysisRequest::new("x")).unwrap();
        pending.trace_context = Some(TraceContext {
            trace_id: "0af7651916cd43dd8448eb211c80319c".to_string(),
            parent_span_id: "b7ad6b7169203331".to_string(),
        });

        let context = pending.context();
        assert_eq!(request_id_from_context(&context), Some(42));
        assert_eq!(trace_context_from_context(&context), pending.trace_context);
    }

    #[test]
    fn parent_context_requires_valid_hex_ids() {
        use opentelemetry::trace::TraceContextExt;

        let valid = TraceContext {
            trace_id: "0af7651916cd43dd8448eb211c80319c".to_string(),
            parent_span_id: "b7ad6b7169203331".to_string(),
        };
        let parent = valid.to_parent_context().unwrap();
        assert!(parent.span().span_context().is_remote());

        let invalid = TraceContext {
            trace_id: "zz".to_string(),
            parent_span_id: "b7ad6b7169203331".to_string(),
        };
        assert!(invalid.to_parent_context().is_none());
    }

    #[test]
    fn foreign_context_has_no_request_id() {
        let mut context = BTreeMap::new();
        context.insert("other".to_string(), "1".to_string());
        assert_eq!(request_id_from_context(&context), None);

        context.insert(CONTEXT_REQUEST_ID.to_string(), "not-a-number".to_string());
        assert_eq!(request_id_from_context(&context), None);
    }
}
