//! Analysis dispatcher: the only code that mutates [`UiState`] and [`History`].
//!
//! A dispatch is split across the single suspension point of the plugin
//! runtime, the host HTTP round-trip:
//!
//! 1. [`begin`] validates, enters the loading state and hands back the
//!    [`PendingRequest`] for the shim to send.
//! 2. [`settle`] consumes the host's answer, publishes the result (or the
//!    error) and leaves the loading state.
//!
//! At most one request is in flight. Submissions while loading are rejected,
//! and settlements carrying a request id other than the in-flight one are
//! dropped without touching state.
//!
//! [`UiState`]: super::UiState
//! [`History`]: super::History

use super::state::AppState;
use super::validator::can_submit;
use crate::domain::{AnalysisRequest, AnalysisResult, DispatchError};
use crate::transport::{interpret_settlement, PendingRequest, TraceContext};
use tracing_opentelemetry::OpenTelemetrySpanExt;

/// The request currently awaiting settlement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InFlight {
    pub request_id: u64,
    /// Kept to attach the original text to the result.
    pub request: AnalysisRequest,
}

/// Starts a dispatch for the current input buffer.
///
/// Returns the request to send, or `None` when nothing should go out:
///
/// - blank input: silently ignored
/// - a request is already in flight: rejected
/// - web access not granted or the body cannot be encoded: the failure is
///   recorded in `UiState::error`
///
/// `loading` is set before this returns, so it is observable before the
/// request is issued.
pub fn begin(state: &mut AppState) -> Option<PendingRequest> {
    if !can_submit(&state.input) {
        return None;
    }

    if let Some(in_flight) = &state.in_flight {
        tracing::debug!(
            in_flight_request_id = in_flight.request_id,
            "submission rejected, a request is already in flight"
        );
        return None;
    }

    if !state.web_access {
        record_failure(
            state,
            DispatchError::TransportFailure {
                reason: "web access permission has not been granted".to_string(),
            },
        );
        return None;
    }

    let request_id = state.next_request_id;
    state.next_request_id += 1;

    let span = tracing::debug_span!("dispatch", request_id = request_id);
    let _guard = span.enter();

    let request = AnalysisRequest::new(state.input.clone());
    match PendingRequest::new(request_id, &state.endpoint, &request) {
        Ok(pending) => {
            state.ui.loading = true;
            state.ui.error = None;
            state.in_flight = Some(InFlight {
                request_id,
                request,
            });

            tracing::debug!(
                endpoint = %pending.url,
                text_len = pending.body.len(),
                "classification request issued"
            );
            Some(pending)
        }
        Err(e) => {
            record_failure(
                state,
                DispatchError::TransportFailure {
                    reason: format!("could not encode request: {e}"),
                },
            );
            None
        }
    }
}

/// Completes the in-flight dispatch with the host's answer.
///
/// Returns `false` if the settlement was stale and ignored.
pub fn settle(
    state: &mut AppState,
    request_id: u64,
    status: u16,
    body: &[u8],
    trace_context: Option<&TraceContext>,
) -> bool {
    let span = tracing::debug_span!(
        "settle",
        request_id = request_id,
        status = status,
        issued_trace_id = trace_context.map_or("", |t| t.trace_id.as_str()),
        issued_span_id = trace_context.map_or("", |t| t.parent_span_id.as_str()),
    );
    if let Some(parent) = trace_context.and_then(TraceContext::to_parent_context) {
        span.set_parent(parent);
    }
    let _guard = span.enter();

    let is_current = state
        .in_flight
        .as_ref()
        .is_some_and(|f| f.request_id == request_id);
    if !is_current {
        tracing::debug!(
            in_flight_request_id = ?state.in_flight.as_ref().map(|f| f.request_id),
            "discarding settlement for a request that is not in flight"
        );
        return false;
    }
    let Some(in_flight) = state.in_flight.take() else {
        return false;
    };

    match interpret_settlement(status, body) {
        Ok(raw) => {
            let result = AnalysisResult::from_response(in_flight.request.text, raw);
            tracing::debug!(
                prediction = %result.prediction,
                confidence = %result.confidence,
                "classification succeeded"
            );
            state.ui.current_result = Some(result.clone());
            state.history.push(result);
            state.follow_history_growth();
        }
        Err(err) => record_failure(state, err),
    }

    state.ui.loading = false;
    true
}

/// Reports a failed dispatch to the diagnostic channel and the UI state.
fn record_failure(state: &mut AppState, err: DispatchError) {
    tracing::error!(kind = err.kind(), error = %err, "classification dispatch failed");
    state.ui.error = Some(err);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::Theme;

    fn ready_state(input: &str) -> AppState {
        let mut state = AppState::new("http://127.0.0.1:8000/predict", Theme::default(), None);
        state.web_access = true;
        state.input = input.to_string();
        state
    }

    #[test]
    fn blank_input_issues_nothing() {
        let mut state = ready_state("   \n ");
        assert!(begin(&mut state).is_none());
        assert!(!state.ui().loading);
        assert!(state.ui().error.is_none());
        assert!(state.history().is_empty());
    }

    #[test]
    fn loading_spans_issuance_to_settlement() {
        let mut state = ready_state("claim");
        assert!(!state.ui().loading);

        let pending = begin(&mut state).unwrap();
        assert!(state.ui().loading);

        assert!(settle(&mut state, pending.request_id, 200, br#"{"label":"Real","confidence":0.5}"#, None));
        assert!(!state.ui().loading);
        assert_eq!(state.history().len(), 1);
    }

    #[test]
    fn second_submission_while_loading_is_rejected() {
        let mut state = ready_state("claim");
        let first = begin(&mut state).unwrap();
        assert!(begin(&mut state).is_none());
        assert_eq!(state.in_flight_request_id(), Some(first.request_id));
    }

    #[test]
    fn stale_settlement_is_ignored() {
        let mut state = ready_state("claim");
        let pending = begin(&mut state).unwrap();

        assert!(!settle(&mut state, pending.request_id + 1, 200, b"{}", None));
        assert!(state.ui().loading);
        assert!(state.history().is_empty());
    }

    #[test]
    fn missing_permission_is_reported_without_loading() {
        let mut state = ready_state("claim");
        state.web_access = false;

        assert!(begin(&mut state).is_none());
        assert!(!state.ui().loading);
        assert!(matches!(
            state.ui().error,
            Some(DispatchError::TransportFailure { .. })
        ));
    }

    #[test]
    fn failure_keeps_previous_result() {
        let mut state = ready_state("first");
        let ok = begin(&mut state).unwrap();
        settle(&mut state, ok.request_id, 200, br#"{"label":"Fake","confidence":0.9}"#, None);

        state.input = "second".to_string();
        let failed = begin(&mut state).unwrap();
        assert!(state.ui().error.is_none());
        settle(&mut state, failed.request_id, 500, b"boom", None);

        assert_eq!(
            state.ui().current_result.as_ref().map(|r| r.text.as_str()),
            Some("first")
        );
        assert_eq!(state.history().len(), 1);
        assert_eq!(
            state.ui().error,
            Some(DispatchError::RequestFailure {
                status: 500,
                body: "boom".to_string()
            })
        );
    }
}
