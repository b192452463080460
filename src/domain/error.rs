//! Error types for the Truthlens plugin.
//!
//! Two layers of errors live here:
//!
//! - [`TruthlensError`]: crate-wide failures (configuration, theme loading,
//!   I/O, serialization), surfaced through the [`Result`] alias.
//! - [`DispatchError`]: the outcome of a failed classification round-trip.
//!   These never propagate out of the dispatcher; they are logged and stored
//!   in the UI state so the renderer can show them.

use thiserror::Error;

/// The main error type for Truthlens plugin operations.
///
/// # Examples
///
/// ```
/// use truthlens::TruthlensError;
///
/// fn validate() -> Result<(), TruthlensError> {
///     Err(TruthlensError::Config("endpoint must be an http(s) URL".to_string()))
/// }
///
/// assert!(validate().is_err());
/// ```
#[derive(Debug, Error)]
pub enum TruthlensError {
    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Theme file could not be read or parsed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid.
    ///
    /// The string describes the specific configuration problem.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for Truthlens operations.
pub type Result<T> = std::result::Result<T, TruthlensError>;

/// Why a classification round-trip produced no result.
///
/// Stored in [`UiState::error`](crate::app::UiState) after a failed dispatch
/// and cleared when the next dispatch starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The service answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    RequestFailure {
        /// HTTP status code returned by the service.
        status: u16,
        /// Response body, decoded lossily as UTF-8.
        body: String,
    },

    /// The round-trip could not be completed or its payload was unusable.
    ///
    /// Covers malformed response bodies, request encoding failures and a
    /// missing web-access permission.
    #[error("transport failure: {reason}")]
    TransportFailure {
        /// Human-readable cause.
        reason: String,
    },
}

impl DispatchError {
    /// Short kind name used as a structured logging field.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::RequestFailure { .. } => "request_failure",
            Self::TransportFailure { .. } => "transport_failure",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_failure_message_carries_status_and_body() {
        let err = DispatchError::RequestFailure {
            status: 503,
            body: "model not loaded".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 503: model not loaded");
        assert_eq!(err.kind(), "request_failure");
    }

    #[test]
    fn serde_errors_convert_into_crate_error() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: TruthlensError = parse.into();
        assert!(matches!(err, TruthlensError::Serialization(_)));
    }
}
