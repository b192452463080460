//! Interpretation of settled HTTP round-trips.

use crate::domain::{DispatchError, RawAnalysisResponse};

/// Whether a status code counts as success.
#[must_use]
pub fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Turns a settlement into a raw response or a dispatch error.
///
/// Non-2xx statuses become [`DispatchError::RequestFailure`] with the body
/// kept as diagnostic text. A 2xx body that is not a JSON object of the
/// expected shape becomes [`DispatchError::TransportFailure`].
///
/// # Errors
///
/// See above; never panics on arbitrary bytes.
pub fn interpret_settlement(
    status: u16,
    body: &[u8],
) -> Result<RawAnalysisResponse, DispatchError> {
    if !is_success(status) {
        return Err(DispatchError::RequestFailure {
            status,
            body: String::from_utf8_lossy(body).into_owned(),
        });
    }

    serde_json::from_slice(body).map_err(|e| DispatchError::TransportFailure {
        reason: format!("malformed response body: {e}"),
    })
}
