//! Analysis domain model: what is sent to the classifier, what comes back,
//! and the display-ready result derived from it.
//!
//! The collaborator's payload is untrusted: every attribute is optional and
//! defaulted during normalization. Normalization is deterministic, so the same
//! raw response and submitted text always yield the same [`AnalysisResult`].

use serde::{Deserialize, Serialize};

/// Prediction shown when the service does not return a label.
pub const UNKNOWN_PREDICTION: &str = "Unknown";

/// Number of seconds in one minute.
const SECONDS_PER_MINUTE: i64 = 60;

/// Number of seconds in one hour.
const SECONDS_PER_HOUR: i64 = 3600;

/// Number of seconds in one day.
const SECONDS_PER_DAY: i64 = 86400;

/// Body of a classification request.
///
/// Serializes to exactly `{"text": "..."}`. The text is the input buffer as
/// typed, untrimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub text: String,
}

impl AnalysisRequest {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Payload returned by the classification service on success.
///
/// All fields are optional. Unknown fields are ignored. Fields are strictly
/// typed: a non-string `label` or a non-numeric `confidence` makes the whole
/// body malformed rather than being coerced for display.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawAnalysisResponse {
    /// Predicted label, typically `"Real"` or `"Fake"`.
    pub label: Option<String>,
    /// Probability of the predicted label in `0..=1`.
    pub confidence: Option<f64>,
    /// Optional free-form explanation (e.g. "No known vocabulary words").
    pub note: Option<String>,
}

/// Display-ready outcome of one classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    /// The submitted text, exactly as sent.
    pub text: String,
    /// Service label, or [`UNKNOWN_PREDICTION`] when absent.
    pub prediction: String,
    /// Confidence as a percentage with exactly two decimals, e.g. `"87.32"`.
    pub confidence: String,
    /// Extra detail from the service, if it sent any.
    pub analysis: Option<String>,
}

impl AnalysisResult {
    /// Normalizes a raw service response into a display result.
    ///
    /// - `prediction`: label, or `"Unknown"`
    /// - `confidence`: `(confidence or 0) * 100` with two decimals, not clamped
    /// - `analysis`: the service note, if any
    ///
    /// # Examples
    ///
    /// ```
    /// use truthlens::domain::{AnalysisResult, RawAnalysisResponse};
    ///
    /// let raw = RawAnalysisResponse {
    ///     label: Some("Real".to_string()),
    ///     confidence: Some(0.8732),
    ///     note: None,
    /// };
    /// let result = AnalysisResult::from_response("Water is wet.".to_string(), raw);
    /// assert_eq!(result.prediction, "Real");
    /// assert_eq!(result.confidence, "87.32");
    /// ```
    #[must_use]
    pub fn from_response(text: String, raw: RawAnalysisResponse) -> Self {
        Self {
            text,
            prediction: raw
                .label
                .unwrap_or_else(|| UNKNOWN_PREDICTION.to_string()),
            confidence: format_confidence(raw.confidence.unwrap_or(0.0)),
            analysis: raw.note,
        }
    }

    #[must_use]
    pub fn verdict(&self) -> Verdict {
        Verdict::from_label(&self.prediction)
    }

    /// Confidence as a number for layout purposes (bar width).
    ///
    /// Falls back to `0.0` if the stored string is not numeric.
    #[must_use]
    pub fn confidence_percent(&self) -> f64 {
        self.confidence.parse().unwrap_or(0.0)
    }
}

/// Formats a `0..=1` probability as a percentage with two decimals.
///
/// Ties round half away from zero (`0.125` becomes `"0.13"`) and a zero
/// result never carries a sign. Out-of-range inputs are formatted as-is.
#[must_use]
pub fn format_confidence(probability: f64) -> String {
    let hundredths = (probability * 100.0 * 100.0).round();
    let percent = if hundredths == 0.0 { 0.0 } else { hundredths / 100.0 };
    format!("{percent:.2}")
}

/// Display category of a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Real,
    Fake,
    Unknown,
}

impl Verdict {
    /// Maps a label to a verdict. Matching is exact; anything other than
    /// `"Real"` or `"Fake"` is [`Verdict::Unknown`].
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label {
            "Real" => Self::Real,
            "Fake" => Self::Fake,
            _ => Self::Unknown,
        }
    }
}

/// A recorded result plus the time it settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub result: AnalysisResult,
    /// Unix timestamp (seconds) of settlement.
    pub recorded_at: i64,
}

impl HistoryEntry {
    #[must_use]
    pub fn new(result: AnalysisResult) -> Self {
        Self {
            result,
            recorded_at: chrono::Utc::now().timestamp(),
        }
    }

    /// Human-readable age of the entry relative to `now` (unix seconds).
    ///
    /// - under a minute: "just now"
    /// - under an hour: "Xm ago"
    /// - under a day: "Xh ago"
    /// - otherwise: "Xd ago"
    #[must_use]
    pub fn time_ago(&self, now: i64) -> String {
        let diff = now - self.recorded_at;

        if diff < SECONDS_PER_MINUTE {
            "just now".to_string()
        } else if diff < SECONDS_PER_HOUR {
            format!("{}m ago", diff / SECONDS_PER_MINUTE)
        } else if diff < SECONDS_PER_DAY {
            format!("{}h ago", diff / SECONDS_PER_HOUR)
        } else {
            format!("{}d ago", diff / SECONDS_PER_DAY)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(label: Option<&str>, confidence: Option<f64>) -> RawAnalysisResponse {
        RawAnalysisResponse {
            label: label.map(String::from),
            confidence,
            note: None,
        }
    }

    #[test]
    fn normalizes_label_and_confidence() {
        let result = AnalysisResult::from_response("t".into(), raw(Some("Real"), Some(0.8732)));
        assert_eq!(result.prediction, "Real");
        assert_eq!(result.confidence, "87.32");
        assert_eq!(result.analysis, None);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let result = AnalysisResult::from_response("t".into(), raw(None, None));
        assert_eq!(result.prediction, "Unknown");
        assert_eq!(result.confidence, "0.00");
        assert_eq!(result.verdict(), Verdict::Unknown);
    }

    #[test]
    fn confidence_is_not_clamped() {
        assert_eq!(format_confidence(1.5), "150.00");
        assert_eq!(format_confidence(1.0), "100.00");
    }

    #[test]
    fn confidence_ties_round_away_from_zero() {
        assert_eq!(format_confidence(0.00125), "0.13");
        assert_eq!(format_confidence(0.00625), "0.63");
        assert_eq!(format_confidence(0.8732), "87.32");
    }

    #[test]
    fn zero_confidence_is_unsigned() {
        assert_eq!(format_confidence(-0.0), "0.00");
        assert_eq!(format_confidence(-0.000_001), "0.00");
        assert_eq!(format_confidence(0.0), "0.00");
    }

    #[test]
    fn non_string_label_is_rejected() {
        assert!(serde_json::from_str::<RawAnalysisResponse>(r#"{"label":1}"#).is_err());
    }

    #[test]
    fn note_becomes_analysis_detail() {
        let body = r#"{"label":"Unknown","confidence":0.0,"note":"No known vocabulary words"}"#;
        let parsed: RawAnalysisResponse = serde_json::from_str(body).unwrap();
        let result = AnalysisResult::from_response("zzqx".into(), parsed);
        assert_eq!(result.analysis.as_deref(), Some("No known vocabulary words"));
    }

    #[test]
    fn request_serializes_to_wire_shape() {
        let body = serde_json::to_string(&AnalysisRequest::new("  hi  ")).unwrap();
        assert_eq!(body, r#"{"text":"  hi  "}"#);
    }

    #[test]
    fn verdict_matching_is_exact() {
        assert_eq!(Verdict::from_label("Fake"), Verdict::Fake);
        assert_eq!(Verdict::from_label("real"), Verdict::Unknown);
    }

    #[test]
    fn time_ago_buckets() {
        let entry = HistoryEntry {
            result: AnalysisResult::from_response("t".into(), RawAnalysisResponse::default()),
            recorded_at: 1_000_000,
        };
        assert_eq!(entry.time_ago(1_000_010), "just now");
        assert_eq!(entry.time_ago(1_000_000 + 5 * 60), "5m ago");
        assert_eq!(entry.time_ago(1_000_000 + 3 * 3600), "3h ago");
        assert_eq!(entry.time_ago(1_000_000 + 2 * 86400), "2d ago");
    }
}
