//! Domain layer for the Truthlens plugin.
//!
//! Core types independent of Zellij APIs and rendering concerns.
//!
//! # Organization
//!
//! - [`analysis`]: request/response payloads, normalized results, history entries
//! - [`error`]: error types and result aliases

pub mod analysis;
pub mod error;

pub use analysis::{
    format_confidence, AnalysisRequest, AnalysisResult, HistoryEntry, RawAnalysisResponse,
    Verdict, UNKNOWN_PREDICTION,
};
pub use error::{DispatchError, Result, TruthlensError};
