//! Truthlens: a Zellij plugin that checks news text against a fake-news
//! classifier.
//!
//! The user pastes or types a statement, presses Enter, and the plugin posts
//! it to a classification service. The verdict (`Real`, `Fake`, or whatever
//! label the service returns) is shown with its confidence, and every
//! successful analysis is kept in a newest-first session history.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← keys, host events,
//! └─────────────────────────────────────────────────────┘    web_request
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Event handling (reducer)                         │
//! │  - Dispatcher: in-flight guard, request ids         │
//! │  - History, validator, view model computation       │
//! └─────────────────────────────────────────────────────┘
//!         │                    │
//! ┌───────────────┐   ┌─────────────────────────────────┐
//! │ UI Layer      │   │ Transport Layer (transport/)    │
//! │ (ui/)         │   │ - JSON request encoding         │
//! │ - Rendering   │   │ - Host context (request id,     │
//! │ - Theming     │   │   trace context)                │
//! │ - Components  │   │ - Settlement interpretation     │
//! └───────────────┘   └─────────────────────────────────┘
//!         │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & Infrastructure                            │
//! │  - Analysis results, verdicts, history entries      │
//! │  - Error types (domain/error)                       │
//! │  - Sandbox paths (infrastructure/)                  │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing, file-based OTLP export    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/truthlens.wasm" {
//!         endpoint "http://127.0.0.1:8000/predict"
//!         theme "catppuccin-mocha"
//!         history_limit "50"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Library Usage
//!
//! ```
//! use truthlens::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! handle_event(&mut state, &Event::PermissionsResult { granted: true });
//! for c in "The moon landing was staged".chars() {
//!     handle_event(&mut state, &Event::Char(c));
//! }
//!
//! let (_, actions) = handle_event(&mut state, &Event::Submit);
//! let [Action::SendRequest(pending)] = actions.as_slice() else {
//!     panic!("expected a request");
//! };
//!
//! handle_event(
//!     &mut state,
//!     &Event::ResponseSettled {
//!         request_id: pending.request_id,
//!         status: 200,
//!         body: br#"{"label":"Fake","confidence":0.91}"#.to_vec(),
//!         trace_context: None,
//!     },
//! );
//! assert_eq!(state.history().len(), 1);
//! assert_eq!(state.ui().current_result.as_ref().map(|r| r.confidence.as_str()), Some("91.00"));
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod transport;
pub mod ui;

pub use app::{can_submit, handle_event, Action, AppState, Event, InputMode, UiState};
pub use domain::{DispatchError, Result, TruthlensError};
pub use ui::Theme;

use std::collections::BTreeMap;

/// Classification endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/predict";

/// Plugin configuration parsed from the Zellij plugin block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Classification URL. Always `http://` or `https://`.
    pub endpoint: String,

    /// Built-in theme: `catppuccin-mocha`, `catppuccin-latte` or
    /// `catppuccin-frappe`. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme. `~` is expanded to the host mount.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for tracing. Default: `"info"`.
    pub trace_level: String,

    /// Maximum history entries; `None` keeps every entry.
    pub history_limit: Option<usize>,

    /// Options that were present but invalid and replaced by defaults.
    ///
    /// Parsing happens before tracing is installed, so these are logged by
    /// [`initialize`].
    pub rejected: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            theme_name: None,
            theme_file: None,
            trace_level: "info".to_string(),
            history_limit: None,
            rejected: Vec::new(),
        }
    }
}

impl Config {
    /// Parses the Zellij configuration map, falling back to defaults for
    /// missing or invalid values.
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use truthlens::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("endpoint".to_string(), "https://classifier.local/predict".to_string());
    /// map.insert("history_limit".to_string(), "25".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.endpoint, "https://classifier.local/predict");
    /// assert_eq!(config.history_limit, Some(25));
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let mut rejected = Vec::new();
        let defaults = Self::default();

        let endpoint = match config.get("endpoint").map(|raw| parse_endpoint(raw)) {
            Some(Ok(endpoint)) => endpoint,
            Some(Err(e)) => {
                rejected.push(e.to_string());
                defaults.endpoint
            }
            None => defaults.endpoint,
        };

        let history_limit = match config.get("history_limit").map(|raw| parse_history_limit(raw)) {
            Some(Ok(limit)) => limit,
            Some(Err(e)) => {
                rejected.push(e.to_string());
                None
            }
            None => None,
        };

        let trace_level = config
            .get("trace_level")
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map_or(defaults.trace_level, String::from);

        Self {
            endpoint,
            theme_name: config.get("theme").cloned(),
            theme_file: config.get("theme_file").cloned(),
            trace_level,
            history_limit,
            rejected,
        }
    }
}

/// Accepts only absolute `http(s)` URLs.
fn parse_endpoint(raw: &str) -> Result<String> {
    let endpoint = raw.trim();
    let has_host = ["http://", "https://"]
        .iter()
        .find_map(|scheme| endpoint.strip_prefix(scheme))
        .is_some_and(|rest| !rest.is_empty());

    if has_host {
        Ok(endpoint.to_string())
    } else {
        Err(TruthlensError::Config(format!(
            "endpoint must be an http(s) URL, got {raw:?}"
        )))
    }
}

/// `0` means unbounded.
fn parse_history_limit(raw: &str) -> Result<Option<usize>> {
    raw.trim()
        .parse::<usize>()
        .map(|limit| (limit > 0).then_some(limit))
        .map_err(|e| TruthlensError::Config(format!("history_limit {raw:?}: {e}")))
}

/// Builds the initial application state from configuration.
///
/// Logs options rejected during parsing and resolves the theme: `theme_file`
/// first, then `theme`, then the default. A theme that fails to load is
/// reported and replaced by the default.
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(endpoint = %config.endpoint, history_limit = ?config.history_limit, "initializing truthlens plugin");

    for reason in &config.rejected {
        tracing::warn!(reason = %reason, "ignoring invalid configuration option");
    }

    AppState::new(config.endpoint.clone(), resolve_theme(config), config.history_limit)
}

fn resolve_theme(config: &Config) -> Theme {
    if let Some(theme_file) = &config.theme_file {
        let path = infrastructure::expand_tilde(theme_file);
        return Theme::from_file(&path).unwrap_or_else(|e| {
            tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme file, using default");
            Theme::default()
        });
    }

    config
        .theme_name
        .as_ref()
        .map_or_else(Theme::default, |theme_name| {
            Theme::from_name(theme_name).unwrap_or_else(|| {
                tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
                Theme::default()
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_map_yields_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn invalid_endpoint_falls_back_and_is_reported() {
        let config = Config::from_zellij(&map(&[("endpoint", "ftp://example.com")]));
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.rejected.len(), 1);

        let config = Config::from_zellij(&map(&[("endpoint", "http://")]));
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn history_limit_zero_means_unbounded() {
        let config = Config::from_zellij(&map(&[("history_limit", "0")]));
        assert_eq!(config.history_limit, None);
        assert!(config.rejected.is_empty());

        let config = Config::from_zellij(&map(&[("history_limit", "ten")]));
        assert_eq!(config.history_limit, None);
        assert_eq!(config.rejected.len(), 1);
    }

    #[test]
    fn blank_trace_level_keeps_default() {
        let config = Config::from_zellij(&map(&[("trace_level", "  ")]));
        assert_eq!(config.trace_level, "info");

        let config = Config::from_zellij(&map(&[("trace_level", "truthlens=debug")]));
        assert_eq!(config.trace_level, "truthlens=debug");
    }

    #[test]
    fn theme_resolution_prefers_file_then_name() {
        let latte = Theme::from_name("catppuccin-latte").unwrap();

        let by_name = Config {
            theme_name: Some("catppuccin-latte".to_string()),
            ..Config::default()
        };
        assert_eq!(initialize(&by_name).theme, latte);

        let bad_file = Config {
            theme_name: Some("catppuccin-latte".to_string()),
            theme_file: Some("/nonexistent/theme.toml".to_string()),
            ..Config::default()
        };
        assert_eq!(initialize(&bad_file).theme, Theme::default());

        let unknown = Config {
            theme_name: Some("no-such-theme".to_string()),
            ..Config::default()
        };
        assert_eq!(initialize(&unknown).theme, Theme::default());
    }

    #[test]
    fn initialize_applies_endpoint_and_limit() {
        let config = Config {
            endpoint: "https://classifier.local/predict".to_string(),
            history_limit: Some(2),
            ..Config::default()
        };
        let state = initialize(&config);
        assert_eq!(state.endpoint, "https://classifier.local/predict");
        assert_eq!(state.history().limit(), Some(2));
    }
}
