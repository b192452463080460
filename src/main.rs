//! Zellij plugin wrapper and entry point.
//!
//! This is the thin integration layer between the Truthlens library and the
//! Zellij plugin system: it maps host events to library events, runs the
//! reducer, and performs the returned actions through the host API.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: parse config, initialize tracing, create `AppState`
//! 2. **Permissions**: request `WebAccess`; the answer arrives as
//!    `PermissionRequestResult`
//! 3. **Update**: translate keys and host events, delegate to `handle_event`
//! 4. **Actions**: `SendRequest` → `web_request`, `CloseFocus` → `hide_self`
//! 5. **Render**: call the library renderer
//!
//! # Event Mapping
//!
//! - `Key(..)` → editing or navigation events, depending on the input mode
//! - `WebRequestResult` → `Event::ResponseSettled` (request id and trace
//!   context are read back from the request context)
//! - `PermissionRequestResult` → `Event::PermissionsResult`
//!
//! # Keybindings
//!
//! Global:
//! - `Ctrl+n` / `Ctrl+p`: move history selection down / up; from editing
//!   they start browsing at the newest / oldest entry
//!
//! Editing:
//! - `Enter`: analyze
//! - `Alt+Enter`: newline
//! - `Ctrl+u`: clear input
//! - `Esc`: browse history
//! - `Backspace`, printable characters: edit
//! - `Tab`: four spaces; other `Ctrl`/`Alt` chords are ignored
//!
//! Browsing:
//! - `j`/`Down`, `k`/`Up`: move selection
//! - `Enter`: recall the selected text into the input
//! - `i`/`Esc`: back to editing
//! - `q`: hide plugin

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use truthlens::transport::{request_id_from_context, trace_context_from_context};
use truthlens::{handle_event, Action, Config, Event, InputMode};

register_plugin!(State);

/// Plugin state wrapper around the library's `AppState`.
struct State {
    app: truthlens::AppState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: truthlens::initialize(&Config::default()),
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        truthlens::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        self.app = truthlens::initialize(&config);

        tracing::debug!("requesting web access permission");
        request_permission(&[PermissionType::WebAccess]);

        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Returns `true` if the plugin UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_request_result(status, body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                Event::PermissionsResult {
                    granted: matches!(status, PermissionStatus::Granted),
                }
            }
            _ => return false,
        };

        let (should_render, actions) = handle_event(&mut self.app, &our_event);
        tracing::debug!(
            action_count = actions.len(),
            should_render = should_render,
            "event handled"
        );
        for action in actions {
            Self::execute_action(action);
        }
        should_render
    }

    fn render(&mut self, rows: usize, cols: usize) {
        truthlens::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard input to application events for the current input mode.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        let ctrl = key.has_modifiers(&[KeyModifier::Ctrl]);

        if ctrl && key.bare_key == BareKey::Char('n') {
            return Some(Event::KeyDown);
        }
        if ctrl && key.bare_key == BareKey::Char('p') {
            return Some(Event::KeyUp);
        }

        match self.app.input_mode {
            InputMode::Editing => Self::map_editing_key(key, ctrl),
            InputMode::Browsing => Self::map_browsing_key(key),
        }
    }

    fn map_editing_key(key: &KeyWithModifier, ctrl: bool) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Enter if key.has_modifiers(&[KeyModifier::Alt]) => Event::Newline,
            BareKey::Enter => Event::Submit,
            BareKey::Char('u') if ctrl => Event::ClearInput,
            BareKey::Esc => Event::BrowseHistory,
            BareKey::Backspace => Event::Backspace,
            BareKey::Tab => Event::Char('\t'),
            // Other chords are not text.
            BareKey::Char(_) if ctrl || key.has_modifiers(&[KeyModifier::Alt]) => return None,
            BareKey::Char(c) => Event::Char(c),
            _ => return None,
        })
    }

    fn map_browsing_key(key: &KeyWithModifier) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Enter => Event::RecallSelected,
            BareKey::Esc | BareKey::Char('i') => Event::EditInput,
            BareKey::Char('q') => Event::CloseFocus,
            _ => return None,
        })
    }

    /// Settlements without our request id belong to someone else.
    fn map_web_request_result(
        status: u16,
        body: Vec<u8>,
        context: &BTreeMap<String, String>,
    ) -> Option<Event> {
        let Some(request_id) = request_id_from_context(context) else {
            tracing::debug!(status = status, "ignoring web request result without request id");
            return None;
        };

        Some(Event::ResponseSettled {
            request_id,
            status,
            body,
            trace_context: trace_context_from_context(context),
        })
    }

    #[tracing::instrument(level = "debug", skip_all)]
    fn execute_action(action: Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("hiding plugin pane");
                hide_self();
            }
            Action::SendRequest(pending) => {
                tracing::debug!(
                    request_id = pending.request_id,
                    url = %pending.url,
                    body_len = pending.body.len(),
                    "sending classification request"
                );
                let context = pending.context();
                web_request(
                    pending.url,
                    HttpVerb::Post,
                    pending.headers,
                    pending.body,
                    context,
                );
            }
        }
    }
}
