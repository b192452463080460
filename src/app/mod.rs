//! Application layer coordinating state, events, and actions.
//!
//! The application layer follows a unidirectional data flow:
//!
//! ```text
//! Key / Host Event → Event → handle_event → State Mutations → Actions → Host
//!                              ↑                                 ↓
//!                              └──── WebRequestResult (settled) ─┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: side effect commands emitted by the event handler
//! - [`dispatcher`]: request lifecycle, the only writer of `UiState` and `History`
//! - [`handler`]: event processing and state transitions
//! - [`history`]: newest-first session log
//! - [`modes`]: input mode state machine
//! - [`state`]: central state container and view model computation
//! - [`validator`]: submission gate

pub mod actions;
pub mod dispatcher;
pub mod handler;
pub mod history;
pub mod modes;
pub mod state;
pub mod validator;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use history::History;
pub use modes::InputMode;
pub use state::{AppState, UiState};
pub use validator::can_submit;
