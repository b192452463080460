//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler mutates state and returns a `Vec<Action>`; the shim in
//! `main.rs` executes them in order against the Zellij host. Keeping effects
//! out of the handler is what lets the dispatch lifecycle be tested without a
//! host.

use crate::transport::PendingRequest;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Sends a classification request through the host's `web_request`.
    ///
    /// The host answers with a `WebRequestResult` event carrying the
    /// request's context back.
    SendRequest(PendingRequest),
}
