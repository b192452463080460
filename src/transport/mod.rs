//! Wire protocol between Truthlens and the classification service.
//!
//! HTTP itself is performed by the Zellij host (`web_request`); this module
//! owns everything on either side of it:
//!
//! - `request`: request body, headers, and the host context carrying the
//!   request id and trace context
//! - `response`: status/body interpretation into a raw response or a
//!   [`DispatchError`](crate::domain::DispatchError)

pub mod request;
pub mod response;

pub use request::{
    request_id_from_context, trace_context_from_context, PendingRequest, TraceContext,
};
pub use response::{interpret_settlement, is_success};
