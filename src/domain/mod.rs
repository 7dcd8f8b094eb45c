//! Domain models for the call router.
//!
//! Every value here lives for a single HTTP exchange; nothing is persisted.

pub mod call;
pub mod dto;
pub mod status;

pub use call::{CallRequest, CallerIdMode, Destination};
pub use dto::{ConnectCallResponse, TokenResponse, VoiceCallResponse};
pub use status::{CallRecord, CallStatusEvent};
