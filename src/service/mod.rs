//! Service layer module.
//!
//! Contains the call routing logic: identity resolution, document
//! generation, call placement and access tokens.

pub mod call;
pub mod identity;
pub mod token;
pub mod twiml;

pub use call::{CallService, CallSetup};
pub use identity::{CallerIdentity, CallerIdentityResolver, sanitize_sender_id};
pub use token::TokenService;
