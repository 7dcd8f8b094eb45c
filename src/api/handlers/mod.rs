//! HTTP handlers.

pub mod call;
pub mod health;
pub mod token;
pub mod voice;
pub mod webhook;
