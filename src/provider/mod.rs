//! Telephony provider layer.
//!
//! Trait-based access to the managed calling API so the routing logic never
//! depends on a concrete client.

pub mod traits;
pub mod twilio;

use std::sync::Arc;

pub use traits::{CallInstructions, OutboundCall, TelephonyProvider};
pub use twilio::TwilioClient;

use crate::config::ProviderConfig;
use crate::error::AppError;

/// Create the provider client from configuration.
///
/// # Errors
///
/// Returns an error if the client cannot be constructed.
pub fn create_provider(config: &ProviderConfig) -> Result<Arc<dyn TelephonyProvider>, AppError> {
    let client = TwilioClient::new(config)?;
    Ok(Arc::new(client))
}
