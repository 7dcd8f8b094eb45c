//! Caller identity resolution.
//!
//! Turns a requested [`CallerIdMode`] into what the receiver actually sees:
//! a caller id for the dialed leg plus an optional spoken announcement.

use tracing::{debug, info};

use crate::config::{CustomCallerIdPolicy, RoutingConfig};
use crate::domain::{CallRequest, CallerIdMode};

/// Spoken before bridging a `private` call.
pub const PRIVATE_ANNOUNCEMENT: &str = "Call from a private number.";

/// Longest alphanumeric sender id networks accept.
pub const MAX_SENDER_ID_LEN: usize = 11;

/// Shorter sanitized labels fall back to the provider number.
pub const MIN_SENDER_ID_LEN: usize = 3;

/// Caller presentation for one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    /// Value placed in the dial's caller id.
    pub caller_id: String,
    /// Text spoken to the receiver before the dial, if any.
    pub announcement: Option<String>,
}

impl CallerIdentity {
    fn number(provider_number: &str) -> Self {
        Self {
            caller_id: provider_number.to_string(),
            announcement: None,
        }
    }
}

/// Reduce a label to an alphanumeric sender id.
///
/// Keeps ASCII letters and digits, truncated to 11 characters. Returns `None`
/// when fewer than 3 characters survive.
#[must_use]
pub fn sanitize_sender_id(label: &str) -> Option<String> {
    let id: String = label
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(MAX_SENDER_ID_LEN)
        .collect();

    (id.len() >= MIN_SENDER_ID_LEN).then_some(id)
}

/// Resolves caller identities against the provider number and routing policy.
#[derive(Debug, Clone)]
pub struct CallerIdentityResolver {
    provider_number: String,
    policy: CustomCallerIdPolicy,
    alphanumeric_prefixes: Vec<String>,
}

impl CallerIdentityResolver {
    /// Create a resolver.
    #[must_use]
    pub fn new(provider_number: impl Into<String>, routing: &RoutingConfig) -> Self {
        Self {
            provider_number: provider_number.into(),
            policy: routing.custom_caller_id,
            alphanumeric_prefixes: routing.alphanumeric_country_prefixes.clone(),
        }
    }

    /// The provider-owned number.
    #[must_use]
    pub fn provider_number(&self) -> &str {
        &self.provider_number
    }

    /// Resolve the identity for a request. Never fails: anything unusable
    /// falls back to the provider number.
    #[must_use]
    pub fn resolve(&self, request: &CallRequest) -> CallerIdentity {
        match request.mode {
            CallerIdMode::Default => CallerIdentity::number(&self.provider_number),
            CallerIdMode::Private => CallerIdentity {
                caller_id: self.provider_number.clone(),
                announcement: Some(PRIVATE_ANNOUNCEMENT.to_string()),
            },
            CallerIdMode::Custom => match request.custom_label.as_deref() {
                Some(label) => self.resolve_custom(request, label),
                None => CallerIdentity::number(&self.provider_number),
            },
        }
    }

    fn resolve_custom(&self, request: &CallRequest, label: &str) -> CallerIdentity {
        match self.policy {
            CustomCallerIdPolicy::SpokenName => CallerIdentity {
                caller_id: self.provider_number.clone(),
                announcement: Some(label.to_string()),
            },
            CustomCallerIdPolicy::Alphanumeric => {
                if !self.alphanumeric_prefixes.is_empty()
                    && !request.destination.has_prefix(&self.alphanumeric_prefixes)
                {
                    debug!(
                        destination = %request.destination,
                        "Alphanumeric sender id not allowed for destination"
                    );
                    return CallerIdentity::number(&self.provider_number);
                }

                match sanitize_sender_id(label) {
                    Some(sender_id) => {
                        info!(caller_id = %sender_id, "Using custom caller id");
                        CallerIdentity {
                            caller_id: sender_id,
                            announcement: None,
                        }
                    }
                    None => CallerIdentity::number(&self.provider_number),
                }
            }
        }
    }
}
