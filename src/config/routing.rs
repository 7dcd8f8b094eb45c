//! Call routing configuration.

use config::ConfigError;
use serde::{Deserialize, Deserializer};

/// How `POST /voice` realizes an outbound call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoiceStrategy {
    /// Respond with a dial document; the provider requested it for a
    /// browser client leg through the TwiML application.
    TwimlApp,
    /// Create the call through the REST API with the document inline.
    #[default]
    InlineAnnouncement,
    /// Create the call through the REST API with a URL the provider fetches
    /// the document from when the leg connects.
    CallbackBridge,
}

impl std::fmt::Display for VoiceStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TwimlApp => write!(f, "twiml_app"),
            Self::InlineAnnouncement => write!(f, "inline_announcement"),
            Self::CallbackBridge => write!(f, "callback_bridge"),
        }
    }
}

/// How a custom caller identity is presented to the receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomCallerIdPolicy {
    /// Use the sanitized label as an alphanumeric sender id. Only displayed
    /// in markets that allow alphanumeric ids (e.g. UK, UAE, India,
    /// Pakistan); not North America.
    Alphanumeric,
    /// Keep the provider number and speak the label before bridging.
    /// Works on every network.
    #[default]
    SpokenName,
}

impl std::fmt::Display for CustomCallerIdPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Alphanumeric => write!(f, "alphanumeric"),
            Self::SpokenName => write!(f, "spoken_name"),
        }
    }
}

/// Call routing configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RoutingConfig {
    /// Externally reachable base URL used to build callback URLs.
    #[serde(default)]
    pub public_base_url: String,

    /// Strategy used by `POST /voice`.
    #[serde(default)]
    pub voice_strategy: VoiceStrategy,

    /// Presentation policy for custom caller ids.
    #[serde(default)]
    pub custom_caller_id: CustomCallerIdPolicy,

    /// Ring timeout for the dialed leg in seconds.
    #[serde(default = "default_dial_timeout")]
    pub dial_timeout_secs: u32,

    /// Destination prefixes (e.g. `+44`) where alphanumeric sender ids are
    /// allowed. Empty means no check; the provider decides.
    ///
    /// Accepts a list or a comma-separated string.
    #[serde(default, deserialize_with = "deserialize_prefixes")]
    pub alphanumeric_country_prefixes: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PrefixList {
    List(Vec<String>),
    Joined(String),
}

fn deserialize_prefixes<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let prefixes = match PrefixList::deserialize(deserializer)? {
        PrefixList::List(list) => list,
        PrefixList::Joined(joined) => joined.split(',').map(str::to_string).collect(),
    };

    Ok(prefixes
        .into_iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect())
}

const fn default_dial_timeout() -> u32 {
    30
}

impl RoutingConfig {
    /// Validate the routing configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is missing or unparsable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.public_base_url.trim().is_empty() {
            return Err(ConfigError::Message(
                "routing.public_base_url cannot be empty".to_string(),
            ));
        }

        url::Url::parse(&self.public_base_url).map_err(|e| {
            ConfigError::Message(format!("routing.public_base_url is invalid: {e}"))
        })?;

        if self.dial_timeout_secs == 0 {
            return Err(ConfigError::Message(
                "routing.dial_timeout_secs cannot be 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Build an absolute URL for a path on this service.
    #[must_use]
    pub fn callback_url(&self, path: &str) -> String {
        format!("{}{path}", self.public_base_url.trim_end_matches('/'))
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            public_base_url: String::new(),
            voice_strategy: VoiceStrategy::default(),
            custom_caller_id: CustomCallerIdPolicy::default(),
            dial_timeout_secs: default_dial_timeout(),
            alphanumeric_country_prefixes: Vec::new(),
        }
    }
}
