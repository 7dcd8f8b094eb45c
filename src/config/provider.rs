//! Telephony provider configuration.

use config::ConfigError;
use serde::Deserialize;

/// Twilio account and API credentials.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Account SID (`AC...`).
    #[serde(default)]
    pub account_sid: String,

    /// Account auth token, used for REST API basic auth.
    #[serde(default)]
    pub auth_token: String,

    /// Provider-owned number calls originate from (E.164).
    #[serde(default)]
    pub phone_number: String,

    /// TwiML application SID granted to browser clients.
    #[serde(default)]
    pub twiml_app_sid: String,

    /// API key SID used as access token issuer.
    #[serde(default)]
    pub api_key_sid: String,

    /// API key secret used to sign access tokens.
    #[serde(default)]
    pub api_key_secret: String,

    /// REST API base URL.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Timeout for outbound provider requests in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Access token lifetime in seconds.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: u64,
}

fn default_api_base() -> String {
    "https://api.twilio.com".to_string()
}

const fn default_request_timeout() -> u64 {
    15
}

const fn default_token_ttl() -> u64 {
    3600
}

impl ProviderConfig {
    /// Validate that every credential needed at runtime is present.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first missing field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("provider.account_sid", &self.account_sid),
            ("provider.auth_token", &self.auth_token),
            ("provider.phone_number", &self.phone_number),
            ("provider.twiml_app_sid", &self.twiml_app_sid),
            ("provider.api_key_sid", &self.api_key_sid),
            ("provider.api_key_secret", &self.api_key_secret),
            ("provider.api_base", &self.api_base),
        ];

        if let Some((name, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(ConfigError::Message(format!("{name} cannot be empty")));
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Message(
                "provider.request_timeout_secs cannot be 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            account_sid: String::new(),
            auth_token: String::new(),
            phone_number: String::new(),
            twiml_app_sid: String::new(),
            api_key_sid: String::new(),
            api_key_secret: String::new(),
            api_base: default_api_base(),
            request_timeout_secs: default_request_timeout(),
            token_ttl_secs: default_token_ttl(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> ProviderConfig {
        ProviderConfig {
            account_sid: "AC123".to_string(),
            auth_token: "secret".to_string(),
            phone_number: "+15550001111".to_string(),
            twiml_app_sid: "AP123".to_string(),
            api_key_sid: "SK123".to_string(),
            api_key_secret: "keysecret".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_complete_config_is_valid() {
        assert!(complete().validate().is_ok());
    }

    #[test]
    fn test_missing_credential_is_reported() {
        let mut config = complete();
        config.auth_token = "  ".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("provider.auth_token"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = complete();
        config.request_timeout_secs = 0;
        assert!(config.validate().is_err());
    }
}
