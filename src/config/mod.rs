//! Configuration management module.
//!
//! Supports loading configuration from:
//! - TOML files (config/default.toml, config/{profile}.toml)
//! - Environment variables with `CALLER_ID_ROUTER__<SECTION>__<KEY>` pattern
//! - The bare `TWILIO_*` / `PUBLIC_BASE_URL` / `PORT` variables, as defaults

mod provider;
mod routing;
mod server;

use config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use serde::Deserialize;

pub use provider::ProviderConfig;
pub use routing::{CustomCallerIdPolicy, RoutingConfig, VoiceStrategy};
pub use server::ServerConfig;

/// Bare environment variables and the keys they provide defaults for.
const LEGACY_ENV: &[(&str, &str)] = &[
    ("TWILIO_ACCOUNT_SID", "provider.account_sid"),
    ("TWILIO_AUTH_TOKEN", "provider.auth_token"),
    ("TWILIO_PHONE_NUMBER", "provider.phone_number"),
    ("TWILIO_TWIML_APP_SID", "provider.twiml_app_sid"),
    ("TWILIO_API_KEY_SID", "provider.api_key_sid"),
    ("TWILIO_API_KEY_SECRET", "provider.api_key_secret"),
    ("PUBLIC_BASE_URL", "routing.public_base_url"),
];

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Telephony provider credentials.
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Call routing policies.
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// Load configuration from files and environment.
    ///
    /// Configuration is loaded in the following order (later sources override earlier):
    /// 1. Bare `TWILIO_*`, `PUBLIC_BASE_URL` and `PORT` variables
    /// 2. `config/default.toml`
    /// 3. `config/{CALLER_ID_ROUTER_PROFILE}.toml` (if `CALLER_ID_ROUTER_PROFILE` is set)
    /// 4. Environment variables with `CALLER_ID_ROUTER__` prefix
    ///
    /// A `.env` file in the working directory is read first, if present.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        // Missing .env is fine
        let _ = dotenvy::dotenv();

        let profile = std::env::var("CALLER_ID_ROUTER_PROFILE")
            .unwrap_or_else(|_| "development".to_string());

        let config = legacy_defaults(Config::builder())?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{profile}")).required(false))
            .add_source(env_source())
            .build()?;

        let app_config: Self = config.try_deserialize()?;
        app_config.validate()?;

        Ok(app_config)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid or missing setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Message("server.port cannot be 0".to_string()));
        }

        self.provider.validate()?;
        self.routing.validate()?;

        Ok(())
    }
}

/// `CALLER_ID_ROUTER__PROVIDER__ACCOUNT_SID=AC..` -> `provider.account_sid`.
///
/// Values stay strings; numeric and boolean fields are converted on
/// deserialization, so phone numbers and credentials keep their exact text.
fn env_source() -> Environment {
    Environment::with_prefix("CALLER_ID_ROUTER")
        .prefix_separator("__")
        .separator("__")
}

/// Seed defaults from the bare variable names the service has always read.
fn legacy_defaults(
    mut builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    for (var, key) in LEGACY_ENV {
        if let Ok(value) = std::env::var(var) {
            builder = builder.set_default(*key, value)?;
        }
    }

    if let Some(port) = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
    {
        builder = builder.set_default("server.port", i64::from(port))?;
    }

    Ok(builder)
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format: "text" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Enable Prometheus metrics endpoint.
    #[serde(default = "default_metrics_enabled")]
    pub metrics_enabled: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

const fn default_metrics_enabled() -> bool {
    true
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
            metrics_enabled: default_metrics_enabled(),
        }
    }
}
