//! Access token issuance for browser calling.
//!
//! Tokens follow the provider's access token format: an HS256 JWT signed
//! with the API key secret, issued by the API key SID for the account, and
//! carrying a voice grant for the configured TwiML application. Incoming
//! calls are never granted; inbound traffic is rejected anyway.

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};

use crate::config::ProviderConfig;
use crate::domain::TokenResponse;
use crate::error::{AppError, Result};

/// Content type the provider expects in the token header.
const TOKEN_CONTENT_TYPE: &str = "twilio-fpa;v=1";

/// Claims of a provider access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    pub jti: String,
    pub iss: String,
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub grants: Grants,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grants {
    pub identity: String,
    pub voice: VoiceGrant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceGrant {
    pub incoming: IncomingGrant,
    pub outgoing: OutgoingGrant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomingGrant {
    pub allow: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutgoingGrant {
    pub application_sid: String,
}

/// Signs browser-calling access tokens.
pub struct TokenService {
    account_sid: String,
    api_key_sid: String,
    application_sid: String,
    ttl_secs: i64,
    header: Header,
    encoding_key: EncodingKey,
}

impl TokenService {
    /// Create a new token service.
    #[must_use]
    pub fn new(config: &ProviderConfig) -> Self {
        let mut header = Header::new(Algorithm::HS256);
        header.cty = Some(TOKEN_CONTENT_TYPE.to_string());

        Self {
            account_sid: config.account_sid.clone(),
            api_key_sid: config.api_key_sid.clone(),
            application_sid: config.twiml_app_sid.clone(),
            ttl_secs: i64::try_from(config.token_ttl_secs).unwrap_or(i64::MAX),
            header,
            encoding_key: EncodingKey::from_secret(config.api_key_secret.as_bytes()),
        }
    }

    /// Issue a token for a fresh `user_<millis>` identity.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Token` if signing fails.
    pub fn issue(&self) -> Result<TokenResponse> {
        let now = Utc::now();
        let identity = format!("user_{}", now.timestamp_millis());
        let iat = now.timestamp();

        let claims = AccessTokenClaims {
            jti: format!("{}-{iat}", self.api_key_sid),
            iss: self.api_key_sid.clone(),
            sub: self.account_sid.clone(),
            iat,
            exp: iat.saturating_add(self.ttl_secs),
            grants: Grants {
                identity: identity.clone(),
                voice: VoiceGrant {
                    incoming: IncomingGrant { allow: false },
                    outgoing: OutgoingGrant {
                        application_sid: self.application_sid.clone(),
                    },
                },
            },
        };

        let token = encode(&self.header, &claims, &self.encoding_key)
            .map_err(|e| AppError::Token(e.to_string()))?;

        Ok(TokenResponse {
            success: true,
            token,
            identity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{DecodingKey, Validation, decode, decode_header};

    fn config() -> ProviderConfig {
        ProviderConfig {
            account_sid: "AC123".to_string(),
            api_key_sid: "SK456".to_string(),
            api_key_secret: "key-secret".to_string(),
            twiml_app_sid: "AP789".to_string(),
            token_ttl_secs: 600,
            ..Default::default()
        }
    }

    #[test]
    fn test_token_carries_voice_grant() {
        let response = TokenService::new(&config()).issue().unwrap();
        assert!(response.success);
        assert!(response.identity.starts_with("user_"));

        let data = decode::<AccessTokenClaims>(
            &response.token,
            &DecodingKey::from_secret(b"key-secret"),
            &Validation::new(Algorithm::HS256),
        )
        .unwrap();

        let claims = data.claims;
        assert_eq!(claims.iss, "SK456");
        assert_eq!(claims.sub, "AC123");
        assert_eq!(claims.exp - claims.iat, 600);
        assert!(claims.jti.starts_with("SK456-"));
        assert_eq!(claims.grants.identity, response.identity);
        assert!(!claims.grants.voice.incoming.allow);
        assert_eq!(claims.grants.voice.outgoing.application_sid, "AP789");
    }

    #[test]
    fn test_token_header() {
        let response = TokenService::new(&config()).issue().unwrap();
        let header = decode_header(&response.token).unwrap();
        assert_eq!(header.alg, Algorithm::HS256);
        assert_eq!(header.cty.as_deref(), Some(TOKEN_CONTENT_TYPE));
    }

    #[test]
    fn test_token_rejected_with_wrong_secret() {
        let response = TokenService::new(&config()).issue().unwrap();
        let result = decode::<AccessTokenClaims>(
            &response.token,
            &DecodingKey::from_secret(b"other"),
            &Validation::new(Algorithm::HS256),
        );
        assert!(result.is_err());
    }
}
