//! Error code constants.
//!
//! Error codes are organized by category:
//! - 3xxx: Validation errors
//! - 5xxx: Internal/System errors
//! - 6xxx: Telephony provider errors without a provider-supplied code

/// Error code type with semantic categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode(i64);

impl ErrorCode {
    // ===== Validation Errors (3xxx) =====

    /// Bad request / invalid parameters.
    pub const BAD_REQUEST: Self = Self(3001);

    /// Destination number missing or empty.
    pub const MISSING_DESTINATION: Self = Self(3002);

    /// Destination number contains no digits.
    pub const INVALID_DESTINATION: Self = Self(3003);

    // ===== Internal/System Errors (5xxx) =====

    /// Internal server error.
    pub const INTERNAL_ERROR: Self = Self(5002);

    /// Access token could not be signed.
    pub const TOKEN_ERROR: Self = Self(5004);

    // ===== Provider Errors (6xxx) =====

    /// Provider could not be reached or timed out.
    pub const PROVIDER_UNAVAILABLE: Self = Self(6001);

    /// Provider answered with a body we could not understand.
    pub const PROVIDER_BAD_RESPONSE: Self = Self(6002);

    /// Provider rejected the request without a machine-readable code.
    pub const PROVIDER_REJECTED: Self = Self(6003);

    /// Get the error code as an i64.
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

/// Broad class of a failure, logged alongside its code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Caller input was unusable (3xxx).
    Validation,
    /// Internal/system errors (5xxx).
    Internal,
    /// Provider failures, with the provider's code or a 6xxx code.
    Provider,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation => write!(f, "validation"),
            Self::Internal => write!(f, "internal"),
            Self::Provider => write!(f, "provider"),
        }
    }
}
