//! Outbound call request model.

use serde::Serialize;

use crate::error::{AppError, Result};

/// How the receiver's caller display is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CallerIdMode {
    /// Show the provider-owned number.
    #[default]
    Default,
    /// Announce a private caller before bridging.
    Private,
    /// Present a caller-chosen label.
    Custom,
}

impl CallerIdMode {
    /// Parse a mode string. Anything unrecognized is `Default`.
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("private") => Self::Private,
            Some("custom") => Self::Custom,
            _ => Self::Default,
        }
    }

    /// Wire name of the mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Private => "private",
            Self::Custom => "custom",
        }
    }
}

impl std::fmt::Display for CallerIdMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A destination number normalized to `+<digits>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Destination(String);

impl Destination {
    /// Normalize a user-supplied number.
    ///
    /// Every character other than a digit is dropped and a single leading
    /// `+` is ensured. Length and country code are left for the provider to
    /// judge.
    ///
    /// # Errors
    ///
    /// Returns `MissingDestination` for absent or blank input and
    /// `InvalidDestination` when no digits remain.
    pub fn parse(raw: Option<&str>) -> Result<Self> {
        let raw = raw.map(str::trim).unwrap_or_default();
        if raw.is_empty() {
            return Err(AppError::MissingDestination);
        }

        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return Err(AppError::InvalidDestination(raw.to_string()));
        }

        Ok(Self(format!("+{digits}")))
    }

    /// The normalized number.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the number starts with any of the given prefixes.
    #[must_use]
    pub fn has_prefix<S: AsRef<str>>(&self, prefixes: &[S]) -> bool {
        prefixes
            .iter()
            .map(AsRef::as_ref)
            .any(|prefix| self.0.starts_with(prefix))
    }
}

impl std::fmt::Display for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Destination {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated request to place an outbound call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRequest {
    /// Normalized number to dial.
    pub destination: Destination,
    /// Requested caller-id presentation.
    pub mode: CallerIdMode,
    /// Label for `Custom` mode; `None` when blank or when another mode is used.
    pub custom_label: Option<String>,
}

impl CallRequest {
    /// Build a request from raw wire fields (`To`, `CallerIdMode`, `CustomCallerId`).
    ///
    /// # Errors
    ///
    /// Returns a validation error if the destination is missing or unusable.
    pub fn from_fields(to: Option<&str>, mode: Option<&str>, label: Option<&str>) -> Result<Self> {
        let destination = Destination::parse(to)?;
        let mode = CallerIdMode::parse(mode);
        let custom_label = match mode {
            CallerIdMode::Custom => label
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(ToString::to_string),
            CallerIdMode::Default | CallerIdMode::Private => None,
        };

        Ok(Self {
            destination,
            mode,
            custom_label,
        })
    }
}
