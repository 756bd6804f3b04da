//! Error types for SWT processing
//!
//! Every failure the signer or the validator can report is a variant of
//! [`Error`]. The parser is best-effort and never produces one.

use thiserror::Error;

/// Errors that can occur while signing or validating a token
///
/// - Configuration errors (a required option is missing, options failed to load)
/// - Format errors (the signature delimiter is missing or the token is unparseable)
/// - Policy errors (expired token, audience mismatch)
/// - Security errors (signature mismatch)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    /// A required option was not provided
    #[error("options.{0} is required")]
    MissingOption(String),

    /// Options could not be loaded from a configuration document
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    // ============================================================================
    // Format Errors
    // ============================================================================
    /// Token does not have exactly one `&HMACSHA256=` delimiter, or holds no pairs
    #[error("Invalid token format")]
    InvalidFormat,

    // ============================================================================
    // Policy Errors
    // ============================================================================
    /// Token is past its `ExpiresOn` instant, or carries none
    #[error("Token is expired (expires on: {}, now: {now})", match expired_at {
        Some(at) => at.to_string(),
        None => "never set".to_string(),
    })]
    TokenExpired { expired_at: Option<i64>, now: i64 },

    /// Token was issued for another audience
    #[error("Invalid audience: expected '{expected}', found {found:?}")]
    InvalidAudience {
        expected: String,
        found: Option<String>,
    },

    // ============================================================================
    // Signature Errors
    // ============================================================================
    /// Recomputed HMAC-SHA256 does not match the one carried by the token
    #[error("Invalid signature")]
    InvalidSignature,
}

impl Error {
    /// Short, stable name of the failure kind, suitable for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Error::MissingOption(_) => "missing_option",
            Error::InvalidConfiguration(_) => "invalid_configuration",
            Error::InvalidFormat => "invalid_format",
            Error::TokenExpired { .. } => "token_expired",
            Error::InvalidAudience { .. } => "invalid_audience",
            Error::InvalidSignature => "invalid_signature",
        }
    }
}

/// Result type alias for swtiny operations
pub type Result<T> = std::result::Result<T, Error>;
