//! Token validation
//!
//! Validation runs a fixed chain of checks and stops at the first failure:
//!
//! 1. a key is configured (`MissingOption`)
//! 2. the token is within size bounds and splits into exactly two parts
//!    around `&HMACSHA256=` (`InvalidFormat`)
//! 3. the whole token parses into a profile (`InvalidFormat`)
//! 4. the token is not expired, unless bypassed (`TokenExpired`)
//! 5. the audience matches, if one is required (`InvalidAudience`)
//! 6. the signature over the first part matches (`InvalidSignature`)
//!
//! Every outcome, including malformed input, is reported through the
//! returned `Result`.

use std::time::SystemTime;

use crate::algorithm::{Algorithm, HmacSha256};
use crate::claims::SIGNATURE_DELIMITER;
use crate::error::{Error, Result};
use crate::keys::SymmetricKey;
use crate::limits::MAX_TOKEN_LENGTH;
use crate::token::{parse, Profile};
use crate::utils::{percent_decode, unix_millis};

/// Options for validating a token
///
/// `key` is required; `audience` is an optional filter and
/// `bypass_expiration` defaults to `false`.
///
/// ```
/// use swtiny::ValidateOptions;
///
/// let from_code = ValidateOptions::with_key("c2VjcmV0").audience("https://api.example");
/// let from_json =
///     ValidateOptions::from_json(r#"{"key":"c2VjcmV0","audience":"https://api.example"}"#).unwrap();
///
/// assert_eq!(from_code, from_json);
/// ```
#[derive(Clone, Default, PartialEq, miniserde::Deserialize)]
pub struct ValidateOptions {
    key: Option<String>,
    audience: Option<String>,
    #[serde(rename = "bypassExpiration")]
    bypass_expiration: Option<bool>,
}

impl ValidateOptions {
    /// Create empty options
    pub fn new() -> Self {
        Default::default()
    }

    /// Create options with the base64 symmetric key set
    pub fn with_key(key: impl Into<String>) -> Self {
        Self::new().key(key)
    }

    /// Load options from a JSON object
    pub fn from_json(json: &str) -> Result<Self> {
        miniserde::json::from_str(json).map_err(|e| {
            Error::InvalidConfiguration(format!("Failed to parse validate options: {e}"))
        })
    }

    /// Set the base64 symmetric key
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Require a specific audience
    pub fn audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    /// Skip the expiration check
    pub fn bypass_expiration(mut self, bypass: bool) -> Self {
        self.bypass_expiration = Some(bypass);
        self
    }
}

impl std::fmt::Debug for ValidateOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidateOptions")
            .field("key", &self.key.as_ref().map(|_| "<redacted>"))
            .field("audience", &self.audience)
            .field("bypass_expiration", &self.bypass_expiration)
            .finish()
    }
}

/// Validates tokens against a fixed policy
///
/// The key is derived once, when the validator is built.
///
/// # Example
///
/// ```
/// use swtiny::{sign, SignOptions, TokenValidator, ValidateOptions};
///
/// let token = sign(
///     [("sub", "user-42")],
///     &SignOptions::new()
///         .key("c2VjcmV0")
///         .issuer("https://issuer.example")
///         .audience("https://api.example")
///         .expires_in_minutes(5.0),
/// )?;
///
/// let validator =
///     TokenValidator::new(ValidateOptions::with_key("c2VjcmV0").audience("https://api.example"))?;
/// let profile = validator.validate(&token)?;
///
/// assert_eq!(profile.claim("sub"), Some("user-42"));
/// # Ok::<(), swtiny::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct TokenValidator {
    key: SymmetricKey,
    audience: Option<String>,
    bypass_expiration: bool,
}

impl TokenValidator {
    /// Build a validator, failing with `MissingOption("key")` if no key is set
    pub fn new(options: ValidateOptions) -> Result<Self> {
        let key = match options.key.as_deref() {
            Some(key) if !key.is_empty() => SymmetricKey::from_base64(key),
            _ => return Err(Error::MissingOption("key".to_string())),
        };

        Ok(Self {
            key,
            audience: options.audience.filter(|audience| !audience.is_empty()),
            bypass_expiration: options.bypass_expiration.unwrap_or(false),
        })
    }

    /// Validate `raw` against the current time
    pub fn validate(&self, raw: &str) -> Result<Profile> {
        self.validate_at(raw, SystemTime::now())
    }

    /// Validate `raw` as if the current time were `now`
    pub fn validate_at(&self, raw: &str, now: SystemTime) -> Result<Profile> {
        match self.check(raw, now) {
            Ok(profile) => {
                tracing::debug!(
                    algorithm = HmacSha256.name(),
                    issuer = ?profile.issuer(),
                    audience = ?profile.audience(),
                    claims = profile.claims().len(),
                    "Token validated"
                );
                Ok(profile)
            }
            Err(err) => {
                tracing::warn!(kind = err.kind(), "Token validation failed: {err}");
                Err(err)
            }
        }
    }

    fn check(&self, raw: &str, now: SystemTime) -> Result<Profile> {
        if raw.len() > MAX_TOKEN_LENGTH {
            return Err(Error::InvalidFormat);
        }

        let (content, signature) = split_signature(raw)?;

        // The signature pair is reserved, so parsing the whole token is safe
        let profile = parse(raw).ok_or(Error::InvalidFormat)?;

        if !self.bypass_expiration && profile.is_expired_at(now) {
            return Err(Error::TokenExpired {
                expired_at: profile.expires_on(),
                now: unix_millis(now).div_euclid(1000),
            });
        }

        if let Some(expected) = &self.audience {
            if profile.audience() != Some(expected.as_str()) {
                return Err(Error::InvalidAudience {
                    expected: expected.clone(),
                    found: profile.audience().map(str::to_string),
                });
            }
        }

        let provided = percent_decode(signature).ok_or(Error::InvalidSignature)?;
        HmacSha256.verify(content, &provided, &self.key)?;

        Ok(profile)
    }
}

/// Split a token into its signed content and its encoded signature
fn split_signature(raw: &str) -> Result<(&str, &str)> {
    let mut parts = raw.split(SIGNATURE_DELIMITER);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(content), Some(signature), None) => Ok((content, signature)),
        _ => Err(Error::InvalidFormat),
    }
}

/// Validate a raw token and return its profile
///
/// # Example
///
/// ```
/// use swtiny::{validate, Error, ValidateOptions};
///
/// let result = validate("adjdaksjd", &ValidateOptions::with_key("any").bypass_expiration(true));
/// assert_eq!(result, Err(Error::InvalidFormat));
/// ```
pub fn validate(raw: &str, options: &ValidateOptions) -> Result<Profile> {
    TokenValidator::new(options.clone())?.validate(raw)
}

/// Validate a raw token as if the current time were `now`
pub fn validate_at(raw: &str, options: &ValidateOptions, now: SystemTime) -> Result<Profile> {
    TokenValidator::new(options.clone())?.validate_at(raw, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signer::{sign_at, SignOptions};
    use std::time::{Duration, UNIX_EPOCH};

    const KEY: &str = "your-symmetric-key";
    const AUDIENCE: &str = "http://nice-audience.com/";

    fn at(seconds: u64) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(seconds)
    }

    fn create_test_token(minutes: f64) -> String {
        sign_at(
            [("name", "Leandro"), ("age", "27")],
            &SignOptions::new()
                .key(KEY)
                .issuer("http://issuer.com/")
                .audience(AUDIENCE)
                .expires_in_minutes(minutes),
            at(1_000_000),
        )
        .unwrap()
    }

    #[test]
    fn test_full_validation_flow() {
        let token = create_test_token(60.0);
        let profile = validate_at(&token, &ValidateOptions::with_key(KEY), at(1_000_100)).unwrap();

        assert_eq!(profile.claim("name"), Some("Leandro"));
        assert_eq!(profile.claim("age"), Some("27"));
        assert_eq!(profile.issuer(), Some("http://issuer.com/"));
        assert_eq!(profile.audience(), Some(AUDIENCE));
        assert_eq!(profile.expires_on(), Some(1_003_600));
    }

    #[test]
    fn test_missing_key() {
        let token = create_test_token(60.0);
        assert_eq!(
            validate(&token, &ValidateOptions::new()),
            Err(Error::MissingOption("key".to_string()))
        );
        assert_eq!(
            validate(&token, &ValidateOptions::with_key("")),
            Err(Error::MissingOption("key".to_string()))
        );
    }

    #[test]
    fn test_missing_delimiter() {
        let options = ValidateOptions::with_key(KEY).bypass_expiration(true);
        assert_eq!(validate("adjdaksjd", &options), Err(Error::InvalidFormat));
        assert_eq!(validate("", &options), Err(Error::InvalidFormat));
    }

    #[test]
    fn test_repeated_delimiter() {
        let token = create_test_token(60.0);
        let doubled = format!("{token}&HMACSHA256=again");
        let options = ValidateOptions::with_key(KEY).bypass_expiration(true);
        assert_eq!(validate(&doubled, &options), Err(Error::InvalidFormat));
    }

    #[test]
    fn test_oversized_token() {
        let token = format!("{}&HMACSHA256=x", "a".repeat(MAX_TOKEN_LENGTH));
        let options = ValidateOptions::with_key(KEY).bypass_expiration(true);
        assert_eq!(validate(&token, &options), Err(Error::InvalidFormat));
    }

    #[test]
    fn test_expired_token() {
        let token = create_test_token(-1.0);
        let result = validate_at(&token, &ValidateOptions::with_key(KEY), at(1_000_000));
        assert_eq!(
            result,
            Err(Error::TokenExpired {
                expired_at: Some(999_940),
                now: 1_000_000
            })
        );
    }

    #[test]
    fn test_bypass_expiration() {
        let token = create_test_token(-1.0);
        let options = ValidateOptions::with_key(KEY).bypass_expiration(true);
        assert!(validate_at(&token, &options, at(1_000_000)).is_ok());
    }

    #[test]
    fn test_expiry_boundary() {
        let token = create_test_token(1.0);
        let options = ValidateOptions::with_key(KEY);
        assert!(validate_at(&token, &options, at(1_000_060)).is_ok());
        assert!(matches!(
            validate_at(&token, &options, UNIX_EPOCH + Duration::from_millis(1_000_060_001)),
            Err(Error::TokenExpired { .. })
        ));
    }

    #[test]
    fn test_missing_expiration_is_expired() {
        let content = "name=x&Audience=a";
        let signature = HmacSha256.sign(content, &SymmetricKey::from_base64(KEY)).unwrap();
        let token = format!("{content}&HMACSHA256={}", crate::utils::percent_encode(&signature));

        let result = validate(&token, &ValidateOptions::with_key(KEY));
        assert!(matches!(
            result,
            Err(Error::TokenExpired {
                expired_at: None,
                ..
            })
        ));

        let options = ValidateOptions::with_key(KEY).bypass_expiration(true);
        assert!(validate(&token, &options).is_ok());
    }

    #[test]
    fn test_invalid_audience() {
        let token = create_test_token(60.0);
        let options = ValidateOptions::with_key(KEY).audience("http://anyother.com/");
        assert_eq!(
            validate_at(&token, &options, at(1_000_000)),
            Err(Error::InvalidAudience {
                expected: "http://anyother.com/".to_string(),
                found: Some(AUDIENCE.to_string()),
            })
        );
    }

    #[test]
    fn test_matching_audience() {
        let token = create_test_token(60.0);
        let options = ValidateOptions::with_key(KEY).audience(AUDIENCE);
        assert!(validate_at(&token, &options, at(1_000_000)).is_ok());
    }

    #[test]
    fn test_empty_audience_is_no_filter() {
        let token = create_test_token(60.0);
        let options = ValidateOptions::with_key(KEY).audience("");
        assert!(validate_at(&token, &options, at(1_000_000)).is_ok());
    }

    #[test]
    fn test_tampered_content() {
        let token = create_test_token(60.0).replace("Leandro", "John");
        assert_eq!(
            validate_at(&token, &ValidateOptions::with_key(KEY), at(1_000_000)),
            Err(Error::InvalidSignature)
        );
    }

    #[test]
    fn test_wrong_key() {
        let token = create_test_token(60.0);
        assert_eq!(
            validate_at(&token, &ValidateOptions::with_key("b3RoZXI="), at(1_000_000)),
            Err(Error::InvalidSignature)
        );
    }

    #[test]
    fn test_undecodable_signature() {
        let token = create_test_token(60.0);
        let (content, _) = token.split_once(SIGNATURE_DELIMITER).unwrap();
        let token = format!("{content}{SIGNATURE_DELIMITER}%FF%FE");
        assert_eq!(
            validate_at(&token, &ValidateOptions::with_key(KEY), at(1_000_000)),
            Err(Error::InvalidSignature)
        );
    }

    #[test]
    fn test_check_order_expiry_before_audience() {
        let token = create_test_token(-1.0).replace("Leandro", "John");
        let options = ValidateOptions::with_key(KEY).audience("http://anyother.com/");
        assert!(matches!(
            validate_at(&token, &options, at(1_000_000)),
            Err(Error::TokenExpired { .. })
        ));
    }

    #[test]
    fn test_check_order_audience_before_signature() {
        let token = create_test_token(60.0).replace("Leandro", "John");
        let options = ValidateOptions::with_key(KEY).audience("http://anyother.com/");
        assert!(matches!(
            validate_at(&token, &options, at(1_000_000)),
            Err(Error::InvalidAudience { .. })
        ));
    }

    #[test]
    fn test_validator_reuse() {
        let validator = TokenValidator::new(ValidateOptions::with_key(KEY)).unwrap();
        let token = create_test_token(60.0);
        assert!(validator.validate_at(&token, at(1_000_000)).is_ok());
        assert!(validator.validate_at(&token, at(1_000_001)).is_ok());
        assert!(validator.validate_at("garbage", at(1_000_000)).is_err());
    }

    #[test]
    fn test_new_is_empty() {
        let options = ValidateOptions::new();
        assert_eq!(options, ValidateOptions::from_json("{}").unwrap());
        assert_eq!(
            TokenValidator::new(options).unwrap_err(),
            Error::MissingOption("key".to_string())
        );
    }

    #[test]
    fn test_from_json() {
        let options =
            ValidateOptions::from_json(r#"{"key":"k","bypassExpiration":true}"#).unwrap();
        assert_eq!(options, ValidateOptions::with_key("k").bypass_expiration(true));

        assert!(matches!(
            ValidateOptions::from_json(r#"{"key":1}"#),
            Err(Error::InvalidConfiguration(_))
        ));
    }
}
