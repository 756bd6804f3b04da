//! Token signing
//!
//! [`sign`] turns caller claims plus [`SignOptions`] into a raw token:
//!
//! ```text
//! <claims>&Audience=<aud>&Issuer=<iss>&ExpiresOn=<epoch seconds>&HMACSHA256=<signature>
//! ```
//!
//! The caller's claims are copied into a new attribute list; nothing the
//! caller owns is modified.

use std::fmt;
use std::time::SystemTime;

use miniserde::de::{Map, Seq, Visitor};
use miniserde::{make_place, Deserialize};

use crate::algorithm::{Algorithm, HmacSha256};
use crate::claims::{ReservedKey, SIGNATURE_DELIMITER};
use crate::error::{Error, Result};
use crate::keys::SymmetricKey;
use crate::utils::{encode_pairs, percent_encode, unix_millis};

/// Lifetime used when `expires_in_minutes` is absent or not a finite number
pub const DEFAULT_EXPIRES_IN_MINUTES: f64 = 1.0;

/// Options for signing a token
///
/// `key`, `issuer` and `audience` are required; an empty string counts as
/// missing. Options can be built in code or read from JSON:
///
/// ```
/// use swtiny::SignOptions;
///
/// let from_code = SignOptions::new()
///     .key("c2VjcmV0")
///     .issuer("https://issuer.example")
///     .audience("https://api.example")
///     .expires_in_minutes(60.0);
///
/// let from_json = SignOptions::from_json(
///     r#"{"key":"c2VjcmV0","issuer":"https://issuer.example","audience":"https://api.example","expiresInMinutes":60}"#,
/// )
/// .unwrap();
///
/// assert_eq!(from_code, from_json);
/// ```
///
/// An `expiresInMinutes` that is not a JSON number is accepted and treated
/// as absent, so the lifetime falls back to [`DEFAULT_EXPIRES_IN_MINUTES`].
#[derive(Clone, Default, PartialEq, Deserialize)]
pub struct SignOptions {
    key: Option<String>,
    issuer: Option<String>,
    audience: Option<String>,
    #[serde(rename = "expiresInMinutes")]
    expires_in_minutes: Lifetime,
}

impl SignOptions {
    /// Create empty options
    pub fn new() -> Self {
        Default::default()
    }

    /// Load options from a JSON object
    pub fn from_json(json: &str) -> Result<Self> {
        miniserde::json::from_str(json).map_err(|e| {
            Error::InvalidConfiguration(format!("Failed to parse sign options: {e}"))
        })
    }

    /// Set the base64 symmetric key
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Set the issuer written into `Issuer`
    pub fn issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Set the audience written into `Audience`
    pub fn audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    /// Set the token lifetime in minutes (may be fractional or negative)
    pub fn expires_in_minutes(mut self, minutes: f64) -> Self {
        self.expires_in_minutes = Lifetime(Some(minutes));
        self
    }

    /// Lifetime in minutes, with absent or non-finite values coerced to the default
    pub fn lifetime_minutes(&self) -> f64 {
        match self.expires_in_minutes.0 {
            Some(minutes) if minutes.is_finite() => minutes,
            _ => DEFAULT_EXPIRES_IN_MINUTES,
        }
    }
}

impl fmt::Debug for SignOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignOptions")
            .field("key", &self.key.as_ref().map(|_| "<redacted>"))
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("expires_in_minutes", &self.expires_in_minutes.0)
            .finish()
    }
}

/// Lifetime in minutes as read from JSON; anything but a number reads as `None`
#[derive(Clone, Copy, Default, PartialEq)]
struct Lifetime(Option<f64>);

make_place!(Place);

impl Deserialize for Lifetime {
    fn begin(out: &mut Option<Self>) -> &mut dyn Visitor {
        Place::new(out)
    }

    fn default() -> Option<Self> {
        Some(Lifetime(None))
    }
}

impl Place<Lifetime> {
    fn set(&mut self, minutes: Option<f64>) -> miniserde::Result<()> {
        self.out = Some(Lifetime(minutes));
        Ok(())
    }
}

impl Visitor for Place<Lifetime> {
    fn null(&mut self) -> miniserde::Result<()> {
        self.set(None)
    }

    fn boolean(&mut self, _: bool) -> miniserde::Result<()> {
        self.set(None)
    }

    fn string(&mut self, _: &str) -> miniserde::Result<()> {
        self.set(None)
    }

    fn negative(&mut self, n: i64) -> miniserde::Result<()> {
        self.set(Some(n as f64))
    }

    fn nonnegative(&mut self, n: u64) -> miniserde::Result<()> {
        self.set(Some(n as f64))
    }

    fn float(&mut self, n: f64) -> miniserde::Result<()> {
        self.set(Some(n))
    }

    fn seq(&mut self) -> miniserde::Result<Box<dyn Seq + '_>> {
        self.out = Some(Lifetime(None));
        Ok(Box::new(Skip))
    }

    fn map(&mut self) -> miniserde::Result<Box<dyn Map + '_>> {
        self.out = Some(Lifetime(None));
        Ok(Box::new(Skip))
    }
}

/// Consumes a nested array or object without keeping it
struct Skip;

impl Seq for Skip {
    fn element(&mut self) -> miniserde::Result<&mut dyn Visitor> {
        Ok(<dyn Visitor>::ignore())
    }

    fn finish(&mut self) -> miniserde::Result<()> {
        Ok(())
    }
}

impl Map for Skip {
    fn key(&mut self, _: &str) -> miniserde::Result<&mut dyn Visitor> {
        Ok(<dyn Visitor>::ignore())
    }

    fn finish(&mut self) -> miniserde::Result<()> {
        Ok(())
    }
}

fn required<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str> {
    match value.as_deref() {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(Error::MissingOption(name.to_string())),
    }
}

/// Signs tokens with a fixed set of options
///
/// Required options are checked once, when the signer is built, and the key
/// is derived once.
///
/// # Example
///
/// ```
/// use swtiny::{SignOptions, TokenSigner};
///
/// let signer = TokenSigner::new(
///     SignOptions::new()
///         .key("c2VjcmV0")
///         .issuer("https://issuer.example")
///         .audience("https://api.example"),
/// )?;
///
/// let token = signer.sign([("sub", "user-42")])?;
/// assert!(token.starts_with("sub=user-42&Audience="));
/// # Ok::<(), swtiny::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct TokenSigner {
    key: SymmetricKey,
    issuer: String,
    audience: String,
    lifetime_minutes: f64,
}

impl TokenSigner {
    /// Build a signer, failing with `MissingOption` for `key`, `issuer` or
    /// `audience` (checked in that order)
    pub fn new(options: SignOptions) -> Result<Self> {
        let key = required(&options.key, "key")?;
        let issuer = required(&options.issuer, "issuer")?;
        let audience = required(&options.audience, "audience")?;

        Ok(Self {
            key: SymmetricKey::from_base64(key),
            issuer: issuer.to_string(),
            audience: audience.to_string(),
            lifetime_minutes: options.lifetime_minutes(),
        })
    }

    /// Sign `claims`, reading the clock once
    pub fn sign<I, K, V>(&self, claims: I) -> Result<String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: ToString,
    {
        self.sign_at(claims, SystemTime::now())
    }

    /// Sign `claims` as if the current time were `now`
    pub fn sign_at<I, K, V>(&self, claims: I, now: SystemTime) -> Result<String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: ToString,
    {
        let now_seconds = unix_millis(now) as f64 / 1000.0;
        let expires_on = (now_seconds + self.lifetime_minutes * 60.0 + 0.5).floor() as i64;
        let expires_on = expires_on.to_string();

        let mut attributes: Vec<(String, String)> = Vec::new();
        for (key, value) in claims {
            let key = key.as_ref();
            if ReservedKey::is_reserved(key) {
                tracing::debug!(key, "Dropping caller claim that uses a reserved key");
                continue;
            }
            attributes.push((key.to_string(), value.to_string()));
        }

        let encoded = encode_pairs(
            attributes
                .iter()
                .map(|(key, value)| (key.as_str(), value.as_str()))
                .chain([
                    (ReservedKey::Audience.canonical(), self.audience.as_str()),
                    (ReservedKey::Issuer.canonical(), self.issuer.as_str()),
                    (ReservedKey::ExpiresOn.canonical(), expires_on.as_str()),
                ]),
        );

        let signature = HmacSha256.sign(&encoded, &self.key)?;

        tracing::debug!(
            algorithm = HmacSha256.name(),
            claims = attributes.len(),
            issuer = %self.issuer,
            audience = %self.audience,
            expires_on = %expires_on,
            "Signed token"
        );

        Ok(format!("{encoded}{SIGNATURE_DELIMITER}{}", percent_encode(&signature)))
    }
}

/// Sign `claims` into a raw token
///
/// Fails with `MissingOption` before producing anything if `key`, `issuer`
/// or `audience` is missing.
///
/// # Example
///
/// ```
/// use swtiny::{sign, SignOptions};
///
/// let token = sign(
///     [("name", "Leandro"), ("age", "27")],
///     &SignOptions::new()
///         .key("your-symmetric-key")
///         .issuer("http://issuer.com/")
///         .audience("http://nice-audience.com/")
///         .expires_in_minutes(60.0),
/// )?;
///
/// assert!(token.contains("&HMACSHA256="));
/// # Ok::<(), swtiny::Error>(())
/// ```
pub fn sign<I, K, V>(claims: I, options: &SignOptions) -> Result<String>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: ToString,
{
    TokenSigner::new(options.clone())?.sign(claims)
}

/// Sign `claims` as if the current time were `now`
pub fn sign_at<I, K, V>(claims: I, options: &SignOptions, now: SystemTime) -> Result<String>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: ToString,
{
    TokenSigner::new(options.clone())?.sign_at(claims, now)
}
