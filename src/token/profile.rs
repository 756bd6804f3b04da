//! Decoded form of a token
//!
//! A `Profile` is what parsing (and validation, on success) hands back: the
//! three metadata fields the format reserves plus the caller's own claims.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::claims::Claims;
use crate::utils::unix_millis;

/// Structured contents of a token
///
/// Built fresh by every parse and never mutated afterwards.
///
/// # Examples
///
/// ```
/// let profile = swtiny::parse("name=Jane&Issuer=https%3A%2F%2Fissuer.example&ExpiresOn=1700000000")
///     .expect("token has pairs");
///
/// assert_eq!(profile.issuer(), Some("https://issuer.example"));
/// assert_eq!(profile.expires_on(), Some(1_700_000_000));
/// assert_eq!(profile.claim("name"), Some("Jane"));
/// assert_eq!(profile.audience(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    pub(crate) audience: Option<String>,
    pub(crate) issuer: Option<String>,
    pub(crate) expires_on: Option<i64>,
    pub(crate) claims: Claims,
}

impl Profile {
    /// Get the audience (`Audience` pair)
    pub fn audience(&self) -> Option<&str> {
        self.audience.as_deref()
    }

    /// Get the issuer (`Issuer` pair)
    pub fn issuer(&self) -> Option<&str> {
        self.issuer.as_deref()
    }

    /// Get the expiration time (`ExpiresOn` pair) as Unix timestamp
    pub fn expires_on(&self) -> Option<i64> {
        self.expires_on
    }

    /// Get the expiration time as a `SystemTime`
    pub fn expires_at(&self) -> Option<SystemTime> {
        let seconds = self.expires_on?;
        if seconds >= 0 {
            UNIX_EPOCH.checked_add(Duration::from_secs(seconds as u64))
        } else {
            UNIX_EPOCH.checked_sub(Duration::from_secs(seconds.unsigned_abs()))
        }
    }

    /// Whether the token is expired at `now`
    ///
    /// A profile without an expiration counts as expired.
    pub fn is_expired_at(&self, now: SystemTime) -> bool {
        match self.expires_on {
            Some(seconds) => unix_millis(now) > seconds.saturating_mul(1000),
            None => true,
        }
    }

    /// Get all caller-defined claims
    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    /// Get a single claim by its exact key
    pub fn claim(&self, key: &str) -> Option<&str> {
        self.claims.get(key).map(String::as_str)
    }

    /// Take ownership of the claims
    pub fn into_claims(self) -> Claims {
        self.claims
    }
}
