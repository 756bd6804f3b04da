use crate::claims::{Claims, ReservedKey};
use crate::token::Profile;
use crate::utils::decode_pairs;

/// Decode a raw token into a [`Profile`] without checking its signature
///
/// Parsing is best-effort and never fails on malformed input:
/// - an empty string, or one without a single pair, yields `None`
/// - reserved keys are matched case-insensitively; the last occurrence wins
/// - an `ExpiresOn` value that is not a base-10 integer is dropped
/// - the `HMACSHA256` pair is discarded
/// - every other pair lands in the claims under its original key
///
/// Never trust the result before [`validate`](crate::validate) has checked
/// the signature.
///
/// # Example
/// ```
/// let profile = swtiny::parse("adad=123123&ExpiresOn=lasldasd&").unwrap();
/// assert_eq!(profile.claim("adad"), Some("123123"));
/// assert_eq!(profile.expires_on(), None);
/// ```
pub fn parse(raw: &str) -> Option<Profile> {
    if raw.is_empty() {
        return None;
    }

    let mut pairs = decode_pairs(raw).peekable();
    pairs.peek()?;

    let mut profile = Profile {
        claims: Claims::new(),
        ..Default::default()
    };

    for (key, value) in pairs {
        match ReservedKey::from_key(&key) {
            Some(ReservedKey::Audience) => profile.audience = Some(value),
            Some(ReservedKey::ExpiresOn) => {
                if let Ok(seconds) = value.parse::<i64>() {
                    profile.expires_on = Some(seconds);
                }
            }
            Some(ReservedKey::Issuer) => profile.issuer = Some(value),
            Some(ReservedKey::HmacSha256) => {}
            None => {
                profile.claims.insert(key, value);
            }
        }
    }

    Some(profile)
}
