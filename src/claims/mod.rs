use indexmap::IndexMap;

/// Caller-defined claims, in the order they appear in the token
///
/// Keys keep their original casing. When a key repeats, the last value wins
/// and the key keeps the position of its first occurrence.
pub type Claims = IndexMap<String, String>;

/// Keys the token format reserves for its own metadata
///
/// Matching is case-insensitive on decode (`audience`, `AUDIENCE` and
/// `Audience` are the same key); encoding always uses [`canonical`](Self::canonical).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservedKey {
    /// Intended recipient of the token
    Audience,

    /// Expiration instant in whole seconds since the Unix epoch
    ExpiresOn,

    /// Entity that produced the token
    Issuer,

    /// Signature marker, always the last pair
    HmacSha256,
}

impl ReservedKey {
    pub const ALL: [ReservedKey; 4] = [
        ReservedKey::Audience,
        ReservedKey::ExpiresOn,
        ReservedKey::Issuer,
        ReservedKey::HmacSha256,
    ];

    /// Match a pair key against the reserved set, ignoring case
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|reserved| reserved.canonical().eq_ignore_ascii_case(key))
    }

    /// Spelling used when the key is written into a token
    pub fn canonical(self) -> &'static str {
        match self {
            ReservedKey::Audience => "Audience",
            ReservedKey::ExpiresOn => "ExpiresOn",
            ReservedKey::Issuer => "Issuer",
            ReservedKey::HmacSha256 => "HMACSHA256",
        }
    }

    /// Whether `key` names a reserved field
    pub fn is_reserved(key: &str) -> bool {
        Self::from_key(key).is_some()
    }
}

/// Literal that separates the signed content from the signature
pub const SIGNATURE_DELIMITER: &str = "&HMACSHA256=";
