mod traits;

pub mod hmac;

pub use hmac::HmacSha256;
pub use traits::Algorithm;

use crate::error::Result;
use crate::keys::SymmetricKey;

/// Sign `content` with a base64 key using HMAC-SHA256
///
/// Returns the padded base64 digest. Deterministic for fixed inputs.
///
/// # Example
/// ```
/// let signature = swtiny::algorithm::sign("Issuer=me", "c2VjcmV0")?;
/// assert_eq!(signature.len(), 44);
/// # Ok::<(), swtiny::Error>(())
/// ```
pub fn sign(content: &str, key: &str) -> Result<String> {
    HmacSha256.sign(content, &SymmetricKey::from_base64(key))
}
