use crate::algorithm::Algorithm;
use crate::error::{Error, Result};
use crate::keys::SymmetricKey;
use crate::utils::encode_signature;

use constant_time_eq::constant_time_eq;
use hmac::{Hmac, Mac};
use sha2::Sha256;

/// HMACSHA256 algorithm (HMAC with SHA-256)
pub struct HmacSha256;

impl Algorithm for HmacSha256 {
    fn name(&self) -> &'static str {
        "HMACSHA256"
    }

    fn sign(&self, content: &str, key: &SymmetricKey) -> Result<String> {
        let mut mac = Hmac::<Sha256>::new_from_slice(key.as_bytes())
            .map_err(|_| Error::InvalidConfiguration("Invalid HMAC key".to_string()))?;
        mac.update(content.as_bytes());
        Ok(encode_signature(&mac.finalize().into_bytes()))
    }

    /// Verify with constant-time comparison of the base64 texts
    fn verify(&self, content: &str, signature: &str, key: &SymmetricKey) -> Result<()> {
        let expected = self.sign(content, key)?;

        if constant_time_eq(expected.as_bytes(), signature.as_bytes()) {
            Ok(())
        } else {
            Err(Error::InvalidSignature)
        }
    }
}
