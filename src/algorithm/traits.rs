use crate::error::Result;
use crate::keys::SymmetricKey;

/// Core algorithm trait for SWT signatures
///
/// Signatures travel as base64 text, so both directions work on strings.
pub trait Algorithm {
    /// The algorithm identifier, as used for the signature key in the token
    fn name(&self) -> &'static str;

    /// Compute the base64 signature of `content`
    fn sign(&self, content: &str, key: &SymmetricKey) -> Result<String>;

    /// Verify a signature
    ///
    /// # Arguments
    /// * `content` - The data that was signed (everything before the signature pair)
    /// * `signature` - The base64 signature, already percent-decoded
    /// * `key` - The key to use for verification
    fn verify(&self, content: &str, signature: &str, key: &SymmetricKey) -> Result<()>;
}
