//! Symmetric keys for SWT signatures
//!
//! A key travels as base64 text. The MAC key is derived in two steps that are
//! part of the wire format:
//! 1. decode the base64 text into raw bytes
//! 2. read those bytes as latin1 characters and encode that text as UTF-8,
//!    so every byte `>= 0x80` becomes two bytes
//!
//! Tokens signed elsewhere only verify if both steps are reproduced exactly.

use std::fmt;

use crate::utils::decode_key;

/// A derived HMAC key, ready for signing
#[derive(Clone, PartialEq, Eq)]
pub struct SymmetricKey {
    secret: Vec<u8>,
}

impl SymmetricKey {
    /// Derive the MAC key from its base64 representation
    pub fn from_base64(encoded: &str) -> Self {
        Self::from_raw(&decode_key(encoded))
    }

    /// Derive the MAC key from already decoded bytes
    pub fn from_raw(bytes: &[u8]) -> Self {
        Self {
            secret: latin1_to_utf8(bytes),
        }
    }

    /// Get the secret bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.secret
    }
}

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymmetricKey")
            .field("len", &self.secret.len())
            .finish_non_exhaustive()
    }
}

fn latin1_to_utf8(bytes: &[u8]) -> Vec<u8> {
    bytes
        .iter()
        .map(|&b| char::from(b))
        .collect::<String>()
        .into_bytes()
}
