//! # swtiny - Minimal Simple Web Token (SWT) Signing and Validation
//!
//! > Compact, query-string tokens authenticated with HMAC-SHA256.
//!
//! **swtiny** signs, parses and validates Simple Web Tokens: form-encoded
//! `key=value` pairs carrying an audience, an issuer, an expiration instant and
//! any number of caller-defined string claims, followed by an HMAC-SHA256
//! signature over everything before it.
//!
//! ## Wire Format
//!
//! ```text
//! name=Leandro&age=27&Audience=http%3A%2F%2Fnice-audience.com%2F&Issuer=http%3A%2F%2Fissuer.com%2F&ExpiresOn=1700003600&HMACSHA256=T3BOOhkmbsmITy8uC4j9q6JdtRGmXllb0C380jUoZwM%3D
//! ```
//!
//! - pairs are separated by `&`, keys from values by `=`, spaces encode as `+`
//! - `Audience`, `Issuer`, `ExpiresOn` and `HMACSHA256` are reserved; they are
//!   matched case-insensitively when decoding
//! - `ExpiresOn` is whole seconds since the Unix epoch
//! - the signature covers every byte before `&HMACSHA256=` and is the
//!   percent-encoded base64 HMAC-SHA256 digest
//!
//! ## Quick Start
//!
//! ```
//! use swtiny::*;
//!
//! let token = sign(
//!     [("name", "Leandro"), ("age", "27")],
//!     &SignOptions::new()
//!         .key("your-symmetric-key")
//!         .issuer("http://issuer.com/")
//!         .audience("http://nice-audience.com/")
//!         .expires_in_minutes(60.0),
//! )?;
//!
//! let profile = validate(&token, &ValidateOptions::with_key("your-symmetric-key"))?;
//!
//! assert_eq!(profile.claim("name"), Some("Leandro"));
//! assert_eq!(profile.claim("age"), Some("27"));
//! # Ok::<(), swtiny::Error>(())
//! ```
//!
//! ## Validation Flow
//!
//! ```text
//! raw token
//!     │ key configured?                 → MissingOption
//!     │ one `&HMACSHA256=` delimiter?   → InvalidFormat
//!     │ parses into a Profile?          → InvalidFormat
//!     │ not expired (unless bypassed)?  → TokenExpired
//!     │ audience matches (if required)? → InvalidAudience
//!     │ signature matches?              → InvalidSignature
//!     ▼
//! Profile
//! ```
//!
//! [`parse`] runs the decoding step alone. It never fails and never checks
//! the signature, so its output must not be trusted on its own.
//!
//! ## Keys
//!
//! Keys are base64 text. They are decoded leniently and then re-encoded
//! through a latin1-to-UTF-8 step; see [`keys`] for why.
//!
//! ## Logging
//!
//! Signing and validation emit [`tracing`](https://crates.io/crates/tracing)
//! events: `debug` on success, `warn` with the failure kind on rejection.
//! Keys and signatures are never logged.

// Core modules
pub mod error;
pub mod utils;

// Signature engine
pub mod algorithm;
pub mod keys;

// Claims and reserved keys
pub mod claims;

// Decoded tokens
pub mod token;

// Signing and validation (main public API)
pub mod signer;
pub mod validator;

pub(crate) mod limits;

// ============================================================================
// PUBLIC API
// ============================================================================

pub use token::{parse, Profile};
pub use signer::{sign, sign_at, SignOptions, TokenSigner};
pub use validator::{validate, validate_at, TokenValidator, ValidateOptions};

// Supporting types
pub use claims::{Claims, ReservedKey, SIGNATURE_DELIMITER};
pub use error::{Error, Result};
pub use keys::SymmetricKey;
