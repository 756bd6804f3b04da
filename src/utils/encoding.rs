//! Base64 and percent encoding used by the SWT wire format
//!
//! Keys are decoded leniently: the token format was born on a runtime whose
//! base64 decoder accepts both alphabets, skips stray characters and stops at
//! the first `=`. Existing deployments rely on that (e.g. a key such as
//! `your-symmetric-key` is not valid strict base64), so decoding never fails.

use std::borrow::Cow;

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;

const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::RequireNone),
);

/// Decode a base64 key without ever failing
///
/// `-` and `_` are read as `+` and `/`, characters outside the alphabet are
/// skipped, decoding stops at the first `=`, and a dangling final character
/// (which cannot carry a whole byte) is dropped.
pub fn decode_key(input: &str) -> Vec<u8> {
    let mut symbols = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            'A'..='Z' | 'a'..='z' | '0'..='9' | '+' | '/' => symbols.push(c),
            '-' => symbols.push('+'),
            '_' => symbols.push('/'),
            '=' => break,
            _ => {}
        }
    }

    if symbols.len() % 4 == 1 {
        symbols.pop();
    }

    // Only alphabet symbols remain and the length is never 1 mod 4
    LENIENT.decode(symbols).unwrap_or_default()
}

/// Encode signature bytes as padded standard base64
pub fn encode_signature(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Percent-encode everything except `A-Z a-z 0-9 - _ . ~`
pub fn percent_encode(input: &str) -> Cow<'_, str> {
    urlencoding::encode(input)
}

/// Percent-decode `input`; `None` if the result is not UTF-8
pub fn percent_decode(input: &str) -> Option<Cow<'_, str>> {
    urlencoding::decode(input).ok()
}
