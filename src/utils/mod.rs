pub mod encoding;
pub mod form;

use std::time::{SystemTime, UNIX_EPOCH};

pub use encoding::{decode_key, encode_signature, percent_decode, percent_encode};
pub use form::{decode_pairs, encode_pairs};

/// Milliseconds since the Unix epoch for `at` (negative before the epoch)
pub(crate) fn unix_millis(at: SystemTime) -> i64 {
    match at.duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_millis() as i64,
        Err(before) => -(before.duration().as_millis() as i64),
    }
}
