//! Size limit constants for input validation

/// Maximum length for a raw token string (64KB)
pub(crate) const MAX_TOKEN_LENGTH: usize = 64 * 1024;

/// Maximum number of `key=value` pairs read from a token
/// Matches the default key limit of the query-string parser SWT grew up with
pub(crate) const MAX_PAIRS: usize = 1000;
