//! Strict query-component unescaping.

use percent_encoding::percent_decode_str;

/// Errors that can occur while unescaping a query component.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnescapeError {
    #[error("invalid escape sequence {0:?}")]
    InvalidEscape(String),

    #[error("unescaped value is not valid UTF-8")]
    InvalidUtf8,
}

/// Unescapes a query component.
///
/// `+` decodes to a space and every `%` must be followed by two hex digits.
/// Unlike [`percent_decode_str`] on its own, malformed escapes are rejected
/// instead of being passed through.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(query_unescape("https%3A%2F%2Fx.com").unwrap(), "https://x.com");
/// assert!(query_unescape("100%").is_err());
/// ```
pub fn query_unescape(input: &str) -> Result<String, UnescapeError> {
    let bytes = input.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let escape = bytes.get(i + 1..i + 3);
            match escape {
                Some([hi, lo]) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() => i += 3,
                _ => {
                    let end = (i + 3).min(bytes.len());
                    let sequence = String::from_utf8_lossy(&bytes[i..end]).into_owned();
                    return Err(UnescapeError::InvalidEscape(sequence));
                }
            }
        } else {
            i += 1;
        }
    }

    let spaced = input.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| UnescapeError::InvalidUtf8)
}
