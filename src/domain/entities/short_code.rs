//! Short code value type.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Number of characters in every short code.
pub const SHORT_CODE_LENGTH: usize = 12;

/// Number of random bytes that hex-encode to [`SHORT_CODE_LENGTH`] characters.
pub const SHORT_CODE_BYTES: usize = SHORT_CODE_LENGTH / 2;

static SHORT_CODE_CHARSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-f0-9]+$").expect("static pattern compiles"));

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShortCodeError {
    #[error("short code must only contain characters from [a-f0-9]")]
    InvalidCharacters,
    #[error("short code must be 12 characters, got {0}")]
    InvalidLength(usize),
}

/// A lowercase hexadecimal token of exactly [`SHORT_CODE_LENGTH`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShortCode(String);

impl ShortCode {
    /// Validates `raw` as a short code.
    ///
    /// The character set is checked before the length, so `"invalid"` is
    /// rejected as [`ShortCodeError::InvalidCharacters`] and `"abc"` as
    /// [`ShortCodeError::InvalidLength`].
    pub fn parse(raw: &str) -> Result<Self, ShortCodeError> {
        if !SHORT_CODE_CHARSET.is_match(raw) {
            return Err(ShortCodeError::InvalidCharacters);
        }

        if raw.len() != SHORT_CODE_LENGTH {
            return Err(ShortCodeError::InvalidLength(raw.len()));
        }

        Ok(Self(raw.to_string()))
    }

    /// Builds a code by hex-encoding raw bytes.
    pub fn from_bytes(bytes: [u8; SHORT_CODE_BYTES]) -> Self {
        Self(hex::encode(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ShortCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ShortCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for ShortCode {
    type Err = ShortCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_code() {
        let code = ShortCode::parse("123456789012").unwrap();
        assert_eq!(code.as_str(), "123456789012");

        assert!(ShortCode::parse("deadbeef0042").is_ok());
    }

    #[test]
    fn test_parse_rejects_non_hex() {
        assert_eq!(
            ShortCode::parse("invalid"),
            Err(ShortCodeError::InvalidCharacters)
        );
        assert_eq!(
            ShortCode::parse("ABCDEF123456"),
            Err(ShortCodeError::InvalidCharacters)
        );
        assert_eq!(
            ShortCode::parse("12345678901g"),
            Err(ShortCodeError::InvalidCharacters)
        );
        assert_eq!(ShortCode::parse(""), Err(ShortCodeError::InvalidCharacters));
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert_eq!(
            ShortCode::parse("abc"),
            Err(ShortCodeError::InvalidLength(3))
        );
        assert_eq!(
            ShortCode::parse("1234567890123"),
            Err(ShortCodeError::InvalidLength(13))
        );
        assert_eq!(
            ShortCode::parse("12345678901"),
            Err(ShortCodeError::InvalidLength(11))
        );
    }

    #[test]
    fn test_from_bytes_is_lowercase_hex() {
        let code = ShortCode::from_bytes([0xde, 0xad, 0xbe, 0xef, 0x00, 0x42]);
        assert_eq!(code.as_str(), "deadbeef0042");
        assert_eq!(ShortCode::parse(code.as_str()), Ok(code));
    }
}
