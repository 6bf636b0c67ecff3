//! Short code generation.

use crate::domain::entities::ShortCode;
use crate::domain::entities::short_code::SHORT_CODE_BYTES;

/// Generates a random short code.
///
/// Draws 6 bytes from the operating system RNG and hex-encodes them, which
/// yields exactly 12 lowercase hexadecimal characters.
///
/// # Errors
///
/// Returns an error if the system random number generator fails.
pub fn generate_code() -> Result<ShortCode, getrandom::Error> {
    let mut buffer = [0u8; SHORT_CODE_BYTES];

    getrandom::fill(&mut buffer)?;

    Ok(ShortCode::from_bytes(buffer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::SHORT_CODE_LENGTH;
    use std::collections::HashSet;

    #[test]
    fn test_generated_code_is_valid() {
        let code = generate_code().unwrap();

        assert_eq!(code.as_str().len(), SHORT_CODE_LENGTH);
        assert!(ShortCode::parse(code.as_str()).is_ok());
    }

    #[test]
    fn test_generated_codes_differ() {
        let codes: HashSet<String> = (0..100)
            .map(|_| generate_code().unwrap().into_inner())
            .collect();

        assert_eq!(codes.len(), 100);
    }
}
