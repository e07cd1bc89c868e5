//! Verification comparator
//!
//! Compares a file's computed SHA-256 digest against a user-supplied
//! expected value.

use crate::core::{HashError, digest};
use std::path::Path;

/// Outcome of a verification: the boolean verdict plus the digest that
/// was actually computed, kept for display.
#[derive(Debug, Clone)]
pub struct Verification {
    pub matched: bool,
    pub actual: String,
}

/// Compare two hex digests with full case-insensitivity.
///
/// Hex digests are conventionally case-insensitive; `ABCD..` and `abcd..`
/// are the same digest. Whole-string equality only, no prefix matching.
pub fn digests_match(actual: &str, expected: &str) -> bool {
    actual.eq_ignore_ascii_case(expected)
}

/// Verify a file against an expected SHA-256 digest.
///
/// Leading/trailing whitespace around the expected value is ignored. An
/// empty expected value is a caller error, not a mismatch.
pub async fn verify_file(path: &Path, expected: &str) -> Result<Verification, HashError> {
    let expected = expected.trim();
    if expected.is_empty() {
        return Err(HashError::MissingInput("expected hash"));
    }

    let actual = digest::hash_file(path).await?;
    let matched = digests_match(&actual, expected);
    Ok(Verification { matched, actual })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::digest::sha256_hex;

    #[test]
    fn test_case_insensitive_match() {
        let hex = sha256_hex(b"abc");
        assert!(digests_match(&hex, &hex));
        assert!(digests_match(&hex, &hex.to_uppercase()));
        assert!(digests_match(&hex.to_uppercase(), &hex));
    }

    #[test]
    fn test_no_prefix_match() {
        let hex = sha256_hex(b"abc");
        assert!(!digests_match(&hex, &hex[..32]));
        assert!(!digests_match(&hex, &format!("{}00", hex)));
    }

    #[tokio::test]
    async fn test_verify_file_match_and_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.bin");
        std::fs::write(&path, b"abc").unwrap();

        let good = sha256_hex(b"abc");
        let result = verify_file(&path, &good.to_uppercase()).await.unwrap();
        assert!(result.matched);
        assert_eq!(result.actual, good);

        let result = verify_file(&path, &sha256_hex(b"xyz")).await.unwrap();
        assert!(!result.matched);
        assert_eq!(result.actual, good);
    }

    #[tokio::test]
    async fn test_verify_file_empty_expected_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.bin");
        std::fs::write(&path, b"abc").unwrap();

        let err = verify_file(&path, "   ").await.unwrap_err();
        assert!(matches!(err, HashError::MissingInput(_)));
    }
}
