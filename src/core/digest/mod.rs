//! Digest engine
//!
//! SHA-256 hashing of complete file contents, plus the exported
//! hash-report text format.

use crate::core::HashError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Compute the SHA-256 digest of a byte slice as 64 lowercase hex characters.
///
/// Pure and deterministic: identical bytes always produce the identical
/// string, independent of filename or call order.
pub fn sha256_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// Compute the SHA-256 digest of a file.
///
/// Reads the whole file into memory before hashing; callers never observe
/// a partial digest.
pub async fn hash_file(path: &Path) -> Result<String, HashError> {
    let bytes = tokio::fs::read(path).await?;
    Ok(sha256_hex(&bytes))
}

/// Text content of an exported hash report.
pub fn report_content(filename: &str, hash: &str) -> String {
    format!("SHA-256 hash of {}:\n{}", filename, hash)
}

/// Suggested filename for an exported hash report.
///
/// The source filename is cut at its first dot, so `archive.tar.gz`
/// becomes `archive_sha256.txt`.
pub fn report_filename(filename: &str) -> String {
    let stem = filename.split('.').next().unwrap_or(filename);
    format!("{}_sha256.txt", stem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_vector() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_abc_vector() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_deterministic_and_lowercase() {
        let bytes = b"hashshield test payload";
        let first = sha256_hex(bytes);
        let second = sha256_hex(bytes);
        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[tokio::test]
    async fn test_hash_file_matches_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.bin");
        std::fs::write(&path, b"abc").unwrap();

        let hash = hash_file(&path).await.unwrap();
        assert_eq!(hash, sha256_hex(b"abc"));
    }

    #[tokio::test]
    async fn test_hash_file_missing_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = hash_file(&dir.path().join("nope.bin")).await.unwrap_err();
        assert!(matches!(err, HashError::Read(_)));
    }

    #[test]
    fn test_report_format() {
        let content = report_content("photo.png", "abc123");
        assert_eq!(content, "SHA-256 hash of photo.png:\nabc123");
    }

    #[test]
    fn test_report_filename_cuts_at_first_dot() {
        assert_eq!(report_filename("photo.png"), "photo_sha256.txt");
        assert_eq!(report_filename("archive.tar.gz"), "archive_sha256.txt");
        assert_eq!(report_filename("README"), "README_sha256.txt");
    }
}
