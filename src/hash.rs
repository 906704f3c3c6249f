// src/hash.rs

//! SHA-256 helpers for release tarball checksums
//!
//! xbps-src templates carry a lowercase hex SHA-256 per distfile, so that is
//! the only digest this crate produces.

use sha2::{Digest, Sha256};
use std::io::{self, Read};

/// Length of a SHA-256 digest rendered as hex
pub const SHA256_HEX_LEN: usize = 64;

/// Buffer size for streaming digests (8 KB)
const STREAM_BUFFER_SIZE: usize = 8192;

/// Hash a byte slice, returning the lowercase hex digest
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Hash everything a reader yields, returning the lowercase hex digest
pub fn sha256_reader<R: Read>(mut reader: R) -> io::Result<String> {
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; STREAM_BUFFER_SIZE];

    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Check that a string is a well-formed lowercase SHA-256 hex digest
pub fn is_sha256_hex(value: &str) -> bool {
    value.len() == SHA256_HEX_LEN
        && value
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_value() {
        assert_eq!(
            sha256_hex(b"hello"),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn test_sha256_empty() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_reader_matches_slice() {
        let data = vec![7u8; STREAM_BUFFER_SIZE * 3 + 17];
        let streamed = sha256_reader(&data[..]).unwrap();
        assert_eq!(streamed, sha256_hex(&data));
    }

    #[test]
    fn test_is_sha256_hex() {
        assert!(is_sha256_hex(&sha256_hex(b"tarball")));
        assert!(!is_sha256_hex("abc123"));
        // Uppercase is not what templates expect
        assert!(!is_sha256_hex(
            "2CF24DBA5FB0A30E26E83B2AC5B9E29E1B161E5C1FA7425E73043362938B9824"
        ));
    }
}
