//! Content fingerprints
//!
//! SHA-256 over the exact bytes. No line-ending or encoding normalisation.

use std::fmt;

use sha2::{Digest, Sha256};

/// SHA-256 digest of a byte buffer, used only for equality checks
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint(sha256:{})", self)
    }
}

/// Digest the full buffer
pub fn fingerprint(data: &[u8]) -> Fingerprint {
    let mut hasher = Sha256::new();
    hasher.update(data);
    Fingerprint(hasher.finalize().into())
}

/// Whether two buffers have the same fingerprint
pub fn equal(a: &[u8], b: &[u8]) -> bool {
    fingerprint(a) == fingerprint(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digest() {
        assert_eq!(
            fingerprint(b"abc").to_string(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(
            fingerprint(b"").to_string(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_equal_is_reflexive() {
        let buf = b"<?php echo 'hello'; ?>\n".to_vec();
        assert!(equal(&buf, &buf));
        assert!(equal(&buf, &buf.clone()));
    }

    #[test]
    fn test_single_byte_difference() {
        let a = vec![0u8; 4096];
        for i in [0, 1, 2047, 4095] {
            let mut b = a.clone();
            b[i] ^= 0x01;
            assert!(!equal(&a, &b), "flip at {} not detected", i);
        }
    }

    #[test]
    fn test_no_line_ending_normalization() {
        assert!(!equal(b"line\n", b"line\r\n"));
        assert!(!equal(b"abc", b"abc\n"));
    }
}
