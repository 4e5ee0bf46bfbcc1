//! Content fingerprints using SHA1.
//!
//! The fingerprint is the full lowercase hex digest (40 chars), so the same
//! compiled text always produces the same output name.
//!
//! # Usage
//!
//! ```
//! use stamp::utils::hash;
//!
//! let fp = hash::fingerprint("alert('test')");
//! assert_eq!(fp, "6d62afcf8c88d2f842b6c95d33bba6b0a789f941");
//! ```

use sha1::{Digest, Sha1};

/// Length of a fingerprint in hex characters.
pub const FINGERPRINT_LEN: usize = 40;

/// Compute the raw 20-byte SHA1 digest.
#[inline]
pub fn compute<T: AsRef<[u8]> + ?Sized>(data: &T) -> [u8; 20] {
    Sha1::digest(data.as_ref()).into()
}

/// Compute the SHA1 digest as a lowercase hex string.
#[inline]
pub fn fingerprint<T: AsRef<[u8]> + ?Sized>(value: &T) -> String {
    hex::encode(compute(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_known_values() {
        assert_eq!(
            fingerprint(""),
            "da39a3ee5e6b4b0d3255bfef95601890afd80709"
        );
        assert_eq!(
            fingerprint("alert('test')"),
            "6d62afcf8c88d2f842b6c95d33bba6b0a789f941"
        );
    }

    #[test]
    fn test_fingerprint_is_stable() {
        let a = fingerprint("body{color:red}");
        let b = fingerprint(b"body{color:red}".as_slice());
        assert_eq!(a, b);
        assert_eq!(a.len(), FINGERPRINT_LEN);
        assert_ne!(a, fingerprint("body{color:blue}"));
    }
}
