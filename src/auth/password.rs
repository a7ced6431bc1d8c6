use std::fmt::Write;

use sha2::{Digest, Sha256};

/// Credential layout: `sha256$<salt-hex>$<digest-hex>`.
const SCHEME: &str = "sha256";

const SALT_LEN: usize = 16;

/// Hash a clear-text password into an opaque storable credential. A fresh
/// random salt goes into every call, so hashing the same password twice
/// yields different credentials.
pub fn hash(password: &str) -> String {
    let salt: [u8; SALT_LEN] = rand::random();
    let digest = digest(&salt, password);
    format!("{SCHEME}${}${}", to_hex(&salt), to_hex(&digest))
}

/// Check a clear-text password against a stored credential. Malformed
/// credentials fail verification; they never panic.
pub fn verify(password: &str, stored: &str) -> bool {
    let mut parts = stored.split('$');
    let (scheme, salt_hex, digest_hex) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(salt), Some(digest), None) => (scheme, salt, digest),
        _ => return false,
    };
    if scheme != SCHEME {
        return false;
    }

    match from_hex(salt_hex) {
        Some(salt) => to_hex(&digest(&salt, password)) == digest_hex,
        None => false,
    }
}

fn digest(salt: &[u8], password: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hasher.finalize().into()
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut acc, byte| {
        let _ = write!(acc, "{byte:02x}");
        acc
    })
}

fn from_hex(hex: &str) -> Option<Vec<u8>> {
    fn nibble(byte: u8) -> Option<u8> {
        match byte {
            b'0'..=b'9' => Some(byte - b'0'),
            b'a'..=b'f' => Some(byte - b'a' + 10),
            b'A'..=b'F' => Some(byte - b'A' + 10),
            _ => None,
        }
    }

    if hex.len() % 2 != 0 {
        return None;
    }
    hex.as_bytes()
        .chunks(2)
        .map(|pair| Some(nibble(pair[0])? * 16 + nibble(pair[1])?))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn salted_hashes_differ_but_both_verify() {
        let first = hash("hunter2");
        let second = hash("hunter2");

        assert_ne!(first, second);
        assert!(verify("hunter2", &first));
        assert!(verify("hunter2", &second));
    }

    #[test]
    fn credential_is_opaque_and_scheme_tagged() {
        let stored = hash("hunter2");
        assert!(stored.starts_with("sha256$"));
        assert!(!stored.contains("hunter2"));
    }

    #[test]
    fn wrong_password_fails() {
        let stored = hash("hunter2");
        assert!(!verify("hunter3", &stored));
        assert!(!verify("", &stored));
    }

    #[test]
    fn malformed_credentials_fail_without_panicking() {
        assert!(!verify("hunter2", ""));
        assert!(!verify("hunter2", "hunter2"));
        assert!(!verify("hunter2", "sha256$abc"));
        assert!(!verify("hunter2", "sha256$zz$00"));
        assert!(!verify("hunter2", "sha256$0$00"));
        assert!(!verify("hunter2", "sha256$é0$00"));
        assert!(!verify("hunter2", "md5$00$00"));
        assert!(!verify("hunter2", "sha256$00$00$00"));
    }

    #[test]
    fn hex_round_trips() {
        assert_eq!(from_hex("00ff10"), Some(vec![0x00, 0xff, 0x10]));
        assert_eq!(to_hex(&[0x00, 0xff, 0x10]), "00ff10");
        assert_eq!(from_hex("0g"), None);
        assert_eq!(from_hex("0"), None);
    }
}
