//! Key derivation from a security-question answer.
//!
//! A child's secret answer is stretched into a 256-bit AES key with
//! PBKDF2-HMAC-SHA256 at a fixed iteration count. Every constant here is
//! compatibility-critical: payloads encrypted by one client are decrypted by
//! another, so changing the iteration count, hash, or output length silently
//! breaks every previously stored message.
//!
//! The answer is used exactly as supplied — no trimming, no case folding.
//! Derivation with a wrong answer succeeds and yields a wrong key; wrongness
//! surfaces only at decrypt time as an authentication-tag failure.

use aes_gcm::aead::OsRng;
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::ZeroizeOnDrop;

/// Byte length of the random per-message salt.
pub const SALT_LEN: usize = 16;

/// Byte length of the derived AES-256 key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// PBKDF2 iteration count.
///
/// Chosen to make brute-forcing low-entropy answers expensive while keeping
/// a legitimate unlock sub-second on commodity hardware. Interop-frozen.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// A symmetric key derived from a secret answer and a salt.
///
/// Exists only for the duration of one encrypt or decrypt call — never
/// cached, never serialised, re-derived on every attempt. The key material
/// is overwritten with zeroes on drop.
#[derive(Clone, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_LEN],
}

impl DerivedKey {
    /// Borrow the raw key bytes for an immediate AEAD operation.
    pub(crate) fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material — not even in debug builds.
        f.write_str("DerivedKey([REDACTED])")
    }
}

/// Generate a fresh random salt via the OS CSPRNG.
///
/// Salts are unique per encryption operation and never reused across
/// messages, even for the same answer.
pub fn generate_salt() -> [u8; SALT_LEN] {
    use aes_gcm::aead::rand_core::RngCore;
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    salt
}

/// Derive the AES-256 key for one message.
///
/// Deterministic: the same `(secret_answer, salt)` pair always yields the
/// same key. There is no verification step here — any answer produces *a*
/// key, and only decryption can tell whether it was the right one.
pub fn derive_key(secret_answer: &str, salt: &[u8; SALT_LEN]) -> DerivedKey {
    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(secret_answer.as_bytes(), salt, PBKDF2_ITERATIONS, &mut key);
    DerivedKey { key }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivation_is_deterministic() {
        let salt = [0x24u8; SALT_LEN];
        let k1 = derive_key("כלב1998", &salt);
        let k2 = derive_key("כלב1998", &salt);
        assert_eq!(k1.as_bytes(), k2.as_bytes());
    }

    #[test]
    fn different_answer_different_key() {
        let salt = [0x24u8; SALT_LEN];
        let k1 = derive_key("כלב1998", &salt);
        let k2 = derive_key("כלב1999", &salt);
        assert_ne!(k1.as_bytes(), k2.as_bytes());
    }

    #[test]
    fn different_salt_different_key() {
        let k1 = derive_key("answer", &[0x01u8; SALT_LEN]);
        let k2 = derive_key("answer", &[0x02u8; SALT_LEN]);
        assert_ne!(k1.as_bytes(), k2.as_bytes());
    }

    #[test]
    fn answer_is_not_normalised() {
        let salt = [0x24u8; SALT_LEN];
        let exact = derive_key("Rex", &salt);
        assert_ne!(exact.as_bytes(), derive_key("rex", &salt).as_bytes());
        assert_ne!(exact.as_bytes(), derive_key(" Rex", &salt).as_bytes());
        assert_ne!(exact.as_bytes(), derive_key("Rex ", &salt).as_bytes());
    }

    #[test]
    fn empty_answer_still_derives() {
        // Rejecting empty answers is a caller concern; the primitive accepts.
        let salt = [0x24u8; SALT_LEN];
        let key = derive_key("", &salt);
        assert_eq!(key.as_bytes().len(), KEY_LEN);
    }

    #[test]
    fn generated_salts_differ() {
        assert_ne!(generate_salt(), generate_salt());
    }

    #[test]
    fn debug_redacts_key_material() {
        let key = derive_key("secret", &[0x24u8; SALT_LEN]);
        assert_eq!(format!("{key:?}"), "DerivedKey([REDACTED])");
    }
}
