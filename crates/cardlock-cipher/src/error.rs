//! Error taxonomy for the cipher layer.
//!
//! The cipher never logs, retries, or partially recovers — every failure is
//! surfaced synchronously to the immediate caller. Callers presenting errors
//! to end users must not distinguish [`CipherError::DecryptionFailed`] from
//! [`CipherError::MalformedPayload`]: revealing which one occurred gives an
//! attacker probing secret answers an oracle.

use thiserror::Error;

/// Errors produced by the cipher layer.
#[derive(Debug, Error)]
pub enum CipherError {
    /// The payload could not be base64-decoded, or decoded to fewer bytes
    /// than the minimum `IV + tag` framing requires.
    #[error("malformed payload")]
    MalformedPayload,

    /// The stored salt does not decode to exactly the expected length.
    #[error("invalid salt length")]
    InvalidSaltLength,

    /// Authentication tag verification failed.
    ///
    /// Deliberately carries no cause: a wrong secret answer and a corrupted
    /// payload are indistinguishable by design.
    #[error("decryption failed")]
    DecryptionFailed,

    /// Internal AEAD error on the encrypt path. Unreachable with a
    /// well-formed key and nonce.
    #[error("aead operation failed")]
    AeadFailure,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_cause_free() {
        // No variant message may leak why decryption failed.
        let msg = CipherError::DecryptionFailed.to_string();
        assert!(!msg.contains("tag"));
        assert!(!msg.contains("answer"));
        assert_eq!(msg, "decryption failed");
    }
}
