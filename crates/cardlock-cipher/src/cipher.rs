//! AES-256-GCM encryption and decryption of a single message payload.
//!
//! **Algorithm choice:** plain AES-256-GCM with a random 96-bit IV, not a
//! nonce-misuse-resistant mode. Non-determinism is required here: identical
//! plaintexts must produce different ciphertexts, otherwise stored payloads
//! leak message equality. The IV never repeats in practice because both the
//! IV and the key's salt are drawn fresh from the OS CSPRNG per encryption.
//!
//! # Payload format
//!
//! ```text
//! base64( IV(12 bytes) || ciphertext || tag(16 bytes) )
//! ```
//!
//! Standard padded base64, matching the browser clients that produced the
//! existing stored messages. This layout is interop-frozen.

use aes_gcm::{
    aead::{Aead, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::CipherError;
use crate::kdf::DerivedKey;

/// Byte length of the AES-GCM IV (12 bytes = 96 bits).
pub const IV_LEN: usize = 12;

/// Byte length of the AES-GCM authentication tag (16 bytes = 128 bits).
pub const TAG_LEN: usize = 16;

/// Encrypt a plaintext message under a derived key.
///
/// A fresh random IV is generated per call, so the output differs on every
/// invocation even for identical plaintext and key.
///
/// # Errors
///
/// Returns [`CipherError::AeadFailure`] on an internal AEAD error
/// (unreachable with a well-formed key).
pub fn encrypt(plaintext: &str, key: &DerivedKey) -> Result<String, CipherError> {
    let cipher = Aes256Gcm::new(key.as_bytes().into());

    // Use OsRng for a cryptographically secure random IV.
    use aes_gcm::aead::rand_core::RngCore;
    let mut iv = [0u8; IV_LEN];
    OsRng.fill_bytes(&mut iv);

    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&iv), plaintext.as_bytes())
        .map_err(|_| CipherError::AeadFailure)?;

    let mut framed = Vec::with_capacity(IV_LEN + ciphertext.len());
    framed.extend_from_slice(&iv);
    framed.extend_from_slice(&ciphertext);
    Ok(STANDARD.encode(&framed))
}

/// Decrypt a base64 payload back to the plaintext message.
///
/// # Errors
///
/// Returns [`CipherError::MalformedPayload`] if the payload is not valid
/// base64 or is shorter than the `IV + tag` minimum.
/// Returns [`CipherError::DecryptionFailed`] if the authentication tag does
/// not verify — wrong answer, corruption, and tampering are deliberately
/// indistinguishable, and there is no partial recovery.
pub fn decrypt(payload: &str, key: &DerivedKey) -> Result<String, CipherError> {
    let (iv, ciphertext) = split_payload(payload)?;

    let cipher = Aes256Gcm::new(key.as_bytes().into());
    let plaintext = cipher
        .decrypt(Nonce::from_slice(&iv), ciphertext.as_slice())
        .map_err(|_| CipherError::DecryptionFailed)?;

    // A conforming encryptor only ever framed UTF-8; an authenticated payload
    // that is not UTF-8 is treated the same as any other decrypt failure.
    String::from_utf8(plaintext).map_err(|_| CipherError::DecryptionFailed)
}

/// Decode a payload and split it into `(IV, ciphertext + tag)`.
///
/// Shared by [`decrypt`] and by keyless framing inspection.
///
/// # Errors
///
/// Returns [`CipherError::MalformedPayload`] on base64 failure or a payload
/// shorter than `IV_LEN + TAG_LEN`.
pub fn split_payload(payload: &str) -> Result<([u8; IV_LEN], Vec<u8>), CipherError> {
    let framed = STANDARD
        .decode(payload)
        .map_err(|_| CipherError::MalformedPayload)?;
    if framed.len() < IV_LEN + TAG_LEN {
        return Err(CipherError::MalformedPayload);
    }
    let mut iv = [0u8; IV_LEN];
    iv.copy_from_slice(&framed[..IV_LEN]);
    Ok((iv, framed[IV_LEN..].to_vec()))
}
