//! Message-level operations: the two calls the application actually makes.
//!
//! [`encrypt_message`] runs once when a card is saved (creation *and* edit —
//! an edit re-encrypts wholesale with a fresh salt and IV, never in place).
//! [`decrypt_message`] runs once when a card is opened with an answer. Both
//! are pure, stateless transformations; the storage layer owns persistence
//! of the resulting document.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::cipher::{decrypt, encrypt};
use crate::error::CipherError;
use crate::kdf::{derive_key, generate_salt, SALT_LEN};

/// The durable document the storage layer persists for one encrypted card.
///
/// Field names are camelCase because this document is read and written by
/// JavaScript clients against the same stored rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptedMessage {
    /// base64 of `IV(12) || ciphertext || tag(16)`.
    pub encrypted_payload: String,
    /// base64 of the 16-byte random salt, stored in the clear.
    pub salt: String,
}

/// Encrypt a card's HTML body under a secret answer.
///
/// Generates a fresh 16-byte salt, derives the key, and encrypts. The salt
/// is not secret — it is stored alongside the ciphertext — but is never
/// reused for another message.
///
/// # Errors
///
/// Returns [`CipherError::AeadFailure`] on an internal AEAD error
/// (unreachable with a well-formed key).
pub fn encrypt_message(
    plaintext: &str,
    secret_answer: &str,
) -> Result<EncryptedMessage, CipherError> {
    let salt = generate_salt();
    let key = derive_key(secret_answer, &salt);
    let encrypted_payload = encrypt(plaintext, &key)?;
    Ok(EncryptedMessage {
        encrypted_payload,
        salt: STANDARD.encode(salt),
    })
}

/// Decrypt a stored card with the supplied secret answer.
///
/// Re-derives the key from scratch on every attempt; nothing is cached
/// between calls.
///
/// # Errors
///
/// Returns [`CipherError::MalformedPayload`] if the salt or payload is not
/// valid base64, or the payload is shorter than the framing minimum.
/// Returns [`CipherError::InvalidSaltLength`] if the salt decodes to a
/// length other than 16 bytes.
/// Returns [`CipherError::DecryptionFailed`] if the answer is wrong or the
/// payload has been corrupted — the two cases are indistinguishable.
pub fn decrypt_message(
    encrypted_payload: &str,
    salt: &str,
    secret_answer: &str,
) -> Result<String, CipherError> {
    let salt_bytes = STANDARD
        .decode(salt)
        .map_err(|_| CipherError::MalformedPayload)?;
    let salt_bytes: [u8; SALT_LEN] = salt_bytes
        .try_into()
        .map_err(|_| CipherError::InvalidSaltLength)?;

    let key = derive_key(secret_answer, &salt_bytes);
    decrypt(encrypted_payload, &key)
}
