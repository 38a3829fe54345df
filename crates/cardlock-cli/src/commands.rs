//! Command implementations, kept as pure string transformations.
//!
//! File and terminal I/O stays in `main.rs`; everything here takes input
//! text and returns output text, which keeps the commands directly testable.

use anyhow::{Context, Result};
use cardlock_cipher::{
    cipher::split_payload, encrypt_message, CipherError, EncryptedMessage, IV_LEN, SALT_LEN,
    TAG_LEN,
};

/// The single user-facing failure message for any unlock problem.
///
/// A wrong answer, a corrupted payload, and a malformed document must be
/// indistinguishable to the user — distinguishing them would hand an
/// attacker probing answers an oracle.
pub const UNLOCK_FAILED: &str = "could not unlock: wrong answer or unreadable card";

/// Parse the stored JSON document.
pub fn parse_document(document: &str) -> Result<EncryptedMessage> {
    serde_json::from_str(document).context("input is not an encrypted card document")
}

/// Encrypt a message body and render the storable JSON document.
pub fn encrypt(plaintext: &str, secret_answer: &str) -> Result<String> {
    let card = encrypt_message(plaintext, secret_answer)
        .context("encryption failed")?;
    let mut json = serde_json::to_string_pretty(&card)?;
    json.push('\n');
    Ok(json)
}

/// Decrypt a parsed document with one answer attempt.
///
/// Returns the raw [`CipherError`] so the caller can drive retry policy;
/// anything shown to the user must collapse to [`UNLOCK_FAILED`].
pub fn decrypt(card: &EncryptedMessage, secret_answer: &str) -> Result<String, CipherError> {
    cardlock_cipher::decrypt_message(&card.encrypted_payload, &card.salt, secret_answer)
}

/// Describe a document's framing without a key.
pub fn inspect(card: &EncryptedMessage) -> Result<String> {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use std::fmt::Write as _;

    let mut report = String::new();
    match split_payload(&card.encrypted_payload) {
        Ok((iv, ciphertext_and_tag)) => {
            let body_len = ciphertext_and_tag.len() - TAG_LEN;
            writeln!(
                report,
                "payload: {} bytes ({} base64 chars)",
                IV_LEN + ciphertext_and_tag.len(),
                card.encrypted_payload.len()
            )?;
            writeln!(report, "  iv:         {} bytes", iv.len())?;
            writeln!(report, "  ciphertext: {body_len} bytes")?;
            writeln!(report, "  tag:        {TAG_LEN} bytes")?;
        }
        Err(_) => writeln!(report, "payload: malformed (not base64, or truncated)")?,
    }
    match STANDARD.decode(&card.salt) {
        Ok(salt) if salt.len() == SALT_LEN => {
            writeln!(report, "salt: {} bytes", salt.len())?;
        }
        Ok(salt) => writeln!(report, "salt: {} bytes (expected {SALT_LEN})", salt.len())?,
        Err(_) => writeln!(report, "salt: malformed (not base64)")?,
    }
    Ok(report)
}
