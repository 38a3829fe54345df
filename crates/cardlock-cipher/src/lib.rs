//! Client-side message encryption for cardlock.
//!
//! A card's HTML body is encrypted under a key derived from the child's
//! answer to a security question, so the server and its operators never see
//! plaintext content or the answer. Each operation is a pure, stateless
//! transformation: no I/O, no logging, no shared state, no key caching.
//!
//! # Stored format
//!
//! ```text
//! encryptedPayload = base64( IV(12) || AES-256-GCM ciphertext || tag(16) )
//! salt             = base64( 16 random bytes )          # stored in the clear
//! key              = PBKDF2-HMAC-SHA256(answer, salt, 100_000 iterations)
//! ```
//!
//! Every parameter above is part of the cross-client compatibility contract:
//! a message encrypted by any conforming client decrypts in any other.
//!
//! # Example
//!
//! ```
//! use cardlock_cipher::{decrypt_message, encrypt_message};
//!
//! let card = encrypt_message("<p>שלום, מותק!</p>", "כלב1998")?;
//! let body = decrypt_message(&card.encrypted_payload, &card.salt, "כלב1998")?;
//! assert_eq!(body, "<p>שלום, מותק!</p>");
//! # Ok::<(), cardlock_cipher::CipherError>(())
//! ```

pub mod cipher;
pub mod error;
pub mod kdf;
pub mod message;
pub mod refs;

pub use cipher::{IV_LEN, TAG_LEN};
pub use error::CipherError;
pub use kdf::{derive_key, generate_salt, DerivedKey, KEY_LEN, PBKDF2_ITERATIONS, SALT_LEN};
pub use message::{decrypt_message, encrypt_message, EncryptedMessage};
pub use refs::{conceal_image_sources, private_references, resolve_image_sources, PRIVATE_SCHEME};
