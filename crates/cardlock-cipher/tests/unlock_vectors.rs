//! Regression vectors for card encryption.
//!
//! These pin the end-to-end behaviour a real card goes through: written in
//! Hebrew with embedded images, saved, and later unlocked with the exact
//! answer the child chose.

use cardlock_cipher::{
    conceal_image_sources, decrypt_message, encrypt_message, resolve_image_sources, CipherError,
};

#[test]
fn hebrew_card_unlocks_with_exact_answer() {
    let card = encrypt_message("<p>שלום, מותק!</p>", "כלב1998").unwrap();

    let body = decrypt_message(&card.encrypted_payload, &card.salt, "כלב1998").unwrap();
    assert_eq!(body, "<p>שלום, מותק!</p>");

    assert!(matches!(
        decrypt_message(&card.encrypted_payload, &card.salt, "כלב1999"),
        Err(CipherError::DecryptionFailed)
    ));
}

#[test]
fn emoji_and_mixed_scripts_survive() {
    let body = "<p>מזל טוב! 🎂🎈 Happy birthday, חמודה 💛</p>";
    let card = encrypt_message(body, "סבתא רחל").unwrap();
    assert_eq!(
        decrypt_message(&card.encrypted_payload, &card.salt, "סבתא רחל").unwrap(),
        body
    );
}

#[test]
fn empty_card_body_round_trips() {
    let card = encrypt_message("", "rex").unwrap();
    assert_eq!(
        decrypt_message(&card.encrypted_payload, &card.salt, "rex").unwrap(),
        ""
    );
}

#[test]
fn edited_card_gets_fresh_salt_even_with_same_answer() {
    let original = encrypt_message("<p>draft</p>", "rex").unwrap();
    // An edit re-encrypts wholesale; the answer is unchanged.
    let edited = encrypt_message("<p>draft, revised</p>", "rex").unwrap();
    assert_ne!(original.salt, edited.salt);
    assert_ne!(original.encrypted_payload, edited.encrypted_payload);
}

#[test]
fn full_card_flow_with_private_images() {
    let authored = "<p>תראי מי גדל!</p>\
                    <img src=\"https://storage.example/sign/cards/42/pup.jpg?token=t1\">";

    // Save: conceal signed URLs, then encrypt.
    let concealed = conceal_image_sources(authored, |url| {
        url.strip_prefix("https://storage.example/sign/")
            .map(|rest| rest.split('?').next().unwrap_or(rest).to_owned())
    });
    assert!(concealed.contains("src=\"private://cards/42/pup.jpg\""));
    let card = encrypt_message(&concealed, "כלב1998").unwrap();

    // The ciphertext itself carries no signed URL and no private path.
    assert!(!card.encrypted_payload.contains("token"));
    assert!(!card.encrypted_payload.contains("private"));

    // Open: decrypt, then resolve fresh signed URLs.
    let body = decrypt_message(&card.encrypted_payload, &card.salt, "כלב1998").unwrap();
    assert_eq!(body, concealed);
    let rendered = resolve_image_sources(&body, |path| {
        Ok::<_, std::convert::Infallible>(format!(
            "https://storage.example/sign/{path}?token=t2"
        ))
    })
    .unwrap();
    assert!(rendered.contains("src=\"https://storage.example/sign/cards/42/pup.jpg?token=t2\""));
}
