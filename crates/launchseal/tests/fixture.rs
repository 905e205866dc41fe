//! Interoperability fixture: a token produced with pinned randomness and a
//! pinned clock must match the recorded reference byte for byte.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use base64ct::{Base64, Encoding};
use chrono::{TimeZone, Utc};
use hkdf::Hkdf;
use hmac::{Hmac, Mac};
use launchseal::{find_query_value, view, Sealer, SharedSecret, TokenLayout};
use launchseal_crypto::{FixedClock, FixedRandom};
use sha2::Sha256;

const REFERENCE: &str = "sharedSecretEncryptedUrlQuery=AAAAAAAAAAAAAAAAOKi3h9A9IkXyfno%2F6pP2AMQNY9tZaZGMtuwEvybiMhMAwACZXArcSAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAgAAAAAAAAAAAAAAADhWNyNaLd4GwDFF1%2FZsYmbGYRSoZg%3D%3D";

fn fixture_sealer() -> Sealer<FixedRandom, FixedClock> {
    let clock = FixedClock(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    Sealer::with_sources(FixedRandom(0), clock)
}

fn zero_secret() -> SharedSecret {
    SharedSecret::from([0u8; 32])
}

fn reference_token() -> Vec<u8> {
    let value = find_query_value(REFERENCE).unwrap();
    Base64::decode_vec(&value).unwrap()
}

#[test]
fn secure_matches_reference() {
    let query = fixture_sealer().secure("hello", &zero_secret()).unwrap();
    assert_eq!(query, REFERENCE);
}

#[test]
fn reference_views_back() {
    assert_eq!(view(REFERENCE, &zero_secret()).unwrap(), "hello");
}

#[test]
fn reference_layout() {
    let token = reference_token();
    let layout = TokenLayout::parse(&token).unwrap();

    assert_eq!(layout.outer_nonce, &[0u8; 12]);
    assert_eq!(layout.raw_timestamp, 0x48dc_0a5c_9900_c000);
    assert_eq!(layout.signature_nonce, &[0u8; 32]);
    assert_eq!(layout.version, 2);
    assert_eq!(layout.gcm_nonce, &[0u8; 12]);
    assert_eq!(layout.ciphertext.len(), "hello".len());
    assert_eq!(
        layout.issued_at().unwrap(),
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    );
}

/// Rebuild both subkeys and check the tag and ciphertext with the primitive
/// crates directly.
#[test]
fn reference_opens_with_independent_primitives() {
    let token = reference_token();
    let (outer_nonce, signed) = token.split_at(12);

    let hkdf = Hkdf::<Sha256>::new(Some(&[0u8; 32][..]), &[0u8; 32]);
    let mut cipher_key = [0u8; 32];
    let mut signature_key = [0u8; 32];
    hkdf.expand_multi_info(
        &[&b"sectra/encryptedonetimesignature/cipherkey"[..], outer_nonce],
        &mut cipher_key,
    )
    .unwrap();
    hkdf.expand_multi_info(
        &[&b"sectra/encryptedonetimesignature/signaturekey"[..], outer_nonce],
        &mut signature_key,
    )
    .unwrap();

    let (tag, packed) = signed.split_at(32);
    let mut mac = <Hmac<Sha256> as Mac>::new_from_slice(&signature_key).unwrap();
    mac.update(packed);
    mac.verify_slice(tag).unwrap();

    let envelope = &packed[8 + 32..];
    assert_eq!(
        hex::encode(envelope),
        "02000000000000000000000000385637235a2dde06c03145d7f66c6266c66114a866"
    );
    let nonce = &envelope[1..13];
    let gcm_tag = &envelope[13..29];
    let ciphertext = &envelope[29..];

    let mut sealed = ciphertext.to_vec();
    sealed.extend_from_slice(gcm_tag);
    let cipher = Aes256Gcm::new_from_slice(&cipher_key).unwrap();
    let plaintext = cipher
        .decrypt(Nonce::from_slice(nonce), sealed.as_slice())
        .unwrap();
    assert_eq!(plaintext, b"hello");
}
