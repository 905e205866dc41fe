//! AES-256-GCM envelope encryption.
//!
//! Wire format v2:
//! [1 byte: version=2][12 bytes: nonce][16 bytes: tag][N bytes: ciphertext]
//!
//! The AEAD primitive emits ciphertext followed by the tag. Peers expect the
//! tag first, so the two are swapped when packing and swapped back when
//! unpacking.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};

use crate::error::CryptoError;
use crate::rng::{random_array, RandomSource};
use crate::types::{
    AES_GCM_NONCE_LENGTH, AES_GCM_TAG_LENGTH, AES_KEY_LENGTH, CURRENT_VERSION,
    ENVELOPE_HEADER_LENGTH, SUPPORTED_VERSIONS,
};

fn cipher_for(key: &[u8]) -> Result<Aes256Gcm, CryptoError> {
    if key.len() != AES_KEY_LENGTH {
        return Err(CryptoError::InvalidKeyLength {
            expected: AES_KEY_LENGTH,
            got: key.len(),
        });
    }
    Aes256Gcm::new_from_slice(key).map_err(|e| CryptoError::EncryptionFailed(e.to_string()))
}

/// Encrypt data using AES-256-GCM with v2 wire format.
///
/// A fresh 12-byte nonce is drawn from `rng` for every call. No additional
/// authenticated data is bound.
///
/// Returns: [version=2:1B][nonce:12B][tag:16B][ciphertext]
pub fn encrypt(
    plaintext: &[u8],
    cipher_key: &[u8],
    rng: &dyn RandomSource,
) -> Result<Vec<u8>, CryptoError> {
    let cipher = cipher_for(cipher_key)?;
    let nonce: [u8; AES_GCM_NONCE_LENGTH] = random_array(rng)?;

    let sealed = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext)
        .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;
    let (ciphertext, tag) = sealed.split_at(sealed.len() - AES_GCM_TAG_LENGTH);

    let mut result = Vec::with_capacity(ENVELOPE_HEADER_LENGTH + ciphertext.len());
    result.push(CURRENT_VERSION);
    result.extend_from_slice(&nonce);
    result.extend_from_slice(tag);
    result.extend_from_slice(ciphertext);
    Ok(result)
}

/// Decrypt a v2 envelope produced by [`encrypt`] (or by a peer).
pub fn decrypt(envelope: &[u8], cipher_key: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let cipher = cipher_for(cipher_key)?;
    if envelope.len() < ENVELOPE_HEADER_LENGTH {
        return Err(CryptoError::DataTooShort {
            expected: ENVELOPE_HEADER_LENGTH,
            got: envelope.len(),
        });
    }

    let version = envelope[0];
    if !SUPPORTED_VERSIONS.contains(&version) {
        return Err(CryptoError::UnsupportedVersion(version));
    }

    let nonce = &envelope[1..1 + AES_GCM_NONCE_LENGTH];
    let tag = &envelope[1 + AES_GCM_NONCE_LENGTH..ENVELOPE_HEADER_LENGTH];
    let ciphertext = &envelope[ENVELOPE_HEADER_LENGTH..];

    let mut sealed = Vec::with_capacity(ciphertext.len() + AES_GCM_TAG_LENGTH);
    sealed.extend_from_slice(ciphertext);
    sealed.extend_from_slice(tag);

    cipher
        .decrypt(Nonce::from_slice(nonce), sealed.as_slice())
        .map_err(|_| CryptoError::DecryptionFailed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{FixedRandom, OsRandom};

    fn random_key() -> [u8; 32] {
        random_array(&OsRandom).unwrap()
    }

    #[test]
    fn envelope_layout() {
        let key = random_key();
        for len in [0usize, 1, 5, 1024] {
            let plaintext = vec![0x5Au8; len];
            let envelope = encrypt(&plaintext, &key, &OsRandom).unwrap();
            assert_eq!(envelope[0], 2);
            assert_eq!(envelope[1..13].len(), 12);
            assert_eq!(envelope[13..29].len(), 16);
            assert_eq!(envelope.len() - 29, len);
        }
    }

    #[test]
    fn tag_precedes_ciphertext() {
        // Compare against the primitive's native ciphertext||tag order.
        let key = [0x11u8; 32];
        let envelope = encrypt(b"hello", &key, &FixedRandom(0)).unwrap();

        let native = Aes256Gcm::new_from_slice(&key)
            .unwrap()
            .encrypt(Nonce::from_slice(&[0u8; 12]), b"hello".as_slice())
            .unwrap();
        assert_eq!(&envelope[1..13], &[0u8; 12]);
        assert_eq!(&envelope[13..29], &native[5..]);
        assert_eq!(&envelope[29..], &native[..5]);
    }

    #[test]
    fn known_answer() {
        let key = hex::decode("b2316319e5d80ab634e551a507559bddd7593b5246fa7a8f73bd8a0a11742c1e")
            .unwrap();
        let envelope = encrypt(b"hello", &key, &FixedRandom(0)).unwrap();
        assert_eq!(
            hex::encode(envelope),
            "02000000000000000000000000385637235a2dde06c03145d7f66c6266c66114a866"
        );
    }

    #[test]
    fn round_trip_sizes() {
        let key = random_key();
        for len in [0usize, 1, 1024, 65536] {
            let mut plaintext = vec![0u8; len];
            OsRandom.fill(&mut plaintext).unwrap();
            let envelope = encrypt(&plaintext, &key, &OsRandom).unwrap();
            assert_eq!(decrypt(&envelope, &key).unwrap(), plaintext);
        }
    }

    #[test]
    fn different_ciphertext_each_time() {
        let key = random_key();
        let enc1 = encrypt(b"test", &key, &OsRandom).unwrap();
        let enc2 = encrypt(b"test", &key, &OsRandom).unwrap();
        assert_ne!(enc1, enc2);
    }

    #[test]
    fn wrong_key_fails() {
        let envelope = encrypt(b"secret", &random_key(), &OsRandom).unwrap();
        let err = decrypt(&envelope, &random_key()).unwrap_err();
        assert!(matches!(err, CryptoError::DecryptionFailed));
    }

    #[test]
    fn rejects_tampered_tag() {
        let key = random_key();
        let mut envelope = encrypt(b"secret", &key, &OsRandom).unwrap();
        envelope[13] ^= 0x01;
        assert!(decrypt(&envelope, &key).is_err());
    }

    #[test]
    fn rejects_tampered_ciphertext() {
        let key = random_key();
        let mut envelope = encrypt(b"secret", &key, &OsRandom).unwrap();
        let last = envelope.len() - 1;
        envelope[last] ^= 0xff;
        assert!(decrypt(&envelope, &key).is_err());
    }

    #[test]
    fn rejects_legacy_version() {
        let key = random_key();
        let mut envelope = encrypt(&[1, 2, 3], &key, &OsRandom).unwrap();
        envelope[0] = 1;
        let err = decrypt(&envelope, &key).unwrap_err();
        assert!(err.to_string().contains("Unsupported encryption version: 1"));
    }

    #[test]
    fn rejects_truncated_data() {
        let key = random_key();
        let mut too_short = vec![0u8; ENVELOPE_HEADER_LENGTH - 1];
        too_short[0] = CURRENT_VERSION;
        let err = decrypt(&too_short, &key).unwrap_err();
        assert!(matches!(err, CryptoError::DataTooShort { expected: 29, got: 28 }));
    }

    #[test]
    fn rejects_short_key() {
        let err = encrypt(b"data", &[0u8; 16], &OsRandom).unwrap_err();
        assert!(matches!(err, CryptoError::InvalidKeyLength { expected: 32, got: 16 }));
    }
}
