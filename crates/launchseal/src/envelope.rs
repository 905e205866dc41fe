//! Encrypt-then-sign composition of a launch token.
//!
//! Token format:
//! [12 bytes: outer nonce][32 bytes: HMAC tag][8 bytes: timestamp LE]
//! [32 bytes: signature nonce][1 byte: version][12 bytes: GCM nonce]
//! [16 bytes: GCM tag][N bytes: ciphertext]
//!
//! Both per-message keys are derived from the shared secret with HKDF, using
//! a fixed domain string followed by the outer nonce as info.

use chrono::{DateTime, Utc};
use launchseal_crypto::timestamp;
use launchseal_crypto::{
    decrypt, derive_key, encrypt, random_array, sign, verify, Clock, RandomSource,
    AES_GCM_NONCE_LENGTH, AES_GCM_TAG_LENGTH, ENVELOPE_HEADER_LENGTH, HMAC_TAG_LENGTH,
    SIGNATURE_NONCE_LENGTH, SIGNED_HEADER_LENGTH, TIMESTAMP_LENGTH,
};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::SealError;
use crate::secret::SharedSecret;

/// Domain string for the AES-256-GCM key.
pub const CIPHER_KEY_DOMAIN: &str = "sectra/encryptedonetimesignature/cipherkey";

/// Domain string for the HMAC-SHA256 key.
pub const SIGNATURE_KEY_DOMAIN: &str = "sectra/encryptedonetimesignature/signaturekey";

pub const OUTER_NONCE_LENGTH: usize = 12;

/// Smallest well-formed token: outer nonce, signed header and an envelope
/// with an empty ciphertext.
pub const MIN_TOKEN_LENGTH: usize =
    OUTER_NONCE_LENGTH + SIGNED_HEADER_LENGTH + ENVELOPE_HEADER_LENGTH;

/// Per-message subkeys.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct MessageKeys {
    pub cipher: [u8; 32],
    pub signature: [u8; 32],
}

fn domain_info(domain: &str, outer_nonce: &[u8; OUTER_NONCE_LENGTH]) -> Vec<u8> {
    let mut info = Vec::with_capacity(domain.len() + OUTER_NONCE_LENGTH);
    info.extend_from_slice(domain.as_bytes());
    info.extend_from_slice(outer_nonce);
    info
}

/// Derive the cipher and signature keys bound to one outer nonce.
pub fn derive_message_keys(
    secret: &SharedSecret,
    outer_nonce: &[u8; OUTER_NONCE_LENGTH],
) -> Result<MessageKeys, SealError> {
    let cipher = derive_key(secret.as_bytes(), &domain_info(CIPHER_KEY_DOMAIN, outer_nonce))?;
    let signature = derive_key(secret.as_bytes(), &domain_info(SIGNATURE_KEY_DOMAIN, outer_nonce))?;
    Ok(MessageKeys {
        cipher: *cipher,
        signature: *signature,
    })
}

/// Encrypt `data` and sign the envelope, returning the raw token bytes.
pub fn encrypt_and_sign(
    data: &[u8],
    secret: &SharedSecret,
    rng: &dyn RandomSource,
    clock: &dyn Clock,
) -> Result<Vec<u8>, SealError> {
    let outer_nonce: [u8; OUTER_NONCE_LENGTH] = random_array(rng)?;
    let keys = derive_message_keys(secret, &outer_nonce)?;

    let envelope = encrypt(data, &keys.cipher, rng)?;
    let signed = sign(&envelope, &keys.signature, rng, clock)?;

    let mut token = Vec::with_capacity(OUTER_NONCE_LENGTH + signed.len());
    token.extend_from_slice(&outer_nonce);
    token.extend_from_slice(&signed);
    Ok(token)
}

/// A verified and decrypted token.
#[derive(Clone, PartialEq, Eq)]
pub struct OpenedMessage {
    pub plaintext: Vec<u8>,
    /// Signer's claimed issue time. No freshness policy has been applied.
    pub issued_at: DateTime<Utc>,
    pub signature_nonce: [u8; SIGNATURE_NONCE_LENGTH],
}

impl std::fmt::Debug for OpenedMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenedMessage")
            .field("plaintext_len", &self.plaintext.len())
            .field("issued_at", &self.issued_at)
            .finish_non_exhaustive()
    }
}

/// Verify the signature on `token`, then decrypt the envelope it carries.
pub fn verify_and_decrypt(token: &[u8], secret: &SharedSecret) -> Result<OpenedMessage, SealError> {
    if token.len() < MIN_TOKEN_LENGTH {
        return Err(SealError::TokenTooShort {
            min: MIN_TOKEN_LENGTH,
            got: token.len(),
        });
    }

    let (nonce, signed) = token.split_at(OUTER_NONCE_LENGTH);
    let mut outer_nonce = [0u8; OUTER_NONCE_LENGTH];
    outer_nonce.copy_from_slice(nonce);
    let keys = derive_message_keys(secret, &outer_nonce)?;

    let payload = verify(signed, &keys.signature)?;
    let plaintext = decrypt(&payload.data, &keys.cipher)?;

    Ok(OpenedMessage {
        plaintext,
        issued_at: payload.issued_at,
        signature_nonce: payload.nonce,
    })
}

/// Unauthenticated view of a token's fields.
///
/// Nothing here has been verified; use it for diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLayout<'a> {
    pub outer_nonce: &'a [u8],
    pub hmac_tag: &'a [u8],
    pub raw_timestamp: u64,
    pub signature_nonce: &'a [u8],
    pub version: u8,
    pub gcm_nonce: &'a [u8],
    pub gcm_tag: &'a [u8],
    pub ciphertext: &'a [u8],
}

impl<'a> TokenLayout<'a> {
    pub fn parse(token: &'a [u8]) -> Result<Self, SealError> {
        if token.len() < MIN_TOKEN_LENGTH {
            return Err(SealError::TokenTooShort {
                min: MIN_TOKEN_LENGTH,
                got: token.len(),
            });
        }

        let (outer_nonce, rest) = token.split_at(OUTER_NONCE_LENGTH);
        let (hmac_tag, rest) = rest.split_at(HMAC_TAG_LENGTH);
        let (timestamp_bytes, rest) = rest.split_at(TIMESTAMP_LENGTH);
        let (signature_nonce, rest) = rest.split_at(SIGNATURE_NONCE_LENGTH);
        let (version, rest) = rest.split_at(1);
        let (gcm_nonce, rest) = rest.split_at(AES_GCM_NONCE_LENGTH);
        let (gcm_tag, ciphertext) = rest.split_at(AES_GCM_TAG_LENGTH);

        let mut raw = [0u8; TIMESTAMP_LENGTH];
        raw.copy_from_slice(timestamp_bytes);

        Ok(Self {
            outer_nonce,
            hmac_tag,
            raw_timestamp: u64::from_le_bytes(raw),
            signature_nonce,
            version: version[0],
            gcm_nonce,
            gcm_tag,
            ciphertext,
        })
    }

    /// Decode the claimed issue time.
    pub fn issued_at(&self) -> Result<DateTime<Utc>, SealError> {
        Ok(timestamp::decode(self.raw_timestamp)?)
    }
}
