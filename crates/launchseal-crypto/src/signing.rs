//! HMAC-SHA256 one-time signatures.
//!
//! Signed format:
//! [32 bytes: HMAC tag][8 bytes: timestamp u64 LE][32 bytes: nonce][N bytes: data]
//!
//! The tag covers everything after it. The timestamp and nonce give the
//! verifier freshness evidence; whether and how it enforces a freshness
//! window or a replay cache is up to the verifier.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::CryptoError;
use crate::rng::{random_array, RandomSource};
use crate::timestamp::{self, Clock};
use crate::types::{
    HMAC_TAG_LENGTH, SIGNATURE_KEY_LENGTH, SIGNATURE_NONCE_LENGTH, SIGNED_HEADER_LENGTH,
    TIMESTAMP_LENGTH,
};

type HmacSha256 = Hmac<Sha256>;

/// The authenticated contents of a signed envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedPayload {
    /// When the signer produced the envelope (unverified freshness claim).
    pub issued_at: DateTime<Utc>,
    /// The signer's random nonce.
    pub nonce: [u8; SIGNATURE_NONCE_LENGTH],
    /// The signed data.
    pub data: Vec<u8>,
}

fn mac_for(signature_key: &[u8]) -> Result<HmacSha256, CryptoError> {
    if signature_key.len() != SIGNATURE_KEY_LENGTH {
        return Err(CryptoError::InvalidKeyLength {
            expected: SIGNATURE_KEY_LENGTH,
            got: signature_key.len(),
        });
    }
    HmacSha256::new_from_slice(signature_key).map_err(|_| CryptoError::InvalidKeyLength {
        expected: SIGNATURE_KEY_LENGTH,
        got: signature_key.len(),
    })
}

/// Pack `data` with the current timestamp and a fresh nonce.
///
/// Format: [timestamp:8B LE][nonce:32B][data]
fn pack(data: &[u8], rng: &dyn RandomSource, clock: &dyn Clock) -> Result<Vec<u8>, CryptoError> {
    let ticks = timestamp::encode_utc(clock.now())?;
    let nonce: [u8; SIGNATURE_NONCE_LENGTH] = random_array(rng)?;

    let mut packed = Vec::with_capacity(TIMESTAMP_LENGTH + SIGNATURE_NONCE_LENGTH + data.len());
    packed.extend_from_slice(&ticks.to_le_bytes());
    packed.extend_from_slice(&nonce);
    packed.extend_from_slice(data);
    Ok(packed)
}

/// Sign `data` with HMAC-SHA256.
///
/// # Arguments
/// * `data` - Bytes to sign (an encrypted envelope in practice)
/// * `signature_key` - 32-byte HMAC key
/// * `rng` - Source of the 32-byte signature nonce
/// * `clock` - Source of the issue timestamp
///
/// # Returns
/// [tag:32B][timestamp:8B][nonce:32B][data]
pub fn sign(
    data: &[u8],
    signature_key: &[u8],
    rng: &dyn RandomSource,
    clock: &dyn Clock,
) -> Result<Vec<u8>, CryptoError> {
    let mut mac = mac_for(signature_key)?;
    let packed = pack(data, rng, clock)?;
    mac.update(&packed);
    let tag = mac.finalize().into_bytes();

    let mut signed = Vec::with_capacity(HMAC_TAG_LENGTH + packed.len());
    signed.extend_from_slice(&tag);
    signed.extend_from_slice(&packed);
    Ok(signed)
}

/// Verify a signed envelope and unpack it.
///
/// The tag comparison is constant time. The timestamp is decoded but not
/// checked against any freshness window.
pub fn verify(signed: &[u8], signature_key: &[u8]) -> Result<SignedPayload, CryptoError> {
    let mut mac = mac_for(signature_key)?;
    if signed.len() < SIGNED_HEADER_LENGTH {
        return Err(CryptoError::DataTooShort {
            expected: SIGNED_HEADER_LENGTH,
            got: signed.len(),
        });
    }

    let (tag, packed) = signed.split_at(HMAC_TAG_LENGTH);
    mac.update(packed);
    mac.verify_slice(tag).map_err(|_| CryptoError::SignatureMismatch)?;

    let (raw_timestamp, rest) = packed.split_at(TIMESTAMP_LENGTH);
    let (nonce, data) = rest.split_at(SIGNATURE_NONCE_LENGTH);

    let mut timestamp_bytes = [0u8; TIMESTAMP_LENGTH];
    timestamp_bytes.copy_from_slice(raw_timestamp);
    let mut nonce_bytes = [0u8; SIGNATURE_NONCE_LENGTH];
    nonce_bytes.copy_from_slice(nonce);

    Ok(SignedPayload {
        issued_at: timestamp::decode(u64::from_le_bytes(timestamp_bytes))?,
        nonce: nonce_bytes,
        data: data.to_vec(),
    })
}
