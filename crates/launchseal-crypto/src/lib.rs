//! Cryptographic leaves for launch tokens: HKDF-SHA256 key derivation,
//! AES-256-GCM v2 envelopes and HMAC-SHA256 one-time signatures.
//!
//! Randomness and time are injected through [`RandomSource`] and [`Clock`]
//! so fixtures can pin every byte of the output. The deterministic
//! `FixedRandom` and `FixedClock` are only built with the `test-util`
//! feature.

pub mod aes_gcm;
pub mod error;
pub mod hkdf;
pub mod rng;
pub mod signing;
pub mod timestamp;
pub mod types;

pub use aes_gcm::{decrypt, encrypt};
pub use error::CryptoError;
pub use hkdf::{derive, derive_key};
pub use rng::{random_array, OsRandom, RandomSource};
pub use signing::{sign, verify, SignedPayload};
pub use timestamp::{Clock, SystemClock};

#[cfg(any(test, feature = "test-util"))]
pub use rng::FixedRandom;
#[cfg(any(test, feature = "test-util"))]
pub use timestamp::FixedClock;
pub use types::{
    AES_GCM_NONCE_LENGTH, AES_GCM_TAG_LENGTH, AES_KEY_LENGTH, CURRENT_VERSION,
    ENVELOPE_HEADER_LENGTH, HMAC_TAG_LENGTH, SIGNATURE_NONCE_LENGTH, SIGNED_HEADER_LENGTH,
    SUPPORTED_VERSIONS, TIMESTAMP_LENGTH,
};
