//! One-time URL launch tokens protected by a 256-bit shared secret.
//!
//! [`secure`] turns a plaintext query into
//! `sharedSecretEncryptedUrlQuery=<token>`, where the token is an
//! AES-256-GCM envelope signed with HMAC-SHA256, both keyed by subkeys
//! derived per message from the shared secret. [`view`] reverses it.

pub mod envelope;
pub mod error;
pub mod query;
pub mod sealer;
pub mod secret;

pub use envelope::{
    derive_message_keys, encrypt_and_sign, verify_and_decrypt, MessageKeys, OpenedMessage,
    TokenLayout, MIN_TOKEN_LENGTH, OUTER_NONCE_LENGTH,
};
pub use error::{ErrorKind, SealError, SecureError, ViewError};
pub use query::{
    decode_token, encode_token, extract_token, find_query_value, is_shared_secret_encryption,
    to_query, QUERY_KEY,
};
pub use sealer::{open, secure, secure_with_base64_key, view, view_with_base64_key, Sealer};
pub use secret::{SharedSecret, SHARED_SECRET_LENGTH};

pub use launchseal_crypto::{Clock, OsRandom, RandomSource, SystemClock};

#[cfg(feature = "test-util")]
pub use launchseal_crypto::{FixedClock, FixedRandom};
