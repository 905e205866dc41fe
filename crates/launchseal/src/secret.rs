//! The long-term 256-bit shared secret.

use std::fmt;
use std::str::FromStr;

use base64ct::{Base64, Encoding};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::SealError;

/// Shared secret length in bytes.
pub const SHARED_SECRET_LENGTH: usize = 32;

/// A 256-bit symmetric key owned by the caller.
///
/// Wiped on drop. `Debug` never prints the key.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret([u8; SHARED_SECRET_LENGTH]);

impl SharedSecret {
    /// Build from raw key bytes; anything other than 32 bytes is rejected.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SealError> {
        let key: [u8; SHARED_SECRET_LENGTH] =
            bytes.try_into().map_err(|_| SealError::KeyFormat {
                expected: SHARED_SECRET_LENGTH,
                got: bytes.len(),
            })?;
        Ok(Self(key))
    }

    /// Build from standard padded base64, as keys are usually distributed.
    pub fn from_base64(encoded: &str) -> Result<Self, SealError> {
        let mut bytes =
            Base64::decode_vec(encoded.trim()).map_err(|_| SealError::KeyEncoding)?;
        let secret = Self::from_bytes(&bytes);
        bytes.zeroize();
        secret
    }

    pub fn as_bytes(&self) -> &[u8; SHARED_SECRET_LENGTH] {
        &self.0
    }
}

impl From<[u8; SHARED_SECRET_LENGTH]> for SharedSecret {
    fn from(bytes: [u8; SHARED_SECRET_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl FromStr for SharedSecret {
    type Err = SealError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_base64(s)
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedSecret(..)")
    }
}
