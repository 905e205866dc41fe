//! HKDF-SHA256 key derivation (RFC 5869 extract-then-expand).

use hkdf::Hkdf;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::error::CryptoError;
use crate::types::{AES_KEY_LENGTH, HKDF_MAX_OUTPUT_LENGTH, SHA256_OUTPUT_LENGTH};

/// Salt used when the caller supplies none (RFC 5869 section 2.2).
const DEFAULT_SALT: [u8; SHA256_OUTPUT_LENGTH] = [0u8; SHA256_OUTPUT_LENGTH];

/// Derive `output_length` bytes of key material using HKDF-SHA256.
///
/// # Arguments
/// * `input_key` - Input keying material
/// * `salt` - Optional salt; `None` means 32 zero bytes
/// * `output_length` - Number of bytes to produce (at most 255 * 32)
/// * `info` - Context and application-specific info
///
/// The output is wiped when dropped.
pub fn derive(
    input_key: &[u8],
    salt: Option<&[u8]>,
    output_length: usize,
    info: &[u8],
) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
    if output_length > HKDF_MAX_OUTPUT_LENGTH {
        return Err(CryptoError::OutputTooLong {
            requested: output_length,
            max: HKDF_MAX_OUTPUT_LENGTH,
        });
    }
    let hk = Hkdf::<Sha256>::new(Some(salt.unwrap_or(&DEFAULT_SALT[..])), input_key);
    let mut okm = Zeroizing::new(vec![0u8; output_length]);
    hk.expand(info, okm.as_mut_slice()).map_err(|_| CryptoError::OutputTooLong {
        requested: output_length,
        max: HKDF_MAX_OUTPUT_LENGTH,
    })?;
    Ok(okm)
}

/// Derive a 256-bit key with the default salt.
///
/// Equivalent to `derive(input_key, None, 32, info)` without the heap
/// allocation. The key is wiped when dropped.
pub fn derive_key(
    input_key: &[u8],
    info: &[u8],
) -> Result<Zeroizing<[u8; AES_KEY_LENGTH]>, CryptoError> {
    let hk = Hkdf::<Sha256>::new(Some(&DEFAULT_SALT[..]), input_key);
    let mut okm = Zeroizing::new([0u8; AES_KEY_LENGTH]);
    hk.expand(info, okm.as_mut_slice()).map_err(|_| CryptoError::OutputTooLong {
        requested: AES_KEY_LENGTH,
        max: HKDF_MAX_OUTPUT_LENGTH,
    })?;
    Ok(okm)
}
