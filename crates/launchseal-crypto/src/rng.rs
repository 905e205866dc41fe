//! Injectable source of random bytes.
//!
//! Every nonce in a token comes through a [`RandomSource`]. Production code
//! uses [`OsRandom`]; fixtures swap in [`FixedRandom`] to make output
//! reproducible.

use crate::error::CryptoError;

/// A source of cryptographically secure random bytes.
///
/// Implementations must be safe to share between threads and must never be
/// seeded predictably outside of tests.
pub trait RandomSource: Send + Sync {
    /// Fill `dest` entirely with random bytes.
    fn fill(&self, dest: &mut [u8]) -> Result<(), CryptoError>;
}

/// Operating system CSPRNG via `getrandom`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill(&self, dest: &mut [u8]) -> Result<(), CryptoError> {
        getrandom::getrandom(dest).map_err(|e| CryptoError::RngFailed(e.to_string()))
    }
}

/// Fills every request with the same byte. Only for fixtures and tests.
#[cfg(any(test, feature = "test-util"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedRandom(pub u8);

#[cfg(any(test, feature = "test-util"))]
impl RandomSource for FixedRandom {
    fn fill(&self, dest: &mut [u8]) -> Result<(), CryptoError> {
        dest.fill(self.0);
        Ok(())
    }
}

/// Draw a fixed-size array from `rng`.
pub fn random_array<const N: usize>(rng: &dyn RandomSource) -> Result<[u8; N], CryptoError> {
    let mut bytes = [0u8; N];
    rng.fill(&mut bytes)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn os_random_fills_buffer() {
        let a: [u8; 32] = random_array(&OsRandom).unwrap();
        let b: [u8; 32] = random_array(&OsRandom).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn fixed_random_is_constant() {
        let bytes: [u8; 12] = random_array(&FixedRandom(0xAB)).unwrap();
        assert_eq!(bytes, [0xAB; 12]);
    }

    #[test]
    fn empty_request_is_fine() {
        let bytes: [u8; 0] = random_array(&OsRandom).unwrap();
        assert!(bytes.is_empty());
    }
}
