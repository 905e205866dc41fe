//! Public boundary: `secure` a plaintext query into a launch token and
//! `view` it again.
//!
//! Internal failures are logged by kind and collapsed into [`SecureError`]
//! or [`ViewError`] before they reach the caller.

use launchseal_crypto::{Clock, OsRandom, RandomSource, SystemClock};
use tracing::{debug, warn};

use crate::envelope::{encrypt_and_sign, verify_and_decrypt, OpenedMessage};
use crate::error::{SealError, SecureError, ViewError};
use crate::query::{extract_token, to_query};
use crate::secret::SharedSecret;

/// Produces launch tokens from a random source and a clock.
///
/// `Sealer` holds no state between calls and can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct Sealer<R = OsRandom, C = SystemClock> {
    rng: R,
    clock: C,
}

impl Sealer {
    /// A sealer backed by the OS random generator and the system clock.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R: RandomSource, C: Clock> Sealer<R, C> {
    pub fn with_sources(rng: R, clock: C) -> Self {
        Self { rng, clock }
    }

    /// Encrypt and sign `plaintext`, returning the full query fragment.
    pub fn seal(&self, plaintext: &str, secret: &SharedSecret) -> Result<String, SealError> {
        let token = encrypt_and_sign(plaintext.as_bytes(), secret, &self.rng, &self.clock)?;
        debug!(
            plaintext_len = plaintext.len(),
            token_len = token.len(),
            "sealed launch token"
        );
        Ok(to_query(&token))
    }

    /// Like [`Sealer::seal`], with failure detail reduced to its kind.
    pub fn secure(&self, plaintext: &str, secret: &SharedSecret) -> Result<String, SecureError> {
        self.seal(plaintext, secret).map_err(|e| {
            warn!(kind = %e.kind(), "failed to secure launch token");
            SecureError::from(e)
        })
    }

    /// Like [`Sealer::secure`], taking the shared secret as base64.
    pub fn secure_with_base64_key(
        &self,
        plaintext: &str,
        base64_key: &str,
    ) -> Result<String, SecureError> {
        let secret = SharedSecret::from_base64(base64_key).map_err(|e| {
            warn!(kind = %e.kind(), "rejected shared secret");
            SecureError::from(e)
        })?;
        self.secure(plaintext, &secret)
    }
}

/// Secure `plaintext` with OS randomness and the system clock.
pub fn secure(plaintext: &str, secret: &SharedSecret) -> Result<String, SecureError> {
    Sealer::new().secure(plaintext, secret)
}

/// Secure `plaintext` with a base64-encoded shared secret.
pub fn secure_with_base64_key(plaintext: &str, base64_key: &str) -> Result<String, SecureError> {
    Sealer::new().secure_with_base64_key(plaintext, base64_key)
}

/// Extract, verify and decrypt the token in `query`, keeping failure detail.
///
/// The claimed issue time is returned unchecked; freshness and replay
/// policy belong to the caller.
pub fn open(query: &str, secret: &SharedSecret) -> Result<OpenedMessage, SealError> {
    let token = extract_token(query)?;
    let opened = verify_and_decrypt(&token, secret)?;
    debug!(
        token_len = token.len(),
        plaintext_len = opened.plaintext.len(),
        "opened launch token"
    );
    Ok(opened)
}

fn open_text(query: &str, secret: &SharedSecret) -> Result<String, SealError> {
    let opened = open(query, secret)?;
    String::from_utf8(opened.plaintext)
        .map_err(|_| SealError::Encoding("plaintext is not valid UTF-8".into()))
}

/// Recover the plaintext query carried by `query`.
///
/// Every failure, from a missing parameter to a bad tag, yields the same
/// [`ViewError`].
pub fn view(query: &str, secret: &SharedSecret) -> Result<String, ViewError> {
    open_text(query, secret).map_err(|e| {
        warn!(kind = %e.kind(), "rejected launch token");
        ViewError::from(e)
    })
}

/// Like [`view`], taking the shared secret as base64.
pub fn view_with_base64_key(query: &str, base64_key: &str) -> Result<String, ViewError> {
    let secret = SharedSecret::from_base64(base64_key).map_err(|e| {
        warn!(kind = %e.kind(), "rejected shared secret");
        ViewError::from(e)
    })?;
    view(query, &secret)
}
