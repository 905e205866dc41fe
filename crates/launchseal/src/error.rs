use std::fmt;

use launchseal_crypto::CryptoError;
use thiserror::Error;

/// Detailed failure from sealing or opening a token.
///
/// Messages carry lengths and versions only, never key material, plaintext
/// or buffer contents.
#[derive(Debug, Error)]
pub enum SealError {
    #[error("Invalid shared secret length: expected {expected} bytes, got {got}")]
    KeyFormat { expected: usize, got: usize },

    #[error("Shared secret is not valid base64")]
    KeyEncoding,

    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Token too short: expected at least {min} bytes, got {got}")]
    TokenTooShort { min: usize, got: usize },

    #[error("Query string has no shared secret token")]
    MissingQueryValue,
}

/// Coarse failure categories exposed across the public boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The shared secret or a derived key has the wrong length.
    KeyFormat,
    /// The AEAD, HMAC or random source rejected its input.
    Primitive,
    /// Text, base64 or query-string conversion failed.
    Encoding,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::KeyFormat => "key format",
            ErrorKind::Primitive => "primitive failure",
            ErrorKind::Encoding => "encoding",
        };
        f.write_str(name)
    }
}

impl SealError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SealError::KeyFormat { .. } | SealError::KeyEncoding => ErrorKind::KeyFormat,
            SealError::Crypto(CryptoError::InvalidKeyLength { .. }) => ErrorKind::KeyFormat,
            SealError::Crypto(_) => ErrorKind::Primitive,
            SealError::Encoding(_)
            | SealError::TokenTooShort { .. }
            | SealError::MissingQueryValue => ErrorKind::Encoding,
        }
    }
}

/// Opaque failure returned by `secure`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Unable to secure message ({kind})")]
pub struct SecureError {
    kind: ErrorKind,
}

impl SecureError {
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl From<SealError> for SecureError {
    fn from(e: SealError) -> Self {
        SecureError { kind: e.kind() }
    }
}

/// Uniform failure returned by `view`.
///
/// Deliberately carries nothing: a malformed token, a bad tag and a wrong
/// key are indistinguishable to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Token rejected")]
pub struct ViewError;

impl From<SealError> for ViewError {
    fn from(_: SealError) -> Self {
        ViewError
    }
}
