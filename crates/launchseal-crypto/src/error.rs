use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Invalid key length: expected {expected} bytes, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },

    #[error("Requested {requested} bytes of key material, HKDF-SHA256 can produce at most {max}")]
    OutputTooLong { requested: usize, max: usize },

    #[error("Data too short: expected at least {expected} bytes, got {got}")]
    DataTooShort { expected: usize, got: usize },

    #[error("Unsupported encryption version: {0}")]
    UnsupportedVersion(u8),

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed")]
    DecryptionFailed,

    #[error("Signature verification failed")]
    SignatureMismatch,

    #[error("Timestamp outside the representable tick range")]
    TimestampOutOfRange,

    #[error("Unsupported timestamp kind: {0}")]
    InvalidTimestampKind(u8),

    #[error("Random number generation failed: {0}")]
    RngFailed(String),
}
