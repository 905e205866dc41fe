/// Wire format version for encrypted envelopes.
///
/// Version 2: AES-256-GCM, tag before ciphertext
/// Format: [version=2:1B][nonce:12B][tag:16B][ciphertext]
pub const CURRENT_VERSION: u8 = 2;

/// Supported wire format versions (for decryption).
pub const SUPPORTED_VERSIONS: &[u8] = &[2];

/// AES-GCM nonce length in bytes (96 bits per NIST recommendation).
pub const AES_GCM_NONCE_LENGTH: usize = 12;

/// AES-GCM tag length in bytes (128 bits).
pub const AES_GCM_TAG_LENGTH: usize = 16;

/// AES key length in bytes (256 bits).
pub const AES_KEY_LENGTH: usize = 32;

/// Smallest valid envelope: version, nonce and tag with an empty ciphertext.
pub const ENVELOPE_HEADER_LENGTH: usize = 1 + AES_GCM_NONCE_LENGTH + AES_GCM_TAG_LENGTH;

/// HMAC-SHA256 key length used for signing (256 bits).
pub const SIGNATURE_KEY_LENGTH: usize = 32;

/// HMAC-SHA256 tag length in bytes.
pub const HMAC_TAG_LENGTH: usize = 32;

/// Encoded timestamp length (u64 LE).
pub const TIMESTAMP_LENGTH: usize = 8;

/// Random nonce carried inside every signed envelope.
pub const SIGNATURE_NONCE_LENGTH: usize = 32;

/// Smallest valid signed envelope: tag, timestamp and nonce with no payload.
pub const SIGNED_HEADER_LENGTH: usize = HMAC_TAG_LENGTH + TIMESTAMP_LENGTH + SIGNATURE_NONCE_LENGTH;

/// SHA-256 output length, the HKDF block size.
pub const SHA256_OUTPUT_LENGTH: usize = 32;

/// Largest HKDF-SHA256 output (the block counter is a single byte).
pub const HKDF_MAX_OUTPUT_LENGTH: usize = 255 * SHA256_OUTPUT_LENGTH;
