//! URL query encoding of launch tokens.
//!
//! A token travels as standard padded base64, form-urlencoded, under
//! [`QUERY_KEY`].

use base64ct::{Base64, Encoding};

use crate::error::SealError;

/// Query parameter carrying a shared-secret token.
pub const QUERY_KEY: &str = "sharedSecretEncryptedUrlQuery";

/// Base64-encode `token` and percent-encode the result for a query value.
pub fn encode_token(token: &[u8]) -> String {
    let encoded = Base64::encode_string(token);
    form_urlencoded::byte_serialize(encoded.as_bytes()).collect()
}

/// Decode an already percent-decoded query value back into token bytes.
pub fn decode_token(value: &str) -> Result<Vec<u8>, SealError> {
    Base64::decode_vec(value).map_err(|_| SealError::Encoding("token is not valid base64".into()))
}

/// Build the `sharedSecretEncryptedUrlQuery=<value>` fragment for `token`.
pub fn to_query(token: &[u8]) -> String {
    format!("{QUERY_KEY}={}", encode_token(token))
}

/// Find the token value in a query string.
///
/// Accepts a bare query (`a=1&b=2`), one with a leading `?`, or a full URL.
/// A fragment is ignored. Returns `None` when the key is absent or empty.
pub fn find_query_value(input: &str) -> Option<String> {
    let query = match input.split_once('?') {
        Some((_, query)) => query,
        None => input,
    };
    let query = match query.split_once('#') {
        Some((query, _)) => query,
        None => query,
    };

    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| *key == QUERY_KEY)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

/// Whether `query` carries a non-empty shared-secret token.
pub fn is_shared_secret_encryption(query: &str) -> bool {
    find_query_value(query).is_some()
}

/// Locate and base64-decode the token carried by `query`.
pub fn extract_token(query: &str) -> Result<Vec<u8>, SealError> {
    let value = find_query_value(query).ok_or(SealError::MissingQueryValue)?;
    decode_token(&value)
}
