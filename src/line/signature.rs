//! `x-line-signature` verification: base64(HMAC-SHA256(channel secret, body)).

use crate::{Error, Result};
use base64::{Engine, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

pub const SIGNATURE_HEADER: &str = "x-line-signature";

/// Checks `signature` against the raw request body. Comparison is constant
/// time; malformed base64 is treated as a mismatch.
pub fn verify(channel_secret: &str, body: &[u8], signature: &str) -> Result<()> {
    let expected = STANDARD
        .decode(signature.trim())
        .map_err(|_| Error::InvalidSignature)?;

    let mut mac = HmacSha256::new_from_slice(channel_secret.as_bytes())
        .map_err(|e| Error::internal(format!("HMAC key rejected: {}", e)))?;
    mac.update(body);
    mac.verify_slice(&expected)
        .map_err(|_| Error::InvalidSignature)
}
