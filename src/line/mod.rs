pub mod client;
pub mod signature;
pub mod types;

pub use client::*;
pub use signature::SIGNATURE_HEADER;
pub use types::*;

use crate::Result;

/// Verifies the signature, then decodes the body.
pub fn parse_webhook(body: &[u8], signature: &str, channel_secret: &str) -> Result<WebhookBody> {
    signature::verify(channel_secret, body, signature)?;
    decode_webhook(body)
}

/// Decodes an already verified webhook body.
pub fn decode_webhook(body: &[u8]) -> Result<WebhookBody> {
    Ok(serde_json::from_slice(body)?)
}
