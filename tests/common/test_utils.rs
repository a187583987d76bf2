use base64::{Engine, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use line_gemini_bot::config::{Config, LineConfig, ModelConfig};
use serde_json::json;
use sha2::Sha256;

pub const TEST_CHANNEL_SECRET: &str = "test-channel-secret";

/// Create a test configuration with every credential filled in
pub fn create_test_config() -> Config {
    let mut config = Config::default();
    config.model = ModelConfig {
        api_key: "test-api-key".to_string(),
        ..ModelConfig::default()
    };
    config.line = LineConfig {
        channel_access_token: "test-access-token".to_string(),
        channel_secret: TEST_CHANNEL_SECRET.to_string(),
        ..LineConfig::default()
    };
    config
}

/// base64(HMAC-SHA256(secret, body)), as the platform computes it
pub fn sign(secret: &str, body: &str) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(body.as_bytes());
    STANDARD.encode(mac.finalize().into_bytes())
}

pub fn text_event(reply_token: &str, text: &str) -> serde_json::Value {
    json!({
        "type": "message",
        "mode": "active",
        "timestamp": 1700000000000i64,
        "webhookEventId": format!("evt-{}", reply_token),
        "deliveryContext": {"isRedelivery": false},
        "replyToken": reply_token,
        "source": {"type": "user", "userId": "U1234567890"},
        "message": {"id": "100001", "type": "text", "text": text}
    })
}

pub fn image_event(reply_token: &str) -> serde_json::Value {
    json!({
        "type": "message",
        "replyToken": reply_token,
        "source": {"type": "user", "userId": "U1234567890"},
        "message": {"id": "100002", "type": "image"}
    })
}

pub fn webhook_body(events: Vec<serde_json::Value>) -> String {
    json!({"destination": "Ubot", "events": events}).to_string()
}
