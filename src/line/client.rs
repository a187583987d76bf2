use super::types::{ReplyMessageRequest, SendMessage};
use crate::{Error, Result, config::LineConfig};
use async_trait::async_trait;
use tracing::debug;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagingClient: Send + Sync {
    /// Sends `messages` as the reply correlated with `reply_token`.
    async fn reply_message(&self, reply_token: &str, messages: Vec<SendMessage>) -> Result<()>;
}

pub struct LineClient {
    client: reqwest::Client,
    api_base_url: String,
    channel_access_token: String,
}

impl LineClient {
    pub fn new(config: LineConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            channel_access_token: config.channel_access_token,
        }
    }
}

#[async_trait]
impl MessagingClient for LineClient {
    async fn reply_message(&self, reply_token: &str, messages: Vec<SendMessage>) -> Result<()> {
        debug!("Replying with {} message(s)", messages.len());

        let request = ReplyMessageRequest {
            reply_token,
            messages: &messages,
        };

        let response = self
            .client
            .post(format!("{}/v2/bot/message/reply", self.api_base_url))
            .bearer_auth(&self.channel_access_token)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::messaging(format!("Failed to send reply: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::messaging(format!(
                "Reply rejected with {}: {}",
                status, body
            )));
        }

        Ok(())
    }
}
