use super::types::*;
use crate::{Error, Result, config::ModelConfig, error::ModelErrorKind};
use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Runs one prompt through the model. The persona is fixed by the
    /// implementation at construction time.
    async fn generate_content(
        &self,
        prompt: &str,
        generation_config: &GenerationConfig,
    ) -> Result<GenerateContentResponse>;
}

pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    system_instruction: Option<String>,
}

impl GeminiClient {
    pub fn new(config: ModelConfig) -> Self {
        let system_instruction = if config.system_instruction.is_empty() {
            None
        } else {
            Some(config.system_instruction)
        };

        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            model: config.model,
            system_instruction,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

/// Maps a non-success status onto the failure taxonomy.
fn classify_status(status: StatusCode) -> ModelErrorKind {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ModelErrorKind::Auth,
        StatusCode::TOO_MANY_REQUESTS => ModelErrorKind::Quota,
        _ => ModelErrorKind::Api,
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate_content(
        &self,
        prompt: &str,
        generation_config: &GenerationConfig,
    ) -> Result<GenerateContentResponse> {
        debug!(
            "Sending prompt of {} chars to model {}",
            prompt.chars().count(),
            self.model
        );

        let request = GenerateContentRequest::new(
            prompt,
            self.system_instruction.as_deref(),
            generation_config.clone(),
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::model(ModelErrorKind::Transport, e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::model(ModelErrorKind::Transport, e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|envelope| {
                    format!(
                        "{} {}: {}",
                        envelope.error.code, envelope.error.status, envelope.error.message
                    )
                })
                .unwrap_or_else(|_| format!("{}: {}", status, body));
            return Err(Error::model(classify_status(status), message));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| Error::model(ModelErrorKind::Malformed, e.to_string()))?;

        debug!(
            "Model returned {} candidates (finish reason: {:?})",
            parsed.candidates.len(),
            parsed.finish_reason()
        );

        Ok(parsed)
    }
}
