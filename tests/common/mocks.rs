use async_trait::async_trait;
use line_gemini_bot::{
    Error, Result,
    error::ModelErrorKind,
    line::{MessagingClient, SendMessage},
    llm::{GenerateContentResponse, GenerationConfig, GenerativeModel},
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum ModelOutcome {
    Answer(String),
    Empty,
    Fail(ModelErrorKind),
}

/// Mock model that records every prompt and returns a fixed outcome
#[derive(Debug)]
pub struct MockModel {
    pub prompts: Arc<Mutex<Vec<(String, GenerationConfig)>>>,
    pub outcome: ModelOutcome,
}

impl MockModel {
    pub fn new(outcome: ModelOutcome) -> Self {
        Self {
            prompts: Arc::new(Mutex::new(Vec::new())),
            outcome,
        }
    }

    pub fn answering(text: &str) -> Self {
        Self::new(ModelOutcome::Answer(text.to_string()))
    }

    pub fn empty() -> Self {
        Self::new(ModelOutcome::Empty)
    }

    pub fn failing(kind: ModelErrorKind) -> Self {
        Self::new(ModelOutcome::Fail(kind))
    }

    pub fn get_prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap()
            .iter()
            .map(|(prompt, _)| prompt.clone())
            .collect()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl GenerativeModel for MockModel {
    async fn generate_content(
        &self,
        prompt: &str,
        generation_config: &GenerationConfig,
    ) -> Result<GenerateContentResponse> {
        self.prompts
            .lock()
            .unwrap()
            .push((prompt.to_string(), generation_config.clone()));

        match &self.outcome {
            ModelOutcome::Answer(text) => Ok(GenerateContentResponse::from_text(text.clone())),
            ModelOutcome::Empty => Ok(GenerateContentResponse::default()),
            ModelOutcome::Fail(kind) => Err(Error::model(*kind, "mock model failure")),
        }
    }
}

/// Mock messaging client that records replies
#[derive(Debug, Default)]
pub struct MockMessenger {
    pub replies: Arc<Mutex<Vec<(String, Vec<SendMessage>)>>>,
    pub fail: bool,
}

impl MockMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn get_replies(&self) -> Vec<(String, Vec<SendMessage>)> {
        self.replies.lock().unwrap().clone()
    }

    /// Reply texts in send order, one per reply call.
    pub fn reply_texts(&self) -> Vec<String> {
        self.get_replies()
            .into_iter()
            .flat_map(|(_, messages)| messages)
            .map(|message| match message {
                SendMessage::Text { text } => text,
            })
            .collect()
    }

    /// Polls until `count` replies were recorded or two seconds pass.
    pub async fn wait_for_replies(&self, count: usize) -> Vec<(String, Vec<SendMessage>)> {
        let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
        loop {
            let replies = self.get_replies();
            if replies.len() >= count || tokio::time::Instant::now() >= deadline {
                return replies;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }
}

#[async_trait]
impl MessagingClient for MockMessenger {
    async fn reply_message(&self, reply_token: &str, messages: Vec<SendMessage>) -> Result<()> {
        self.replies
            .lock()
            .unwrap()
            .push((reply_token.to_string(), messages));

        if self.fail {
            return Err(Error::messaging("mock reply failure"));
        }
        Ok(())
    }
}

/// Model whose call never completes; counts how many calls started
#[derive(Debug, Default)]
pub struct HangingModel {
    pub started: Arc<Mutex<usize>>,
}

impl HangingModel {
    pub fn started_calls(&self) -> usize {
        *self.started.lock().unwrap()
    }
}

#[async_trait]
impl GenerativeModel for HangingModel {
    async fn generate_content(
        &self,
        _prompt: &str,
        _generation_config: &GenerationConfig,
    ) -> Result<GenerateContentResponse> {
        *self.started.lock().unwrap() += 1;
        std::future::pending().await
    }
}
