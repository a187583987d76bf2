use super::{
    flag::ConversationFlag,
    queue::{JobHandler, WebhookJob},
};
use crate::{
    line::{self, Event, MessagingClient, SendMessage},
    llm::{GenerationConfig, GenerativeModel},
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{Instrument, debug, error, info, info_span, warn};

pub const UNSUPPORTED_EVENT_REPLY: &str =
    "Event type error:[No message or the message does not contain text]";
pub const FAREWELL_TEXT: &str = "再見";
pub const FAREWELL_REPLY: &str = "Bye!";
pub const NO_ANSWER_REPLY: &str = "Gemini沒答案!請換個說法！";
pub const EXECUTION_ERROR_REPLY: &str = "Gemini執行出錯!請換個說法！";

/// What to do with one inbound event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Reply with fixed text; the model is not consulted.
    Reply(String),
    /// Send nothing.
    Ignore,
    /// Forward the text to the model and reply with its answer.
    AskModel(String),
}

/// Decision policy, first match wins:
/// non-text events get the diagnostic, the farewell literal gets "Bye!"
/// whatever the flag says, everything else goes to the model only while
/// conversation is enabled.
pub fn decide(event: &Event, conversation_enabled: bool) -> Decision {
    let Some(text) = event.text_content() else {
        return Decision::Reply(UNSUPPORTED_EVENT_REPLY.to_string());
    };

    if text == FAREWELL_TEXT {
        return Decision::Reply(FAREWELL_REPLY.to_string());
    }

    if !conversation_enabled {
        return Decision::Ignore;
    }

    Decision::AskModel(text.to_string())
}

pub struct Dispatcher {
    model: Arc<dyn GenerativeModel>,
    messenger: Arc<dyn MessagingClient>,
    conversation: ConversationFlag,
    generation_config: GenerationConfig,
}

impl Dispatcher {
    pub fn new(
        model: Arc<dyn GenerativeModel>,
        messenger: Arc<dyn MessagingClient>,
        conversation: ConversationFlag,
    ) -> Self {
        Self {
            model,
            messenger,
            conversation,
            generation_config: GenerationConfig::default(),
        }
    }

    pub fn conversation(&self) -> &ConversationFlag {
        &self.conversation
    }

    /// Handles one event end to end. Returns the attempted reply text, which
    /// is reported even when the messaging client failed to deliver it;
    /// `None` means no reply was attempted.
    pub async fn dispatch(&self, event: &Event) -> Option<String> {
        let decision = decide(event, self.conversation.is_enabled());
        debug!(?decision, event_kind = ?event.kind, "Dispatch decision");

        if decision == Decision::Ignore {
            debug!("Conversation disabled, not replying");
            return None;
        }

        let Some(reply_token) = event.reply_token.as_deref() else {
            warn!(event_kind = ?event.kind, "Event has no reply token, cannot reply");
            return None;
        };

        let attempted_reply = match decision {
            Decision::Reply(text) => text,
            Decision::AskModel(prompt) => self.ask_model(&prompt).await,
            Decision::Ignore => return None,
        };

        match self
            .messenger
            .reply_message(reply_token, vec![SendMessage::text(attempted_reply.clone())])
            .await
        {
            Ok(()) => debug!("Reply sent"),
            Err(e) => error!("Failed to send reply: {}", e),
        }

        Some(attempted_reply)
    }

    /// Runs the prompt and collapses every failure into a fallback string.
    async fn ask_model(&self, prompt: &str) -> String {
        match self
            .model
            .generate_content(prompt, &self.generation_config)
            .await
        {
            Ok(response) => match response.first_text() {
                Some(text) => text.to_string(),
                None => {
                    info!(
                        finish_reason = ?response.finish_reason(),
                        "Model returned no usable text"
                    );
                    NO_ANSWER_REPLY.to_string()
                }
            },
            Err(e) => {
                warn!(kind = ?e.model_kind(), "Model call failed: {}", e);
                EXECUTION_ERROR_REPLY.to_string()
            }
        }
    }
}

#[async_trait]
impl JobHandler for Dispatcher {
    async fn handle(&self, job: WebhookJob) {
        let span = info_span!("dispatch_job", job_id = %job.id);

        async {
            let body = match line::decode_webhook(&job.body) {
                Ok(body) => body,
                Err(e) => {
                    error!("Dropping undecodable webhook body: {}", e);
                    return;
                }
            };

            debug!(
                "Dispatching {} event(s), queued {}ms ago",
                body.events.len(),
                (chrono::Utc::now() - job.received_at).num_milliseconds()
            );

            for event in &body.events {
                self.dispatch(event).await;
            }
        }
        .instrument(span)
        .await
    }
}
