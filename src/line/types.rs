use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Top-level webhook payload. `events` may be empty (console verification).
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookBody {
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventKind {
    Message,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageKind {
    Text,
    Image,
    Audio,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "type")]
    pub kind: EventKind,
    #[serde(default)]
    pub reply_token: Option<String>,
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub webhook_event_id: Option<String>,
    #[serde(default)]
    pub source: Option<Source>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    #[serde(rename = "type")]
    pub kind: MessageKind,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

impl Event {
    /// A text message event carrying `text`.
    pub fn text(reply_token: impl Into<String>, text: impl Into<String>) -> Self {
        Self::message(reply_token, MessageKind::Text, Some(text.into()))
    }

    pub fn message(
        reply_token: impl Into<String>,
        kind: MessageKind,
        text: Option<String>,
    ) -> Self {
        Self {
            kind: EventKind::Message,
            reply_token: Some(reply_token.into()),
            message: Some(Message {
                kind,
                id: None,
                text,
            }),
            timestamp: None,
            webhook_event_id: None,
            source: None,
        }
    }

    /// Text of a text message, or `None` for any other event shape.
    pub fn text_content(&self) -> Option<&str> {
        if self.kind != EventKind::Message {
            return None;
        }
        let message = self.message.as_ref()?;
        if message.kind != MessageKind::Text {
            return None;
        }
        message.text.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SendMessage {
    Text { text: String },
}

impl SendMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyMessageRequest<'a> {
    pub reply_token: &'a str,
    pub messages: &'a [SendMessage],
}
