//! Validation of caller-supplied chat input.
//!
//! Input arrives untyped (`serde_json::Value`) and leaves as a typed
//! [`ChatRequest`] or a [`RequestError`] naming the first problem found.

use serde_json::Value;
use waguide_core::error::RequestError;
use waguide_core::message::{Message, Role};
use waguide_guidance::Topic;

/// Number of most recent messages sent to the provider.
pub const HISTORY_WINDOW: usize = 8;

/// A validated chat request.
///
/// Only [`ChatRequest::from_untyped`] builds one, so every request holds a
/// known topic and at least one user or assistant message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    topic: Topic,
    messages: Vec<Message>,
}

impl ChatRequest {
    /// Validate untyped topic and message input.
    ///
    /// The topic is checked first, then the message list.
    pub fn from_untyped(topic: &Value, messages: &Value) -> Result<Self, RequestError> {
        let topic = validate_topic(topic)?;
        let messages = validate_messages(messages)?;
        if messages.is_empty() {
            return Err(RequestError::EmptyConversation);
        }
        Ok(Self { topic, messages })
    }

    pub fn topic(&self) -> Topic {
        self.topic
    }

    /// Every validated message, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The last [`HISTORY_WINDOW`] messages, oldest first, with content
    /// trimmed.
    pub fn recent_history(&self) -> Vec<Message> {
        let start = self.messages.len().saturating_sub(HISTORY_WINDOW);
        self.messages[start..]
            .iter()
            .map(|m| Message {
                role: m.role,
                content: m.content.trim().to_string(),
            })
            .collect()
    }
}

pub fn validate_topic(value: &Value) -> Result<Topic, RequestError> {
    Topic::from_value(value).ok_or_else(|| RequestError::InvalidTopic(describe(value)))
}

/// Check every element of `value` and return typed messages in order.
pub fn validate_messages(value: &Value) -> Result<Vec<Message>, RequestError> {
    let entries = value.as_array().ok_or(RequestError::MessagesNotArray)?;

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let (Some(role), Some(content)) = (
                entry.as_object().and_then(|o| o.get("role")),
                entry.as_object().and_then(|o| o.get("content")),
            ) else {
                return Err(RequestError::MalformedMessage { index });
            };

            match (role.as_str().and_then(Role::from_caller), content.as_str()) {
                (Some(role), Some(content)) => Ok(Message {
                    role,
                    content: content.to_string(),
                }),
                _ => Err(RequestError::InvalidMessageShape { index }),
            }
        })
        .collect()
}

/// Render a rejected topic for error messages.
fn describe(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".into(),
        other => other.to_string(),
    }
}
