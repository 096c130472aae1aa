//! Validation of the provider's structured reply.
//!
//! The reply is untrusted: every field is read from an untyped JSON value
//! and checked individually before a [`ChatResponse`] is built.

use serde::Serialize;
use serde_json::Value;
use tracing::warn;
use waguide_core::error::ResponseError;

/// Maximum number of follow-up suggestions returned.
pub const MAX_SUGGESTIONS: usize = 2;

/// A validated answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    /// The assistant's answer, trimmed and non-empty
    pub answer: String,
    /// At most two follow-up questions
    pub suggested_questions: Vec<String>,
}

impl ChatResponse {
    /// Validate the raw first-choice content from the provider.
    pub fn from_reply(content: Option<&str>) -> Result<Self, ResponseError> {
        let raw = content
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or(ResponseError::Empty)?;

        let parsed: Value = serde_json::from_str(raw).map_err(|e| {
            warn!(error = %e, content_len = raw.len(), "Provider reply is not valid JSON");
            ResponseError::Malformed(e.to_string())
        })?;

        let answer = parsed
            .get("answer")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .ok_or(ResponseError::MissingAnswer)?
            .to_string();

        let suggested_questions = parsed
            .get("suggestedQuestions")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::trim)
                    .filter(|q| !q.is_empty())
                    .take(MAX_SUGGESTIONS)
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            answer,
            suggested_questions,
        })
    }
}
