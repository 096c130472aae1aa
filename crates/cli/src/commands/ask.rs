//! `waguide ask` sends one question, with optional earlier turns, and prints
//! the validated answer.

use serde_json::{Value, json};
use std::path::PathBuf;
use waguide_chat::ChatService;
use waguide_config::{API_KEY_ENV, ServiceConfig};
use waguide_core::Error;
use waguide_core::error::RequestError;
use waguide_guidance::is_valid_topic;

pub async fn run(
    config: ServiceConfig,
    topic: String,
    history: Option<PathBuf>,
    question: String,
    as_json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let topic = checked_topic(topic)?;

    let service = match ChatService::new(config) {
        Ok(service) => service,
        Err(Error::CredentialMissing) => {
            eprintln!();
            eprintln!("  ERROR: No API key configured!");
            eprintln!();
            eprintln!("  Set the {API_KEY_ENV} environment variable, or add `api_key` to:");
            eprintln!("    {}", ServiceConfig::config_dir().join("config.toml").display());
            eprintln!();
            return Err(Error::CredentialMissing.into());
        }
        Err(e) => return Err(e.into()),
    };

    let messages = build_messages(history, question)?;
    let response = service.converse(&topic, &messages).await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!();
    for line in response.answer.lines() {
        println!("  {line}");
    }
    if !response.suggested_questions.is_empty() {
        println!();
        println!("  You could also ask:");
        for q in &response.suggested_questions {
            println!("    - {q}");
        }
    }
    println!();
    Ok(())
}

/// Reject an unknown topic before any credential or file checks, so a typo
/// is reported as such.
fn checked_topic(topic: String) -> Result<Value, Error> {
    let topic = Value::String(topic);
    if is_valid_topic(&topic) {
        return Ok(topic);
    }
    eprintln!("  Unknown topic {topic}. Run `waguide topics` to list them.");
    Err(RequestError::InvalidTopic(topic.as_str().unwrap_or_default().to_string()).into())
}

/// Earlier turns from `history` (if any) followed by the new question.
///
/// The history file is passed through untyped; a non-array file is left as
/// is so the service reports it like any other malformed input.
fn build_messages(
    history: Option<PathBuf>,
    question: String,
) -> Result<Value, Box<dyn std::error::Error>> {
    let mut messages = match history {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .map_err(|e| format!("Failed to read history {}: {e}", path.display()))?;
            serde_json::from_str(&raw)
                .map_err(|e| format!("History {} is not JSON: {e}", path.display()))?
        }
        None => Value::Array(Vec::new()),
    };

    if let Value::Array(items) = &mut messages {
        items.push(json!({ "role": "user", "content": question }));
    }
    Ok(messages)
}
