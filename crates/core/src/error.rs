//! Error types for the guidance chat domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each stage of a chat call has its own error enum so callers can tell
//! "fix your input" apart from "the provider misbehaved".

use std::path::PathBuf;
use thiserror::Error;

/// The top-level error type for all guidance chat operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Construction ---
    #[error("An API key is required. Provide it via configuration or the OPENAI_API_KEY env var.")]
    CredentialMissing,

    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Caller input ---
    #[error(transparent)]
    Request(#[from] RequestError),

    // --- Guidance documents ---
    #[error("Guidance error: {0}")]
    Guidance(#[from] GuidanceError),

    // --- Provider transport ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Untrusted provider output ---
    #[error(transparent)]
    Response(#[from] ResponseError),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// True when the caller can fix the failure by changing its input.
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::Request(_))
    }

    /// True when repeating the identical call may succeed.
    ///
    /// Covers transport faults and every kind of unusable provider output.
    /// Authentication and configuration failures are never retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Response(_) => true,
            Self::Provider(e) => !matches!(
                e,
                ProviderError::AuthenticationFailed(_) | ProviderError::NotConfigured(_)
            ),
            _ => false,
        }
    }
}

// --- Bounded context errors ---

/// Rejections of the caller-supplied topic and message list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("Invalid or missing topic: {0}")]
    InvalidTopic(String),

    #[error("Messages must be an array")]
    MessagesNotArray,

    #[error("Invalid message format at index {index}")]
    MalformedMessage { index: usize },

    #[error(
        "Invalid message at index {index}: role must be \"user\" or \"assistant\", content must be string"
    )]
    InvalidMessageShape { index: usize },

    #[error("At least one message is required")]
    EmptyConversation,
}

#[derive(Debug, Clone, Error)]
pub enum GuidanceError {
    #[error("Failed to load guidance file {path}: {reason}")]
    DocumentUnavailable { path: PathBuf, reason: String },
}

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

/// Failures validating the structured reply returned by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResponseError {
    #[error("No response received from provider")]
    Empty,

    #[error("Provider returned invalid JSON response: {0}")]
    Malformed(String),

    #[error("Provider response did not contain an answer")]
    MissingAnswer,
}
