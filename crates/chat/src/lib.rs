//! Conversation orchestrator for ESSB 5814 guidance questions.
//!
//! One call to [`ChatService::converse`] runs a linear pipeline:
//!
//! 1. validate the topic and the caller's messages ([`request`])
//! 2. assemble the topic's guidance context ([`context`])
//! 3. build the system prompt and send it with the recent history
//! 4. validate the provider's JSON reply ([`response`])
//!
//! Calls share nothing but read-only configuration and may run
//! concurrently.

pub mod context;
pub mod request;
pub mod response;
pub mod service;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use context::{ContextAssembler, PLACEHOLDER_CONTEXT};
pub use request::{ChatRequest, HISTORY_WINDOW};
pub use response::ChatResponse;
pub use service::ChatService;
