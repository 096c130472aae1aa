//! # waguide core
//!
//! Domain types, traits, and error definitions for the Washington ESSB 5814
//! guidance chat service. Every other crate in the workspace depends inward
//! on this one.
//!
//! The completion backend is defined here as the [`Provider`] trait so the
//! orchestrator can be exercised against a scripted implementation in tests
//! and against a real HTTP endpoint in production.

pub mod error;
pub mod message;
pub mod provider;

// Re-export key types at crate root for ergonomics
pub use error::{Error, GuidanceError, ProviderError, RequestError, ResponseError, Result};
pub use message::{Message, Role};
pub use provider::{Provider, ProviderRequest, ProviderResponse, ResponseFormat, Usage};
