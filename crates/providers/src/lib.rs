//! Chat-completion provider implementations.
//!
//! All providers implement the `waguide_core::Provider` trait.

pub mod openai_compat;

pub use openai_compat::OpenAiCompatProvider;
