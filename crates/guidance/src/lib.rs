//! Washington ESSB 5814 guidance material.
//!
//! - [`registry`]: the closed set of topics and the documents cited for each
//! - [`loader`]: reading labeled document text and the optional metadata file
//! - [`prompt`]: the system instructions wrapped around the assembled context

pub mod loader;
pub mod prompt;
pub mod registry;

pub use loader::{GuidanceMetadata, load_document, load_metadata};
pub use prompt::{DISCLAIMER, build_system_prompt};
pub use registry::{GuidanceEntry, SHARED_GUIDANCE, Topic, entries_for, is_valid_topic};
