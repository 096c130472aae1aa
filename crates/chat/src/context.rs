//! Guidance context assembly.
//!
//! All documents for a topic are read concurrently and joined in registry
//! order, then cut to the configured character budget. A failure on a
//! topic-specific document aborts the assembly. A failure on a shared
//! document is logged and that document is left out.

use futures::future::join_all;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use waguide_core::Result;
use waguide_guidance::{Topic, load_document};

/// Returned instead of document text when no guidance root is configured.
pub const PLACEHOLDER_CONTEXT: &str = "[Guidance documents would be loaded here]";

/// Separator placed between documents.
pub const DOCUMENT_SEPARATOR: &str = "\n\n---\n\n";

/// Builds the guidance context for a topic. Stateless, reusable.
#[derive(Debug, Clone)]
pub struct ContextAssembler {
    guidance_dir: Option<PathBuf>,
    max_chars: usize,
}

impl ContextAssembler {
    pub fn new(guidance_dir: Option<PathBuf>, max_chars: usize) -> Self {
        Self {
            guidance_dir,
            max_chars,
        }
    }

    pub fn guidance_dir(&self) -> Option<&Path> {
        self.guidance_dir.as_deref()
    }

    /// Assemble the context string for `topic`.
    pub async fn assemble(&self, topic: Topic) -> Result<String> {
        let Some(base) = self.guidance_dir.as_deref() else {
            debug!(topic = %topic, "No guidance directory configured, using placeholder");
            return Ok(PLACEHOLDER_CONTEXT.to_string());
        };

        let specific = topic.guidance();
        let shared = waguide_guidance::SHARED_GUIDANCE;

        // join_all yields results in input order regardless of completion order.
        let (specific_docs, shared_docs) = futures::join!(
            join_all(specific.iter().map(|e| load_document(e, base))),
            join_all(shared.iter().map(|e| load_document(e, base))),
        );

        let mut sections = Vec::with_capacity(specific.len() + shared.len());
        for doc in specific_docs {
            sections.push(doc?);
        }
        for (entry, doc) in shared.iter().zip(shared_docs) {
            match doc {
                Ok(text) => sections.push(text),
                Err(e) => warn!(label = entry.label, error = %e, "Skipping shared guidance"),
            }
        }

        let joined = sections.join(DOCUMENT_SEPARATOR);
        let context = truncate_chars(&joined, self.max_chars);
        debug!(
            topic = %topic,
            documents = sections.len(),
            context_chars = context.chars().count(),
            truncated = context.len() < joined.len(),
            "Assembled guidance context"
        );
        Ok(context.to_string())
    }
}

/// The longest prefix of `text` holding at most `max` characters.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
