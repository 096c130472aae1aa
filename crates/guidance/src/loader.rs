//! Guidance document loading.
//!
//! Documents are plain UTF-8 text files addressed by the registry's
//! reference strings, rooted at a configured directory. Every loaded
//! document is prefixed with a `Source:` citation header.

use crate::registry::GuidanceEntry;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;
use waguide_core::error::GuidanceError;

/// Name of the optional metadata file in the guidance root.
pub const METADATA_FILE: &str = "metadata.json";

/// Resolve an entry's reference under `base`. Leading separators are
/// stripped so the reference is never treated as absolute.
pub fn resolve_path(entry: &GuidanceEntry, base: &Path) -> PathBuf {
    let relative = entry.reference.trim_start_matches(['/', '\\']);
    base.join(relative)
}

/// Load one document as labeled text.
pub async fn load_document(entry: &GuidanceEntry, base: &Path) -> Result<String, GuidanceError> {
    let path = resolve_path(entry, base);
    let text = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| GuidanceError::DocumentUnavailable {
            path: path.clone(),
            reason: e.to_string(),
        })?;

    debug!(file = %path.display(), bytes = text.len(), "Loaded guidance document");
    Ok(format!("Source: {}\n\n{}", entry.label, text.trim()))
}

/// Version information about the guidance set on disk.
///
/// Fields are read leniently: a number or other non-string value is kept in
/// its JSON text form instead of discarding the whole file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuidanceMetadata {
    #[serde(default = "unknown", deserialize_with = "field_text")]
    pub version: String,
    #[serde(default = "unknown", deserialize_with = "field_text")]
    pub last_checked: String,
    #[serde(
        default,
        deserialize_with = "optional_field_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub note: Option<String>,
}

fn unknown() -> String {
    "unknown".into()
}

fn as_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

fn field_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(as_text(Value::deserialize(deserializer)?).unwrap_or_else(unknown))
}

fn optional_field_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(as_text(Value::deserialize(deserializer)?))
}

impl GuidanceMetadata {
    /// Placeholder used when no metadata can be read.
    pub fn unavailable() -> Self {
        Self {
            version: unknown(),
            last_checked: unknown(),
            note: Some("Metadata not available - guidance may be provided externally".into()),
        }
    }
}

/// Read `metadata.json` from the guidance root. Never fails: a missing
/// directory, file, or unparsable content yields the placeholder.
pub async fn load_metadata(base: Option<&Path>) -> GuidanceMetadata {
    let Some(base) = base else {
        return GuidanceMetadata::unavailable();
    };

    let path = base.join(METADATA_FILE);
    let content = match tokio::fs::read_to_string(&path).await {
        Ok(c) => c,
        Err(e) => {
            debug!(file = %path.display(), error = %e, "No guidance metadata");
            return GuidanceMetadata::unavailable();
        }
    };

    serde_json::from_str(&content).unwrap_or_else(|e| {
        debug!(file = %path.display(), error = %e, "Unparsable guidance metadata");
        GuidanceMetadata::unavailable()
    })
}
