//! Subcommand implementations.

pub mod ask;
pub mod init;
pub mod metadata;
pub mod status;
pub mod topics;

use std::path::{Path, PathBuf};
use waguide_config::ServiceConfig;

/// Load the config file, apply environment overrides, then the CLI flag.
pub fn load_config(
    path: Option<&Path>,
    guidance_dir: Option<PathBuf>,
) -> Result<ServiceConfig, Box<dyn std::error::Error>> {
    let mut config = match path {
        Some(path) => {
            let mut config = ServiceConfig::load_from(path)
                .map_err(|e| format!("Failed to load config: {e}"))?;
            config.apply_env(|key| std::env::var(key).ok());
            config
        }
        None => ServiceConfig::load().map_err(|e| format!("Failed to load config: {e}"))?,
    };

    if let Some(dir) = guidance_dir {
        config.guidance_dir = Some(dir);
    }

    Ok(config)
}
