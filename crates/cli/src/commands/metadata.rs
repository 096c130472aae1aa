//! `waguide metadata` prints the guidance set's version information.

use waguide_config::ServiceConfig;
use waguide_guidance::load_metadata;

pub async fn run(config: ServiceConfig) -> Result<(), Box<dyn std::error::Error>> {
    let meta = load_metadata(config.guidance_dir.as_deref()).await;
    println!("{}", serde_json::to_string_pretty(&meta)?);
    Ok(())
}
