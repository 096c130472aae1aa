//! `waguide init` writes a default config file.

use waguide_config::{API_KEY_ENV, ServiceConfig};

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_dir = ServiceConfig::config_dir();
    let config_path = config_dir.join("config.toml");

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
        println!("Created config directory: {}", config_dir.display());
    }

    if config_path.exists() {
        println!("Config file already exists: {}", config_path.display());
    } else {
        std::fs::write(&config_path, ServiceConfig::default_toml())?;
        println!("Wrote default config: {}", config_path.display());
    }

    println!();
    println!("Next steps:");
    println!("  1. Set {API_KEY_ENV} or add `api_key` to the config file");
    println!("  2. Point `guidance_dir` at the directory holding wa-guidance/");
    println!("  3. Run `waguide ask --topic software \"What is ESSB 5814?\"`");
    Ok(())
}
