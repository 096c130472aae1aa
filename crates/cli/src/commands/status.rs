//! `waguide status` shows the effective configuration.

use waguide_config::ServiceConfig;

pub fn run(config: &ServiceConfig) {
    let key = if config.resolve_api_key().is_some() { "set" } else { "missing" };
    let guidance = config
        .guidance_dir
        .as_ref()
        .map(|d| d.display().to_string())
        .unwrap_or_else(|| "(not set, placeholder context)".into());

    println!("Washington Guidance Status");
    println!("==========================");
    println!("  Config dir:    {}", ServiceConfig::config_dir().display());
    println!("  Endpoint:      {}", config.api_url);
    println!("  Model:         {}", config.model);
    println!("  API key:       {key}");
    println!("  Context limit: {} chars", config.max_context_chars);
    println!("  Guidance dir:  {guidance}");
}
