//! Status command implementation

use crate::config::Settings;
use crate::error::Result;

/// Print the resolved configuration with the token masked.
pub fn run(settings: &Settings) -> Result<()> {
    print!("{}", render(settings));
    Ok(())
}

fn render(settings: &Settings) -> String {
    let config_file = settings
        .config_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(none)".to_string());

    let mut out = String::from("zammad-bridge configuration\n\n");
    out.push_str(&format!("Config file:  {}\n", config_file));
    out.push_str(&format!("API URL:      {}\n", settings.api_url));
    out.push_str(&format!("API token:    {}\n", settings.masked_token()));
    out.push_str(&format!("Listen on:    {}\n", settings.bind_address()));
    out.push_str(&format!("Timeout:      {}s\n", settings.timeout.as_secs()));
    out.push_str(&format!("Debug:        {}\n", settings.debug));
    out.push_str(&format!(
        "CORS origins: {}\n",
        if settings.cors_origins.is_empty() {
            "(none)".to_string()
        } else {
            settings.cors_origins.join(", ")
        }
    ));
    out
}
