use crate::domain::models::Settings;
use std::path::PathBuf;

pub fn config_path() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")?;
    Ok(PathBuf::from(home).join(".config/squadlink/config.toml"))
}

pub fn load_settings() -> anyhow::Result<Settings> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(Settings::default());
    }
    let raw = std::fs::read_to_string(&path)?;
    parse_settings(&raw).map_err(|err| anyhow::anyhow!("{}: {err}", path.display()))
}

pub fn parse_settings(raw: &str) -> anyhow::Result<Settings> {
    Ok(toml::from_str(raw)?)
}

/// Flags win over the config file.
pub fn apply_overrides(
    mut settings: Settings,
    server: Option<&str>,
    timeout_ms: Option<u64>,
) -> Settings {
    if let Some(server) = server {
        settings.service.base_url = server.to_string();
    }
    if let Some(timeout_ms) = timeout_ms {
        settings.service.timeout_ms = timeout_ms;
    }
    settings
}
