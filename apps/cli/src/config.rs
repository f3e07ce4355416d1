use std::{fs, path::Path, time::Duration};

use anyhow::{anyhow, Context};
use serde::Deserialize;
use shared::domain::ScoreScale;

pub const DEFAULT_CONFIG_FILE: &str = "icp-matcher.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
    pub timeout_seconds: u64,
    /// `None` detects the scale from each payload.
    pub score_scale: Option<ScoreScale>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:5001".into(),
            timeout_seconds: 600,
            score_scale: None,
        }
    }
}

impl Settings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    server_url: Option<String>,
    timeout_seconds: Option<u64>,
    score_scale: Option<String>,
}

/// Defaults, then the config file (explicit path or `icp-matcher.toml` when
/// present), then `APP__*` environment variables.
pub fn load_settings(explicit_path: Option<&Path>) -> anyhow::Result<Settings> {
    let raw = match explicit_path {
        Some(path) => Some(
            fs::read_to_string(path)
                .with_context(|| format!("failed to read config file '{}'", path.display()))?,
        ),
        None => fs::read_to_string(DEFAULT_CONFIG_FILE).ok(),
    };
    layer_settings(raw.as_deref(), |key| std::env::var(key).ok())
}

pub fn layer_settings(
    file: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if let Some(raw) = file {
        let file_cfg: FileSettings = toml::from_str(raw).context("invalid config file")?;
        if let Some(v) = file_cfg.server_url {
            settings.server_url = v;
        }
        if let Some(v) = file_cfg.timeout_seconds {
            settings.timeout_seconds = v;
        }
        if let Some(v) = file_cfg.score_scale {
            settings.score_scale = parse_scale(&v)?;
        }
    }

    if let Some(v) = env("APP__SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = env("APP__TIMEOUT_SECONDS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.timeout_seconds = parsed;
        }
    }
    if let Some(v) = env("APP__SCORE_SCALE") {
        settings.score_scale = parse_scale(&v)?;
    }

    if settings.timeout_seconds == 0 {
        return Err(anyhow!("timeout_seconds must be greater than zero"));
    }
    Ok(settings)
}

pub fn parse_scale(raw: &str) -> anyhow::Result<Option<ScoreScale>> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "auto" => Ok(None),
        "10" | "ten" => Ok(Some(ScoreScale::Ten)),
        "100" | "hundred" => Ok(Some(ScoreScale::Hundred)),
        other => Err(anyhow!("unknown score scale '{other}', expected auto, 10 or 100")),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
