use crate::{error::Result, CmsError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the hosted backend project
    pub backend_url: String,
    /// The project's anon key; row-level security decides what it may touch
    pub anon_key: String,
    #[serde(default = "default_image_bucket")]
    pub image_bucket: String,
    #[serde(default = "default_video_bucket")]
    pub video_bucket: String,
    /// Public base URL of the site itself, used for sitemap locs
    #[serde(default = "default_site_base_url")]
    pub site_base_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_image_bucket() -> String {
    "post-images".to_string()
}

fn default_video_bucket() -> String {
    "post-videos".to_string()
}

fn default_site_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Config {
            backend_url: "http://localhost:54321".to_string(),
            anon_key: String::new(),
            image_bucket: default_image_bucket(),
            video_bucket: default_video_bucket(),
            site_base_url: default_site_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

pub fn get_config_path() -> Result<PathBuf> {
    let mut path = dirs::config_dir()
        .ok_or_else(|| CmsError::Internal("Failed to get config directory".to_string()))?;

    path.push("promopress");
    fs::create_dir_all(&path)?;

    path.push("config.json");
    Ok(path)
}

pub fn load_config() -> Result<Config> {
    let config_path = get_config_path()?;

    if !config_path.exists() {
        let default_config = Config::default();
        save_config(&default_config)?;
        return Ok(default_config);
    }

    let content = fs::read_to_string(&config_path)?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .map_err(|e| CmsError::Internal(format!("Failed to parse config: {}", e)))?;
    let mut config: Config = serde_json::from_value(value.clone())
        .map_err(|e| CmsError::Internal(format!("Failed to parse config: {}", e)))?;

    // Normalize the URLs so the rest of the crate can concatenate paths.
    let mut changed = false;
    let normalized = config.backend_url.trim_end_matches('/').to_string();
    if normalized != config.backend_url {
        config.backend_url = normalized;
        changed = true;
    }
    if config.request_timeout_secs == 0 {
        config.request_timeout_secs = default_request_timeout_secs();
        changed = true;
    }

    // Persist newer fields missing from config files written by older builds.
    let needs_backfill = value
        .as_object()
        .map(|obj| !obj.contains_key("site_base_url") || !obj.contains_key("image_bucket"))
        .unwrap_or(false);
    if needs_backfill || changed {
        save_config(&config)?;
    }

    Ok(config)
}

pub fn save_config(config: &Config) -> Result<()> {
    let config_path = get_config_path()?;

    let content = serde_json::to_string_pretty(config)
        .map_err(|e| CmsError::Internal(format!("Failed to serialize config: {}", e)))?;

    fs::write(&config_path, content)?;

    Ok(())
}
