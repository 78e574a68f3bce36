//! Runtime configuration read from the host page.
//!
//! The page may carry a `<meta name="project-tracker-config" content="{...}">`
//! tag with a JSON object. Missing fields fall back to [`AppConfig::default`].

use serde::Deserialize;
use thiserror::Error;
use web_sys::window;

const CONFIG_META_SELECTOR: &str = "meta[name=\"project-tracker-config\"]";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown log level '{0}'")]
    InvalidLevel(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: String,
    pub title: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "debug".to_string(),
            title: "Project Tracker".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(raw)?;
        config.level()?;
        Ok(config)
    }

    pub fn level(&self) -> Result<log::Level, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::InvalidLevel(self.log_level.clone()))
    }

    /// Reads the configuration from the document, if the tag is present.
    pub fn load() -> Result<Self, ConfigError> {
        match read_meta_content() {
            Some(raw) => Self::from_json(&raw),
            None => Ok(Self::default()),
        }
    }
}

fn read_meta_content() -> Option<String> {
    window()?
        .document()?
        .query_selector(CONFIG_META_SELECTOR)
        .ok()
        .flatten()?
        .get_attribute("content")
}
