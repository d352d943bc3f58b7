use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use sitecraft_engine::{ModelSettings, DEFAULT_API_BASE, DEFAULT_IMAGE_MODEL, DEFAULT_TEXT_MODEL};

use crate::logging::LogDestination;

pub(crate) const DEFAULT_CONFIG_FILE: &str = "./sitecraft.ron";

/// Checked in order; the first non-blank value wins.
pub(crate) const API_KEY_VARS: [&str; 3] = ["SITECRAFT_API_KEY", "GEMINI_API_KEY", "GOOGLE_API_KEY"];

/// Settings read from the RON config file. Every field may be omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub api_base: String,
    pub text_model: String,
    pub image_model: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    /// Budget for a whole command, model calls included.
    pub invocation_timeout_secs: u64,
    pub log_destination: LogDestination,
}

impl Default for AppConfig {
    fn default() -> Self {
        let model = ModelSettings::default();
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            connect_timeout_secs: model.connect_timeout.as_secs(),
            request_timeout_secs: model.request_timeout.as_secs(),
            invocation_timeout_secs: 300,
            log_destination: LogDestination::default(),
        }
    }
}

impl AppConfig {
    pub(crate) fn model_settings(&self, api_key: String) -> ModelSettings {
        ModelSettings {
            api_base: self.api_base.clone(),
            api_key,
            text_model: self.text_model.clone(),
            image_model: self.image_model.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }

    pub(crate) fn invocation_timeout(&self) -> Duration {
        Duration::from_secs(self.invocation_timeout_secs)
    }
}

/// Config plus any problem met while loading it. The logger is not up yet
/// when the file is read, so the warning is handed back for later.
#[derive(Debug)]
pub(crate) struct LoadedConfig {
    pub config: AppConfig,
    pub warning: Option<String>,
}

/// A missing file yields defaults silently; an unreadable or unparsable one
/// yields defaults plus a warning.
pub(crate) fn load_config(path: &Path) -> LoadedConfig {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return LoadedConfig {
                config: AppConfig::default(),
                warning: None,
            };
        }
        Err(err) => {
            return LoadedConfig {
                config: AppConfig::default(),
                warning: Some(format!("Failed to read config from {:?}: {}", path, err)),
            };
        }
    };

    match ron::from_str::<AppConfig>(&content) {
        Ok(config) => LoadedConfig {
            config,
            warning: None,
        },
        Err(err) => LoadedConfig {
            config: AppConfig::default(),
            warning: Some(format!("Failed to parse config from {:?}: {}", path, err)),
        },
    }
}

/// First non-blank value among [`API_KEY_VARS`], looked up through `lookup`.
pub(crate) fn api_key_from(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    API_KEY_VARS
        .iter()
        .filter_map(|name| lookup(*name))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}
