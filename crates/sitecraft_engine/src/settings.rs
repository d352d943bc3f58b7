use std::fmt;
use std::time::Duration;

use crate::{FailureKind, ModelError};

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.0-flash-preview-image-generation";

/// Everything a model client needs to know. Passed in explicitly; nothing is
/// read from the environment here.
#[derive(Clone, PartialEq, Eq)]
pub struct ModelSettings {
    pub api_base: String,
    pub api_key: String,
    pub text_model: String,
    pub image_model: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: String::new(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            connect_timeout: Duration::from_secs(10),
            // Full-document rewrites are slow.
            request_timeout: Duration::from_secs(120),
        }
    }
}

impl ModelSettings {
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        let parsed = url::Url::parse(&self.api_base).map_err(|err| {
            ModelError::new(
                FailureKind::InvalidConfig,
                format!("api_base {:?}: {err}", self.api_base),
            )
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ModelError::new(
                FailureKind::InvalidConfig,
                format!("api_base must be http(s), got {}", parsed.scheme()),
            ));
        }
        if self.api_key.trim().is_empty() {
            return Err(ModelError::new(FailureKind::InvalidConfig, "api key is empty"));
        }
        if self.text_model.trim().is_empty() || self.image_model.trim().is_empty() {
            return Err(ModelError::new(
                FailureKind::InvalidConfig,
                "model identifiers must not be empty",
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for ModelSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelSettings")
            .field("api_base", &self.api_base)
            .field("api_key", &"<redacted>")
            .field("text_model", &self.text_model)
            .field("image_model", &self.image_model)
            .field("connect_timeout", &self.connect_timeout)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_need_only_a_key() {
        assert!(ModelSettings::default().validate().is_err());
        assert!(ModelSettings::with_api_key("k").validate().is_ok());
    }

    #[test]
    fn rejects_non_http_base() {
        let settings = ModelSettings {
            api_base: "ftp://models.example".to_string(),
            ..ModelSettings::with_api_key("k")
        };
        let err = settings.validate().unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidConfig);
    }

    #[test]
    fn debug_output_hides_key() {
        let rendered = format!("{:?}", ModelSettings::with_api_key("super-secret"));
        assert!(!rendered.contains("super-secret"));
    }
}
