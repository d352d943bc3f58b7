use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use sitecraft_logging::{site_warn, truncate_for_log};

use crate::{FailureKind, ModelError};

/// The generative capability every flow depends on.
#[async_trait::async_trait]
pub trait ModelClient: Send + Sync {
    /// Run `prompt` against the text model, constrained to `schema`, and
    /// return the parsed JSON result.
    async fn generate_text(&self, prompt: &str, schema: &Value) -> Result<Value, ModelError>;

    /// Generate one image for `prompt` and return a reference usable as an
    /// `src` value (typically a `data:` URI).
    async fn generate_image(&self, prompt: &str) -> Result<String, ModelError>;
}

/// `generate_text` followed by deserialization into `T`.
pub async fn generate_structured<T: DeserializeOwned>(
    client: &dyn ModelClient,
    prompt: &str,
    schema: &Value,
) -> Result<T, ModelError> {
    let value = client.generate_text(prompt, schema).await?;
    <T as Deserialize>::deserialize(&value).map_err(|err| {
        site_warn!(
            "model output does not match schema ({err}): {}",
            truncate_for_log(&value.to_string(), 512)
        );
        ModelError::new(FailureKind::MalformedOutput, err.to_string())
    })
}
