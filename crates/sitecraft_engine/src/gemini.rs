use reqwest::header::HeaderValue;
use serde_json::{json, Value};
use sitecraft_logging::{site_debug, truncate_for_log};

use crate::model::ModelClient;
use crate::{FailureKind, ModelError, ModelSettings};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// [`ModelClient`] backed by the Gemini `generateContent` REST endpoint.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    settings: ModelSettings,
    http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(settings: ModelSettings) -> Result<Self, ModelError> {
        settings.validate()?;
        let http = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ModelError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, http })
    }

    pub fn settings(&self) -> &ModelSettings {
        &self.settings
    }

    fn endpoint_for_model(&self, model: &str) -> String {
        let model = model.trim();
        let model_path = if model.starts_with("models/") {
            model.to_string()
        } else {
            format!("models/{model}")
        };
        format!(
            "{}/{}:generateContent",
            self.settings.api_base.trim_end_matches('/'),
            model_path
        )
    }

    async fn post(&self, model: &str, payload: &Value) -> Result<Value, ModelError> {
        let endpoint = self.endpoint_for_model(model);
        let api_key = HeaderValue::from_str(self.settings.api_key.trim())
            .map_err(|err| ModelError::new(FailureKind::InvalidConfig, err.to_string()))?;

        let response = self
            .http
            .post(&endpoint)
            .header(API_KEY_HEADER, api_key)
            .json(payload)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::new(
                FailureKind::HttpStatus(status.as_u16()),
                truncate_for_log(&body, 256),
            ));
        }

        response.json::<Value>().await.map_err(|err| {
            if err.is_timeout() {
                map_reqwest_error(err)
            } else {
                ModelError::new(FailureKind::MalformedOutput, err.to_string())
            }
        })
    }
}

#[async_trait::async_trait]
impl ModelClient for GeminiClient {
    async fn generate_text(&self, prompt: &str, schema: &Value) -> Result<Value, ModelError> {
        let payload = json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": schema,
            },
        });
        let response = self.post(&self.settings.text_model, &payload).await?;
        let text = extract_text(&response);
        if text.trim().is_empty() {
            return Err(ModelError::new(
                FailureKind::EmptyResponse,
                finish_reason(&response).unwrap_or("no text in response"),
            ));
        }
        site_debug!("text model returned {} bytes", text.len());
        serde_json::from_str(strip_code_fence(&text))
            .map_err(|err| ModelError::new(FailureKind::MalformedOutput, err.to_string()))
    }

    async fn generate_image(&self, prompt: &str) -> Result<String, ModelError> {
        let payload = json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
            "generationConfig": { "responseModalities": ["TEXT", "IMAGE"] },
        });
        let response = self.post(&self.settings.image_model, &payload).await?;
        extract_image_data_uri(&response).ok_or_else(|| {
            ModelError::new(
                FailureKind::EmptyResponse,
                finish_reason(&response).unwrap_or("no image in response"),
            )
        })
    }
}

fn response_parts(response: &Value) -> impl Iterator<Item = &Value> {
    response
        .get("candidates")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|candidate| candidate.pointer("/content/parts").and_then(Value::as_array))
        .flatten()
}

/// Concatenated text of the first candidate's parts.
fn extract_text(response: &Value) -> String {
    let first = response
        .pointer("/candidates/0/content/parts")
        .and_then(Value::as_array);
    first
        .into_iter()
        .flatten()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect()
}

/// First inline image of any candidate as a `data:` URI.
fn extract_image_data_uri(response: &Value) -> Option<String> {
    response_parts(response).find_map(|part| {
        let inline = part.get("inlineData").or_else(|| part.get("inline_data"))?;
        let data = inline.get("data").and_then(Value::as_str)?;
        if data.is_empty() {
            return None;
        }
        let mime_type = inline
            .get("mimeType")
            .or_else(|| inline.get("mime_type"))
            .and_then(Value::as_str)
            .unwrap_or("image/png");
        Some(format!("data:{mime_type};base64,{data}"))
    })
}

fn finish_reason(response: &Value) -> Option<&str> {
    response
        .pointer("/candidates/0/finishReason")
        .or_else(|| response.pointer("/promptFeedback/blockReason"))
        .and_then(Value::as_str)
}

/// Some model versions wrap JSON in a markdown fence even in JSON mode.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

fn map_reqwest_error(err: reqwest::Error) -> ModelError {
    if err.is_timeout() {
        return ModelError::new(FailureKind::Timeout, err.to_string());
    }
    ModelError::new(FailureKind::Network, err.to_string())
}
