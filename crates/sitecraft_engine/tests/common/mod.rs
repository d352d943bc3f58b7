#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use serde_json::Value;
use sitecraft_engine::{FailureKind, ModelClient, ModelError};

/// Scripted image outcome for one prompt.
#[derive(Clone)]
pub struct ImageReply {
    pub delay: Duration,
    pub result: Result<String, ModelError>,
}

impl ImageReply {
    pub fn ok(reference: &str, delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            result: Ok(reference.to_string()),
        }
    }

    pub fn fail(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            result: Err(ModelError::new(FailureKind::HttpStatus(500), "boom")),
        }
    }
}

/// Deterministic stand-in for a generative model.
///
/// Text calls pop scripted replies in order; image calls look up their prompt.
/// Unknown prompts fail. Tracks how many image calls overlap.
#[derive(Default)]
pub struct StubClient {
    text_replies: Mutex<VecDeque<Result<Value, ModelError>>>,
    image_replies: HashMap<String, ImageReply>,
    pub text_prompts: Mutex<Vec<String>>,
    pub image_prompts: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl StubClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(self, reply: Result<Value, ModelError>) -> Self {
        self.text_replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn with_image(mut self, prompt: &str, reply: ImageReply) -> Self {
        self.image_replies.insert(prompt.to_string(), reply);
        self
    }

    pub fn image_calls(&self) -> usize {
        self.image_prompts.lock().unwrap().len()
    }

    pub fn last_text_prompt(&self) -> String {
        self.text_prompts
            .lock()
            .unwrap()
            .last()
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl ModelClient for StubClient {
    async fn generate_text(&self, prompt: &str, _schema: &Value) -> Result<Value, ModelError> {
        self.text_prompts.lock().unwrap().push(prompt.to_string());
        self.text_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ModelError::new(FailureKind::EmptyResponse, "no script")))
    }

    async fn generate_image(&self, prompt: &str) -> Result<String, ModelError> {
        self.image_prompts.lock().unwrap().push(prompt.to_string());
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        let reply = self.image_replies.get(prompt).cloned();
        if let Some(reply) = &reply {
            tokio::time::sleep(reply.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match reply {
            Some(reply) => reply.result,
            None => Err(ModelError::new(FailureKind::EmptyResponse, "unknown prompt")),
        }
    }
}

pub fn init_logging() {
    sitecraft_logging::initialize_for_tests();
}
