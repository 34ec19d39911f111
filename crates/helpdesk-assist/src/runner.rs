//! Prompt-service transport.

use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use crate::error::AssistError;

/// Executes a named flow against a prompt service.
///
/// Abstracted as a trait so flow logic can be tested with a stub.
pub trait PromptRunner: Send + Sync {
    fn run(
        &self,
        flow: &str,
        input: Value,
    ) -> impl Future<Output = Result<Value, AssistError>> + Send;
}

/// Prompt-service client configuration.
#[derive(Debug, Clone)]
pub struct AssistConfig {
    /// Base URL of the prompt service.
    pub base_url: String,
    /// Per-call deadline.
    pub timeout: Duration,
    /// Retries after the first attempt, applied to retryable failures
    /// only.
    pub max_retries: u32,
}

impl Default for AssistConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3400".into(),
            timeout: Duration::from_secs(30),
            max_retries: 2,
        }
    }
}

/// HTTP implementation: `POST {base_url}/flows/{flow}` with the input
/// as the JSON body.
#[derive(Clone)]
pub struct HttpPromptRunner {
    client: reqwest::Client,
    config: AssistConfig,
}

impl HttpPromptRunner {
    pub fn new(config: AssistConfig) -> Result<Self, AssistError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AssistError::Transport(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub fn max_retries(&self) -> u32 {
        self.config.max_retries
    }
}

impl PromptRunner for HttpPromptRunner {
    async fn run(&self, flow: &str, input: Value) -> Result<Value, AssistError> {
        let url = format!("{}/flows/{}", self.config.base_url.trim_end_matches('/'), flow);
        debug!(flow, %url, "Running prompt flow");

        let response = self
            .client
            .post(&url)
            .json(&input)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AssistError::Timeout
                } else {
                    AssistError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AssistError::Status {
                status: status.as_u16(),
                retryable: status.is_server_error(),
            });
        }

        response
            .json()
            .await
            .map_err(|e| AssistError::Decode(e.to_string()))
    }
}
