//! Workers AI Backend - Implementation of EmbeddingBackend over HTTP.
//!
//! Calls `POST {base_url}/accounts/{account_id}/ai/run/{model}` with a batch
//! of texts and reads `result.data` (one vector per text).
//!
//! # Configuration
//!
//! ```ignore
//! let config = WorkersAiConfig::new("account-id", api_token)
//!     .with_model("@cf/baai/bge-base-en-v1.5")
//!     .with_timeout(Duration::from_secs(10));
//!
//! let backend = WorkersAiEmbeddingBackend::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::EmbeddingConfig;
use crate::ports::{EmbeddingBackend, EmbeddingError, EmbeddingOptions};

/// Configuration for the Workers AI backend.
#[derive(Debug, Clone)]
pub struct WorkersAiConfig {
    pub account_id: String,
    api_token: Secret<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl WorkersAiConfig {
    pub fn new(account_id: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            api_token: Secret::new(api_token.into()),
            model: "@cf/baai/bge-base-en-v1.5".to_string(),
            base_url: "https://api.cloudflare.com/client/v4".to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Builds from app config; `None` when credentials are missing.
    pub fn from_app_config(config: &EmbeddingConfig) -> Option<Self> {
        if !config.is_configured() {
            return None;
        }
        let account_id = config.account_id.clone()?;
        let api_token = config.api_token.clone()?;
        Some(
            Self::new(account_id, api_token)
                .with_model(config.model.clone())
                .with_base_url(config.base_url.clone())
                .with_timeout(config.timeout()),
        )
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_token(&self) -> &str {
        self.api_token.expose_secret()
    }
}

#[derive(Debug, Serialize)]
struct RunRequest<'a> {
    text: &'a [String],
    pooling: &'static str,
}

#[derive(Debug, Deserialize)]
struct RunResponse {
    #[serde(default)]
    success: bool,
    result: Option<RunResult>,
    #[serde(default)]
    errors: Vec<ApiMessage>,
}

#[derive(Debug, Deserialize)]
struct RunResult {
    data: Vec<Vec<f32>>,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    message: String,
}

/// Embedding backend backed by the Workers AI REST API.
pub struct WorkersAiEmbeddingBackend {
    config: WorkersAiConfig,
    client: Client,
}

impl WorkersAiEmbeddingBackend {
    pub fn new(config: WorkersAiConfig) -> Result<Self, EmbeddingError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| EmbeddingError::Unavailable(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn run_url(&self) -> String {
        format!(
            "{}/accounts/{}/ai/run/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.account_id,
            self.config.model
        )
    }

    async fn handle_response_status(&self, response: Response) -> Result<Response, EmbeddingError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(EmbeddingError::Api {
            status: status.as_u16(),
            message: body,
        })
    }
}

fn pooling(options: EmbeddingOptions) -> &'static str {
    if options.mean_pool {
        "mean"
    } else {
        "cls"
    }
}

fn parse_vectors(
    body: RunResponse,
    expected: usize,
    normalize: bool,
) -> Result<Vec<Vec<f32>>, EmbeddingError> {
    if !body.success {
        let message = body
            .errors
            .into_iter()
            .map(|e| e.message)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(EmbeddingError::InvalidResponse(if message.is_empty() {
            "request not successful".to_string()
        } else {
            message
        }));
    }

    let mut data = body
        .result
        .ok_or_else(|| EmbeddingError::InvalidResponse("missing result".to_string()))?
        .data;

    if data.len() != expected {
        return Err(EmbeddingError::InvalidResponse(format!(
            "expected {} vectors, got {}",
            expected,
            data.len()
        )));
    }

    if normalize {
        for vector in &mut data {
            let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
            if norm > 0.0 {
                vector.iter_mut().for_each(|x| *x /= norm);
            }
        }
    }

    Ok(data)
}

#[async_trait]
impl EmbeddingBackend for WorkersAiEmbeddingBackend {
    async fn run(
        &self,
        texts: &[String],
        options: EmbeddingOptions,
    ) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let request = RunRequest {
            text: texts,
            pooling: pooling(options),
        };

        let response = self
            .client
            .post(self.run_url())
            .bearer_auth(self.config.api_token())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    EmbeddingError::Unavailable(format!(
                        "timed out after {}s",
                        self.config.timeout.as_secs()
                    ))
                } else {
                    EmbeddingError::Unavailable(e.to_string())
                }
            })?;

        let response = self.handle_response_status(response).await?;
        let body: RunResponse = response
            .json()
            .await
            .map_err(|e| EmbeddingError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        let vectors = parse_vectors(body, texts.len(), options.normalize)?;
        tracing::debug!(model = %self.config.model, count = vectors.len(), "Embedded texts");
        Ok(vectors)
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}
