use crate::config::CompletionConfig;
use crate::error::{Error, Result};
use serde_json::json;
use std::time::Duration;

/// Per-call sampling settings; each request shape uses its own.
#[derive(Debug, Clone, Copy)]
pub struct CompletionParams {
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Prompt-agnostic text-completion collaborator.
///
/// The client owns prompting and JSON validation; implementations only
/// move text. A single attempt is made per call, bounded by the
/// configured timeout.
#[async_trait::async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Whether a credential is configured. When false the client skips
    /// the network path entirely and goes straight to the mock.
    fn is_configured(&self) -> bool;

    async fn complete(&self, system: &str, user: &str, params: CompletionParams)
        -> Result<String>;
}

/// Chat-completions backend (OpenAI-compatible endpoint).
pub struct OpenAiBackend {
    client: reqwest::Client,
    config: CompletionConfig,
}

impl OpenAiBackend {
    pub fn new(config: CompletionConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::RequestFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Backend with no credential: every call reports `CredentialMissing`
    /// and the client serves mock responses. Offline/demo mode.
    pub fn offline() -> Self {
        Self {
            client: reqwest::Client::new(),
            config: CompletionConfig::default(),
        }
    }

    fn endpoint(&self) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        format!("{}/chat/completions", base)
    }
}

#[async_trait::async_trait]
impl CompletionBackend for OpenAiBackend {
    fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    async fn complete(
        &self,
        system: &str,
        user: &str,
        params: CompletionParams,
    ) -> Result<String> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(Error::CredentialMissing)?;

        let body = json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user }
            ],
            "temperature": params.temperature,
            "max_tokens": params.max_tokens,
        });

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(Error::RequestFailed(format!("{}: {}", status, text)));
        }

        let envelope: serde_json::Value = response
            .json()
            .await
            .map_err(|e| Error::MalformedResponse(e.to_string()))?;

        envelope["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| {
                Error::MalformedResponse("missing choices[0].message.content".to_string())
            })
    }
}
