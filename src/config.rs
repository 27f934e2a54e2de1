use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub completion: CompletionConfig,
    pub audio: AudioConfig,
    pub identity: IdentityConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

/// Settings for the text-completion collaborator.
///
/// The credential lives here, injected at startup, never in hidden
/// process-global state. With no `api_key` every AI call runs in
/// offline/demo mode against the deterministic mock generators.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    pub api_key: Option<String>,

    /// Bound on each completion request before falling back (seconds).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AudioConfig {
    pub sample_rate: u32,
    pub channels: u16,

    /// Recording auto-stop ceiling enforced by the caller (seconds).
    #[serde(default = "default_max_recording_secs")]
    pub max_recording_secs: u64,
}

/// Stand-in for the external identity collaborator: a single configured
/// user for the service binary. Real deployments swap in a provider.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    pub user_id: String,
    pub email: String,
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_recording_secs() -> u64 {
    300
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
