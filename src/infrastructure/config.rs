use serde::Deserialize;
use std::path::Path;

use crate::domain::{DomainError, GenerationParams, PromptTemplate};

const DEFAULT_CONFIG_PATH: &str = "config/config.yaml";
const DEFAULT_PROMPTS_PATH: &str = "config/prompts.yaml";

/// Service settings plus prompt templates, each loaded from its own YAML file.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub config: Config,
    pub prompts: PromptsConfig,
}

impl AppConfig {
    /// Loads `CONFIG_PATH` and `PROMPTS_PATH` (or their defaults under `config/`),
    /// then applies `SERVER_HOST` / `SERVER_PORT` overrides.
    pub fn load() -> Result<Self, DomainError> {
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
        let prompts_path =
            std::env::var("PROMPTS_PATH").unwrap_or_else(|_| DEFAULT_PROMPTS_PATH.into());

        let mut app = Self::from_files(config_path, prompts_path)?;
        app.config.apply_env_overrides()?;
        Ok(app)
    }

    pub fn from_files(
        config_path: impl AsRef<Path>,
        prompts_path: impl AsRef<Path>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            config: read_yaml_or_default(config_path.as_ref())?,
            prompts: read_yaml_or_default(prompts_path.as_ref())?,
        })
    }
}

/// Reads a required secret such as a provider API key. A missing or blank
/// variable is a configuration error, reported at startup.
pub fn require_env(name: &str) -> Result<String, DomainError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(DomainError::config(format!("{name} is not set"))),
    }
}

fn read_yaml_or_default<T>(path: &Path) -> Result<T, DomainError>
where
    T: for<'de> Deserialize<'de> + Default,
{
    if !path.exists() {
        tracing::debug!(path = %path.display(), "config file not found, using defaults");
        return Ok(T::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| DomainError::config(format!("{}: {e}", path.display())))?;
    serde_yaml::from_str(&raw).map_err(|e| DomainError::config(format!("{}: {e}", path.display())))
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub upload: UploadConfig,
    pub embedding: EmbeddingConfig,
    pub llm: LlmConfig,
    pub rag: RagConfig,
}

impl Config {
    fn apply_env_overrides(&mut self) -> Result<(), DomainError> {
        if let Ok(host) = std::env::var("SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("SERVER_PORT") {
            self.server.port = port
                .parse()
                .map_err(|e| DomainError::config(format!("SERVER_PORT: {e}")))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    pub max_bytes: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_bytes: 20 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// `local` (default), `openai`, or `hashing` for offline tests.
    pub provider: String,
    /// Model name for `local` and `openai`; ignored by `hashing`.
    pub model: String,
    /// Vector size for `hashing` and `openai`; `local` takes it from the model.
    pub dimension: usize,
    /// Variable holding the OpenAI key; `OPENAI_API_KEY` when unset.
    pub api_key_env: Option<String>,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: "local".to_string(),
            model: "all-minilm-l6-v2".to_string(),
            dimension: 384,
            api_key_env: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// `anthropic` or `gemini`.
    pub provider: String,
    pub model: String,
    /// Variable holding the API key; the provider's standard one when unset.
    pub api_key_env: Option<String>,
    pub timeout_seconds: u64,
    pub max_tokens: u64,
    pub do_sample: bool,
    pub temperature: f64,
    pub top_p: Option<f64>,
    pub seed: Option<u64>,
}

impl LlmConfig {
    pub fn generation_params(&self) -> GenerationParams {
        GenerationParams {
            max_tokens: self.max_tokens,
            do_sample: self.do_sample,
            temperature: self.temperature,
            top_p: self.top_p,
            seed: self.seed,
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        let params = GenerationParams::default();
        Self {
            provider: "anthropic".to_string(),
            model: "claude-3-5-haiku-latest".to_string(),
            api_key_env: None,
            timeout_seconds: 120,
            max_tokens: params.max_tokens,
            do_sample: params.do_sample,
            temperature: params.temperature,
            top_p: params.top_p,
            seed: params.seed,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RagConfig {
    pub top_k: usize,
    pub max_top_k: usize,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            top_k: 3,
            max_top_k: 20,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PromptsConfig {
    pub answer: PromptTemplate,
}
