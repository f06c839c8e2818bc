//! Configuration management for the admissions advisor.
//!
//! Settings come from three layers, lowest to highest precedence: the
//! `.advisor/config.yaml` file, environment variables, and command-line
//! flags. The configuration is workspace-centric, with local state stored
//! in `.advisor/`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

/// Resolved application configuration shared by every command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Workspace root, the directory that holds `.advisor/`
    pub workspace: PathBuf,

    /// Explicit config file path, when one was given
    pub config_file: Option<PathBuf>,

    /// Active generation provider ("gemini" or "ollama")
    pub provider: String,

    /// Model identifier passed to the provider
    pub model: String,

    /// API key for the generation provider
    pub api_key: Option<String>,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,

    /// Generation provider configurations
    pub llm: Option<LlmConfig>,

    /// Retrieval pipeline tunables
    pub pipeline: PipelineConfig,
}

/// Generation provider configuration from config.yaml.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(rename = "activeProvider")]
    pub active_provider: String,

    pub providers: HashMap<String, ProviderConfig>,
}

/// Provider-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProviderConfig {
    Gemini {
        #[serde(rename = "apiKeyEnv")]
        api_key_env: String,
        model: String,
        endpoint: Option<String>,
    },
    Ollama {
        endpoint: String,
        model: String,
        timeout: Option<u64>,
    },
}

/// Retrieval pipeline tunables.
///
/// Defaults match the production deployment: a three-worker pool, ten
/// candidate passages per search, and a similarity floor sized for the
/// lexical hashed encoder (semantic encoders want a larger floor, around
/// 0.05).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Number of concurrent extraction workers
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Maximum passages returned by a similarity search
    #[serde(default = "default_search_k")]
    pub search_k: usize,

    /// Minimum cosine similarity for a passage to qualify
    #[serde(default = "default_search_threshold")]
    pub search_threshold: f32,

    /// Embedding provider name ("hashed" or "ollama")
    #[serde(default = "default_embedding_provider")]
    pub embedding_provider: String,

    /// Embedding vector width for the hashed provider
    #[serde(default = "default_embedding_dimensions")]
    pub embedding_dimensions: usize,
}

fn default_workers() -> usize {
    3
}

fn default_search_k() -> usize {
    10
}

fn default_search_threshold() -> f32 {
    0.001
}

fn default_embedding_provider() -> String {
    "hashed".to_string()
}

fn default_embedding_dimensions() -> usize {
    384
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            search_k: default_search_k(),
            search_threshold: default_search_threshold(),
            embedding_provider: default_embedding_provider(),
            embedding_dimensions: default_embedding_dimensions(),
        }
    }
}

/// Full configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    llm: Option<LlmConfig>,
    workspace: Option<WorkspaceConfig>,
    logging: Option<LoggingConfig>,
    pipeline: Option<PipelineConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WorkspaceConfig {
    path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workspace: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            config_file: None,
            provider: "gemini".to_string(),
            model: "gemini-2.0-flash".to_string(),
            api_key: None,
            log_level: None,
            verbose: false,
            no_color: false,
            llm: None,
            pipeline: PipelineConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and defaults.
    ///
    /// Environment variables:
    /// - `ADVISOR_WORKSPACE`: Override workspace path
    /// - `ADVISOR_CONFIG`: Path to config file
    /// - `ADVISOR_PROVIDER`: Generation provider
    /// - `ADVISOR_MODEL`: Model identifier
    /// - `ADVISOR_API_KEY`: API key
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Ok(workspace) = std::env::var("ADVISOR_WORKSPACE") {
            config.workspace = PathBuf::from(workspace);
        }

        if let Ok(config_file) = std::env::var("ADVISOR_CONFIG") {
            config.config_file = Some(PathBuf::from(config_file));
        }

        // Every other path is derived from the workspace, so it must exist
        if !config.workspace.exists() {
            return Err(AppError::Config(format!(
                "Workspace directory does not exist: {:?}",
                config.workspace
            )));
        }

        let config_path = config
            .config_file
            .clone()
            .unwrap_or_else(|| config.workspace.join(".advisor/config.yaml"));
        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        }

        // Env vars sit above the YAML file in precedence
        if let Ok(provider) = std::env::var("ADVISOR_PROVIDER") {
            config.provider = provider;
        }

        if let Ok(model) = std::env::var("ADVISOR_MODEL") {
            config.model = model;
        }

        config.api_key = std::env::var("ADVISOR_API_KEY").ok();
        config.log_level = std::env::var("RUST_LOG").ok();

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge YAML configuration file into this config.
    fn merge_yaml(&mut self, path: &PathBuf) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        if let Some(ws) = config_file.workspace {
            if let Some(path) = ws.path {
                result.workspace = PathBuf::from(path);
            }
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        // Pipeline settings merge wholesale; per-field serde defaults fill gaps
        if let Some(pipeline) = config_file.pipeline {
            result.pipeline = pipeline;
        }

        // The active provider's model becomes the default model
        if let Some(llm) = config_file.llm {
            result.provider = llm.active_provider.clone();

            if let Some(provider_config) = llm.providers.get(&llm.active_provider) {
                result.model = match provider_config {
                    ProviderConfig::Gemini { model, .. } => model.clone(),
                    ProviderConfig::Ollama { model, .. } => model.clone(),
                };
            }

            result.llm = Some(llm);
        }

        Ok(result)
    }

    /// Apply CLI overrides, the highest-precedence configuration layer.
    #[allow(clippy::too_many_arguments)]
    pub fn with_overrides(
        mut self,
        workspace: Option<PathBuf>,
        config_file: Option<PathBuf>,
        provider: Option<String>,
        model: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(workspace) = workspace {
            self.workspace = workspace;
        }

        self.config_file = config_file.or(self.config_file);

        if let Some(provider) = provider {
            self.provider = provider;
        }

        if let Some(model) = model {
            self.model = model;
        }

        self.log_level = log_level.or(self.log_level);

        if verbose {
            self.verbose = true;
            // --verbose only lowers the level when none was given explicitly
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Path of the `.advisor` directory.
    pub fn advisor_dir(&self) -> PathBuf {
        self.workspace.join(".advisor")
    }

    /// Create the `.advisor` directory when it is missing.
    pub fn ensure_advisor_dir(&self) -> AppResult<()> {
        let dir = self.advisor_dir();
        std::fs::create_dir_all(&dir)
            .map_err(|e| AppError::Config(format!("Failed to create {:?}: {}", dir, e)))
    }

    /// Path of the SQLite chunk store inside the workspace.
    pub fn store_path(&self) -> PathBuf {
        self.advisor_dir().join("knowledge.db")
    }

    /// Get the named provider configuration, if the config file declared one.
    pub fn get_provider_config(&self, provider: &str) -> Option<ProviderConfig> {
        self.llm
            .as_ref()
            .and_then(|llm| llm.providers.get(provider).cloned())
    }

    /// Resolve the API key for a provider.
    ///
    /// Precedence: explicit `ADVISOR_API_KEY`, then the environment variable
    /// named by the provider's `apiKeyEnv`, then `GEMINI_API_KEY` for the
    /// Gemini provider when no config file is present.
    pub fn resolve_api_key(&self, provider: &str) -> Option<String> {
        if let Some(ref key) = self.api_key {
            return Some(key.clone());
        }

        if let Some(ProviderConfig::Gemini { api_key_env, .. }) =
            self.get_provider_config(provider)
        {
            if let Ok(key) = std::env::var(&api_key_env) {
                return Some(key);
            }
        }

        if provider == "gemini" {
            if let Ok(key) = std::env::var("GEMINI_API_KEY") {
                return Some(key);
            }
        }

        None
    }

    /// Resolve the endpoint override for a provider, if any.
    pub fn resolve_endpoint(&self, provider: &str) -> Option<String> {
        match self.get_provider_config(provider) {
            Some(ProviderConfig::Gemini { endpoint, .. }) => endpoint,
            Some(ProviderConfig::Ollama { endpoint, .. }) => Some(endpoint),
            None => None,
        }
    }

    /// Validate configuration for the active provider and pipeline.
    pub fn validate(&self) -> AppResult<()> {
        let provider = &self.provider;
        let known_providers = ["gemini", "ollama"];

        if !known_providers.contains(&provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown provider: {}. Supported: {}",
                provider,
                known_providers.join(", ")
            )));
        }

        // Provider-specific requirements
        if let Some(provider_config) = self.get_provider_config(provider) {
            match provider_config {
                ProviderConfig::Gemini { api_key_env, .. } => {
                    if self.api_key.is_none() && std::env::var(&api_key_env).is_err() {
                        return Err(AppError::Config(format!(
                            "API key not found in environment variable: {}",
                            api_key_env
                        )));
                    }
                }
                ProviderConfig::Ollama { .. } => {
                    // Ollama doesn't require API keys
                }
            }
        }

        if self.pipeline.workers == 0 {
            return Err(AppError::Config(
                "pipeline.workers must be at least 1".to_string(),
            ));
        }

        if self.pipeline.search_k == 0 {
            return Err(AppError::Config(
                "pipeline.search_k must be at least 1".to_string(),
            ));
        }

        if !self.pipeline.search_threshold.is_finite() || self.pipeline.search_threshold < 0.0 {
            return Err(AppError::Config(format!(
                "pipeline.search_threshold must be a non-negative number, got {}",
                self.pipeline.search_threshold
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.provider, "gemini");
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.pipeline.workers, 3);
        assert_eq!(config.pipeline.search_k, 10);
        assert!(!config.verbose);
        assert!(!config.no_color);
    }

    #[test]
    fn test_advisor_dir() {
        let config = AppConfig::default();
        let advisor_dir = config.advisor_dir();
        assert!(advisor_dir.ends_with(".advisor"));
        assert!(config.store_path().ends_with(".advisor/knowledge.db"));
    }

    #[test]
    fn test_with_overrides() {
        let config = AppConfig::default();
        let overridden = config.with_overrides(
            None,
            None,
            Some("ollama".to_string()),
            Some("llama3.2".to_string()),
            None,
            true,
            false,
        );

        assert_eq!(overridden.provider, "ollama");
        assert_eq!(overridden.model, "llama3.2");
        assert!(overridden.verbose);
        assert_eq!(overridden.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_validate_unknown_provider() {
        let mut config = AppConfig::default();
        config.provider = "unknown".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_ollama() {
        let mut config = AppConfig::default();
        config.provider = "ollama".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_workers() {
        let mut config = AppConfig::default();
        config.provider = "ollama".to_string();
        config.pipeline.workers = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_provider_config_parses_gemini_and_ollama() {
        let yaml = r#"
activeProvider: gemini
providers:
  gemini:
    apiKeyEnv: GEMINI_API_KEY
    model: gemini-2.0-flash
  ollama:
    endpoint: http://localhost:11434
    model: llama3.2
    timeout: 120
"#;
        let llm: LlmConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(llm.active_provider, "gemini");
        match llm.providers.get("gemini").unwrap() {
            ProviderConfig::Gemini { api_key_env, model, .. } => {
                assert_eq!(api_key_env, "GEMINI_API_KEY");
                assert_eq!(model, "gemini-2.0-flash");
            }
            other => panic!("expected Gemini config, got {:?}", other),
        }
        match llm.providers.get("ollama").unwrap() {
            ProviderConfig::Ollama { endpoint, timeout, .. } => {
                assert_eq!(endpoint, "http://localhost:11434");
                assert_eq!(*timeout, Some(120));
            }
            other => panic!("expected Ollama config, got {:?}", other),
        }
    }

    #[test]
    fn test_explicit_api_key_wins() {
        let mut config = AppConfig::default();
        config.api_key = Some("explicit-key".to_string());
        assert_eq!(
            config.resolve_api_key("gemini"),
            Some("explicit-key".to_string())
        );
    }
}
