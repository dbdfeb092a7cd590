use std::path::Path;
use std::path::PathBuf;

use config::Config;
use config::ConfigError as ExternalConfigError;
use config::Environment;
use config::File;
use config::FileFormat;
use directories::ProjectDirs;
use serde::Deserialize;
use thiserror::Error;

pub const ENV_PREFIX: &str = "UIML";
pub const ENV_SEPARATOR: &str = "__";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration build/deserialize error: {0}")]
    Config(#[from] ExternalConfigError),
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub debug: bool,
    /// Extra component catalog merged over the built-in one.
    pub components: Option<PathBuf>,
    pub repair: RepairSettings,
    pub llm: LlmSettings,
    pub pricing: PricingSettings,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct RepairSettings {
    pub max_attempts: u32,
    pub max_output_tokens: u32,
    pub temperature: Option<f64>,
}

impl Default for RepairSettings {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            max_output_tokens: 2000,
            temperature: Some(0.2),
        }
    }
}

/// OpenAI-compatible chat endpoint.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LlmSettings {
    pub base_url: String,
    pub model: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
        }
    }
}

/// Dollars per 1000 tokens.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PricingSettings {
    pub input_per_1k: f64,
    pub output_per_1k: f64,
}

impl Default for PricingSettings {
    fn default() -> Self {
        Self {
            input_per_1k: 0.000_15,
            output_per_1k: 0.000_6,
        }
    }
}

impl Settings {
    pub fn new(project_root: &Path) -> Result<Self, ConfigError> {
        let user_config_file = ProjectDirs::from("dev", "uiml", "uiml")
            .map(|proj_dirs| proj_dirs.config_dir().join("uiml.toml"));

        Self::load_from_paths(project_root, user_config_file.as_deref(), None)
    }

    /// `env` replaces the process environment when given.
    fn load_from_paths(
        project_root: &Path,
        user_config_path: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(path) = user_config_path {
            tracing::debug!(path = %path.display(), "reading user config");
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
        }

        builder = builder.add_source(
            File::from(project_root.join(".uiml.toml"))
                .format(FileFormat::Toml)
                .required(false),
        );

        builder = builder.add_source(
            File::from(project_root.join("uiml.toml"))
                .format(FileFormat::Toml)
                .required(false),
        );

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator(ENV_SEPARATOR)
                .try_parsing(true)
                .source(env),
        );

        let config = builder.build()?;
        let settings = config.try_deserialize()?;
        Ok(settings)
    }
}
