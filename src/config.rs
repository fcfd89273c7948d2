use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{Result, TeachkitError};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Address the HTTP server binds to.
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Title shown in the page header.
    #[serde(default = "default_page_title")]
    pub page_title: String,

    #[serde(default)]
    pub llm: LlmConfig,
}

// -- LLM -----------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// Gemini model used for generation (e.g. "gemini-1.5-flash").
    /// Can be overridden with the `GEMINI_MODEL` env var.
    #[serde(default = "default_model")]
    pub model: String,

    /// Gemini API base URL.
    /// Can be overridden with the `GEMINI_BASE_URL` env var.
    #[serde(default)]
    pub base_url: String,

    /// Maximum tokens to generate per response.
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: usize,

    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// HTTP timeout in seconds (0 = transport default).
    #[serde(default)]
    pub timeout_secs: u64,
}

// -- Defaults ------------------------------------------------------------

fn default_bind() -> String {
    "127.0.0.1:3030".to_string()
}
fn default_page_title() -> String {
    "AI Educator's Toolkit".to_string()
}
fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}
fn default_max_output_tokens() -> usize {
    2048
}
fn default_temperature() -> f32 {
    0.7
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: String::new(),
            max_output_tokens: default_max_output_tokens(),
            temperature: default_temperature(),
            timeout_secs: 0,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            page_title: default_page_title(),
            llm: LlmConfig::default(),
        }
    }
}

// -- Config impl ---------------------------------------------------------

impl Config {
    /// Load config from the given path, or the default XDG config location.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_config_path(),
        };

        let config = if config_path.exists() {
            info!("loading config from {}", config_path.display());
            let contents = std::fs::read_to_string(&config_path).map_err(TeachkitError::Io)?;
            toml::from_str(&contents)
                .map_err(|e| TeachkitError::Config(format!("parse error: {e}")))?
        } else {
            info!("no config file found, using defaults");
            Config::default()
        };

        Ok(config)
    }

    /// Returns the default config file path: `$XDG_CONFIG_HOME/teachkit/config.toml`
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join("teachkit")
            .join("config.toml")
    }

    /// Get the Gemini API key from the environment.
    pub fn gemini_api_key() -> Result<String> {
        std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|s| !s.is_empty())
            .or_else(|| {
                std::env::var("GOOGLE_API_KEY")
                    .ok()
                    .filter(|s| !s.is_empty())
            })
            .ok_or_else(|| {
                TeachkitError::Config(
                    "GEMINI_API_KEY or GOOGLE_API_KEY environment variable not set".into(),
                )
            })
    }

    /// Generate the default config file contents.
    pub fn default_config_contents() -> &'static str {
        include_str!("../config.example.toml")
    }
}
