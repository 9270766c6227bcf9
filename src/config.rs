//! Configuration for generation backends and request validation

use std::fs;
use std::path::Path;
use serde::{Deserialize, Serialize};
use log::{debug, error};

use crate::providers::Credential;

pub const ZAI_API_URL_ENV: &str = "ZAI_API_URL";
pub const DEFAULT_ZAI_API_URL: &str
  = "https://api.z.ai/v1/chat/completions";
pub const DEFAULT_OPENAI_API_URL: &str
  = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_ANTHROPIC_API_URL: &str
  = "https://api.anthropic.com/v1/messages";

pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: usize = 2000;
pub const DEFAULT_MIN_CONTENT_CHARS: usize = 50;

fn default_timeout_secs() -> u64 { DEFAULT_TIMEOUT_SECS }
fn default_temperature() -> f32 { DEFAULT_TEMPERATURE }
fn default_max_tokens() -> usize { DEFAULT_MAX_TOKENS }

/// Live backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig
{   /// Backend name
    pub name: String
  , /// Environment variable holding the credential
    pub api_key_env: String
  , /// Explicit credential, takes precedence over the environment
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>
  , /// Full endpoint URL
    pub api_base: String
  , /// Model name sent with every request
    pub model: String
  , /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64
  , /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32
  , /// Max tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize
}

impl BackendConfig
{   fn new(
      name: &str
    , api_key_env: &str
    , api_base: &str
    , model: &str
    ) -> Self
    {   BackendConfig
        {   name: name.to_string()
          , api_key_env: api_key_env.to_string()
          , api_key: None
          , api_base: api_base.to_string()
          , model: model.to_string()
          , timeout_secs: DEFAULT_TIMEOUT_SECS
          , temperature: DEFAULT_TEMPERATURE
          , max_tokens: DEFAULT_MAX_TOKENS
        }
    }

    /// Default Z.ai settings
    pub fn zai() -> Self
    {   BackendConfig::new(
          "zai", "ZAI_API_KEY", DEFAULT_ZAI_API_URL, "glm-5"
        )
    }

    /// Default OpenAI settings
    pub fn openai() -> Self
    {   BackendConfig::new(
          "openai", "OPENAI_API_KEY", DEFAULT_OPENAI_API_URL, "gpt-4o"
        )
    }

    /// Default Anthropic settings
    pub fn anthropic() -> Self
    {   BackendConfig::new(
          "anthropic",
          "ANTHROPIC_API_KEY",
          DEFAULT_ANTHROPIC_API_URL,
          "claude-sonnet-4-5-20250514"
        )
    }

    /// Builder-style explicit credential
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self
    {   self.api_key = Some(key.into());
        self
    }

    /// Builder-style endpoint override
    pub fn with_api_base(mut self, url: impl Into<String>) -> Self
    {   self.api_base = url.into();
        self
    }

    /// Resolve the credential: explicit key first, then the environment.
    /// Empty values count as unset.
    pub fn credential(&self) -> Option<Credential>
    {   if let Some(key) = self.api_key.as_ref().filter(|k| !k.is_empty())
        {   debug!("Using configured key for: {}", self.name);
            return Some(Credential::new(key.clone()));
        }

        match std::env::var(&self.api_key_env)
        {   Ok(key) if !key.is_empty() => {
              debug!(
                "Using {} from environment for: {}",
                self.api_key_env, self.name
              );
              Some(Credential::new(key))
            }
          , _ => {
              debug!("No credential for: {}", self.name);
              None
            }
        }
    }
}

/// Repurposer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RepurposerConfig
{   /// Z.ai GLM backend
    pub zai: BackendConfig
  , /// OpenAI backend
    pub openai: BackendConfig
  , /// Anthropic backend
    pub anthropic: BackendConfig
  , /// Minimum trimmed content length accepted by `handle`
    pub min_content_chars: usize
}

impl Default for RepurposerConfig
{   fn default() -> Self
    {   RepurposerConfig
        {   zai: BackendConfig::zai()
          , openai: BackendConfig::openai()
          , anthropic: BackendConfig::anthropic()
          , min_content_chars: DEFAULT_MIN_CONTENT_CHARS
        }
    }
}

impl RepurposerConfig
{   /// Defaults plus the Z.ai endpoint override from the environment
    pub fn from_env() -> Self
    {   let mut config = RepurposerConfig::default();
        config.apply_env_overrides();
        config
    }

    /// Load a JSON configuration file, then apply env overrides
    pub fn from_json_file<P: AsRef<Path>>(path: P)
      -> Result<Self, crate::error::Error>
    {   let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let config_str = fs::read_to_string(path)
          .map_err(|e| {
            error!("Failed to read config: {}", e);
            crate::error::Error::InvalidConfiguration(
              format!("{}: {}", path.display(), e)
            )
          })?;

        let mut config: RepurposerConfig
          = serde_json::from_str(&config_str).map_err(|e| {
            error!("Failed to parse config: {}", e);
            crate::error::Error::InvalidConfiguration(
              format!("{}: {}", path.display(), e)
            )
          })?;

        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self)
    {   if let Ok(url) = std::env::var(ZAI_API_URL_ENV)
        {   if !url.is_empty()
            {   debug!("Overriding Z.ai endpoint from {}", ZAI_API_URL_ENV);
                self.zai.api_base = url;
            }
        }
    }
}
