use serde::{Deserialize, Serialize};
use async_trait::async_trait;
use log::{debug, error};

use crate::config::BackendConfig;
use crate::providers::chat_completions::ChatMessage;
use crate::providers::Credential;

const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Clone, Serialize)]
pub struct MessagesRequest
{   pub model: String
  , pub max_tokens: usize
  , pub temperature: f32
  , pub messages: Vec<ChatMessage>
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessagesResponse
{   pub content: Vec<ContentBlock>
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentBlock
{   pub text: String
}

/// Anthropic Messages API backend
pub struct AnthropicClient
{   api_key_env: String
  , credential: Option<Credential>
  , endpoint: String
  , model: String
  , temperature: f32
  , max_tokens: usize
  , http_client: reqwest::Client
}

impl AnthropicClient
{   pub fn new(config: &BackendConfig)
      -> Result<Self, crate::error::Error>
    {   debug!("Creating AnthropicClient");
        Ok(AnthropicClient
        {   api_key_env: config.api_key_env.clone()
          , credential: config.credential()
          , endpoint: config.api_base.clone()
          , model: config.model.clone()
          , temperature: config.temperature
          , max_tokens: config.max_tokens
          , http_client: crate::providers::build_http_client(
              config.timeout_secs
            )?
        })
    }

    pub fn has_credential(&self) -> bool
    {   self.credential.is_some()
    }
}

#[async_trait]
impl crate::providers::GenerationBackend for AnthropicClient
{   fn name(&self) -> &str
    {   "anthropic"
    }

    async fn generate(&self, prompt: &str)
      -> Result<String, crate::error::Error>
    {   debug!("anthropic generate with model: {}", self.model);

        let credential = self.credential.as_ref().ok_or_else(|| {
          error!("No API key for: anthropic");
          crate::error::Error::MissingCredential(self.api_key_env.clone())
        })?;

        let request = MessagesRequest
        {   model: self.model.clone()
          , max_tokens: self.max_tokens
          , temperature: self.temperature
          , messages: vec![
              ChatMessage
              {   role: "user".to_string()
                , content: prompt.to_string()
              }
            ]
        };

        let builder = self.http_client
          .post(&self.endpoint)
          .header("x-api-key", credential.expose())
          .header("anthropic-version", ANTHROPIC_VERSION);

        let response: MessagesResponse
          = crate::providers::post_json(builder, "anthropic", &request)
            .await?;

        response.content.into_iter().next()
          .map(|block| block.text)
          .ok_or_else(|| {
            error!("No content blocks in anthropic response");
            crate::error::Error::MalformedResponse(
              "anthropic: response contained no content".to_string()
            )
          })
    }
}
