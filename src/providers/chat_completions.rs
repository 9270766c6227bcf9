use serde::{Deserialize, Serialize};
use async_trait::async_trait;
use log::{debug, error};

use crate::config::BackendConfig;
use crate::providers::Credential;

// ===== Message Types =====

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage
{   pub role: String
  , pub content: String
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionsRequest
{   pub model: String
  , pub messages: Vec<ChatMessage>
  , pub temperature: f32
  , pub max_tokens: usize
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionsResponse
{   pub choices: Vec<Choice>
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice
{   pub message: ChatMessage
}

// ===== Client =====

/// OpenAI-compatible chat completions backend.
/// Serves both Z.ai (GLM) and OpenAI; they differ only in config.
pub struct ChatCompletionsClient
{   name: String
  , api_key_env: String
  , credential: Option<Credential>
  , endpoint: String
  , model: String
  , temperature: f32
  , max_tokens: usize
  , http_client: reqwest::Client
}

impl ChatCompletionsClient
{   /// Resolve the credential once and build the HTTP client
    pub fn new(config: &BackendConfig)
      -> Result<Self, crate::error::Error>
    {   debug!("Creating ChatCompletionsClient: {}", config.name);
        Ok(ChatCompletionsClient
        {   name: config.name.clone()
          , api_key_env: config.api_key_env.clone()
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

    fn build_request(&self, prompt: &str) -> ChatCompletionsRequest
    {   ChatCompletionsRequest
        {   model: self.model.clone()
          , messages: vec![
              ChatMessage
              {   role: "user".to_string()
                , content: prompt.to_string()
              }
            ]
          , temperature: self.temperature
          , max_tokens: self.max_tokens
        }
    }
}

#[async_trait]
impl crate::providers::GenerationBackend for ChatCompletionsClient
{   fn name(&self) -> &str
    {   &self.name
    }

    async fn generate(&self, prompt: &str)
      -> Result<String, crate::error::Error>
    {   debug!("{} generate with model: {}", self.name, self.model);

        let credential = self.credential.as_ref().ok_or_else(|| {
          error!("No API key for: {}", self.name);
          crate::error::Error::MissingCredential(self.api_key_env.clone())
        })?;

        let request = self.build_request(prompt);
        let builder = self.http_client
          .post(&self.endpoint)
          .bearer_auth(credential.expose());

        let chat_response: ChatCompletionsResponse
          = crate::providers::post_json(builder, &self.name, &request)
            .await?;

        chat_response.choices.into_iter().next()
          .map(|c| c.message.content)
          .ok_or_else(|| {
            error!("No choices in {} response", self.name);
            crate::error::Error::MalformedResponse(
              format!("{}: response contained no choices", self.name)
            )
          })
    }
}
