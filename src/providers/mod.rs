//! Generation backend implementations

pub mod mock;
pub mod chat_completions;
pub mod anthropic;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use log::{debug, trace, error};

// Re-export for convenience
pub use mock::MockClient;
pub use chat_completions::ChatCompletionsClient;
pub use anthropic::AnthropicClient;

/// One capability shared by every backend: rendered prompt in, text out.
/// Single attempt, no retry.
#[async_trait]
pub trait GenerationBackend: Send + Sync
{   /// Name used in log lines
    fn name(&self) -> &str;

    async fn generate(&self, prompt: &str)
      -> Result<String, crate::error::Error>;
}

/// Opaque API secret. Debug output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential
{   pub fn new(secret: impl Into<String>) -> Self
    {   Credential(secret.into())
    }

    pub fn expose(&self) -> &str
    {   &self.0
    }
}

impl fmt::Debug for Credential
{   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {   f.write_str("Credential(****)")
    }
}

/// Backend id to adapter lookup table
#[derive(Clone, Default)]
pub struct BackendTable
{   backends: HashMap<crate::BackendId, Arc<dyn GenerationBackend>>
}

impl BackendTable
{   pub fn new() -> Self
    {   BackendTable::default()
    }

    /// All four built-in adapters, credentials resolved now
    pub fn from_config(config: &crate::config::RepurposerConfig)
      -> Result<Self, crate::error::Error>
    {   debug!("Building backend table");
        let mut table = BackendTable::new();
        table.register(
          crate::BackendId::Mock, Arc::new(MockClient::new())
        );
        table.register(
          crate::BackendId::Zai,
          Arc::new(ChatCompletionsClient::new(&config.zai)?)
        );
        table.register(
          crate::BackendId::OpenAI,
          Arc::new(ChatCompletionsClient::new(&config.openai)?)
        );
        table.register(
          crate::BackendId::Anthropic,
          Arc::new(AnthropicClient::new(&config.anthropic)?)
        );
        Ok(table)
    }

    /// Add or replace the adapter for an id
    pub fn register(
      &mut self
    , id: crate::BackendId
    , backend: Arc<dyn GenerationBackend>
    )
    {   debug!("Registering backend: {} ({})", id, backend.name());
        self.backends.insert(id, backend);
    }

    /// Resolve a backend id string to its adapter
    pub fn get(&self, backend_id: &str)
      -> Result<Arc<dyn GenerationBackend>, crate::error::Error>
    {   let id: crate::BackendId = backend_id.parse()?;
        self.backends.get(&id).cloned().ok_or_else(|| {
          error!("Backend not registered: {}", id);
          crate::error::Error::UnknownBackend(backend_id.to_string())
        })
    }
}

/// HTTP client with the per-call timeout applied
pub(crate) fn build_http_client(timeout_secs: u64)
  -> Result<reqwest::Client, crate::error::Error>
{   reqwest::Client::builder()
      .timeout(Duration::from_secs(timeout_secs))
      .build()
      .map_err(|e| {
        error!("Failed to build HTTP client: {}", e);
        crate::error::Error::InvalidConfiguration(e.to_string())
      })
}

/// POST a JSON body and decode the JSON reply.
///
/// Transport failures become `NetworkError`, non-success statuses
/// `ApiError`, and bodies that do not decode into `Resp`
/// `MalformedResponse`.
pub(crate) async fn post_json<Req, Resp>(
  request: reqwest::RequestBuilder
, backend: &str
, body: &Req
) -> Result<Resp, crate::error::Error>
where
  Req: Serialize + fmt::Debug
, Resp: DeserializeOwned
{   trace!("{} request: {:?}", backend, body);

    let response = request
      .header("Content-Type", "application/json")
      .json(body)
      .send()
      .await
      .map_err(|e| {
        error!("{} HTTP error: {}", backend, e);
        crate::error::Error::NetworkError(
          format!("Failed to call {} API: {}", backend, e)
        )
      })?;

    let status = response.status();
    trace!("{} response status: {}", backend, status);

    let text = response.text().await.map_err(|e| {
      error!("{} body read error: {}", backend, e);
      crate::error::Error::NetworkError(
        format!("Failed to read {} response: {}", backend, e)
      )
    })?;

    if !status.is_success()
    {   error!("{} API error: {}", backend, text);
        return Err(crate::error::Error::ApiError
        {   status: status.as_u16()
          , message: format!("{} error: {}", backend, text)
        });
    }

    serde_json::from_str(&text).map_err(|e| {
      error!("{} parse error: {}", backend, e);
      crate::error::Error::MalformedResponse(
        format!("{}: {}", backend, e)
      )
    })
}
