pub mod error;
pub mod config;
pub mod templates;
pub mod providers;
pub mod request;
pub mod repurposer;
pub mod client;

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

pub use client::RepurposeBackend;
pub use config::{BackendConfig, RepurposerConfig};
pub use error::Error;
pub use repurposer::Repurposer;
pub use request::{
  FormatSummary, GenerationOutcome, GenerationRequest, RepurposeResults,
  Target,
};
pub use templates::{FormatId, TargetFormat, TemplateRegistry};

/*

repurposer: one long-form text in, platform-tailored rewrites out.

repurposer/
├── Cargo.toml
├── src/
│   ├── lib.rs          # Re-exports, backend ids, service channel types
│   ├── error.rs        # Error taxonomy
│   ├── config.rs       # Backend endpoints, models, credentials
│   ├── templates.rs    # Fixed format registry + prompt templates
│   ├── providers/      # Generation backends
│   │   ├── mod.rs      # GenerationBackend trait, BackendTable
│   │   ├── mock.rs     # Offline canned responses
│   │   ├── chat_completions.rs   # Z.ai + OpenAI
│   │   └── anthropic.rs
│   ├── request.rs      # Request/outcome types, validation
│   ├── repurposer.rs   # repurpose / repurpose_all
│   ├── client.rs       # Spawned service task
│   └── main.rs         # CLI
└── tests/

*/

/// REPURPOSER SERVICE INTERFACE:

// ===== Repurpose =====

pub type RepurposeReply = Result<String, crate::error::Error>;
pub type RepurposeReplySender
  = tokio::sync::mpsc::UnboundedSender<RepurposeReply>;

pub struct RepurposeArgs
{   pub content: String
  , pub format_id: String
  , pub backend_id: String
  , pub reply: RepurposeReplySender
}

// ===== RepurposeAll =====

pub type RepurposeAllReply = crate::request::RepurposeResults;
pub type RepurposeAllReplySender
  = tokio::sync::mpsc::UnboundedSender<RepurposeAllReply>;

pub struct RepurposeAllArgs
{   pub content: String
  , pub backend_id: String
  , pub reply: RepurposeAllReplySender
}

// ===== ListFormats =====

pub type ListFormatsReply = Vec<crate::request::FormatSummary>;
pub type ListFormatsReplySender
  = tokio::sync::mpsc::UnboundedSender<ListFormatsReply>;

pub struct ListFormatsArgs
{   pub reply: ListFormatsReplySender
}

// ===== KillProcess =====

pub type KillProcessReply = Result<(), crate::error::Error>;
pub type KillProcessReplySender
  = tokio::sync::mpsc::UnboundedSender<KillProcessReply>;

pub struct KillProcessArgs
{   pub reply: KillProcessReplySender
}

// ===== RepurposeHand (sender side) =====

pub struct RepurposeHand
{   pub repurpose_tx
      : tokio::sync::mpsc::UnboundedSender<RepurposeArgs>
  , pub repurpose_all_tx
      : tokio::sync::mpsc::UnboundedSender<RepurposeAllArgs>
  , pub list_formats_tx
      : tokio::sync::mpsc::UnboundedSender<ListFormatsArgs>
  , pub kill_process_tx
      : tokio::sync::mpsc::UnboundedSender<KillProcessArgs>
}

// ===== RepurposeFoot (receiver side) =====

pub struct RepurposeFoot
{   pub repurpose_rx
      : tokio::sync::mpsc::UnboundedReceiver<RepurposeArgs>
  , pub repurpose_all_rx
      : tokio::sync::mpsc::UnboundedReceiver<RepurposeAllArgs>
  , pub list_formats_rx
      : tokio::sync::mpsc::UnboundedReceiver<ListFormatsArgs>
  , pub kill_process_rx
      : tokio::sync::mpsc::UnboundedReceiver<KillProcessArgs>
}

/// REPURPOSER STRUCTURES:

/// Closed set of generation backends, selected by lowercase token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BackendId
{   /// Offline canned responses
    Mock
  , /// Z.ai (GLM models)
    Zai
  , /// OpenAI (GPT models)
    #[serde(rename = "openai")]
    OpenAI
  , /// Anthropic (Claude models)
    Anthropic
}

impl BackendId
{   pub const ALL: [BackendId; 4] = [
      BackendId::Mock
    , BackendId::Zai
    , BackendId::OpenAI
    , BackendId::Anthropic
    ];

    pub fn as_str(&self) -> &'static str
    {   match self
        {   BackendId::Mock => "mock"
          , BackendId::Zai => "zai"
          , BackendId::OpenAI => "openai"
          , BackendId::Anthropic => "anthropic"
        }
    }
}

impl fmt::Display for BackendId
{   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {   f.write_str(self.as_str())
    }
}

impl FromStr for BackendId
{   type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {   BackendId::ALL
          .iter()
          .copied()
          .find(|id| id.as_str() == s)
          .ok_or_else(|| {
            crate::error::Error::UnknownBackend(s.to_string())
          })
    }
}
