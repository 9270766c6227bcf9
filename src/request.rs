//! Request and per-format outcome types

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

use crate::templates::{FormatId, LengthUnit, TargetFormat};

/// Sentinel selecting every registered format
pub const ALL_TARGETS: &str = "all";

/// Which formats a request asks for.
/// Travels as a plain string: "all" or a format id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Target
{   All
  , Format(String)
}

impl Target
{   /// "all" selects every format; anything else is a format id,
    /// validated later against the registry
    pub fn parse(s: &str) -> Self
    {   if s == ALL_TARGETS
        {   Target::All
        } else
        {   Target::Format(s.to_string())
        }
    }

    pub fn as_str(&self) -> &str
    {   match self
        {   Target::All => ALL_TARGETS
          , Target::Format(id) => id
        }
    }
}

impl From<String> for Target
{   fn from(s: String) -> Self
    {   if s == ALL_TARGETS
        {   Target::All
        } else
        {   Target::Format(s)
        }
    }
}

impl From<Target> for String
{   fn from(target: Target) -> Self
    {   match target
        {   Target::All => ALL_TARGETS.to_string()
          , Target::Format(id) => id
        }
    }
}

/// Unified repurpose request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest
{   /// Long-form source text
    pub content: String
  , /// Format id or "all"
    pub target: Target
  , /// Backend id
    pub backend: String
}

impl GenerationRequest
{   pub fn new(
      content: impl Into<String>
    , target: &str
    , backend: impl Into<String>
    ) -> Self
    {   GenerationRequest
        {   content: content.into()
          , target: Target::parse(target)
          , backend: backend.into()
        }
    }

    /// Reject content whose trimmed length is under `min_chars`
    pub fn validate(&self, min_chars: usize)
      -> Result<(), crate::error::Error>
    {   let actual = self.content.trim().chars().count();
        if actual < min_chars
        {   return Err(crate::error::Error::ContentTooShort
            {   min: min_chars
              , actual
            });
        }
        Ok(())
    }
}

/// Unified error payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse
{   /// Error code
    pub code: String
  , /// Error message
    pub message: String
}

impl From<&crate::error::Error> for ErrorResponse
{   fn from(e: &crate::error::Error) -> Self
    {   ErrorResponse
        {   code: e.code().to_string()
          , message: e.to_string()
        }
    }
}

/// Result for one format: generated text or a captured failure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GenerationOutcome
{   Generated
    {   text: String
    }
  , Failed
    {   error: ErrorResponse
    }
}

impl GenerationOutcome
{   pub fn is_generated(&self) -> bool
    {   matches!(self, GenerationOutcome::Generated { .. })
    }

    pub fn text(&self) -> Option<&str>
    {   match self
        {   GenerationOutcome::Generated { text } => Some(text)
          , GenerationOutcome::Failed { .. } => None
        }
    }

    pub fn error(&self) -> Option<&ErrorResponse>
    {   match self
        {   GenerationOutcome::Generated { .. } => None
          , GenerationOutcome::Failed { error } => Some(error)
        }
    }
}

impl From<Result<String, crate::error::Error>> for GenerationOutcome
{   fn from(result: Result<String, crate::error::Error>) -> Self
    {   match result
        {   Ok(text) => GenerationOutcome::Generated { text }
          , Err(e) => GenerationOutcome::Failed
            {   error: ErrorResponse::from(&e)
            }
        }
    }
}

/// Per-format outcomes, iterated in registry order
pub type RepurposeResults = BTreeMap<FormatId, GenerationOutcome>;

/// Format metadata for selection lists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatSummary
{   pub id: FormatId
  , pub name: String
  , pub description: String
  , pub max_length: usize
  , pub length_unit: LengthUnit
}

impl From<&TargetFormat> for FormatSummary
{   fn from(f: &TargetFormat) -> Self
    {   FormatSummary
        {   id: f.id
          , name: f.name.to_string()
          , description: f.description.to_string()
          , max_length: f.max_length
          , length_unit: f.length_unit
        }
    }
}
