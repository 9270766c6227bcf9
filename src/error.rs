use std::fmt;

/// Custom error type for repurposing operations
/// Implements Clone for sending through channels
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error
{   /// Format id is not in the template registry
    UnknownFormat(String)
  , /// Backend id is not a known adapter
    UnknownBackend(String)
  , /// Live backend selected without a configured credential.
    /// Carries the environment variable name, never the secret.
    MissingCredential(String)
  , /// Transport failure: timeout, DNS, TLS, connection reset
    NetworkError(String)
  , /// Upstream answered with a non-success HTTP status
    ApiError
    {   status: u16
      , message: String
    }
  , /// Response body could not be read into the expected shape
    MalformedResponse(String)
  , /// Source content below the minimum length
    ContentTooShort
    {   min: usize
      , actual: usize
    }
  , /// Invalid configuration
    InvalidConfiguration(String)
  , /// Generic error
    Other(String)
}

impl Error
{   /// Stable machine-readable classification
    pub fn code(&self) -> &'static str
    {   match self
        {   Error::UnknownFormat(_) => "unknown_format"
          , Error::UnknownBackend(_) => "unknown_backend"
          , Error::MissingCredential(_) => "missing_credential"
          , Error::NetworkError(_) => "network_error"
          , Error::ApiError { .. } => "api_error"
          , Error::MalformedResponse(_) => "malformed_response"
          , Error::ContentTooShort { .. } => "content_too_short"
          , Error::InvalidConfiguration(_) => "invalid_configuration"
          , Error::Other(_) => "other"
        }
    }

    /// Whether the caller is at fault (bad ids or bad content)
    pub fn is_client_error(&self) -> bool
    {   matches!(
          self,
          Error::UnknownFormat(_)
            | Error::UnknownBackend(_)
            | Error::ContentTooShort { .. }
        )
    }

    /// Transport status a request layer should answer with
    pub fn http_status(&self) -> u16
    {   if self.is_client_error() { 400 } else { 500 }
    }
}

impl fmt::Display for Error
{   fn fmt(&self, f: &mut fmt::Formatter<'_>)
      -> fmt::Result
    {   match self
        {   Error::UnknownFormat(msg) => {
              write!(f, "Unknown platform: {}", msg)
            }
          , Error::UnknownBackend(backend) => {
              write!(f, "Unknown provider: {}", backend)
            }
          , Error::MissingCredential(env_var) => {
              write!(f,
                "{} not set. Set the environment variable or configure api_key.",
                env_var
              )
            }
          , Error::NetworkError(msg) => {
              write!(f, "Network error: {}", msg)
            }
          , Error::ApiError { status, message } => {
              write!(f, "API error ({}): {}", status, message)
            }
          , Error::MalformedResponse(msg) => {
              write!(f, "Malformed response: {}", msg)
            }
          , Error::ContentTooShort { min, actual } => {
              write!(f,
                "Content too short. Please provide at least {} characters (got {}).",
                min, actual
              )
            }
          , Error::InvalidConfiguration(msg) => {
              write!(f, "Invalid configuration: {}", msg)
            }
          , Error::Other(msg) => {
              write!(f, "Error: {}", msg)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<String> for Error
{   fn from(s: String) -> Self
    {   Error::Other(s)
    }
}

impl From<&str> for Error
{   fn from(s: &str) -> Self
    {   Error::Other(s.to_string())
    }
}
