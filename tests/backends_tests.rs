use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_test::{assert_err, assert_ok};

use repurposer::providers::{
  AnthropicClient, ChatCompletionsClient, Credential, GenerationBackend,
};
use repurposer::config::{DEFAULT_ZAI_API_URL, ZAI_API_URL_ENV};
use repurposer::{BackendConfig, Error, RepurposerConfig};

const UNSET_ENV: &str = "REPURPOSER_TEST_BACKEND_KEY_NEVER_SET";

/// Raw request as seen by the stub
struct Captured
{   head: String
  , body: serde_json::Value
}

/// Serve exactly one HTTP response on a local port.
/// Returns the base URL and a handle yielding the captured request.
async fn serve_once(status: &'static str, body: &'static str)
  -> (String, JoinHandle<Captured>)
{   let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");

    let handle = tokio::spawn(async move {
      let (mut socket, _) = listener.accept().await.expect("accept");
      let mut buf = Vec::new();
      let mut chunk = [0u8; 4096];

      let head_end = loop
      {   let n = socket.read(&mut chunk).await.expect("read");
          assert!(n > 0, "client closed before headers");
          buf.extend_from_slice(&chunk[..n]);
          if let Some(pos) = find(&buf, b"\r\n\r\n")
          {   break pos + 4;
          }
      };

      let head = String::from_utf8_lossy(&buf[..head_end]).to_lowercase();
      let content_length = head
        .lines()
        .find_map(|l| l.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

      while buf.len() < head_end + content_length
      {   let n = socket.read(&mut chunk).await.expect("read body");
          assert!(n > 0, "client closed mid body");
          buf.extend_from_slice(&chunk[..n]);
      }

      let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status, body.len(), body
      );
      socket.write_all(response.as_bytes()).await.expect("write");
      socket.shutdown().await.ok();

      Captured
      {   head
        , body: serde_json::from_slice(
            &buf[head_end..head_end + content_length]
          ).unwrap_or(serde_json::Value::Null)
      }
    });

    (format!("http://{}", addr), handle)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize>
{   haystack.windows(needle.len()).position(|w| w == needle)
}

/// A local port with nothing listening
async fn closed_port_url() -> String
{   let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{}/v1/chat/completions", addr)
}

fn zai_at(url: &str) -> BackendConfig
{   BackendConfig::zai().with_api_base(url).with_api_key("test-key")
}

const CHAT_OK: &str = r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":"generated thread"},"finish_reason":"stop"}]}"#;

const ANTHROPIC_OK: &str = r#"{"id":"msg","type":"message","content":[{"type":"text","text":"generated post"}]}"#;

// ===== Chat completions (zai / openai) =====

#[tokio::test]
async fn test_chat_completions_success()
{   let (base, captured) = serve_once("200 OK", CHAT_OK).await;
    let url = format!("{}/v1/chat/completions", base);
    let client = assert_ok!(ChatCompletionsClient::new(&zai_at(&url)));

    let text = assert_ok!(client.generate("the prompt").await);
    assert_eq!(text, "generated thread");

    let req = captured.await.expect("stub task");
    assert!(req.head.starts_with("post /v1/chat/completions"));
    assert!(req.head.contains("authorization: bearer test-key"));
    assert_eq!(req.body["model"], "glm-5");
    assert_eq!(req.body["max_tokens"], 2000);
    assert_eq!(req.body["messages"][0]["role"], "user");
    assert_eq!(req.body["messages"][0]["content"], "the prompt");
    let temperature = req.body["temperature"].as_f64().expect("temperature");
    assert!((temperature - 0.7).abs() < 1e-6);
}

#[tokio::test]
async fn test_chat_completions_missing_keys_is_malformed()
{   let (base, captured) = serve_once("200 OK", r#"{"result":"nope"}"#).await;
    let client = assert_ok!(ChatCompletionsClient::new(&zai_at(&base)));

    let err = assert_err!(client.generate("p").await);
    assert!(matches!(err, Error::MalformedResponse(_)), "{:?}", err);
    captured.await.expect("stub task");
}

#[tokio::test]
async fn test_chat_completions_empty_choices_is_malformed()
{   let (base, captured) = serve_once("200 OK", r#"{"choices":[]}"#).await;
    let client = assert_ok!(ChatCompletionsClient::new(&zai_at(&base)));

    let err = assert_err!(client.generate("p").await);
    assert!(matches!(err, Error::MalformedResponse(_)), "{:?}", err);
    captured.await.expect("stub task");
}

#[tokio::test]
async fn test_chat_completions_non_json_is_malformed()
{   let (base, captured) = serve_once("200 OK", "<html>oops</html>").await;
    let client = assert_ok!(ChatCompletionsClient::new(&zai_at(&base)));

    let err = assert_err!(client.generate("p").await);
    assert_eq!(err.code(), "malformed_response");
    captured.await.expect("stub task");
}

#[tokio::test]
async fn test_chat_completions_error_status()
{   let (base, captured) = serve_once(
      "401 Unauthorized", r#"{"error":"bad key"}"#
    ).await;
    let client = assert_ok!(ChatCompletionsClient::new(&zai_at(&base)));

    match assert_err!(client.generate("p").await)
    {   Error::ApiError { status, message } => {
          assert_eq!(status, 401);
          assert!(message.contains("bad key"));
        }
      , other => panic!("expected ApiError, got {:?}", other)
    }
    captured.await.expect("stub task");
}

#[tokio::test]
async fn test_openai_request_shape()
{   let (base, captured) = serve_once("200 OK", CHAT_OK).await;
    let config = BackendConfig::openai()
      .with_api_base(format!("{}/v1/chat/completions", base))
      .with_api_key("openai-test-key");
    assert_eq!(
      BackendConfig::openai().api_base,
      "https://api.openai.com/v1/chat/completions"
    );
    let client = assert_ok!(ChatCompletionsClient::new(&config));
    assert!(client.has_credential());

    let text = assert_ok!(client.generate("openai prompt").await);
    assert_eq!(text, "generated thread");

    let req = captured.await.expect("stub task");
    assert!(req.head.starts_with("post /v1/chat/completions"));
    assert!(req.head.contains("authorization: bearer openai-test-key"));
    assert_eq!(req.body["model"], "gpt-4o");
    assert_eq!(req.body["max_tokens"], 2000);
    assert_eq!(req.body["messages"][0]["role"], "user");
    assert_eq!(req.body["messages"][0]["content"], "openai prompt");
    let temperature = req.body["temperature"].as_f64().expect("temperature");
    assert!((temperature - 0.7).abs() < 1e-6);
}

#[tokio::test]
async fn test_zai_endpoint_override_from_env()
{   let (base, captured) = serve_once("200 OK", CHAT_OK).await;
    let override_url = format!("{}/custom/zai", base);

    std::env::set_var(ZAI_API_URL_ENV, &override_url);
    let config = RepurposerConfig::from_env();
    std::env::set_var(ZAI_API_URL_ENV, "");
    let empty_config = RepurposerConfig::from_env();
    std::env::remove_var(ZAI_API_URL_ENV);

    assert_eq!(config.zai.api_base, override_url);
    assert_eq!(empty_config.zai.api_base, DEFAULT_ZAI_API_URL);
    assert_eq!(RepurposerConfig::default().zai.api_base, DEFAULT_ZAI_API_URL);

    let client = assert_ok!(
      ChatCompletionsClient::new(&config.zai.with_api_key("zai-test-key"))
    );
    let text = assert_ok!(client.generate("zai prompt").await);
    assert_eq!(text, "generated thread");

    let req = captured.await.expect("stub task");
    assert!(req.head.starts_with("post /custom/zai"));
    assert!(req.head.contains("authorization: bearer zai-test-key"));
    assert_eq!(req.body["model"], "glm-5");
}

#[tokio::test]
async fn test_chat_completions_connection_refused()
{   let url = closed_port_url().await;
    let config = BackendConfig::openai()
      .with_api_base(url)
      .with_api_key("test-key");
    let client = assert_ok!(ChatCompletionsClient::new(&config));

    let err = assert_err!(client.generate("p").await);
    assert!(matches!(err, Error::NetworkError(_)), "{:?}", err);
}

#[tokio::test]
async fn test_chat_completions_missing_credential()
{   let config = BackendConfig
    {   api_key_env: UNSET_ENV.to_string()
      , ..BackendConfig::openai()
    };
    let client = assert_ok!(ChatCompletionsClient::new(&config));
    assert!(!client.has_credential());

    let err = assert_err!(client.generate("p").await);
    assert_eq!(err, Error::MissingCredential(UNSET_ENV.to_string()));
}

// ===== Anthropic =====

#[tokio::test]
async fn test_anthropic_success()
{   let (base, captured) = serve_once("200 OK", ANTHROPIC_OK).await;
    let config = BackendConfig::anthropic()
      .with_api_base(format!("{}/v1/messages", base))
      .with_api_key("anthropic-test-key");
    let client = assert_ok!(AnthropicClient::new(&config));

    let text = assert_ok!(client.generate("the prompt").await);
    assert_eq!(text, "generated post");

    let req = captured.await.expect("stub task");
    assert!(req.head.starts_with("post /v1/messages"));
    assert!(req.head.contains("x-api-key: anthropic-test-key"));
    assert!(req.head.contains("anthropic-version: 2023-06-01"));
    assert!(!req.head.contains("authorization:"));
    assert_eq!(req.body["model"], "claude-sonnet-4-5-20250514");
    assert_eq!(req.body["max_tokens"], 2000);
    assert_eq!(req.body["messages"][0]["role"], "user");
    assert_eq!(req.body["messages"][0]["content"], "the prompt");
    let temperature = req.body["temperature"].as_f64().expect("temperature");
    assert!((temperature - 0.7).abs() < 1e-6);
}

#[tokio::test]
async fn test_anthropic_missing_credential()
{   let config = BackendConfig
    {   api_key_env: UNSET_ENV.to_string()
      , ..BackendConfig::anthropic()
    };
    let client = assert_ok!(AnthropicClient::new(&config));
    assert!(!client.has_credential());

    let err = assert_err!(client.generate("p").await);
    assert_eq!(err, Error::MissingCredential(UNSET_ENV.to_string()));
}

#[tokio::test]
async fn test_anthropic_wrong_shape_is_malformed()
{   let (base, captured) = serve_once("200 OK", CHAT_OK).await;
    let config = BackendConfig::anthropic()
      .with_api_base(base)
      .with_api_key("k");
    let client = assert_ok!(AnthropicClient::new(&config));

    let err = assert_err!(client.generate("p").await);
    assert!(matches!(err, Error::MalformedResponse(_)), "{:?}", err);
    captured.await.expect("stub task");
}

#[tokio::test]
async fn test_anthropic_connection_refused()
{   let config = BackendConfig::anthropic()
      .with_api_base(closed_port_url().await)
      .with_api_key("k");
    let client = assert_ok!(AnthropicClient::new(&config));

    let err = assert_err!(client.generate("p").await);
    assert_eq!(err.code(), "network_error");
}

// ===== Credentials and config =====

#[test]
fn test_error_from_message()
{   assert_eq!(Error::from("boom"), Error::Other("boom".to_string()));
    let err = Error::from(format!("file {}", 7));
    assert_eq!(err.code(), "other");
    assert_eq!(err.to_string(), "Error: file 7");
}

#[test]
fn test_credential_debug_is_redacted()
{   let credential = Credential::new("sk-super-secret");
    let shown = format!("{:?}", credential);
    assert!(!shown.contains("sk-super-secret"));
    assert_eq!(credential.expose(), "sk-super-secret");
}

#[test]
fn test_credential_resolution_order()
{   let env_name = "REPURPOSER_TEST_CREDENTIAL_FROM_ENV";
    std::env::set_var(env_name, "from-env");

    let config = BackendConfig
    {   api_key_env: env_name.to_string()
      , ..BackendConfig::zai()
    };
    assert_eq!(
      config.credential().map(|c| c.expose().to_string()),
      Some("from-env".to_string())
    );

    let config = config.with_api_key("explicit");
    assert_eq!(
      config.credential().map(|c| c.expose().to_string()),
      Some("explicit".to_string())
    );

    let config = BackendConfig
    {   api_key_env: UNSET_ENV.to_string()
      , ..BackendConfig::zai()
    };
    assert!(config.credential().is_none());

    std::env::remove_var(env_name);
}

#[test]
fn test_default_config()
{   let config = RepurposerConfig::default();
    assert_eq!(config.zai.api_base, "https://api.z.ai/v1/chat/completions");
    assert_eq!(config.openai.model, "gpt-4o");
    assert_eq!(config.anthropic.api_key_env, "ANTHROPIC_API_KEY");
    assert_eq!(config.zai.timeout_secs, 60);
    assert_eq!(config.min_content_chars, 50);
}

#[test]
fn test_config_from_json_file()
{   let path = std::env::temp_dir().join(format!(
      "repurposer-config-{}.json", std::process::id()
    ));
    std::fs::write(&path, r#"{
      "openai": {
        "name": "openai",
        "api_key_env": "MY_OPENAI_KEY",
        "api_base": "http://localhost:9999/v1/chat/completions",
        "model": "gpt-4o-mini"
      },
      "min_content_chars": 10
    }"#).expect("write config");

    let config = assert_ok!(RepurposerConfig::from_json_file(&path));
    std::fs::remove_file(&path).ok();

    assert_eq!(config.openai.model, "gpt-4o-mini");
    assert_eq!(config.openai.api_key_env, "MY_OPENAI_KEY");
    assert_eq!(config.openai.timeout_secs, 60);
    assert_eq!(config.anthropic.model, "claude-sonnet-4-5-20250514");
    assert_eq!(config.min_content_chars, 10);
}

#[test]
fn test_config_from_bad_json_file()
{   let path = std::env::temp_dir().join(format!(
      "repurposer-bad-config-{}.json", std::process::id()
    ));
    std::fs::write(&path, "{ not json").expect("write config");

    let err = assert_err!(RepurposerConfig::from_json_file(&path));
    std::fs::remove_file(&path).ok();
    assert!(matches!(err, Error::InvalidConfiguration(_)));

    let err = assert_err!(
      RepurposerConfig::from_json_file("/nonexistent/repurposer.json")
    );
    assert!(matches!(err, Error::InvalidConfiguration(_)));
}
