//! HTTP client for the generation service

use std::time::Duration;

use async_trait::async_trait;
use seatplan_core::{GenerationRequest, GenerativeModel, ModelError};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::protocol::{ApiErrorBody, GenerateContentRequest, GenerateContentResponse};

/// Base URL of the Generative Language API
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Checked when `GEMINI_API_KEY` is unset
pub const FALLBACK_API_KEY_ENV: &str = "API_KEY";

const API_KEY_HEADER: &str = "x-goog-api-key";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client settings
#[derive(Clone)]
pub struct ClientConfig {
    pub endpoint: String,
    api_key: Option<String>,
}

impl ClientConfig {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    /// Read the API key from the environment, optionally overriding the endpoint
    pub fn from_env(endpoint: Option<String>) -> Self {
        let api_key = std::env::var(API_KEY_ENV)
            .or_else(|_| std::env::var(FALLBACK_API_KEY_ENV))
            .ok();
        Self::new(
            endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            api_key,
        )
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// `generateContent` client
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl GeminiClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;
        Ok(Self::with_http_client(config, http))
    }

    pub fn with_http_client(config: ClientConfig, http: reqwest::Client) -> Self {
        if !config.has_api_key() {
            warn!(
                "No API key found in {} or {}; AI grouping will fail",
                API_KEY_ENV, FALLBACK_API_KEY_ENV
            );
        }
        Self { http, config }
    }

    fn url_for(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            model
        )
    }

    /// Send one request and return the first candidate's text
    pub async fn generate_content(&self, request: &GenerationRequest) -> Result<String> {
        let api_key = self.config.api_key.as_deref().ok_or(Error::MissingApiKey)?;
        let url = self.url_for(&request.model);
        let body = GenerateContentRequest::from(request);

        info!(model = %request.model, "Sending generateContent request");

        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        debug!(status = status.as_u16(), bytes = text.len(), "generateContent response");

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&text)
                .map(|b| b.error.message)
                .unwrap_or_else(|_| text.chars().take(200).collect());
            return Err(Error::Status {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&text)?;
        if let Some(reason) = parsed.block_reason() {
            return Err(Error::Blocked(reason.to_string()));
        }
        parsed.text().ok_or(Error::EmptyResponse)
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> std::result::Result<String, ModelError> {
        Ok(self.generate_content(request).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seatplan_core::Student;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    fn request() -> GenerationRequest {
        GenerationRequest::for_groups(
            "test-model",
            &[Student::new(1, "Ada"), Student::new(2, "Grace")],
            2,
            "",
        )
        .unwrap()
    }

    fn client(endpoint: &str, api_key: Option<&str>) -> GeminiClient {
        let http = reqwest::Client::builder().no_proxy().build().unwrap();
        GeminiClient::with_http_client(
            ClientConfig::new(endpoint, api_key.map(str::to_string)),
            http,
        )
    }

    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            if let Some(header_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let headers = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
                let content_length = headers
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Serve exactly one canned HTTP response and hand back the raw request
    async fn serve_once(status_line: &'static str, body: String) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            request
        });

        (format!("http://{}", addr), handle)
    }

    #[tokio::test]
    async fn test_generate_content_success() {
        let body = serde_json::json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "[{\"groupNumber\":1,\"students\":[]}]"}]}
            }]
        })
        .to_string();
        let (endpoint, server) = serve_once("200 OK", body).await;

        let text = client(&endpoint, Some("secret-key"))
            .generate_content(&request())
            .await
            .unwrap();
        assert_eq!(text, "[{\"groupNumber\":1,\"students\":[]}]");

        let raw = server.await.unwrap();
        assert!(raw.starts_with("POST /models/test-model:generateContent HTTP/1.1"));
        assert!(raw.to_lowercase().contains("x-goog-api-key: secret-key"));
        assert!(raw.contains("\"responseMimeType\":\"application/json\""));
        assert!(raw.contains("\"systemInstruction\""));
    }

    #[tokio::test]
    async fn test_error_status_reports_message() {
        let body = r#"{"error": {"code": 403, "message": "API key not valid", "status": "PERMISSION_DENIED"}}"#;
        let (endpoint, server) = serve_once("403 Forbidden", body.to_string()).await;

        let result = client(&endpoint, Some("bad")).generate_content(&request()).await;
        match result {
            Err(Error::Status { status, message }) => {
                assert_eq!(status, 403);
                assert_eq!(message, "API key not valid");
            }
            other => panic!("unexpected result: {:?}", other),
        }
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_blocked_prompt() {
        let body = r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#;
        let (endpoint, server) = serve_once("200 OK", body.to_string()).await;

        let result = client(&endpoint, Some("k")).generate_content(&request()).await;
        assert!(matches!(result, Err(Error::Blocked(reason)) if reason == "SAFETY"));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_empty_candidates() {
        let (endpoint, server) = serve_once("200 OK", r#"{"candidates": []}"#.to_string()).await;

        let result = client(&endpoint, Some("k")).generate_content(&request()).await;
        assert!(matches!(result, Err(Error::EmptyResponse)));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_api_key_makes_no_request() {
        let result = client("http://127.0.0.1:9", None)
            .generate_content(&request())
            .await;
        assert!(matches!(result, Err(Error::MissingApiKey)));
    }

    #[test]
    fn test_config_debug_redacts_key() {
        let config = ClientConfig::new(DEFAULT_ENDPOINT, Some("super-secret".to_string()));
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_blank_key_treated_as_missing() {
        assert!(!ClientConfig::new(DEFAULT_ENDPOINT, Some("  ".to_string())).has_api_key());
    }

    #[test]
    fn test_url_for_model() {
        let client = client("http://localhost:8080/v1beta/", Some("k"));
        assert_eq!(
            client.url_for("gemini-2.5-flash"),
            "http://localhost:8080/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }
}
