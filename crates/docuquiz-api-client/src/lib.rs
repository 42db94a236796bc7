//! Shared HTTP client for the DocuQuiz backend.
//!
//! Provides a minimal transport that injects the session's credential and decodes
//! backend errors uniformly, the upload strategies (mock and live), the quiz, notes
//! and account endpoints, and the orchestrator that runs an upload attempt end to end.
//! The CLI uses this client directly.

pub mod api;
pub mod flow;
pub mod session;
pub mod upload;

use docuquiz_core::config::DEFAULT_GENERATION_TIMEOUT;
use docuquiz_core::{ClientConfig, ClientError, ClientResult};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub use flow::{FlowOutcome, FlowState, UploadFlow};
pub use session::{Auth, Session};
pub use upload::{create_upload_strategy, UploadSource, UploadStrategy};

const BACKEND_NOT_CONFIGURED_MESSAGE: &str =
    "DOCUQUIZ_API_BASE_URL is not set; this request needs a backend";

/// Failure of a call made through the transport.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Failed to send request: {0}")]
    Network(#[source] reqwest::Error),

    /// Non-success status. `message` is the decoded `message` field of a JSON body.
    #[error("API request failed with status {status}")]
    Status {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("Failed to parse response as JSON: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("No backend base URL is configured")]
    NotConfigured,
}

impl TransportError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            TransportError::Network(err) | TransportError::Decode(err) => err.status(),
            TransportError::NotConfigured => None,
        }
    }

    /// Message decoded from the backend's error body, if any.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            TransportError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// The backend's message when one was decoded, otherwise `fallback`.
    pub fn message_or(&self, fallback: &str) -> String {
        self.backend_message()
            .filter(|message| !message.trim().is_empty())
            .unwrap_or(fallback)
            .to_string()
    }
}

/// HTTP client for the DocuQuiz backend. Attaches the session credential to every call.
///
/// Without a base URL (mock-only configuration) every backend call fails with
/// [`TransportError::NotConfigured`]; no request leaves the process.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
    session: Session,
    generation_timeout: Duration,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, session: Session, timeout: Duration) -> ClientResult<Self> {
        Self::build(Some(base_url.into()), session, timeout)
    }

    /// Create client from configuration. A missing base URL leaves the client
    /// unconfigured: uploads can still be simulated, backend calls are refused.
    pub fn from_config(config: &ClientConfig, session: Session) -> ClientResult<Self> {
        Ok(
            Self::build(config.api_base_url.clone(), session, config.http_timeout)?
                .with_generation_timeout(config.generation_timeout),
        )
    }

    fn build(base_url: Option<String>, session: Session, timeout: Duration) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to create HTTP client: {}", e)))?;

        let base_url = base_url
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());

        Ok(Self {
            client,
            base_url,
            session,
            generation_timeout: DEFAULT_GENERATION_TIMEOUT,
        })
    }

    /// Timeout applied to the long-running generation endpoints.
    pub fn with_generation_timeout(mut self, timeout: Duration) -> Self {
        self.generation_timeout = timeout;
        self
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    pub fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }

    /// Fail with a configuration error when no backend base URL is set.
    pub fn require_backend(&self) -> ClientResult<()> {
        if self.is_configured() {
            Ok(())
        } else {
            Err(ClientError::Config(
                BACKEND_NOT_CONFIGURED_MESSAGE.to_string(),
            ))
        }
    }

    pub fn build_url(&self, path: &str) -> Result<String, TransportError> {
        let base_url = self
            .base_url
            .as_deref()
            .ok_or(TransportError::NotConfigured)?;
        Ok(format!("{}{}", base_url, path))
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub(crate) fn generation_timeout(&self) -> Duration {
        self.generation_timeout
    }

    fn apply_auth(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.auth() {
            Some(Auth::Bearer(token)) => request.bearer_auth(token),
            Some(Auth::XApiKey(key)) => request.header("X-API-Key", key),
            None => request,
        }
    }

    /// GET request with optional query parameters. Deserializes JSON response.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, TransportError> {
        let mut request = self.client.get(self.build_url(path)?);
        if !query.is_empty() {
            request = request.query(query);
        }
        self.send(request).await
    }

    /// POST JSON body and deserialize response.
    pub async fn post_json<T: DeserializeOwned, B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, TransportError> {
        let request = self.client.post(self.build_url(path)?).json(body);
        self.send(request).await
    }

    /// POST JSON body with a per-request timeout overriding the client's.
    pub async fn post_json_with_timeout<T: DeserializeOwned, B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        timeout: Duration,
    ) -> Result<T, TransportError> {
        let request = self
            .client
            .post(self.build_url(path)?)
            .json(body)
            .timeout(timeout);
        self.send(request).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, TransportError> {
        let response = self
            .apply_auth(request)
            .send()
            .await
            .map_err(TransportError::Network)?;

        let status = response.status();
        if !status.is_success() {
            let message = decode_error_message(response).await;
            tracing::debug!(%status, message = ?message, "API request failed");
            return Err(TransportError::Status { status, message });
        }

        response.json().await.map_err(TransportError::Decode)
    }

    /// Raw client without auth, for calls that must not carry the session credential.
    pub fn client(&self) -> &Client {
        &self.client
    }
}

/// Extract the `message` field of a JSON error body.
async fn decode_error_message(response: reqwest::Response) -> Option<String> {
    let body: serde_json::Value = response.json().await.ok()?;
    body.get("message")?.as_str().map(String::from)
}

// Re-export domain types for convenience.
pub use docuquiz_core::models::{
    AuthSession, ConfirmUploadRequest, Difficulty, GenerationOptions, PresignedPackage,
    QuestionType, QuizHandle, UploadConfirmation, WrongAnswerNote,
};
