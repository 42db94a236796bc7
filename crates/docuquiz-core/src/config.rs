//! Configuration module
//!
//! Client configuration loaded from the environment: backend base URL, upload mode
//! (mock or live), initial credentials, timeouts, and simulated mock latencies.

use std::env;
use std::time::Duration;

use crate::error::ClientError;

// Common constants
const HTTP_TIMEOUT_SECS: u64 = 60;
const GENERATION_TIMEOUT_SECS: u64 = 300;
const MOCK_CREDENTIAL_DELAY_MS: u64 = 400;
const MOCK_TRANSFER_DELAY_MS: u64 = 1000;

pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(HTTP_TIMEOUT_SECS);
pub const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(GENERATION_TIMEOUT_SECS);

/// Which upload strategy the client runs with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UploadMode {
    /// Synthesized credentials, simulated transfer and confirmation
    Mock,
    /// Real backend and object store
    Live,
}

impl UploadMode {
    /// Live only when the mock flag is exactly `"false"` and a base URL is configured.
    pub fn resolve(use_mock_flag: Option<&str>, api_base_url: Option<&str>) -> Self {
        let mock_disabled = matches!(use_mock_flag.map(str::trim), Some("false"));
        let has_base_url = api_base_url.is_some_and(|url| !url.trim().is_empty());

        if mock_disabled && has_base_url {
            UploadMode::Live
        } else {
            UploadMode::Mock
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UploadMode::Mock => "mock",
            UploadMode::Live => "live",
        }
    }
}

/// Simulated latencies of the mock upload strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MockLatency {
    /// Delay of the presigned-credential and confirmation stages
    pub credential: Duration,
    /// Delay of the object-store transfer stage
    pub transfer: Duration,
}

impl MockLatency {
    pub fn none() -> Self {
        Self {
            credential: Duration::ZERO,
            transfer: Duration::ZERO,
        }
    }
}

impl Default for MockLatency {
    fn default() -> Self {
        Self {
            credential: Duration::from_millis(MOCK_CREDENTIAL_DELAY_MS),
            transfer: Duration::from_millis(MOCK_TRANSFER_DELAY_MS),
        }
    }
}

/// DocuQuiz client configuration.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub api_base_url: Option<String>,
    pub upload_mode: UploadMode,
    /// Initial bearer token for the session
    pub api_token: Option<String>,
    /// Initial X-API-Key credential, used when no token is set
    pub api_key: Option<String>,
    pub http_timeout: Duration,
    pub generation_timeout: Duration,
    pub mock_latency: MockLatency,
}

impl ClientConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup("DOCUQUIZ_API_BASE_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());
        let use_mock = lookup("DOCUQUIZ_USE_UPLOAD_MOCK");
        let upload_mode = UploadMode::resolve(use_mock.as_deref(), api_base_url.as_deref());

        let http_timeout = Duration::from_secs(parse_u64(
            &lookup,
            "DOCUQUIZ_HTTP_TIMEOUT_SECS",
            HTTP_TIMEOUT_SECS,
        )?);
        let generation_timeout = Duration::from_secs(parse_u64(
            &lookup,
            "DOCUQUIZ_GENERATION_TIMEOUT_SECS",
            GENERATION_TIMEOUT_SECS,
        )?);
        let mock_latency = MockLatency {
            credential: Duration::from_millis(parse_u64(
                &lookup,
                "DOCUQUIZ_MOCK_CREDENTIAL_DELAY_MS",
                MOCK_CREDENTIAL_DELAY_MS,
            )?),
            transfer: Duration::from_millis(parse_u64(
                &lookup,
                "DOCUQUIZ_MOCK_TRANSFER_DELAY_MS",
                MOCK_TRANSFER_DELAY_MS,
            )?),
        };

        Ok(Self {
            api_base_url,
            upload_mode,
            api_token: lookup("DOCUQUIZ_API_TOKEN").filter(|t| !t.is_empty()),
            api_key: lookup("DOCUQUIZ_API_KEY").filter(|k| !k.is_empty()),
            http_timeout,
            generation_timeout,
            mock_latency,
        })
    }

    /// Mock configuration with no backend.
    pub fn mock() -> Self {
        Self {
            api_base_url: None,
            upload_mode: UploadMode::Mock,
            api_token: None,
            api_key: None,
            http_timeout: DEFAULT_HTTP_TIMEOUT,
            generation_timeout: DEFAULT_GENERATION_TIMEOUT,
            mock_latency: MockLatency::default(),
        }
    }

    /// Live configuration against `base_url`.
    pub fn live(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            api_base_url: Some(base_url),
            upload_mode: UploadMode::Live,
            ..Self::mock()
        }
    }

    pub fn with_mock_latency(mut self, latency: MockLatency) -> Self {
        self.mock_latency = latency;
        self
    }

    pub fn is_mock(&self) -> bool {
        self.upload_mode == UploadMode::Mock
    }
}

fn parse_u64<F>(lookup: &F, key: &str, default: u64) -> Result<u64, ClientError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw.trim().parse::<u64>().map_err(|_| {
            ClientError::Config(format!("{} must be a non-negative integer, got {:?}", key, raw))
        }),
        _ => Ok(default),
    }
}
