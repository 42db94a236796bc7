//! Session context holding the credential the transport attaches to each call.
//!
//! The session is populated on sign-in and cleared on sign-out by the account
//! endpoints (or by the embedding application). The transport only reads it.

use docuquiz_core::ClientConfig;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// Authentication strategy for the API.
#[derive(Clone, PartialEq, Eq)]
pub enum Auth {
    /// `Authorization: Bearer {token}`
    Bearer(String),
    /// `X-API-Key: {key}`
    XApiKey(String),
}

impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Auth::Bearer(_) => f.write_str("Bearer(<redacted>)"),
            Auth::XApiKey(_) => f.write_str("XApiKey(<redacted>)"),
        }
    }
}

/// Shared handle to the current credential. Clones observe the same state.
#[derive(Clone, Debug, Default)]
pub struct Session {
    inner: Arc<RwLock<Option<Auth>>>,
}

impl Session {
    /// Signed-out session.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_auth(auth: Auth) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Some(auth))),
        }
    }

    /// Session seeded from DOCUQUIZ_API_TOKEN (bearer) or DOCUQUIZ_API_KEY.
    pub fn from_config(config: &ClientConfig) -> Self {
        match (&config.api_token, &config.api_key) {
            (Some(token), _) => Self::with_auth(Auth::Bearer(token.clone())),
            (None, Some(key)) => Self::with_auth(Auth::XApiKey(key.clone())),
            (None, None) => Self::new(),
        }
    }

    pub fn sign_in(&self, auth: Auth) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(auth);
    }

    pub fn sign_out(&self) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *guard = None;
    }

    /// Current credential, if signed in.
    pub fn auth(&self) -> Option<Auth> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth().is_some()
    }
}
