use serde::{Deserialize, Serialize};

/// Request to register an anonymous user
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// Request to exchange an issued API token for a session
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub token: String,
}

/// Session issued by sign-up or login
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub token: String,
    pub user_id: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("token", &"<redacted>")
            .field("user_id", &self.user_id)
            .field("display_name", &self.display_name)
            .finish()
    }
}
