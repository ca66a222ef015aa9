use serde::{Deserialize, Serialize};

/// Credentials posted to `/Auth/login`.
///
/// The backend binds these with PascalCase keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Password")]
    pub password: String,
}

/// Response from `/Auth/login`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token; some deployments spell the key `Token`
    #[serde(default, alias = "Token", skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}
