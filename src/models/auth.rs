use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    pub access_token: String,
    pub username: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub is_admin: Option<bool>,
}

/// Error payload returned by the API server on non-2xx responses.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Human readable message, if the server sent one.
    pub fn message(&self) -> Option<String> {
        match &self.detail {
            Some(serde_json::Value::String(text)) if !text.is_empty() => Some(text.clone()),
            Some(serde_json::Value::Null) | None => {
                self.message.clone().filter(|m| !m.is_empty())
            }
            Some(other) => Some(other.to_string()),
        }
    }
}
