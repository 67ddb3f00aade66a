// ============================================================================
// ERRORS - Typed failures shared by every component
// ============================================================================

use thiserror::Error;

/// Message shown to the admin when a 401 ends the session.
pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please login again.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsoleError {
    /// No token, or the stored token was rejected during verification.
    #[error("no valid session")]
    Unauthenticated,

    /// The server answered 401 to a gateway request.
    #[error("unauthorized")]
    Unauthorized,

    #[error("HTTP {status}: {message}")]
    RequestFailed { status: u16, message: String },

    #[error("network: {0}")]
    Transport(String),

    #[error("decode: {0}")]
    Decode(String),

    /// A device record without the fields needed to identify it.
    #[error("malformed row: {0}")]
    MalformedRow(String),

    /// Expected page structure is missing; the affected feature is disabled.
    #[error("element missing: {0}")]
    ElementMissing(String),

    #[error("storage: {0}")]
    Storage(String),

    #[error("{0}")]
    InvalidInput(String),
}

impl ConsoleError {
    /// Text for the notification surface.
    pub fn user_message(&self) -> String {
        match self {
            ConsoleError::Unauthorized => SESSION_EXPIRED_MESSAGE.to_string(),
            ConsoleError::Unauthenticated => "Please login again.".to_string(),
            ConsoleError::RequestFailed { message, .. } => message.clone(),
            ConsoleError::Transport(message) => message.clone(),
            ConsoleError::Decode(message) => format!("Unexpected server response: {}", message),
            ConsoleError::InvalidInput(message) => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ConsoleError::Unauthorized)
    }
}

pub type Result<T> = std::result::Result<T, ConsoleError>;

impl From<serde_json::Error> for ConsoleError {
    fn from(err: serde_json::Error) -> Self {
        ConsoleError::Decode(err.to_string())
    }
}
