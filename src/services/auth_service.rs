// ============================================================================
// AUTH SERVICE - Login and token probing against the admin API
// ============================================================================
// These calls bypass the gateway: a 401 here means "bad credentials" or
// "stale token", never "session expired while working".
// ============================================================================

use std::rc::Rc;

use crate::config::AppConfig;
use crate::error::{ConsoleError, Result};
use crate::models::{ErrorBody, LoginRequest, LoginResponse};
use crate::platform::{HttpRequest, HttpTransport, Method};

pub const LOGIN_ENDPOINT: &str = "admin/login";
/// Cheap authenticated endpoint used to check a token.
pub const VERIFY_ENDPOINT: &str = "admin/queries";

const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials. Please try again.";

#[derive(Clone)]
pub struct AuthService {
    config: AppConfig,
    transport: Rc<dyn HttpTransport>,
}

impl AuthService {
    pub fn new(config: AppConfig, transport: Rc<dyn HttpTransport>) -> Self {
        Self { config, transport }
    }

    /// One authenticated probe, no retry.
    pub async fn verify_token(&self, token: &str) -> Result<()> {
        let request = HttpRequest {
            method: Method::Get,
            url: self.config.endpoint_url(VERIFY_ENDPOINT),
            headers: vec![("Authorization".to_string(), format!("Bearer {}", token))],
            body: None,
        };

        match self.transport.send(request).await {
            Ok(response) if response.ok() => {
                log::info!("✅ [AUTH] Token verified successfully");
                Ok(())
            }
            Ok(response) => {
                log::warn!("⚠️ [AUTH] Token rejected with status {}", response.status);
                Err(ConsoleError::Unauthenticated)
            }
            Err(err) => {
                log::error!("❌ [AUTH] Token verification error: {}", err);
                Err(ConsoleError::Unauthenticated)
            }
        }
    }

    /// Exchange credentials for an access token
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        log::info!("🔐 [AUTH] Login attempt for user: {}", username);
        let body = serde_json::to_string(&LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        })?;
        let request = HttpRequest {
            method: Method::Post,
            url: self.config.endpoint_url(LOGIN_ENDPOINT),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: Some(body),
        };

        let response = self
            .transport
            .send(request)
            .await
            .map_err(ConsoleError::Transport)?;

        if !response.ok() {
            let message = serde_json::from_str::<ErrorBody>(&response.body)
                .ok()
                .and_then(|body| body.message())
                .unwrap_or_else(|| INVALID_CREDENTIALS_MESSAGE.to_string());
            log::warn!("⚠️ [AUTH] Login failed: {}", message);
            return Err(ConsoleError::RequestFailed {
                status: response.status,
                message,
            });
        }

        let login: LoginResponse = serde_json::from_str(&response.body)?;
        if login.access_token.is_empty() {
            return Err(ConsoleError::Decode("empty access token".to_string()));
        }
        Ok(login)
    }
}
