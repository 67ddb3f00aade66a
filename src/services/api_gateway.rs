// ============================================================================
// API GATEWAY - Single choke point for every console request
// ============================================================================
// Auth header injection, loader visibility and error-to-notification
// translation all happen here so feature code only sees typed outcomes.
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::config::AppConfig;
use crate::error::{ConsoleError, Result};
use crate::models::ErrorBody;
use crate::platform::{HttpRequest, HttpResponse, HttpTransport, Method, Navigator, Timer};
use crate::services::Notifier;
use crate::state::{LoadingState, SessionContext};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self {
            method: Method::Get,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn post() -> Self {
        Self {
            method: Method::Post,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn post_json<B: Serialize>(body: &B) -> Result<Self> {
        Ok(Self {
            method: Method::Post,
            headers: Vec::new(),
            body: Some(serde_json::to_string(body)?),
        })
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::get()
    }
}

#[derive(Clone)]
pub struct ApiGateway {
    config: AppConfig,
    session: SessionContext,
    transport: Rc<dyn HttpTransport>,
    notifier: Notifier,
    loading: LoadingState,
    timer: Rc<dyn Timer>,
    navigator: Rc<dyn Navigator>,
    /// Set while a clear-and-redirect is scheduled; shared by clones.
    reset_pending: Rc<Cell<bool>>,
}

impl ApiGateway {
    pub fn new(
        config: AppConfig,
        session: SessionContext,
        transport: Rc<dyn HttpTransport>,
        notifier: Notifier,
        loading: LoadingState,
        timer: Rc<dyn Timer>,
        navigator: Rc<dyn Navigator>,
    ) -> Self {
        Self {
            config,
            session,
            transport,
            notifier,
            loading,
            timer,
            navigator,
            reset_pending: Rc::new(Cell::new(false)),
        }
    }

    /// Send a request and unwrap its JSON body. Every failure has already
    /// been shown to the admin when this returns `Err`.
    pub async fn request(&self, endpoint: &str, options: RequestOptions) -> Result<Value> {
        log::info!("🌐 [API] Request: {} {}", options.method.as_str(), endpoint);

        let request = HttpRequest {
            method: options.method,
            url: self.config.endpoint_url(endpoint),
            headers: self.build_headers(endpoint, options.headers),
            body: options.body,
        };

        let outcome = {
            let _loading = self.loading.begin();
            self.dispatch(request).await
        };

        if let Err(err) = &outcome {
            log::error!("❌ [API] Request error for {}: {}", endpoint, err);
            self.notifier.error(&err.user_message());
            if err.is_unauthorized() {
                self.schedule_session_reset();
            }
        }
        outcome
    }

    pub async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let value = self.request(endpoint, RequestOptions::get()).await?;
        self.decode(endpoint, value)
    }

    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T> {
        let options = match RequestOptions::post_json(body) {
            Ok(options) => options,
            Err(err) => {
                self.notifier.error(&err.user_message());
                return Err(err);
            }
        };
        let value = self.request(endpoint, options).await?;
        self.decode(endpoint, value)
    }

    fn decode<T: DeserializeOwned>(&self, endpoint: &str, value: Value) -> Result<T> {
        serde_json::from_value(value).map_err(|err| {
            let err = ConsoleError::from(err);
            log::error!("❌ [API] Unexpected body from {}: {}", endpoint, err);
            self.notifier.error(&err.user_message());
            err
        })
    }

    fn build_headers(&self, endpoint: &str, extra: Vec<(String, String)>) -> Vec<(String, String)> {
        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        for (name, value) in extra {
            set_header(&mut headers, &name, value);
        }
        if self.config.is_admin_route(endpoint) {
            if let Some(token) = self.session.token() {
                set_header(&mut headers, "Authorization", format!("Bearer {}", token));
            }
        }
        headers
    }

    async fn dispatch(&self, request: HttpRequest) -> Result<Value> {
        let response = self
            .transport
            .send(request)
            .await
            .map_err(ConsoleError::Transport)?;
        interpret_response(response)
    }

    fn schedule_session_reset(&self) {
        if self.reset_pending.replace(true) {
            log::debug!("🔒 [API] Session reset already scheduled");
            return;
        }
        log::info!("🔒 [API] Unauthorized response, clearing auth...");
        let session = self.session.clone();
        let navigator = self.navigator.clone();
        let login_path = self.config.login_path.clone();
        let reset_pending = self.reset_pending.clone();
        self.timer.schedule(
            self.config.timing.unauthorized_redirect_delay_ms,
            Box::new(move || {
                reset_pending.set(false);
                session.clear();
                navigator.redirect(&login_path);
            }),
        );
    }
}

/// Map a raw response onto the console's typed outcomes.
pub fn interpret_response(response: HttpResponse) -> Result<Value> {
    if response.status == 401 {
        return Err(ConsoleError::Unauthorized);
    }

    if !response.ok() {
        let message = serde_json::from_str::<ErrorBody>(&response.body)
            .ok()
            .and_then(|body| body.message())
            .unwrap_or_else(|| format!("Request failed with status {}", response.status));
        return Err(ConsoleError::RequestFailed {
            status: response.status,
            message,
        });
    }

    if response.is_json() {
        Ok(serde_json::from_str(&response.body)?)
    } else {
        Ok(Value::Object(serde_json::Map::new()))
    }
}

fn set_header(headers: &mut Vec<(String, String)>, name: &str, value: String) {
    match headers.iter_mut().find(|(key, _)| key.eq_ignore_ascii_case(name)) {
        Some(existing) => existing.1 = value,
        None => headers.push((name.to_string(), value)),
    }
}
