// ============================================================================
// PLATFORM - Seams between the console logic and the browser
// ============================================================================
// Everything the controllers need from the outside world goes through these
// traits: the browser adapters live in `browser`, tests use in-memory fakes.
// ============================================================================

use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use async_trait::async_trait;

use crate::error::Result;

#[cfg(target_arch = "wasm32")]
pub mod browser;

/// A unit of work for the single-threaded event loop.
pub type LocalTask = Pin<Box<dyn Future<Output = ()>>>;

/// Origin-scoped persistent string storage (localStorage in the browser).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str);
}

/// Page navigation and blocking prompts.
pub trait Navigator {
    fn current_path(&self) -> String;
    fn redirect(&self, path: &str);
    /// Yes/no prompt; `true` means the user accepted.
    fn confirm(&self, message: &str) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .map(|ct| ct.contains("application/json"))
            .unwrap_or(false)
    }
}

/// Raw HTTP exchange. `Err` means the request never produced a response.
#[async_trait(?Send)]
pub trait HttpTransport {
    async fn send(&self, request: HttpRequest) -> std::result::Result<HttpResponse, String>;
}

pub type TimerId = u64;

/// One-shot timers; cancelling an already fired timer is a no-op.
pub trait Timer {
    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> TimerId;
    fn cancel(&self, id: TimerId);
}

/// Fire-and-forget execution of local futures.
pub trait Spawner {
    fn spawn(&self, task: LocalTask);
}

/// The platform handles shared by every component.
#[derive(Clone)]
pub struct Platform {
    pub storage: Rc<dyn KeyValueStore>,
    pub navigator: Rc<dyn Navigator>,
    pub transport: Rc<dyn HttpTransport>,
    pub timer: Rc<dyn Timer>,
    pub spawner: Rc<dyn Spawner>,
}
