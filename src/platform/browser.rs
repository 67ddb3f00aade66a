// ============================================================================
// BROWSER PLATFORM - localStorage, location, fetch, setTimeout, spawn_local
// ============================================================================

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use async_trait::async_trait;
use gloo_net::http::Request;
use gloo_storage::{LocalStorage, Storage};
use gloo_timers::callback::Timeout;

use crate::error::{ConsoleError, Result};
use crate::platform::{
    HttpRequest, HttpResponse, HttpTransport, KeyValueStore, LocalTask, Method, Navigator,
    Platform, Spawner, Timer, TimerId,
};

pub struct BrowserStorage;

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|e| ConsoleError::Storage(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) {
        LocalStorage::delete(key);
    }
}

pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn current_path(&self) -> String {
        web_sys::window()
            .and_then(|w| w.location().pathname().ok())
            .unwrap_or_default()
    }

    fn redirect(&self, path: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(e) = window.location().replace(path) {
            log::error!("❌ [APP] Redirect to {} failed: {:?}", path, e);
        }
    }

    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
}

pub struct FetchTransport;

#[async_trait(?Send)]
impl HttpTransport for FetchTransport {
    async fn send(&self, request: HttpRequest) -> std::result::Result<HttpResponse, String> {
        let mut builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let prepared = match request.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| e.to_string())?;

        let response = prepared.send().await.map_err(|e| e.to_string())?;
        let status = response.status();
        let content_type = response.headers().get("content-type");
        let body = response.text().await.map_err(|e| e.to_string())?;

        Ok(HttpResponse {
            status,
            content_type,
            body,
        })
    }
}

struct PendingTimeout {
    _timeout: Timeout,
    fired: Rc<Cell<bool>>,
}

/// `setTimeout` wrapper. Fired entries are swept on the next `schedule`,
/// never while their own callback is still running.
#[derive(Default)]
pub struct BrowserTimer {
    next_id: Cell<TimerId>,
    pending: RefCell<HashMap<TimerId, PendingTimeout>>,
}

impl Timer for BrowserTimer {
    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> TimerId {
        self.pending.borrow_mut().retain(|_, entry| !entry.fired.get());

        let id = self.next_id.get() + 1;
        self.next_id.set(id);

        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();
        let timeout = Timeout::new(delay_ms, move || {
            callback();
            flag.set(true);
        });

        self.pending.borrow_mut().insert(
            id,
            PendingTimeout {
                _timeout: timeout,
                fired,
            },
        );
        id
    }

    fn cancel(&self, id: TimerId) {
        let removed = self.pending.borrow_mut().remove(&id);
        drop(removed);
    }
}

pub struct LocalSpawner;

impl Spawner for LocalSpawner {
    fn spawn(&self, task: LocalTask) {
        wasm_bindgen_futures::spawn_local(task);
    }
}

impl Platform {
    pub fn browser() -> Self {
        Self {
            storage: Rc::new(BrowserStorage),
            navigator: Rc::new(BrowserNavigator),
            transport: Rc::new(FetchTransport),
            timer: Rc::new(BrowserTimer::default()),
            spawner: Rc::new(LocalSpawner),
        }
    }
}
