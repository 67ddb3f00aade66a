// In-memory stand-ins for the browser platform.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use async_trait::async_trait;
use proevent_admin_console::platform::{
    HttpRequest, HttpResponse, HttpTransport, KeyValueStore, LocalTask, Method, Navigator,
    Platform, Spawner, Timer, TimerId,
};
use proevent_admin_console::services::{NotificationKind, Notifier};
use proevent_admin_console::{AppConfig, Result};
use serde_json::Value;
use tokio::sync::oneshot;

pub const BASE_URL: &str = "http://test/api";

pub fn test_config() -> AppConfig {
    AppConfig {
        api_base_url: BASE_URL.to_string(),
        ..AppConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn with_session(token: &str, username: &str) -> Self {
        let store = Self::default();
        store.values.borrow_mut().insert("adminToken".into(), token.into());
        store.values.borrow_mut().insert("adminUsername".into(), username.into());
        store
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.value(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.values.borrow_mut().remove(key);
    }
}

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

pub struct RecordingNavigator {
    path: RefCell<String>,
    pub redirects: RefCell<Vec<String>>,
    pub prompts: RefCell<Vec<String>>,
    confirm_answer: Cell<bool>,
}

impl RecordingNavigator {
    pub fn at(path: &str) -> Self {
        Self {
            path: RefCell::new(path.to_string()),
            redirects: RefCell::new(Vec::new()),
            prompts: RefCell::new(Vec::new()),
            confirm_answer: Cell::new(true),
        }
    }

    pub fn answer_confirm(&self, answer: bool) {
        self.confirm_answer.set(answer);
    }

    pub fn redirects(&self) -> Vec<String> {
        self.redirects.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn current_path(&self) -> String {
        self.path.borrow().clone()
    }

    fn redirect(&self, path: &str) {
        self.redirects.borrow_mut().push(path.to_string());
    }

    fn confirm(&self, message: &str) -> bool {
        self.prompts.borrow_mut().push(message.to_string());
        self.confirm_answer.get()
    }
}

// ---------------------------------------------------------------------------
// HTTP
// ---------------------------------------------------------------------------

type Outcome = std::result::Result<HttpResponse, String>;

struct Scripted {
    outcome: Outcome,
    gate: Option<oneshot::Receiver<()>>,
}

struct Route {
    method: Method,
    /// Endpoint relative to the base URL, query string included.
    endpoint: String,
    exact: bool,
    queue: VecDeque<Scripted>,
    /// Replayed once the queue is drained.
    last: Option<Outcome>,
}

/// Replays canned responses per endpoint and records every request.
#[derive(Default)]
pub struct ScriptedTransport {
    routes: RefCell<Vec<Route>>,
    requests: RefCell<Vec<HttpRequest>>,
}

pub fn json(status: u16, body: Value) -> Outcome {
    Ok(HttpResponse {
        status,
        content_type: Some("application/json".to_string()),
        body: body.to_string(),
    })
}

pub fn empty(status: u16) -> Outcome {
    Ok(HttpResponse {
        status,
        content_type: None,
        body: String::new(),
    })
}

pub fn network_error(message: &str) -> Outcome {
    Err(message.to_string())
}

impl ScriptedTransport {
    /// Respond to requests whose endpoint starts with `prefix`.
    pub fn on(&self, method: Method, prefix: &str, outcome: Outcome) {
        self.push(method, prefix, false, outcome, None);
    }

    /// Respond only to this exact endpoint (query string included).
    pub fn on_exact(&self, method: Method, endpoint: &str, outcome: Outcome) {
        self.push(method, endpoint, true, outcome, None);
    }

    /// Like `on_exact`, but the response is held until the sender fires.
    pub fn hold_exact(&self, method: Method, endpoint: &str, outcome: Outcome) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.push(method, endpoint, true, outcome, Some(rx));
        tx
    }

    fn push(
        &self,
        method: Method,
        endpoint: &str,
        exact: bool,
        outcome: Outcome,
        gate: Option<oneshot::Receiver<()>>,
    ) {
        let mut routes = self.routes.borrow_mut();
        let existing = routes
            .iter_mut()
            .find(|r| r.method == method && r.endpoint == endpoint && r.exact == exact);
        let scripted = Scripted {
            outcome: outcome.clone(),
            gate,
        };
        match existing {
            Some(route) => {
                route.queue.push_back(scripted);
                route.last = Some(outcome);
            }
            None => routes.push(Route {
                method,
                endpoint: endpoint.to_string(),
                exact,
                queue: VecDeque::from([scripted]),
                last: Some(outcome),
            }),
        }
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    /// Endpoints of recorded requests, e.g. `"GET buildings"`.
    pub fn calls(&self) -> Vec<String> {
        self.requests
            .borrow()
            .iter()
            .map(|r| format!("{} {}", r.method.as_str(), endpoint_of(&r.url)))
            .collect()
    }

    pub fn count(&self, method: Method, prefix: &str) -> usize {
        self.requests
            .borrow()
            .iter()
            .filter(|r| r.method == method && endpoint_of(&r.url).starts_with(prefix))
            .count()
    }

    fn next(&self, request: &HttpRequest) -> (Outcome, Option<oneshot::Receiver<()>>) {
        let endpoint = endpoint_of(&request.url);
        let mut routes = self.routes.borrow_mut();
        let route = routes
            .iter_mut()
            .filter(|r| r.method == request.method)
            .filter(|r| {
                if r.exact {
                    r.endpoint == endpoint
                } else {
                    endpoint.starts_with(&r.endpoint)
                }
            })
            .max_by_key(|r| (r.exact, r.endpoint.len()));

        match route {
            Some(route) => match route.queue.pop_front() {
                Some(scripted) => (scripted.outcome, scripted.gate),
                None => (route.last.clone().unwrap_or_else(|| empty(404)), None),
            },
            None => (json(404, serde_json::json!({ "detail": "Not Found" })), None),
        }
    }
}

pub fn endpoint_of(url: &str) -> String {
    url.strip_prefix(BASE_URL)
        .unwrap_or(url)
        .trim_start_matches('/')
        .to_string()
}

#[async_trait(?Send)]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Outcome {
        self.requests.borrow_mut().push(request.clone());
        let (outcome, gate) = self.next(&request);
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        outcome
    }
}

// ---------------------------------------------------------------------------
// Timers
// ---------------------------------------------------------------------------

struct ScheduledCallback {
    id: TimerId,
    due: u64,
    delay: u32,
    callback: Box<dyn FnOnce()>,
}

/// Virtual clock; callbacks only run inside `advance`.
#[derive(Default)]
pub struct ManualTimer {
    now: Cell<u64>,
    next_id: Cell<TimerId>,
    scheduled: RefCell<Vec<ScheduledCallback>>,
}

impl ManualTimer {
    pub fn advance(&self, ms: u64) {
        let target = self.now.get() + ms;
        loop {
            let next = {
                let mut scheduled = self.scheduled.borrow_mut();
                let due = scheduled
                    .iter()
                    .enumerate()
                    .filter(|(_, s)| s.due <= target)
                    .min_by_key(|(_, s)| (s.due, s.id))
                    .map(|(index, _)| index);
                due.map(|index| scheduled.remove(index))
            };
            match next {
                Some(entry) => {
                    self.now.set(entry.due);
                    (entry.callback)();
                }
                None => break,
            }
        }
        self.now.set(target);
    }

    pub fn pending(&self) -> usize {
        self.scheduled.borrow().len()
    }

    pub fn pending_delays(&self) -> Vec<u32> {
        self.scheduled.borrow().iter().map(|s| s.delay).collect()
    }
}

impl Timer for ManualTimer {
    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> TimerId {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        self.scheduled.borrow_mut().push(ScheduledCallback {
            id,
            due: self.now.get() + u64::from(delay_ms),
            delay: delay_ms,
            callback,
        });
        id
    }

    fn cancel(&self, id: TimerId) {
        self.scheduled.borrow_mut().retain(|s| s.id != id);
    }
}

// ---------------------------------------------------------------------------
// Spawner
// ---------------------------------------------------------------------------

/// Collects spawned tasks; tests drive them explicitly.
#[derive(Default)]
pub struct QueueSpawner {
    tasks: RefCell<VecDeque<LocalTask>>,
}

impl QueueSpawner {
    pub fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }

    /// Run queued tasks to completion, including ones they spawn.
    pub async fn run_all(&self) {
        loop {
            let next = self.tasks.borrow_mut().pop_front();
            match next {
                Some(task) => task.await,
                None => break,
            }
        }
    }
}

impl Spawner for QueueSpawner {
    fn spawn(&self, task: LocalTask) {
        self.tasks.borrow_mut().push_back(task);
    }
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

/// Every message shown through a notifier, in order.
#[derive(Clone, Default)]
pub struct NotificationLog {
    shown: Rc<RefCell<Vec<(String, NotificationKind)>>>,
}

impl NotificationLog {
    pub fn attach(notifier: &Notifier) -> Self {
        let log = Self::default();
        let shown = log.shown.clone();
        let source = notifier.clone();
        notifier.subscribe(move || {
            if let Some(current) = source.current() {
                if current.visible {
                    shown.borrow_mut().push((current.message, current.kind));
                }
            }
        });
        log
    }

    pub fn messages(&self) -> Vec<String> {
        self.shown.borrow().iter().map(|(m, _)| m.clone()).collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.shown
            .borrow()
            .iter()
            .filter(|(_, kind)| *kind == NotificationKind::Error)
            .map(|(m, _)| m.clone())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

pub struct TestPlatform {
    pub storage: Rc<MemoryStore>,
    pub navigator: Rc<RecordingNavigator>,
    pub transport: Rc<ScriptedTransport>,
    pub timer: Rc<ManualTimer>,
    pub spawner: Rc<QueueSpawner>,
}

impl TestPlatform {
    pub fn new(storage: MemoryStore, path: &str) -> Self {
        Self {
            storage: Rc::new(storage),
            navigator: Rc::new(RecordingNavigator::at(path)),
            transport: Rc::new(ScriptedTransport::default()),
            timer: Rc::new(ManualTimer::default()),
            spawner: Rc::new(QueueSpawner::default()),
        }
    }

    /// Logged in as `admin` on the main view.
    pub fn logged_in() -> Self {
        Self::new(MemoryStore::with_session("tok-123", "admin"), "/")
    }

    pub fn platform(&self) -> Platform {
        Platform {
            storage: self.storage.clone(),
            navigator: self.navigator.clone(),
            transport: self.transport.clone(),
            timer: self.timer.clone(),
            spawner: self.spawner.clone(),
        }
    }
}

pub fn device_json(id: i64, name: &str, state: &str, ignored: bool) -> Value {
    serde_json::json!({ "id": id, "name": name, "state": state, "is_ignored": ignored })
}
