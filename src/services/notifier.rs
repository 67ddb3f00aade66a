// ============================================================================
// NOTIFIER - Transient success/error messages with auto-dismiss
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use crate::platform::{Timer, TimerId};
use crate::state::ReactiveState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

impl NotificationKind {
    pub fn from_is_error(is_error: bool) -> Self {
        if is_error {
            NotificationKind::Error
        } else {
            NotificationKind::Success
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    pub visible: bool,
}

/// Last call wins: a new message cancels the previous hide timer.
#[derive(Clone)]
pub struct Notifier {
    state: ReactiveState<Option<Notification>>,
    timer: Rc<dyn Timer>,
    pending_hide: Rc<Cell<Option<TimerId>>>,
    default_timeout_ms: u32,
}

impl Notifier {
    pub fn new(timer: Rc<dyn Timer>, default_timeout_ms: u32) -> Self {
        Self {
            state: ReactiveState::new(None),
            timer,
            pending_hide: Rc::new(Cell::new(None)),
            default_timeout_ms,
        }
    }

    pub fn show(&self, message: &str, is_error: bool) {
        self.show_for(message, is_error, self.default_timeout_ms);
    }

    pub fn success(&self, message: &str) {
        self.show(message, false);
    }

    pub fn error(&self, message: &str) {
        self.show(message, true);
    }

    pub fn show_for(&self, message: &str, is_error: bool, timeout_ms: u32) {
        if let Some(previous) = self.pending_hide.take() {
            self.timer.cancel(previous);
        }

        self.state.set(Some(Notification {
            message: message.to_string(),
            kind: NotificationKind::from_is_error(is_error),
            visible: true,
        }));

        let state = self.state.clone();
        let pending_hide = self.pending_hide.clone();
        let id = self.timer.schedule(
            timeout_ms,
            Box::new(move || {
                pending_hide.set(None);
                state.update(|current| {
                    if let Some(notification) = current.as_mut() {
                        notification.visible = false;
                    }
                });
            }),
        );
        self.pending_hide.set(Some(id));
    }

    pub fn current(&self) -> Option<Notification> {
        self.state.get()
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.state.subscribe(callback);
    }
}
