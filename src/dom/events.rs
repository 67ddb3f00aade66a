// ============================================================================
// EVENT HANDLING - Listeners that detach when dropped
// ============================================================================
// Page-lifetime listeners go through `on()` and are leaked with `forget()`.
// Listeners tied to a shorter lifetime (the ignore dialog) are `Listener`
// values, removed from their target on drop.
// ============================================================================

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget};

use crate::error::{ConsoleError, Result};

pub struct Listener {
    target: EventTarget,
    event_type: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new<F>(target: &EventTarget, event_type: &'static str, handler: F) -> Result<Self>
    where
        F: FnMut(Event) + 'static,
    {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target
            .add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())
            .map_err(|e| ConsoleError::ElementMissing(format!("{} listener: {:?}", event_type, e)))?;
        Ok(Self {
            target: target.clone(),
            event_type,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self.target.remove_event_listener_with_callback(
            self.event_type,
            self.closure.as_ref().unchecked_ref(),
        );
    }
}

pub fn on<F>(target: &EventTarget, event_type: &'static str, handler: F) -> Result<()>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target
        .add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())
        .map_err(|e| ConsoleError::ElementMissing(format!("{} listener: {:?}", event_type, e)))?;
    closure.forget();
    Ok(())
}
