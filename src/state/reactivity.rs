// ============================================================================
// REACTIVITY - Subscriber notifications so views can re-render
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

type Callback = Rc<dyn Fn()>;

/// Shared value whose clones all see the same data and the same subscribers.
pub struct ReactiveState<T> {
    value: Rc<RefCell<T>>,
    subscribers: Rc<RefCell<Vec<Callback>>>,
}

impl<T> ReactiveState<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Rc::new(RefCell::new(value)),
            subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Read the current value through a closure.
    pub fn with<R>(&self, reader: impl FnOnce(&T) -> R) -> R {
        reader(&*self.value.borrow())
    }

    /// Replace the value and notify subscribers.
    pub fn set(&self, new_value: T) {
        *self.value.borrow_mut() = new_value;
        self.notify();
    }

    /// Mutate in place and notify subscribers.
    pub fn update<R>(&self, updater: impl FnOnce(&mut T) -> R) -> R {
        let result = updater(&mut *self.value.borrow_mut());
        self.notify();
        result
    }

    /// Mutate without notifying; callers batch several changes then `notify`.
    pub fn update_silently<R>(&self, updater: impl FnOnce(&mut T) -> R) -> R {
        updater(&mut *self.value.borrow_mut())
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.subscribers.borrow_mut().push(Rc::new(callback));
    }

    /// Subscribers run after the value borrow is released, so they may read it.
    pub fn notify(&self) {
        let callbacks: Vec<Callback> = self.subscribers.borrow().clone();
        for callback in callbacks {
            callback();
        }
    }
}

impl<T: Clone> ReactiveState<T> {
    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }
}

impl<T> Clone for ReactiveState<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            subscribers: self.subscribers.clone(),
        }
    }
}

impl<T: Default> Default for ReactiveState<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn clones_share_value_and_subscribers() {
        let state = ReactiveState::new(1);
        let hits = Rc::new(Cell::new(0));
        {
            let hits = hits.clone();
            state.subscribe(move || hits.set(hits.get() + 1));
        }
        let other = state.clone();
        other.set(5);
        assert_eq!(state.get(), 5);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn subscribers_can_read_during_notification() {
        let state = ReactiveState::new(String::from("a"));
        let seen = Rc::new(RefCell::new(Vec::new()));
        {
            let reader = state.clone();
            let seen = seen.clone();
            state.subscribe(move || seen.borrow_mut().push(reader.get()));
        }
        state.update(|s| s.push('b'));
        assert_eq!(seen.borrow().as_slice(), ["ab".to_string()]);
    }
}
