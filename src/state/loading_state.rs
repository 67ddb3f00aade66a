// ============================================================================
// LOADING STATE - Global loader visibility for in-flight requests
// ============================================================================

use crate::state::ReactiveState;

/// Counts in-flight requests; the loader is visible while any is pending.
#[derive(Clone, Default)]
pub struct LoadingState {
    pending: ReactiveState<u32>,
}

impl LoadingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the loader until the returned guard is dropped.
    pub fn begin(&self) -> LoadingGuard {
        self.pending.update(|count| *count += 1);
        LoadingGuard {
            pending: self.pending.clone(),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.pending.get() > 0
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.pending.subscribe(callback);
    }
}

pub struct LoadingGuard {
    pending: ReactiveState<u32>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.pending.update(|count| *count = count.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loader_hides_only_after_last_guard() {
        let loading = LoadingState::new();
        let first = loading.begin();
        let second = loading.begin();
        assert!(loading.is_visible());
        drop(first);
        assert!(loading.is_visible());
        drop(second);
        assert!(!loading.is_visible());
    }
}
