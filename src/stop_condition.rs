use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Cancellation flag shared between the probing loop and whoever stops it.
#[derive(Clone, Default)]
pub struct StopCondition {
    condition: Arc<(Mutex<bool>, Condvar)>,
}

impl StopCondition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_stop(&self) {
        let (_, cvar) = &*self.condition;
        *self.lock() = true;
        cvar.notify_all();
    }

    pub fn get_should_stop(&self) -> bool {
        *self.lock()
    }

    /// Waits up to `timeout`, returning early once a stop is requested.
    /// Returns whether the caller should stop.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let (_, cvar) = &*self.condition;
        let guard = self.lock();
        let (should_stop, _) = cvar
            .wait_timeout_while(guard, timeout, |should_stop| !*should_stop)
            .unwrap_or_else(PoisonError::into_inner);
        *should_stop
    }

    fn lock(&self) -> MutexGuard<'_, bool> {
        let (lock, _) = &*self.condition;
        lock.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
