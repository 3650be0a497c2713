//! Debounce gate for keystroke-driven work
//!
//! Every `schedule` replaces the previously scheduled callback, so the work
//! runs once per quiet period with the most recent arguments. Must be used
//! from inside a Tokio runtime.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;

pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    fn pending(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.pending.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Run `f` once `delay` has elapsed without another call
    pub fn schedule<F>(&self, f: F)
    where
        F: FnOnce() + Send + 'static,
    {
        // Held across spawn so concurrent calls store their handles in call order
        let mut pending = self.pending();
        if let Some(previous) = pending.take() {
            previous.abort();
        }

        // Deadline is fixed now, not when the task is first polled
        let deadline = Instant::now() + self.delay;
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            f();
        }));
    }

    /// Drop the scheduled callback; returns whether one was still waiting
    pub fn cancel(&self) -> bool {
        match self.pending().take() {
            Some(handle) => {
                let waiting = !handle.is_finished();
                handle.abort();
                waiting
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// A handler wrapped behind a [`Debouncer`]; fire-and-forget
pub struct Debounced<A> {
    gate: Debouncer,
    handler: Arc<dyn Fn(A) + Send + Sync>,
}

impl<A: Send + 'static> Debounced<A> {
    pub fn new<F>(delay: Duration, handler: F) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self {
            gate: Debouncer::new(delay),
            handler: Arc::new(handler),
        }
    }

    pub fn call(&self, args: A) {
        let handler = Arc::clone(&self.handler);
        self.gate.schedule(move || handler(args));
    }

    pub fn cancel(&self) -> bool {
        self.gate.cancel()
    }

    pub fn is_pending(&self) -> bool {
        self.gate.is_pending()
    }
}
