//! Search-as-you-type debouncing.

use crate::app::storefront::Storefront;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

/// Runs only the last of a burst of calls, once `window` has passed without a
/// newer one. A new call aborts the pending one; nothing is queued.
pub struct Debouncer {
    window: Duration,
    pending: std::sync::Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: std::sync::Mutex::new(None),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Must be called from inside a tokio runtime.
    pub fn call<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        // Held across the spawn so the last caller to get here is the one that runs.
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = pending.take() {
            previous.abort();
        }
        let deadline = Instant::now() + self.window;
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            task.await;
        }));
    }

    pub fn cancel(&self) {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = pending.take() {
            previous.abort();
        }
    }

    /// True while a scheduled call has not finished yet.
    pub fn is_pending(&self) -> bool {
        let pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Debounced `set_search` against the shared session.
pub struct SearchDebouncer {
    storefront: Arc<Mutex<Storefront>>,
    debouncer: Debouncer,
}

impl SearchDebouncer {
    pub fn new(storefront: Arc<Mutex<Storefront>>, window: Duration) -> Self {
        Self {
            storefront,
            debouncer: Debouncer::new(window),
        }
    }

    pub fn submit(&self, text: impl Into<String>) {
        let text = text.into();
        let storefront = self.storefront.clone();
        debug!(text = %text, "SearchDebouncer: scheduled");
        self.debouncer.call(async move {
            let mut storefront = storefront.lock().await;
            storefront.set_search(&text);
        });
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn window(&self) -> Duration {
        self.debouncer.window()
    }
}
