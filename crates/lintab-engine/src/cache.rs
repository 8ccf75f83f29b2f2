//! Per-connection metadata cache with single-flight population.
//!
//! Concurrent callers asking for the same missing key share one in-flight
//! fetch. A successful value is kept for the life of the cache; a failed
//! fetch is not stored, so the next caller tries again.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::OnceCell;

#[derive(Debug, Default)]
pub struct SingleFlightCache {
    cells: Mutex<HashMap<&'static str, Arc<OnceCell<String>>>>,
}

impl SingleFlightCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn cell(&self, key: &'static str) -> Arc<OnceCell<String>> {
        let mut cells = self.cells.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(cells.entry(key).or_default())
    }

    /// Cached value for `key`, without fetching.
    #[must_use]
    pub fn get(&self, key: &'static str) -> Option<String> {
        let cells = self.cells.lock().unwrap_or_else(PoisonError::into_inner);
        cells.get(key).and_then(|cell| cell.get().cloned())
    }

    /// Return the cached value for `key`, running `init` if it is missing.
    ///
    /// Callers arriving while `init` runs wait for its outcome instead of
    /// starting their own.
    ///
    /// # Errors
    ///
    /// Returns `init`'s error. The failure is not cached.
    pub async fn get_or_try_init<F, Fut, E>(&self, key: &'static str, init: F) -> Result<String, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String, E>>,
    {
        let cell = self.cell(key);
        cell.get_or_try_init(init).await.cloned()
    }
}
