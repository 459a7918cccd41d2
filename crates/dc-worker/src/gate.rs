//! One-shot, thread-safe loading of the shared reference data.
//!
//! Many workers in one process start at roughly the same time and all need
//! the same read-only [`ReferenceData`].  [`InitGate`] makes exactly one of
//! them perform the load while the others block on the gate lock; once the
//! data is published every later call is a lock-free read.
//!
//! A failed load is sticky: the error is recorded and every later caller
//! gets [`InitError::PreviouslyFailed`] instead of a retry, so no worker can
//! ever run on partially loaded data.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

use tracing::{error, info};

use dc_reference::{CatalogRegistry, ReferenceData, ReferenceSource};

use crate::{InitError, InitResult};

#[derive(Debug, Default)]
pub struct InitGate {
    data:    OnceLock<Arc<ReferenceData>>,
    /// Guards the load itself; holds the message of a failed attempt.
    failure: Mutex<Option<String>>,
    loads:   AtomicUsize,
}

impl InitGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the shared reference data, running `load` if no caller has
    /// done so yet.
    ///
    /// `load` runs at most once over the gate's lifetime, however many
    /// threads call this concurrently.  Callers that arrive while a load is
    /// in progress block until it finishes and then observe its outcome.
    pub fn ensure_initialized<F>(&self, load: F) -> InitResult<Arc<ReferenceData>>
    where
        F: FnOnce() -> InitResult<ReferenceData>,
    {
        if let Some(data) = self.data.get() {
            return Ok(Arc::clone(data));
        }

        let mut failure = self.failure.lock().map_err(|_| InitError::Poisoned)?;

        // Another caller may have finished while we waited for the lock.
        if let Some(data) = self.data.get() {
            return Ok(Arc::clone(data));
        }
        if let Some(message) = failure.as_ref() {
            return Err(InitError::PreviouslyFailed(message.clone()));
        }

        let attempt = self.loads.fetch_add(1, Ordering::SeqCst) + 1;
        info!(attempt, "loading reference data");
        match load() {
            Ok(data) => {
                let data = self.data.get_or_init(|| Arc::new(data));
                info!(
                    zones = data.catalog.zone_count(),
                    alternatives = data.catalog.alternative_count(),
                    "reference data ready"
                );
                Ok(Arc::clone(data))
            }
            Err(e) => {
                error!(error = %e, "reference data load failed");
                *failure = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// [`ensure_initialized`](Self::ensure_initialized) with the standard
    /// loader: resolve `catalog_key` in `registry`, then read everything
    /// from `source`.
    pub fn initialize<S>(
        &self,
        source:      &S,
        registry:    &CatalogRegistry,
        catalog_key: &str,
    ) -> InitResult<Arc<ReferenceData>>
    where
        S: ReferenceSource + ?Sized,
    {
        self.ensure_initialized(|| {
            let strategy = registry.resolve(catalog_key)?;
            Ok(ReferenceData::load(source, strategy)?)
        })
    }

    /// The loaded data, or `None` before a successful load.
    pub fn get(&self) -> Option<Arc<ReferenceData>> {
        self.data.get().cloned()
    }

    pub fn is_initialized(&self) -> bool {
        self.data.get().is_some()
    }

    /// Number of times a loader has actually run (0 or 1).
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}
