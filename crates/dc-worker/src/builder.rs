//! Fluent builder for constructing a [`Worker`].

use std::sync::Arc;

use dc_choice::{ChoiceModel, Sampler, WorkLocationModel};
use dc_core::{DcError, EngineConfig};
use dc_reference::ReferenceData;

use crate::{Worker, WorkerError, WorkerResult};

/// Fluent builder for [`Worker<M>`].
///
/// # Required inputs
///
/// - [`EngineConfig`]: base seed, purpose, thread count, …
/// - `Arc<ReferenceData>`: normally from [`InitGate`][crate::InitGate]
///
/// # Optional inputs (have defaults)
///
/// | Method        | Default               |
/// |---------------|-----------------------|
/// | `.model(m)`   | [`WorkLocationModel`] |
///
/// # Example
///
/// ```rust,ignore
/// let data = gate.initialize(&source, &CatalogRegistry::default(), &config.zone_catalog)?;
/// let worker = WorkerBuilder::new(config, data).build()?;
/// let reply = worker.process(batch, &mut NoopObserver)?;
/// ```
pub struct WorkerBuilder<M: ChoiceModel = WorkLocationModel> {
    config:    EngineConfig,
    reference: Arc<ReferenceData>,
    model:     M,
}

impl WorkerBuilder<WorkLocationModel> {
    pub fn new(config: EngineConfig, reference: Arc<ReferenceData>) -> Self {
        Self { config, reference, model: WorkLocationModel }
    }
}

impl<M: ChoiceModel> WorkerBuilder<M> {
    /// Replace the choice model.
    pub fn model<N: ChoiceModel>(self, model: N) -> WorkerBuilder<N> {
        WorkerBuilder { config: self.config, reference: self.reference, model }
    }

    /// Validate the configuration and return a ready worker.
    ///
    /// The model reads its coefficients from the reference data, so the
    /// configuration's coefficients must equal the ones the data was loaded
    /// with; a mismatch is a configuration error.
    ///
    /// With the `parallel` feature and `num_threads: Some(n)`, the worker
    /// gets its own `n`-thread Rayon pool; otherwise it uses the global one.
    pub fn build(self) -> WorkerResult<Worker<M>> {
        self.config.validate()?;
        if self.config.coefficients != self.reference.coefficients {
            return Err(WorkerError::Config(DcError::Config(format!(
                "coefficients {:?} differ from those in the reference data {:?}",
                self.config.coefficients, self.reference.coefficients
            ))));
        }

        #[cfg(feature = "parallel")]
        let pool = match self.config.num_threads {
            Some(n) => Some(Arc::new(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| WorkerError::ThreadPool(e.to_string()))?,
            )),
            None => None,
        };

        Ok(Worker {
            sampler:   Sampler::new(self.config.base_seed),
            purpose:   self.config.purpose,
            reference: self.reference,
            model:     self.model,
            #[cfg(feature = "parallel")]
            pool,
        })
    }
}
