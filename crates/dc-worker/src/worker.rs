//! The `Worker` struct and its batch pipeline.

use std::sync::Arc;

use tracing::{debug, info, warn};

use dc_choice::{
    ChoiceContext, ChoiceModel, ChoiceResult, ChoiceSet, Cohort, Sampler, ShadowPrices,
    group_batch,
};
use dc_core::Purpose;
use dc_reference::ReferenceData;

use crate::{BatchObserver, BatchResult, ResultSet, WorkBatch, WorkerError, WorkerResult};

/// Assigns work zones to one batch at a time.
///
/// `Worker<M>` holds only immutable state, so one worker may be shared
/// across threads, or each thread may build its own from the same
/// `Arc<ReferenceData>`.
///
/// # Batch pipeline
///
/// 1. **Validate**: the shadow-price vector must cover every catalog zone id.
/// 2. **Group**: employed persons are sorted into cohorts; unemployed ones
///    are counted and dropped.
/// 3. **Anomalies**: each cohort is checked once; anomalies are logged and
///    counted but never abort the batch.
/// 4. **Choice sets** (optionally parallel with the `parallel` feature):
///    [`ChoiceModel::choice_set`] for every cohort.
/// 5. **Sampling** (sequential, cohort key order): each person draws a zone
///    from their cohort's set; an empty set falls back to the home zone.
/// 6. **Aggregate** into a [`ResultSet`].
///
/// Create via [`WorkerBuilder`][crate::WorkerBuilder].
pub struct Worker<M: ChoiceModel> {
    pub(crate) reference: Arc<ReferenceData>,
    pub(crate) model:     M,
    pub(crate) sampler:   Sampler,
    pub(crate) purpose:   Purpose,
    #[cfg(feature = "parallel")]
    pub(crate) pool:      Option<Arc<rayon::ThreadPool>>,
}

impl<M: ChoiceModel> Worker<M> {
    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn sampler(&self) -> Sampler {
        self.sampler
    }

    /// Process one batch and return the reply for the coordinator.
    ///
    /// Errors are batch failures: shadow prices that miss a catalog zone, a
    /// person whose home zone or segment is unknown to the reference data,
    /// or a non-finite utility.  Empty choice sets and data anomalies are
    /// absorbed and show up only in the result counters.
    pub fn process<O: BatchObserver>(
        &self,
        batch:    WorkBatch,
        observer: &mut O,
    ) -> WorkerResult<BatchResult> {
        let WorkBatch { batch_id, persons, shadow_prices } = batch;
        observer.on_batch_start(batch_id, persons.len());

        self.check_shadow_prices(batch_id, &shadow_prices)?;

        let mut grouped = group_batch(persons);
        debug!(
            batch = batch_id,
            cohorts = grouped.cohorts.len(),
            employed = grouped.employed_count(),
            unemployed = grouped.unemployed_count,
            "batch grouped"
        );

        let ctx = ChoiceContext::new(&self.reference, &shadow_prices, self.purpose);

        let mut anomaly_count = 0u64;
        for cohort in &grouped.cohorts {
            if let Some(anomaly) = self.model.anomaly(&cohort.key, &ctx) {
                warn!(batch = batch_id, cohort = %cohort.key, persons = cohort.len(), "{anomaly}");
                anomaly_count += cohort.len() as u64;
            }
        }

        let choice_sets = self
            .choice_sets(&grouped.cohorts, &ctx)
            .map_err(|source| WorkerError::Choice { batch: batch_id, source })?;

        let mut fallback_count = 0u64;
        for (cohort, choice) in grouped.cohorts.iter_mut().zip(&choice_sets) {
            debug!(cohort = %cohort.key, persons = cohort.len(), alternatives = choice.len(), "sampling cohort");
            observer.on_cohort(&cohort.key, cohort.len(), choice);
            for person in &mut cohort.persons {
                let outcome = self
                    .sampler
                    .choose(person, choice)
                    .map_err(|source| WorkerError::Choice { batch: batch_id, source })?;
                if outcome.is_fallback() {
                    fallback_count += 1;
                    observer.on_fallback(person);
                }
            }
        }

        let mut results = ResultSet::aggregate(&grouped);
        results.fallback_count = fallback_count;
        results.anomaly_count = anomaly_count;

        info!(
            batch = batch_id,
            processed = results.processed_count,
            unemployed = results.unemployed_count,
            assigned = results.total_assigned(),
            fallbacks = results.fallback_count,
            anomalies = results.anomaly_count,
            "batch complete"
        );
        observer.on_batch_end(batch_id, &results);

        Ok(BatchResult { batch_id, results })
    }

    fn check_shadow_prices(&self, batch: u64, prices: &ShadowPrices) -> WorkerResult<()> {
        match self.reference.catalog.max_zone_id() {
            Some(max_zone) if !prices.covers(max_zone) => Err(WorkerError::ShadowPriceCoverage {
                batch,
                len: prices.len(),
                max_zone,
            }),
            _ => Ok(()),
        }
    }

    /// One choice set per cohort, in cohort order.
    fn choice_sets(
        &self,
        cohorts: &[Cohort],
        ctx:     &ChoiceContext<'_>,
    ) -> ChoiceResult<Vec<ChoiceSet>> {
        #[cfg(not(feature = "parallel"))]
        {
            cohorts.iter().map(|c| self.model.choice_set(&c.key, ctx)).collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            let model = &self.model;
            let compute = || {
                cohorts
                    .par_iter()
                    .map(|c| model.choice_set(&c.key, ctx))
                    .collect::<ChoiceResult<Vec<ChoiceSet>>>()
            };
            match &self.pool {
                Some(pool) => pool.install(compute),
                None => compute(),
            }
        }
    }
}
