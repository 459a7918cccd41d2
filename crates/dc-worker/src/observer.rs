//! Batch observer trait for progress reporting and diagnostics.

use dc_choice::{ChoiceSet, CohortKey};
use dc_population::Person;

use crate::ResultSet;

/// Callbacks invoked by [`Worker::process`][crate::Worker::process].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: fallback recorder
///
/// ```rust,ignore
/// struct Fallbacks(Vec<PersonKey>);
///
/// impl BatchObserver for Fallbacks {
///     fn on_fallback(&mut self, person: &Person) {
///         self.0.push(person.key());
///     }
/// }
/// ```
pub trait BatchObserver {
    /// Called before grouping, with the number of persons received.
    fn on_batch_start(&mut self, _batch_id: u64, _persons: usize) {}

    /// Called once per cohort after its choice set is built and before its
    /// persons are sampled.
    fn on_cohort(&mut self, _key: &CohortKey, _persons: usize, _choice: &ChoiceSet) {}

    /// Called for each person who fell back to their home zone.
    fn on_fallback(&mut self, _person: &Person) {}

    /// Called once with the finished results.
    fn on_batch_end(&mut self, _batch_id: u64, _results: &ResultSet) {}
}

/// A [`BatchObserver`] that does nothing.
pub struct NoopObserver;

impl BatchObserver for NoopObserver {}
