//! `dc-choice` — cohort grouping, the logit utility engine, and sampling.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                     |
//! |------------------|--------------------------------------------------------------|
//! | [`cohort`]       | `CohortKey`, `Cohort`, `GroupedBatch`, `group_batch`         |
//! | [`shadow`]       | `ShadowPrices` (per-zone capacity multipliers)               |
//! | [`context`]      | `ChoiceContext<'a>`: read-only inputs shared by all cohorts  |
//! | [`distribution`] | `ProbabilityDistribution`, `ChoiceSet`                       |
//! | [`model`]        | `ChoiceModel` trait, `WorkLocationModel`, `UtilityRow`, `Anomaly` |
//! | [`sampler`]      | `Sampler`, `SampleOutcome`                                   |
//! | [`error`]        | `ChoiceError`, `ChoiceResult<T>`                             |
//!
//! # Design notes
//!
//! Work proceeds in two phases per batch:
//!
//! 1. **Choice-set phase** (pure, parallelizable): for every cohort, call
//!    `ChoiceModel::choice_set`.  All reads go through `&ChoiceContext`.
//! 2. **Sampling phase** (sequential): each person in a cohort draws from
//!    the cohort's distribution with its own seeded RNG and records the
//!    chosen zone.
//!
//! An empty choice set is a normal outcome ([`ChoiceSet::Empty`]), not an
//! error; the sampler turns it into a home-zone fallback.

pub mod cohort;
pub mod context;
pub mod distribution;
pub mod error;
pub mod model;
pub mod sampler;
pub mod shadow;

#[cfg(test)]
mod tests;

pub use cohort::{Cohort, CohortKey, GroupedBatch, group_batch};
pub use context::ChoiceContext;
pub use distribution::{ChoiceSet, ProbabilityDistribution};
pub use error::{ChoiceError, ChoiceResult};
pub use model::{Anomaly, ChoiceModel, UtilityRow, WorkLocationModel};
pub use sampler::{SampleOutcome, Sampler};
pub use shadow::ShadowPrices;
