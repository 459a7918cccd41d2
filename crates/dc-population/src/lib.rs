//! `dc-population` — person records consumed by the destination-choice engine.
//!
//! # Crate layout
//!
//! | Module      | Contents                                         |
//! |-------------|--------------------------------------------------|
//! | [`person`]  | `Person`, `PersonKey`                            |
//! | [`loader`]  | `load_persons_csv`, `load_persons_reader`        |
//! | [`error`]   | `PopulationError`, `PopulationResult<T>`         |
//!
//! Persons are built upstream (population synthesis, household and segment
//! assignment) and arrive here with every field except the work zone set.
//! The sampler in `dc-choice` writes the work zone exactly once.

pub mod error;
pub mod loader;
pub mod person;

#[cfg(test)]
mod tests;

pub use error::{PopulationError, PopulationResult};
pub use loader::{load_persons_csv, load_persons_reader};
pub use person::{Person, PersonKey};
