//! `dc-core` — foundational types for the destination-choice engine.
//!
//! This crate is a dependency of every other `dc-*` crate.  It has no `dc-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`ids`]         | `ZoneId`, `DistrictId`, `HouseholdId`, `MemberId`, `SegmentId`, `Occupation` |
//! | [`purpose`]     | `Purpose` enum (calibration table axis)                   |
//! | [`config`]      | `ModelCoefficients`, `EngineConfig`                       |
//! | [`rng`]         | `PersonRng` (per-person), `SeedRng` (run-level)           |
//! | [`error`]       | `DcError`, `DcResult`                                     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod ids;
pub mod purpose;
pub mod rng;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{EngineConfig, ModelCoefficients};
pub use error::{DcError, DcResult};
pub use ids::{DistrictId, HouseholdId, MemberId, Occupation, SegmentId, ZoneId};
pub use purpose::Purpose;
pub use rng::{PersonRng, SeedRng};
