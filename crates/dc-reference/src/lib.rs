//! `dc-reference` — read-only reference data shared by every worker.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                      |
//! |-----------------|---------------------------------------------------------------|
//! | [`zone`]        | `Zone`, `ZoneTable`, `ZoneCatalog`, `ZoneCatalogBuilder`      |
//! | [`registry`]    | `CatalogStrategy` trait, `InternalZones`, `AllZones`, `CatalogRegistry` |
//! | [`skim`]        | `SkimMatrix` (segment × origin × destination), `SkimRecord`   |
//! | [`employment`]  | `EmploymentShares` (occupation → industry shares)             |
//! | [`calibration`] | `CalibrationTable`, `CalibrationEntry`                        |
//! | [`source`]      | `ReferenceSource` trait, `MemorySource`, `ReferenceData`      |
//! | [`csv_source`]  | `CsvReferenceSource` (directory of CSV files)                 |
//! | [`error`]       | `ReferenceError`, `ReferenceResult<T>`                        |
//!
//! # Lifecycle
//!
//! [`ReferenceData::load`] pulls everything from a [`ReferenceSource`] once.
//! The result is immutable; workers share it behind an `Arc` and never lock
//! it again.

pub mod calibration;
pub mod csv_source;
pub mod employment;
pub mod error;
pub mod registry;
pub mod skim;
pub mod source;
pub mod zone;


pub use calibration::{CalibrationEntry, CalibrationTable};
pub use csv_source::CsvReferenceSource;
pub use employment::{EmploymentShares, ShareRecord};
pub use error::{ReferenceError, ReferenceResult};
pub use registry::{AllZones, CatalogRegistry, CatalogStrategy, InternalZones};
pub use skim::{SkimMatrix, SkimRecord, SkimRow};
pub use source::{MemorySource, ReferenceData, ReferenceSource};
pub use zone::{MAX_ZONE_ID, Zone, ZoneCatalog, ZoneCatalogBuilder, ZoneTable};
