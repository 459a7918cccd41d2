//! Reference-data error type.
//!
//! Every variant is fatal for initialization: the engine never runs on
//! partially loaded reference data.

use std::path::PathBuf;

use thiserror::Error;

use dc_core::{DcError, DistrictId, SegmentId, ZoneId};

/// Errors produced while loading or assembling reference data.
#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("reference file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("{file}: {message}")]
    Parse { file: String, message: String },

    #[error("zone {0} defined more than once")]
    DuplicateZone(ZoneId),

    #[error("zone {0} not found in zone catalog")]
    UnknownZone(ZoneId),

    #[error("unknown industry {0:?}")]
    UnknownIndustry(String),

    #[error("zone {zone} has {got} employment values, expected {expected}")]
    EmploymentWidth { zone: ZoneId, expected: usize, got: usize },

    #[error("district {district} outside calibration table of {districts} districts")]
    DistrictOutOfRange { district: DistrictId, districts: usize },

    #[error("skim matrix incomplete: segment {segment}, {origin} -> {destination} missing")]
    IncompleteSkim { segment: SegmentId, origin: ZoneId, destination: ZoneId },

    #[error("unknown zone catalog strategy {0:?}")]
    UnknownStrategy(String),

    #[error("invalid reference value: {0}")]
    Invalid(String),

    #[error(transparent)]
    Core(#[from] DcError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ReferenceResult<T> = Result<T, ReferenceError>;
