use dc_choice::ChoiceError;
use dc_core::{DcError, ZoneId};
use dc_reference::ReferenceError;
use thiserror::Error;

/// Failure of the one-time reference-data load.  Always fatal.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("reference data load failed: {0}")]
    Reference(#[from] ReferenceError),

    #[error("invalid engine configuration: {0}")]
    Config(#[from] DcError),

    /// A previous load attempt failed; the gate does not retry.
    #[error("reference data initialization previously failed: {0}")]
    PreviouslyFailed(String),

    /// The loader panicked while holding the gate lock.
    #[error("initialization gate poisoned by a panicking loader")]
    Poisoned,
}

pub type InitResult<T> = Result<T, InitError>;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error(transparent)]
    Init(#[from] InitError),

    #[error("worker configuration error: {0}")]
    Config(#[from] DcError),

    #[error("batch {batch}: shadow prices cover {len} zone ids but the catalog needs ids up to {max_zone}")]
    ShadowPriceCoverage {
        batch:    u64,
        len:      usize,
        max_zone: ZoneId,
    },

    #[error("batch {batch}: {source}")]
    Choice {
        batch:  u64,
        #[source]
        source: ChoiceError,
    },

    #[error("could not build worker thread pool: {0}")]
    ThreadPool(String),
}

pub type WorkerResult<T> = Result<T, WorkerError>;
