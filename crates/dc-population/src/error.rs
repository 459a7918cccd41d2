use thiserror::Error;

use crate::PersonKey;

#[derive(Debug, Error)]
pub enum PopulationError {
    #[error("population parse error: {0}")]
    Parse(String),

    #[error("person {0} already has a work zone")]
    AlreadyAssigned(PersonKey),

    #[error("person {0} is not employed and cannot receive a work zone")]
    NotEmployed(PersonKey),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type PopulationResult<T> = Result<T, PopulationError>;
