use thiserror::Error;

use dc_core::{SegmentId, ZoneId};
use dc_population::PopulationError;

#[derive(Debug, Error)]
pub enum ChoiceError {
    #[error("zone {0} not found in zone catalog")]
    UnknownZone(ZoneId),

    #[error("segment {segment} outside skims with {segments} segments")]
    UnknownSegment { segment: SegmentId, segments: usize },

    #[error("utility for {origin} -> {destination} is not finite: {utility}")]
    NonFiniteUtility { origin: ZoneId, destination: ZoneId, utility: f64 },

    #[error("invalid shadow prices: {0}")]
    ShadowPrices(String),

    #[error(transparent)]
    Population(#[from] PopulationError),
}

pub type ChoiceResult<T> = Result<T, ChoiceError>;
