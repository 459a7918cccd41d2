//! Messages exchanged with the coordinator.
//!
//! The transport that carries them is not part of this crate; a coordinator
//! may use channels, a queue, or plain function calls.

use dc_choice::ShadowPrices;
use dc_population::Person;

use crate::ResultSet;

/// One slice of the population to assign, plus the current iteration's
/// shadow prices.
#[derive(Clone, Debug)]
pub struct WorkBatch {
    pub batch_id:      u64,
    pub persons:       Vec<Person>,
    pub shadow_prices: ShadowPrices,
}

impl WorkBatch {
    pub fn new(batch_id: u64, persons: Vec<Person>, shadow_prices: ShadowPrices) -> Self {
        Self { batch_id, persons, shadow_prices }
    }
}

/// A worker's reply for one [`WorkBatch`].
#[derive(Clone, Debug)]
pub struct BatchResult {
    pub batch_id: u64,
    pub results:  ResultSet,
}
