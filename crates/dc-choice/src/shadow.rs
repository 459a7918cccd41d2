//! Per-zone shadow prices.
//!
//! Shadow prices are produced by an outer solver that balances modelled
//! demand against zone capacity between iterations.  Here they are a
//! read-only input, indexed by `ZoneId`.

use dc_core::ZoneId;

use crate::{ChoiceError, ChoiceResult};

#[derive(Clone, Debug, PartialEq)]
pub struct ShadowPrices {
    values: Vec<f64>,
}

impl ShadowPrices {
    /// Prices indexed by `ZoneId::index()`.  Every value must be finite and
    /// non-negative.
    pub fn new(values: Vec<f64>) -> ChoiceResult<Self> {
        if let Some((i, v)) = values.iter().enumerate().find(|(_, v)| !v.is_finite() || **v < 0.0) {
            return Err(ChoiceError::ShadowPrices(format!("zone {i} has price {v}")));
        }
        Ok(Self { values })
    }

    /// The same price for zone ids `0..len`.  `uniform(len, 1.0)` is the
    /// neutral starting point of the first iteration.
    pub fn uniform(len: usize, price: f64) -> ChoiceResult<Self> {
        Self::new(vec![price; len])
    }

    #[inline]
    pub fn get(&self, zone: ZoneId) -> Option<f64> {
        self.values.get(zone.index()).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `true` if every id up to and including `max` has a price.
    pub fn covers(&self, max: ZoneId) -> bool {
        max.index() < self.values.len()
    }
}
