//! Read-only inputs passed to every choice-model call.

use dc_core::Purpose;
use dc_reference::ReferenceData;

use crate::ShadowPrices;

/// Everything a [`ChoiceModel`][crate::ChoiceModel] may read while building a
/// cohort's choice set.
///
/// Built once per batch and shared immutably across all cohorts, including
/// across threads when choice sets are computed in parallel.
#[derive(Clone, Copy)]
pub struct ChoiceContext<'a> {
    pub reference:     &'a ReferenceData,
    pub shadow_prices: &'a ShadowPrices,
    /// Purpose axis for calibration lookups.
    pub purpose:       Purpose,
}

impl<'a> ChoiceContext<'a> {
    #[inline]
    pub fn new(
        reference:     &'a ReferenceData,
        shadow_prices: &'a ShadowPrices,
        purpose:       Purpose,
    ) -> Self {
        Self { reference, shadow_prices, purpose }
    }
}
