//! The `ChoiceModel` trait and the work-location logit model.
//!
//! # Utility
//!
//! For a cohort with home zone `h`, segment `s`, occupation `o`, and each
//! alternative zone `z`:
//!
//! ```text
//! emp(o, z) = Σ_i employment(z, i) · share(o, i)
//! size      = ln(emp · shadow[z])         if emp · shadow[z] > 0, else 0
//! d         = min(distance_s(h, z), max_distance)
//! U         = calib[district(h)][district(z)][purpose]
//!           + size
//!           + β_ls · logsum_s(h, z)
//!           + β_d · d + β_d2 · d² + β_d3 · d³ + β_dl · ln(d + 1)
//! ```
//!
//! Zones with `emp ≤ 0` are unavailable and take no part in the logit.

use std::fmt;

use dc_core::{Occupation, ZoneId};

use crate::{
    ChoiceContext, ChoiceError, ChoiceResult, ChoiceSet, CohortKey, ProbabilityDistribution,
};

// ── UtilityRow ────────────────────────────────────────────────────────────────

/// Utility of one alternative for one cohort.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UtilityRow {
    pub zone:                 ZoneId,
    pub segmented_employment: f64,
    /// `false` when segmented employment is not positive; `utility` is then
    /// meaningless and left at zero.
    pub available:            bool,
    pub utility:              f64,
}

// ── Anomaly ───────────────────────────────────────────────────────────────────

/// Data-quality problems that do not abort a batch.
///
/// Persons in an anomalous cohort still go through sampling; they simply
/// have an empty choice set.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Anomaly {
    /// Employed person with an occupation code of zero or below.
    UndefinedOccupation(Occupation),
    /// Positive occupation code with no row in the employment-share table.
    UnknownOccupation(Occupation),
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anomaly::UndefinedOccupation(o) => write!(f, "employed person with undefined {o}"),
            Anomaly::UnknownOccupation(o) => write!(f, "{o} has no employment shares"),
        }
    }
}

// ── ChoiceModel ───────────────────────────────────────────────────────────────

/// Pluggable destination-choice model.
///
/// # Thread safety
///
/// Workers may build choice sets for many cohorts in parallel, so
/// implementations must be `Send + Sync` and keep no per-call mutable state.
pub trait ChoiceModel: Send + Sync + 'static {
    /// Build the cohort's choice set.
    ///
    /// Returns [`ChoiceSet::Empty`] when no zone is available, and an error
    /// only for inconsistent inputs (unknown home zone, segment outside the
    /// skims, non-finite utility).
    fn choice_set(&self, key: &CohortKey, ctx: &ChoiceContext<'_>) -> ChoiceResult<ChoiceSet>;

    /// Data-quality check run once per cohort before `choice_set`.
    ///
    /// Default: no anomalies.
    fn anomaly(&self, _key: &CohortKey, _ctx: &ChoiceContext<'_>) -> Option<Anomaly> {
        None
    }
}

// ── WorkLocationModel ─────────────────────────────────────────────────────────

/// Multinomial-logit work-location model.  Coefficients come from the
/// reference data, so the model itself is stateless.
#[derive(Clone, Copy, Debug, Default)]
pub struct WorkLocationModel;

impl WorkLocationModel {
    /// Utility rows for every alternative zone, in catalog order.
    pub fn utilities(&self, key: &CohortKey, ctx: &ChoiceContext<'_>) -> ChoiceResult<Vec<UtilityRow>> {
        let data = ctx.reference;
        let catalog = &data.catalog;
        let c = &data.coefficients;

        let origin = catalog
            .position(key.home_zone)
            .ok_or(ChoiceError::UnknownZone(key.home_zone))?;
        let origin_district = catalog.zone_at(origin).district;
        let skim = data.skims.row(key.segment, origin).ok_or(ChoiceError::UnknownSegment {
            segment:  key.segment,
            segments: data.skims.segment_count(),
        })?;
        let shares = data.shares.shares(key.occupation);

        catalog
            .alternative_positions()
            .iter()
            .map(|&p| {
                let p = p as usize;
                let zone = catalog.zone_at(p);
                let emp = shares.map_or(0.0, |s| segmented_employment(&zone.employment, s));
                if emp <= 0.0 {
                    return Ok(UtilityRow {
                        zone:                 zone.id,
                        segmented_employment: emp,
                        available:            false,
                        utility:              0.0,
                    });
                }

                let price = ctx
                    .shadow_prices
                    .get(zone.id)
                    .ok_or_else(|| ChoiceError::ShadowPrices(format!("no price for {}", zone.id)))?;
                let d = f64::from(skim.distance[p]).min(c.max_distance);
                let logsum = f64::from(skim.logsum[p]);

                let utility = data.calibration.get(origin_district, zone.district, ctx.purpose)
                    + size_term(emp * price)
                    + c.logsum * logsum
                    + c.distance * d
                    + c.distance_sq * d * d
                    + c.distance_cu * d * d * d
                    + c.distance_log * (d + 1.0).ln();

                if !utility.is_finite() {
                    return Err(ChoiceError::NonFiniteUtility {
                        origin:      key.home_zone,
                        destination: zone.id,
                        utility,
                    });
                }

                Ok(UtilityRow { zone: zone.id, segmented_employment: emp, available: true, utility })
            })
            .collect()
    }
}

impl ChoiceModel for WorkLocationModel {
    fn choice_set(&self, key: &CohortKey, ctx: &ChoiceContext<'_>) -> ChoiceResult<ChoiceSet> {
        let rows = self.utilities(key, ctx)?;
        let (zones, utilities): (Vec<ZoneId>, Vec<f64>) = rows
            .iter()
            .filter(|r| r.available)
            .map(|r| (r.zone, r.utility))
            .unzip();
        Ok(ProbabilityDistribution::from_utilities(zones, &utilities).into())
    }

    fn anomaly(&self, key: &CohortKey, ctx: &ChoiceContext<'_>) -> Option<Anomaly> {
        if !key.occupation.is_defined() {
            Some(Anomaly::UndefinedOccupation(key.occupation))
        } else if ctx.reference.shares.shares(key.occupation).is_none() {
            Some(Anomaly::UnknownOccupation(key.occupation))
        } else {
            None
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Employment accessible to one occupation: `Σ employment[i] · shares[i]`.
#[inline]
pub fn segmented_employment(employment: &[f64], shares: &[f64]) -> f64 {
    employment.iter().zip(shares).map(|(e, s)| e * s).sum()
}

/// `ln(x)` for positive `x`, exactly `0` otherwise.
#[inline]
pub fn size_term(x: f64) -> f64 {
    if x > 0.0 { x.ln() } else { 0.0 }
}
