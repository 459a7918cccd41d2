//! Choice probabilities over the available alternatives.

use dc_core::ZoneId;

/// Logit probabilities over an ordered, non-empty set of zones.
///
/// Zone order is catalog order restricted to available zones; sampling walks
/// the cumulative probabilities in that order, so the order is part of the
/// reproducibility contract.
#[derive(Clone, Debug, PartialEq)]
pub struct ProbabilityDistribution {
    zones:         Vec<ZoneId>,
    probabilities: Vec<f64>,
    cumulative:    Vec<f64>,
}

impl ProbabilityDistribution {
    /// Multinomial-logit probabilities from utilities.
    ///
    /// Uses the log-sum-exp shift: the maximum utility is subtracted before
    /// exponentiating, so large utilities cannot overflow and the result is
    /// mathematically unchanged.  Returns `None` if `zones` is empty or if
    /// `zones` and `utilities` differ in length.
    pub fn from_utilities(zones: Vec<ZoneId>, utilities: &[f64]) -> Option<Self> {
        if zones.is_empty() || zones.len() != utilities.len() {
            return None;
        }

        let max = utilities.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mut probabilities: Vec<f64> = utilities.iter().map(|u| (u - max).exp()).collect();
        // The max element contributes exp(0) = 1, so the sum is at least 1.
        let sum: f64 = probabilities.iter().sum();
        for p in &mut probabilities {
            *p /= sum;
        }

        let mut cumulative = Vec::with_capacity(probabilities.len());
        let mut acc = 0.0;
        for p in &probabilities {
            acc += p;
            cumulative.push(acc);
        }
        // Absorb rounding so every draw in [0, 1) lands on some zone.
        if let Some(last) = cumulative.last_mut() {
            *last = 1.0;
        }

        Some(Self { zones, probabilities, cumulative })
    }

    /// Select the first zone whose cumulative probability exceeds `draw`.
    ///
    /// `draw` is expected in `[0, 1)`; values outside are clamped to the
    /// first or last zone.  Zones with zero probability are never selected.
    pub fn select(&self, draw: f64) -> ZoneId {
        let i = self.cumulative.partition_point(|&c| c <= draw);
        self.zones[i.min(self.zones.len() - 1)]
    }

    /// Number of alternatives; at least one.
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn zones(&self) -> &[ZoneId] {
        &self.zones
    }

    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    /// Probability of `zone`, or `None` if it is not an available alternative.
    pub fn probability(&self, zone: ZoneId) -> Option<f64> {
        self.zones.iter().position(|&z| z == zone).map(|i| self.probabilities[i])
    }

    /// `(zone, probability)` pairs in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (ZoneId, f64)> + '_ {
        self.zones.iter().copied().zip(self.probabilities.iter().copied())
    }
}

/// Result of building a cohort's choice set.
#[derive(Clone, Debug, PartialEq)]
pub enum ChoiceSet {
    /// At least one zone has positive segmented employment.
    Available(ProbabilityDistribution),
    /// No zone is available.  A normal outcome; data errors are reported as
    /// `ChoiceError`s instead.
    Empty,
}

impl ChoiceSet {
    pub fn is_empty(&self) -> bool {
        matches!(self, ChoiceSet::Empty)
    }

    pub fn distribution(&self) -> Option<&ProbabilityDistribution> {
        match self {
            ChoiceSet::Available(d) => Some(d),
            ChoiceSet::Empty => None,
        }
    }

    /// Number of available alternatives.
    pub fn len(&self) -> usize {
        self.distribution().map_or(0, ProbabilityDistribution::len)
    }
}

impl From<Option<ProbabilityDistribution>> for ChoiceSet {
    fn from(d: Option<ProbabilityDistribution>) -> Self {
        d.map_or(ChoiceSet::Empty, ChoiceSet::Available)
    }
}
