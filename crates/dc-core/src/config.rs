//! Model coefficients and engine configuration.
//!
//! Both structs are plain data.  Applications typically load them from a
//! JSON file (with the `serde` feature) and hand them to the worker builder.

use crate::{DcError, DcResult, Purpose};

// ── ModelCoefficients ─────────────────────────────────────────────────────────

/// Coefficients of the work-location utility function.
///
/// ```text
/// U = calib[od][dd][p] + ln(emp · shadow)
///   + logsum · LS + distance · d + distance_sq · d² + distance_cu · d³
///   + distance_log · ln(d + 1)
/// ```
///
/// where `d = min(raw_distance, max_distance)`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ModelCoefficients {
    pub logsum:       f64,
    pub distance:     f64,
    pub distance_sq:  f64,
    pub distance_cu:  f64,
    pub distance_log: f64,
    /// Distances above this cap are truncated before entering the polynomial.
    pub max_distance: f64,
}

impl Default for ModelCoefficients {
    fn default() -> Self {
        Self {
            logsum:       0.5,
            distance:     -0.05,
            distance_sq:  2.0e-4,
            distance_cu:  -2.5e-7,
            distance_log: -0.6,
            max_distance: 200.0,
        }
    }
}

impl ModelCoefficients {
    /// Reject coefficients that would poison every utility.
    pub fn validate(&self) -> DcResult<()> {
        let terms = [
            ("logsum", self.logsum),
            ("distance", self.distance),
            ("distance_sq", self.distance_sq),
            ("distance_cu", self.distance_cu),
            ("distance_log", self.distance_log),
        ];
        for (name, value) in terms {
            if !value.is_finite() {
                return Err(DcError::Config(format!("coefficient {name} is not finite: {value}")));
            }
        }
        if !(self.max_distance.is_finite() && self.max_distance > 0.0) {
            return Err(DcError::Config(format!(
                "max_distance must be positive and finite, got {}",
                self.max_distance
            )));
        }
        Ok(())
    }
}

// ── EngineConfig ──────────────────────────────────────────────────────────────

/// Top-level configuration of a worker process.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Base seed mixed with every person's own seed.  The same base seed and
    /// population always produce identical assignments.
    pub base_seed: u64,

    /// Purpose axis used when reading calibration constants.
    pub purpose: Purpose,

    /// Registry key of the zone-catalog strategy (`"internal"`, `"all"`, …).
    pub zone_catalog: String,

    /// Worker thread count passed to Rayon.  `None` uses all logical cores.
    pub num_threads: Option<usize>,

    pub coefficients: ModelCoefficients,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_seed:    0x5eed,
            purpose:      Purpose::Work,
            zone_catalog: "internal".to_string(),
            num_threads:  None,
            coefficients: ModelCoefficients::default(),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> DcResult<()> {
        if self.zone_catalog.trim().is_empty() {
            return Err(DcError::Config("zone_catalog key is empty".to_string()));
        }
        if self.num_threads == Some(0) {
            return Err(DcError::Config("num_threads must be at least 1".to_string()));
        }
        self.coefficients.validate()
    }
}
