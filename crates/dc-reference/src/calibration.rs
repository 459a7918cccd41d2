//! District-to-district calibration constants.
//!
//! A dense 3-D table over `(origin district, destination district, purpose)`.
//! It starts zero-filled; only the combinations present in the calibration
//! file are overwritten, so absent combinations contribute nothing to
//! utility.

use dc_core::{DistrictId, Purpose};

use crate::{ReferenceError, ReferenceResult};

/// One row of a calibration file.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CalibrationEntry {
    pub origin:      DistrictId,
    pub destination: DistrictId,
    pub purpose:     Purpose,
    pub value:       f64,
}

#[derive(Debug, Clone)]
pub struct CalibrationTable {
    districts: usize,
    values:    Vec<f64>,
}

impl CalibrationTable {
    /// Zero-filled table for `districts` districts and every purpose.
    pub fn zeroed(districts: usize) -> Self {
        Self {
            districts,
            values: vec![0.0; districts * districts * Purpose::COUNT],
        }
    }

    pub fn district_count(&self) -> usize {
        self.districts
    }

    #[inline]
    fn cell(&self, origin: DistrictId, destination: DistrictId, purpose: Purpose) -> Option<usize> {
        let (o, d) = (origin.index(), destination.index());
        (o < self.districts && d < self.districts)
            .then(|| (o * self.districts + d) * Purpose::COUNT + purpose.index())
    }

    /// Overwrite one constant.
    pub fn set(&mut self, entry: CalibrationEntry) -> ReferenceResult<()> {
        if !entry.value.is_finite() {
            return Err(ReferenceError::Invalid(format!(
                "calibration constant {} for {} -> {} ({})",
                entry.value, entry.origin, entry.destination, entry.purpose
            )));
        }
        let district = if entry.origin.index() >= self.districts {
            entry.origin
        } else {
            entry.destination
        };
        let cell = self
            .cell(entry.origin, entry.destination, entry.purpose)
            .ok_or(ReferenceError::DistrictOutOfRange { district, districts: self.districts })?;
        self.values[cell] = entry.value;
        Ok(())
    }

    /// Constant for a combination; zero when the combination is absent.
    #[inline]
    pub fn get(&self, origin: DistrictId, destination: DistrictId, purpose: Purpose) -> f64 {
        self.cell(origin, destination, purpose)
            .map_or(0.0, |c| self.values[c])
    }
}
