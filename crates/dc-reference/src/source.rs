//! The reference-data source trait and the assembled, immutable bundle.

use tracing::info;

use dc_core::{ModelCoefficients, ZoneId};

use crate::{
    CalibrationEntry, CalibrationTable, CatalogStrategy, EmploymentShares, ReferenceError,
    ReferenceResult, ShareRecord, SkimMatrix, SkimRecord, ZoneCatalog, ZoneCatalogBuilder,
    ZoneTable,
};

// ── ReferenceSource ───────────────────────────────────────────────────────────

/// Supplier of the raw reference inputs.
///
/// Matrix and file-format readers live behind this trait; the engine only
/// sees assembled structures.  Each method is called exactly once, by
/// [`ReferenceData::load`], in declaration order.
pub trait ReferenceSource {
    /// Zones with per-industry employment.
    fn zones(&self) -> ReferenceResult<ZoneTable>;

    /// Zones outside the modelled area.
    fn externals(&self) -> ReferenceResult<Vec<ZoneId>>;

    /// Distance and logsum skims over the catalog's zones.
    fn skims(&self, catalog: &ZoneCatalog) -> ReferenceResult<SkimMatrix>;

    /// Occupation → industry shares, resolved against `industries`.
    fn employment_shares(&self, industries: &[String]) -> ReferenceResult<EmploymentShares>;

    /// Calibration constants that overwrite the zero-filled table.
    fn calibration_entries(&self) -> ReferenceResult<Vec<CalibrationEntry>>;

    /// Utility-function coefficients.
    fn coefficients(&self) -> ReferenceResult<ModelCoefficients>;
}

// ── MemorySource ──────────────────────────────────────────────────────────────

/// A [`ReferenceSource`] over in-memory records.
///
/// Used by tests and by applications that synthesize reference data.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    pub zones:        ZoneTable,
    pub externals:    Vec<ZoneId>,
    pub skims:        Vec<SkimRecord>,
    pub shares:       Vec<ShareRecord>,
    pub calibration:  Vec<CalibrationEntry>,
    pub coefficients: ModelCoefficients,
}

impl ReferenceSource for MemorySource {
    fn zones(&self) -> ReferenceResult<ZoneTable> {
        Ok(self.zones.clone())
    }

    fn externals(&self) -> ReferenceResult<Vec<ZoneId>> {
        Ok(self.externals.clone())
    }

    fn skims(&self, catalog: &ZoneCatalog) -> ReferenceResult<SkimMatrix> {
        SkimMatrix::from_records(catalog, self.skims.iter().copied())
    }

    fn employment_shares(&self, industries: &[String]) -> ReferenceResult<EmploymentShares> {
        EmploymentShares::from_records(industries, self.shares.iter().cloned())
    }

    fn calibration_entries(&self) -> ReferenceResult<Vec<CalibrationEntry>> {
        Ok(self.calibration.clone())
    }

    fn coefficients(&self) -> ReferenceResult<ModelCoefficients> {
        Ok(self.coefficients)
    }
}

// ── ReferenceData ─────────────────────────────────────────────────────────────

/// Everything the utility engine reads, loaded once and never mutated.
#[derive(Debug)]
pub struct ReferenceData {
    pub catalog:      ZoneCatalog,
    pub skims:        SkimMatrix,
    pub shares:       EmploymentShares,
    pub calibration:  CalibrationTable,
    pub coefficients: ModelCoefficients,
}

impl ReferenceData {
    /// Pull every input from `source` and assemble the bundle.
    ///
    /// Order: zone catalog and externals, skims, employment shares, then the
    /// zero-filled calibration table overwritten by the source's entries.
    /// Any failure aborts the whole load.
    pub fn load<S>(source: &S, strategy: &dyn CatalogStrategy) -> ReferenceResult<Self>
    where
        S: ReferenceSource + ?Sized,
    {
        let table = source.zones()?;
        let externals = source.externals()?;
        let catalog = ZoneCatalogBuilder::from_table(table)?.build(strategy, &externals)?;
        info!(
            zones = catalog.zone_count(),
            alternatives = catalog.alternative_count(),
            externals = externals.len(),
            industries = catalog.industries().len(),
            "zone catalog built"
        );

        let skims = source.skims(&catalog)?;
        info!(segments = skims.segment_count(), "skims loaded");

        let shares = source.employment_shares(catalog.industries())?;
        info!(occupations = shares.occupation_count(), "employment shares loaded");

        let mut calibration = CalibrationTable::zeroed(catalog.district_count());
        let entries = source.calibration_entries()?;
        for entry in &entries {
            calibration.set(*entry)?;
        }
        info!(
            districts = calibration.district_count(),
            entries = entries.len(),
            "calibration constants loaded"
        );

        let coefficients = source.coefficients()?;
        Self::from_parts(catalog, skims, shares, calibration, coefficients)
    }

    /// Assemble from already-built parts, checking that their dimensions
    /// agree.
    pub fn from_parts(
        catalog:      ZoneCatalog,
        skims:        SkimMatrix,
        shares:       EmploymentShares,
        calibration:  CalibrationTable,
        coefficients: ModelCoefficients,
    ) -> ReferenceResult<Self> {
        coefficients.validate()?;
        if skims.zone_count() != catalog.zone_count() {
            return Err(ReferenceError::Invalid(format!(
                "skims cover {} zones, catalog has {}",
                skims.zone_count(),
                catalog.zone_count()
            )));
        }
        if !catalog.is_empty() && skims.segment_count() == 0 {
            return Err(ReferenceError::Invalid("skims contain no segments".to_string()));
        }
        if shares.industry_count() != catalog.industries().len() {
            return Err(ReferenceError::Invalid(format!(
                "employment shares cover {} industries, catalog has {}",
                shares.industry_count(),
                catalog.industries().len()
            )));
        }
        if calibration.district_count() < catalog.district_count() {
            return Err(ReferenceError::Invalid(format!(
                "calibration table covers {} districts, catalog uses {}",
                calibration.district_count(),
                catalog.district_count()
            )));
        }
        Ok(Self { catalog, skims, shares, calibration, coefficients })
    }
}
