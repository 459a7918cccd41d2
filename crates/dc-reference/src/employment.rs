//! Occupation → industry employment shares.
//!
//! For an occupation `o`, `shares(o)[i]` is the fraction of industry `i`'s
//! jobs held by workers of that occupation.  The engine multiplies these
//! by each zone's employment to get the occupation's segmented employment.

use dc_core::Occupation;

use crate::{ReferenceError, ReferenceResult};

/// One row of an employment-share file.
#[derive(Clone, Debug, PartialEq)]
pub struct ShareRecord {
    pub occupation: Occupation,
    pub industry:   String,
    pub share:      f64,
}

/// Dense share table indexed by positive occupation code.
#[derive(Debug, Default)]
pub struct EmploymentShares {
    industries: usize,
    rows:       Vec<Option<Vec<f64>>>,
}

impl EmploymentShares {
    /// Empty table for `industries` industries.
    pub fn new(industries: usize) -> Self {
        Self { industries, rows: Vec::new() }
    }

    /// Build from records, resolving industry names against `industries`.
    /// Industries an occupation never mentions get a share of zero.
    pub fn from_records<I>(industries: &[String], records: I) -> ReferenceResult<Self>
    where
        I: IntoIterator<Item = ShareRecord>,
    {
        let mut table = Self::new(industries.len());
        for r in records {
            let i = industries
                .iter()
                .position(|name| *name == r.industry)
                .ok_or_else(|| ReferenceError::UnknownIndustry(r.industry.clone()))?;
            table.set(r.occupation, i, r.share)?;
        }
        Ok(table)
    }

    /// Set one share.  Only positive occupation codes have shares.
    pub fn set(&mut self, occupation: Occupation, industry: usize, share: f64) -> ReferenceResult<()> {
        if !occupation.is_defined() {
            return Err(ReferenceError::Invalid(format!(
                "employment share given for non-positive {occupation}"
            )));
        }
        if industry >= self.industries {
            return Err(ReferenceError::Invalid(format!(
                "industry index {industry} out of range for {} industries",
                self.industries
            )));
        }
        if !share.is_finite() || share < 0.0 {
            return Err(ReferenceError::Invalid(format!(
                "share {share} for {occupation} is not a non-negative number"
            )));
        }
        let code = occupation.0 as usize;
        let width = self.industries;
        if self.rows.len() <= code {
            self.rows.resize(code + 1, None);
        }
        let row = self.rows[code].get_or_insert_with(|| vec![0.0; width]);
        row[industry] = share;
        Ok(())
    }

    /// Shares for `occupation`, in industry order.
    ///
    /// `None` for non-positive codes and for codes absent from the table.
    #[inline]
    pub fn shares(&self, occupation: Occupation) -> Option<&[f64]> {
        if !occupation.is_defined() {
            return None;
        }
        self.rows.get(occupation.0 as usize)?.as_deref()
    }

    pub fn industry_count(&self) -> usize {
        self.industries
    }

    /// Number of occupations with a share row.
    pub fn occupation_count(&self) -> usize {
        self.rows.iter().filter(|r| r.is_some()).count()
    }
}
