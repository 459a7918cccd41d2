//! Segment-indexed distance and mode-choice logsum matrices.
//!
//! # Data layout
//!
//! Both matrices are flat `f32` arrays over `(segment, origin, destination)`
//! using catalog positions:
//!
//! ```text
//! cell = (segment * n + origin_pos) * n + destination_pos
//! ```
//!
//! so one origin's row is a contiguous slice and the utility loop over
//! destinations is a linear scan.  `f32` halves memory against `f64`; the
//! engine widens on read.

use dc_core::{SegmentId, ZoneId};

use crate::{ReferenceError, ReferenceResult, ZoneCatalog};

/// One skim cell as delivered by a matrix reader.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SkimRecord {
    pub segment:     SegmentId,
    pub origin:      ZoneId,
    pub destination: ZoneId,
    pub distance:    f32,
    pub logsum:      f32,
}

/// Distance and logsum rows for one `(segment, origin)` pair, indexed by
/// destination position.
#[derive(Clone, Copy)]
pub struct SkimRow<'a> {
    pub distance: &'a [f32],
    pub logsum:   &'a [f32],
}

/// Dense segment × origin × destination skims.
#[derive(Debug)]
pub struct SkimMatrix {
    segments: usize,
    zones:    usize,
    distance: Vec<f32>,
    logsum:   Vec<f32>,
}

impl SkimMatrix {
    /// Assemble a complete matrix from cell records.
    ///
    /// The segment count is `max segment + 1`; every
    /// `(segment, origin, destination)` cell over the catalog's zones must be
    /// supplied.  Later duplicates overwrite earlier ones.
    pub fn from_records<I>(catalog: &ZoneCatalog, records: I) -> ReferenceResult<Self>
    where
        I: IntoIterator<Item = SkimRecord>,
    {
        Self::try_from_records(catalog, records.into_iter().map(Ok))
    }

    /// [`from_records`](Self::from_records) over a reader whose rows may fail.
    ///
    /// Each record is written straight into the dense arrays as it arrives;
    /// the arrays grow one whole segment layer at a time, so no copy of the
    /// record stream is kept.  The first failed row aborts the load.
    pub fn try_from_records<I>(catalog: &ZoneCatalog, records: I) -> ReferenceResult<Self>
    where
        I: IntoIterator<Item = ReferenceResult<SkimRecord>>,
    {
        let n = catalog.zone_count();
        let layer = n * n;
        let mut segments = 0usize;
        // NaN marks cells nobody wrote.
        let mut distance: Vec<f32> = Vec::new();
        let mut logsum: Vec<f32> = Vec::new();

        for r in records {
            let r = r?;
            if !r.segment.is_valid() {
                return Err(ReferenceError::Invalid("segment id is reserved".to_string()));
            }
            let o = catalog.position(r.origin).ok_or(ReferenceError::UnknownZone(r.origin))?;
            let d = catalog
                .position(r.destination)
                .ok_or(ReferenceError::UnknownZone(r.destination))?;
            if !r.distance.is_finite() || r.distance < 0.0 {
                return Err(ReferenceError::Invalid(format!(
                    "distance {} for {} -> {}",
                    r.distance, r.origin, r.destination
                )));
            }
            if !r.logsum.is_finite() {
                return Err(ReferenceError::Invalid(format!(
                    "logsum {} for {} -> {}",
                    r.logsum, r.origin, r.destination
                )));
            }

            let s = r.segment.index();
            if s >= segments {
                segments = s + 1;
                distance.resize(segments * layer, f32::NAN);
                logsum.resize(segments * layer, f32::NAN);
            }
            let cell = (s * n + o) * n + d;
            distance[cell] = r.distance;
            logsum[cell] = r.logsum;
        }

        if let Some(cell) = distance.iter().position(|v| v.is_nan()) {
            let s = cell / (n * n);
            let o = (cell / n) % n;
            let d = cell % n;
            return Err(ReferenceError::IncompleteSkim {
                segment:     SegmentId(s as u8),
                origin:      catalog.zone_at(o).id,
                destination: catalog.zone_at(d).id,
            });
        }

        Ok(Self { segments, zones: n, distance, logsum })
    }

    pub fn segment_count(&self) -> usize {
        self.segments
    }

    /// Side length of each segment's square matrix.
    pub fn zone_count(&self) -> usize {
        self.zones
    }

    #[inline]
    pub fn has_segment(&self, segment: SegmentId) -> bool {
        segment.index() < self.segments
    }

    /// Rows for one origin position.  Returns `None` if the segment or
    /// origin is out of range.
    #[inline]
    pub fn row(&self, segment: SegmentId, origin: usize) -> Option<SkimRow<'_>> {
        if !self.has_segment(segment) || origin >= self.zones {
            return None;
        }
        let start = (segment.index() * self.zones + origin) * self.zones;
        let end = start + self.zones;
        Some(SkimRow {
            distance: &self.distance[start..end],
            logsum:   &self.logsum[start..end],
        })
    }

    /// Single-cell distance lookup by position.
    pub fn distance(&self, segment: SegmentId, origin: usize, destination: usize) -> Option<f32> {
        self.row(segment, origin).and_then(|r| r.distance.get(destination).copied())
    }

    /// Single-cell logsum lookup by position.
    pub fn logsum(&self, segment: SegmentId, origin: usize, destination: usize) -> Option<f32> {
        self.row(segment, origin).and_then(|r| r.logsum.get(destination).copied())
    }
}
