//! CSV reference source.
//!
//! # Directory layout
//!
//! | File                    | Columns                                                  |
//! |-------------------------|----------------------------------------------------------|
//! | `zones.csv`             | `zone_id,district_id,<industry>...` (one column per industry) |
//! | `externals.csv`         | `zone_id`                                                |
//! | `skims.csv`             | `segment,origin,destination,distance,logsum`             |
//! | `employment_shares.csv` | `occupation,industry,share`                              |
//! | `calibration.csv`       | `origin_district,destination_district,purpose,value`     |
//!
//! `purpose` accepts the one-letter code (`w`, `c`, `s`, `r`, `o`, `b`) or the
//! purpose name.  Every file must exist; a missing file fails the load
//! immediately rather than being retried.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use dc_core::{DistrictId, ModelCoefficients, Occupation, Purpose, SegmentId, ZoneId};

use crate::{
    CalibrationEntry, EmploymentShares, ReferenceError, ReferenceResult, ReferenceSource,
    ShareRecord, SkimMatrix, SkimRecord, Zone, ZoneCatalog, ZoneTable,
};

pub const ZONES_FILE:       &str = "zones.csv";
pub const EXTERNALS_FILE:   &str = "externals.csv";
pub const SKIMS_FILE:       &str = "skims.csv";
pub const SHARES_FILE:      &str = "employment_shares.csv";
pub const CALIBRATION_FILE: &str = "calibration.csv";

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ExternalRow {
    zone_id: u32,
}

#[derive(Deserialize)]
struct SkimRow {
    segment:     u8,
    origin:      u32,
    destination: u32,
    distance:    f32,
    logsum:      f32,
}

#[derive(Deserialize)]
struct ShareRow {
    occupation: i16,
    industry:   String,
    share:      f64,
}

#[derive(Deserialize)]
struct CalibrationRow {
    origin_district:      u16,
    destination_district: u16,
    purpose:              String,
    value:                f64,
}

// ── CsvReferenceSource ────────────────────────────────────────────────────────

/// Reads reference inputs from a directory of CSV files.
pub struct CsvReferenceSource {
    dir:          PathBuf,
    coefficients: ModelCoefficients,
}

impl CsvReferenceSource {
    /// `coefficients` come from engine configuration; the CSV files carry
    /// only zone-level data.
    pub fn new(dir: impl Into<PathBuf>, coefficients: ModelCoefficients) -> Self {
        Self { dir: dir.into(), coefficients }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn open(&self, name: &str) -> ReferenceResult<csv::Reader<File>> {
        let path = self.dir.join(name);
        let file = File::open(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ReferenceError::MissingFile(path.clone()),
            _ => ReferenceError::Io(e),
        })?;
        Ok(csv::Reader::from_reader(file))
    }

    /// Deserialize every row of a fixed-format file.
    fn rows<T: for<'de> Deserialize<'de>>(&self, name: &str) -> ReferenceResult<Vec<T>> {
        let mut reader = self.open(name)?;
        reader
            .deserialize::<T>()
            .map(|r| r.map_err(|e| parse_error(name, e)))
            .collect()
    }
}

impl ReferenceSource for CsvReferenceSource {
    fn zones(&self) -> ReferenceResult<ZoneTable> {
        let mut reader = self.open(ZONES_FILE)?;
        let headers = reader.headers().map_err(|e| parse_error(ZONES_FILE, e))?.clone();
        if headers.len() < 2 || &headers[0] != "zone_id" || &headers[1] != "district_id" {
            return Err(ReferenceError::Parse {
                file:    ZONES_FILE.to_string(),
                message: "header must start with zone_id,district_id".to_string(),
            });
        }
        let industries: Vec<String> = headers.iter().skip(2).map(str::to_string).collect();

        let mut zones = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| parse_error(ZONES_FILE, e))?;
            let id: u32 = parse_field(&record, 0, ZONES_FILE)?;
            let district: u16 = parse_field(&record, 1, ZONES_FILE)?;
            let employment = (2..record.len())
                .map(|i| parse_field::<f64>(&record, i, ZONES_FILE))
                .collect::<ReferenceResult<Vec<_>>>()?;
            zones.push(Zone { id: ZoneId(id), district: DistrictId(district), employment });
        }

        Ok(ZoneTable { industries, zones })
    }

    fn externals(&self) -> ReferenceResult<Vec<ZoneId>> {
        Ok(self
            .rows::<ExternalRow>(EXTERNALS_FILE)?
            .into_iter()
            .map(|r| ZoneId(r.zone_id))
            .collect())
    }

    fn skims(&self, catalog: &ZoneCatalog) -> ReferenceResult<SkimMatrix> {
        // Streamed: the skim file is by far the largest input.
        let mut reader = self.open(SKIMS_FILE)?;
        SkimMatrix::try_from_records(
            catalog,
            reader.deserialize::<SkimRow>().map(|row| {
                let r = row.map_err(|e| parse_error(SKIMS_FILE, e))?;
                Ok(SkimRecord {
                    segment:     SegmentId(r.segment),
                    origin:      ZoneId(r.origin),
                    destination: ZoneId(r.destination),
                    distance:    r.distance,
                    logsum:      r.logsum,
                })
            }),
        )
    }

    fn employment_shares(&self, industries: &[String]) -> ReferenceResult<EmploymentShares> {
        let rows = self.rows::<ShareRow>(SHARES_FILE)?;
        EmploymentShares::from_records(
            industries,
            rows.into_iter().map(|r| ShareRecord {
                occupation: Occupation(r.occupation),
                industry:   r.industry.trim().to_string(),
                share:      r.share,
            }),
        )
    }

    fn calibration_entries(&self) -> ReferenceResult<Vec<CalibrationEntry>> {
        self.rows::<CalibrationRow>(CALIBRATION_FILE)?
            .into_iter()
            .map(|r| {
                let purpose = r.purpose.parse::<Purpose>().map_err(|e| ReferenceError::Parse {
                    file:    CALIBRATION_FILE.to_string(),
                    message: e.to_string(),
                })?;
                Ok(CalibrationEntry {
                    origin:      DistrictId(r.origin_district),
                    destination: DistrictId(r.destination_district),
                    purpose,
                    value:       r.value,
                })
            })
            .collect()
    }

    fn coefficients(&self) -> ReferenceResult<ModelCoefficients> {
        Ok(self.coefficients)
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_error(file: &str, e: csv::Error) -> ReferenceError {
    ReferenceError::Parse { file: file.to_string(), message: e.to_string() }
}

fn parse_field<T: std::str::FromStr>(
    record: &csv::StringRecord,
    index:  usize,
    file:   &str,
) -> ReferenceResult<T> {
    let raw = record.get(index).unwrap_or("").trim();
    raw.parse::<T>().map_err(|_| ReferenceError::Parse {
        file:    file.to_string(),
        message: format!(
            "line {}: cannot parse column {index} value {raw:?}",
            record.position().map_or(0, |p| p.line())
        ),
    })
}
