//! CSV population loader.
//!
//! # CSV format
//!
//! One row per person:
//!
//! ```csv
//! household_id,member_id,home_zone,segment,occupation,employed,seed
//! 1,1,101,0,3,1,918273
//! 1,2,101,0,0,0,918274
//! 2,1,204,2,5,1,55512
//! ```
//!
//! `employed` is `1` or `0`.  `occupation` may be `0` or negative for persons
//! without an occupation.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use dc_core::{HouseholdId, MemberId, Occupation, SegmentId, ZoneId};

use crate::{Person, PopulationError};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct PersonRecord {
    household_id: u32,
    member_id:    u8,
    home_zone:    u32,
    segment:      u8,
    occupation:   i16,
    employed:     u8,
    seed:         u64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load persons from a CSV file, in file order.
pub fn load_persons_csv(path: &Path) -> Result<Vec<Person>, PopulationError> {
    let file = std::fs::File::open(path).map_err(PopulationError::Io)?;
    load_persons_reader(file)
}

/// Like [`load_persons_csv`] but accepts any `Read` source.
pub fn load_persons_reader<R: Read>(reader: R) -> Result<Vec<Person>, PopulationError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut persons = Vec::new();

    for (line, result) in csv_reader.deserialize::<PersonRecord>().enumerate() {
        let row = result.map_err(|e| PopulationError::Parse(e.to_string()))?;
        let employed = match row.employed {
            0 => false,
            1 => true,
            other => {
                return Err(PopulationError::Parse(format!(
                    "record {}: employed flag must be 0 or 1, got {other}",
                    line + 1
                )));
            }
        };
        persons.push(Person::new(
            HouseholdId(row.household_id),
            MemberId(row.member_id),
            ZoneId(row.home_zone),
            SegmentId(row.segment),
            Occupation(row.occupation),
            employed,
            row.seed,
        ));
    }

    Ok(persons)
}
