//! Synthetic reference data and population for the demo.
//!
//! Zones sit on a square grid; distances are Euclidean between cell
//! centres.  The last `EXTERNAL_COUNT` zones are externals, so the default
//! `"internal"` catalog leaves them out of the choice set.

use dc_core::{
    DistrictId, HouseholdId, MemberId, ModelCoefficients, Occupation, Purpose, SeedRng, SegmentId,
    ZoneId,
};
use dc_population::Person;
use dc_reference::{CalibrationEntry, MemorySource, ShareRecord, SkimRecord, Zone, ZoneTable};

pub const ZONE_COUNT:     u32 = 64;
pub const EXTERNAL_COUNT: u32 = 4;
const GRID_WIDTH:         u32 = 8;
const DISTRICT_COUNT:     u32 = 8;
const SEGMENT_COUNT:      u8  = 2;
const OCCUPATION_COUNT:   i16 = 4;
/// Kilometres between adjacent grid cells.
const CELL_KM:            f32 = 3.0;

const INDUSTRIES: [&str; 3] = ["retail", "office", "industrial"];

fn cell(id: u32) -> (f32, f32) {
    let i = id - 1;
    ((i % GRID_WIDTH) as f32, (i / GRID_WIDTH) as f32)
}

fn distance_km(a: u32, b: u32) -> f32 {
    let (ax, ay) = cell(a);
    let (bx, by) = cell(b);
    if a == b {
        // Intrazonal trips are short but not free.
        return CELL_KM * 0.5;
    }
    CELL_KM * ((ax - bx).powi(2) + (ay - by).powi(2)).sqrt()
}

/// Build a complete in-memory reference source.
pub fn reference_source(rng: &mut SeedRng, coefficients: ModelCoefficients) -> MemorySource {
    let zones: Vec<Zone> = (1..=ZONE_COUNT)
        .map(|id| {
            let employment = INDUSTRIES
                .iter()
                .map(|_| if rng.gen_bool(0.2) { 0.0 } else { rng.gen_range(10.0..400.0) })
                .collect();
            Zone {
                id:         ZoneId(id),
                district:   DistrictId(((id - 1) * DISTRICT_COUNT / ZONE_COUNT) as u16),
                employment,
            }
        })
        .collect();

    let externals = ((ZONE_COUNT - EXTERNAL_COUNT + 1)..=ZONE_COUNT).map(ZoneId).collect();

    let mut skims = Vec::with_capacity((SEGMENT_COUNT as usize) * (ZONE_COUNT as usize).pow(2));
    for segment in 0..SEGMENT_COUNT {
        // Segment 1 (e.g. car-owning households) sees better accessibility.
        let bonus = f32::from(segment) * 0.5;
        for o in 1..=ZONE_COUNT {
            for d in 1..=ZONE_COUNT {
                let distance = distance_km(o, d);
                skims.push(SkimRecord {
                    segment:     SegmentId(segment),
                    origin:      ZoneId(o),
                    destination: ZoneId(d),
                    distance,
                    logsum:      bonus - 0.08 * distance + rng.gen_range(-0.1..0.1),
                });
            }
        }
    }

    let mut shares = Vec::new();
    for occupation in 1..=OCCUPATION_COUNT {
        let raw: Vec<f64> = INDUSTRIES.iter().map(|_| rng.gen_range(0.05..1.0)).collect();
        let total: f64 = raw.iter().sum();
        for (industry, w) in INDUSTRIES.iter().zip(raw) {
            shares.push(ShareRecord {
                occupation: Occupation(occupation),
                industry:   (*industry).to_string(),
                share:      w / total,
            });
        }
    }

    // Pull trips toward the downtown district a little.
    let calibration = (0..DISTRICT_COUNT as u16)
        .map(|origin| CalibrationEntry {
            origin:      DistrictId(origin),
            destination: DistrictId(3),
            purpose:     Purpose::Work,
            value:       0.25,
        })
        .collect();

    MemorySource {
        zones: ZoneTable {
            industries: INDUSTRIES.iter().map(|s| s.to_string()).collect(),
            zones,
        },
        externals,
        skims,
        shares,
        calibration,
        coefficients,
    }
}

/// `households` households of one to four members living in internal zones.
///
/// About 1 in 200 employed persons carries no occupation code, which shows
/// up as an anomaly and a home-zone fallback.
pub fn population(rng: &mut SeedRng, households: u32) -> Vec<Person> {
    let mut persons = Vec::new();
    for hh in 0..households {
        let home = ZoneId(rng.gen_range(1..=ZONE_COUNT - EXTERNAL_COUNT));
        let segment = SegmentId(rng.gen_range(0..SEGMENT_COUNT));
        let size: u8 = rng.gen_range(1..=4);
        for member in 1..=size {
            let employed = rng.gen_bool(0.65);
            let occupation = if rng.gen_bool(0.005) {
                Occupation::NONE
            } else {
                Occupation(rng.gen_range(1..=OCCUPATION_COUNT))
            };
            persons.push(Person::new(
                HouseholdId(hh),
                MemberId(member),
                home,
                segment,
                occupation,
                employed,
                rng.random(),
            ));
        }
    }
    persons
}
