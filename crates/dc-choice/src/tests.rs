//! Unit tests for dc-choice.

use dc_core::{
    DistrictId, HouseholdId, MemberId, ModelCoefficients, Occupation, Purpose, SegmentId, ZoneId,
};
use dc_population::Person;
use dc_reference::{
    AllZones, CalibrationEntry, MemorySource, ReferenceData, ShareRecord, SkimRecord, Zone,
    ZoneTable,
};

use crate::{ChoiceContext, CohortKey, ShadowPrices};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Distance table for segment 0 (row = origin, column = destination).
const DISTANCE: [[f32; 3]; 3] = [
    [2.0, 10.0, 5.0],
    [10.0, 2.0, 6.0],
    [5.0, 6.0, 1.0],
];

/// Logsum-and-distance-only coefficients.
fn simple_coefficients() -> ModelCoefficients {
    ModelCoefficients {
        logsum:       1.0,
        distance:     -0.1,
        distance_sq:  0.0,
        distance_cu:  0.0,
        distance_log: 0.0,
        max_distance: 100.0,
    }
}

/// Three zones over industries `a`, `b`:
///
/// | zone | district | a  | b  |
/// |------|----------|----|----|
/// | 1    | 0        | 10 | 0  |
/// | 2    | 1        | 0  | 20 |
/// | 3    | 1        | 0  | 0  |
///
/// Occupation 1 takes all of `a` and half of `b`; occupation 2 only `a`.
/// Logsum is 0.5 everywhere; calibration 0 → 1 for work is 0.3.
fn reference(coefficients: ModelCoefficients) -> ReferenceData {
    let ids = [1u32, 2, 3];
    let mut skims = Vec::new();
    for (oi, &o) in ids.iter().enumerate() {
        for (di, &d) in ids.iter().enumerate() {
            skims.push(SkimRecord {
                segment:     SegmentId(0),
                origin:      ZoneId(o),
                destination: ZoneId(d),
                distance:    DISTANCE[oi][di],
                logsum:      0.5,
            });
        }
    }
    let source = MemorySource {
        zones: ZoneTable {
            industries: vec!["a".into(), "b".into()],
            zones: vec![
                Zone { id: ZoneId(1), district: DistrictId(0), employment: vec![10.0, 0.0] },
                Zone { id: ZoneId(2), district: DistrictId(1), employment: vec![0.0, 20.0] },
                Zone { id: ZoneId(3), district: DistrictId(1), employment: vec![0.0, 0.0] },
            ],
        },
        externals: vec![],
        skims,
        shares: vec![
            ShareRecord { occupation: Occupation(1), industry: "a".into(), share: 1.0 },
            ShareRecord { occupation: Occupation(1), industry: "b".into(), share: 0.5 },
            ShareRecord { occupation: Occupation(2), industry: "a".into(), share: 1.0 },
        ],
        calibration: vec![CalibrationEntry {
            origin:      DistrictId(0),
            destination: DistrictId(1),
            purpose:     Purpose::Work,
            value:       0.3,
        }],
        coefficients,
    };
    ReferenceData::load(&source, &AllZones).unwrap()
}

fn prices() -> ShadowPrices {
    ShadowPrices::uniform(4, 1.0).unwrap()
}

fn key(home: u32, occupation: i16) -> CohortKey {
    CohortKey { segment: SegmentId(0), home_zone: ZoneId(home), occupation: Occupation(occupation) }
}

fn person(hh: u32, home: u32, segment: u8, occupation: i16, employed: bool, seed: u64) -> Person {
    Person::new(
        HouseholdId(hh),
        MemberId(1),
        ZoneId(home),
        SegmentId(segment),
        Occupation(occupation),
        employed,
        seed,
    )
}

fn ctx<'a>(data: &'a ReferenceData, prices: &'a ShadowPrices) -> ChoiceContext<'a> {
    ChoiceContext::new(data, prices, Purpose::Work)
}

// ── Cohort grouping ───────────────────────────────────────────────────────────

#[cfg(test)]
mod cohorts {
    use super::*;
    use crate::group_batch;

    fn batch() -> Vec<Person> {
        vec![
            person(1, 2, 0, 1, true, 1),
            person(2, 1, 0, 1, true, 2),
            person(3, 2, 0, 1, true, 3),
            person(4, 2, 0, 1, false, 4),
            person(5, 1, 1, 1, true, 5),
            person(6, 1, 0, 2, true, 6),
            person(7, 1, 0, 1, false, 7),
        ]
    }

    #[test]
    fn unemployed_excluded_and_counted() {
        let grouped = group_batch(batch());
        assert_eq!(grouped.unemployed_count, 2);
        assert_eq!(grouped.employed_count(), 5);
        assert!(grouped.cohorts.iter().flat_map(|c| &c.persons).all(|p| p.employed));
    }

    #[test]
    fn cohorts_are_maximal_and_sorted() {
        let grouped = group_batch(batch());
        let keys: Vec<CohortKey> = grouped.cohorts.iter().map(|c| c.key).collect();
        assert_eq!(
            keys,
            vec![
                CohortKey { segment: SegmentId(0), home_zone: ZoneId(1), occupation: Occupation(1) },
                CohortKey { segment: SegmentId(0), home_zone: ZoneId(1), occupation: Occupation(2) },
                CohortKey { segment: SegmentId(0), home_zone: ZoneId(2), occupation: Occupation(1) },
                CohortKey { segment: SegmentId(1), home_zone: ZoneId(1), occupation: Occupation(1) },
            ]
        );
        let sizes: Vec<usize> = grouped.cohorts.iter().map(|c| c.len()).collect();
        assert_eq!(sizes, vec![1, 1, 2, 1]);
        for cohort in &grouped.cohorts {
            assert!(cohort.persons.iter().all(|p| CohortKey::of(p) == cohort.key));
        }
    }

    #[test]
    fn permutation_invariant() {
        let forward = group_batch(batch());
        let mut reversed_input = batch();
        reversed_input.reverse();
        assert_eq!(group_batch(reversed_input), forward);
    }

    #[test]
    fn empty_batch() {
        let grouped = group_batch(Vec::new());
        assert!(grouped.cohorts.is_empty());
        assert_eq!(grouped.unemployed_count, 0);
    }
}

// ── Probability distribution ──────────────────────────────────────────────────

#[cfg(test)]
mod distribution {
    use super::*;
    use crate::{ChoiceSet, ProbabilityDistribution};

    #[test]
    fn two_zone_logit() {
        let d = ProbabilityDistribution::from_utilities(vec![ZoneId(1), ZoneId(2)], &[2.0, 1.0])
            .unwrap();
        let p = d.probabilities();
        assert!((p[0] - 0.731).abs() < 1e-3, "got {}", p[0]);
        assert!((p[1] - 0.269).abs() < 1e-3, "got {}", p[1]);
        assert_eq!(d.select(0.5), ZoneId(1));
        assert_eq!(d.select(0.8), ZoneId(2));
        assert_eq!(d.select(0.0), ZoneId(1));
    }

    #[test]
    fn large_utilities_do_not_overflow() {
        let d = ProbabilityDistribution::from_utilities(
            vec![ZoneId(1), ZoneId(2), ZoneId(3)],
            &[1000.0, 999.0, -1000.0],
        )
        .unwrap();
        let sum: f64 = d.probabilities().iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert!(d.probabilities().iter().all(|p| p.is_finite()));
        assert!((d.probability(ZoneId(1)).unwrap() - 0.731).abs() < 1e-3);
    }

    #[test]
    fn zero_probability_zone_never_selected() {
        let d = ProbabilityDistribution::from_utilities(vec![ZoneId(1), ZoneId(2)], &[0.0, -2000.0])
            .unwrap();
        assert_eq!(d.probability(ZoneId(2)), Some(0.0));
        assert_eq!(d.select(0.999_999_999), ZoneId(1));
    }

    #[test]
    fn out_of_range_draws_clamp() {
        let d = ProbabilityDistribution::from_utilities(vec![ZoneId(1), ZoneId(2)], &[0.0, 0.0])
            .unwrap();
        assert_eq!(d.select(-0.5), ZoneId(1));
        assert_eq!(d.select(1.5), ZoneId(2));
    }

    #[test]
    fn mismatched_lengths_are_none() {
        assert!(
            ProbabilityDistribution::from_utilities(vec![ZoneId(1), ZoneId(2)], &[0.5]).is_none()
        );
        assert!(ProbabilityDistribution::from_utilities(vec![ZoneId(1)], &[0.5, 1.0]).is_none());
    }

    #[test]
    fn empty_is_none() {
        assert!(ProbabilityDistribution::from_utilities(vec![], &[]).is_none());
        let set: ChoiceSet = None.into();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
    }
}

// ── Utility model ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod model {
    use super::*;
    use crate::model::{segmented_employment, size_term};
    use crate::{Anomaly, ChoiceError, ChoiceModel, ChoiceSet, WorkLocationModel};

    #[test]
    fn helper_functions() {
        assert_eq!(segmented_employment(&[10.0, 20.0], &[1.0, 0.5]), 20.0);
        assert_eq!(size_term(0.0), 0.0);
        assert_eq!(size_term(-3.0), 0.0);
        assert!((size_term(std::f64::consts::E) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn utilities_follow_formula() {
        let data = reference(simple_coefficients());
        let prices = prices();
        let rows = WorkLocationModel.utilities(&key(1, 1), &ctx(&data, &prices)).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].zone, ZoneId(1));
        assert_eq!(rows[0].segmented_employment, 10.0);
        assert!((rows[0].utility - (10f64.ln() + 0.5 - 0.2)).abs() < 1e-9);

        // Destination district 1 picks up the 0 → 1 calibration constant.
        assert_eq!(rows[1].segmented_employment, 10.0);
        assert!((rows[1].utility - (0.3 + 10f64.ln() + 0.5 - 1.0)).abs() < 1e-9);

        assert!(!rows[2].available);
    }

    #[test]
    fn full_polynomial_and_cap() {
        let coeffs = ModelCoefficients {
            logsum:       0.7,
            distance:     -0.2,
            distance_sq:  0.01,
            distance_cu:  -0.001,
            distance_log: -0.4,
            max_distance: 8.0,
        };
        let data = reference(coeffs);
        let prices = prices();
        let rows = WorkLocationModel.utilities(&key(1, 1), &ctx(&data, &prices)).unwrap();

        // Raw distance 10 is capped at 8.
        let d = 8.0_f64;
        let expected = 0.3
            + 10f64.ln()
            + 0.7 * 0.5
            + -0.2 * d
            + 0.01 * d * d
            + -0.001 * d * d * d
            + -0.4 * (d + 1.0).ln();
        assert!((rows[1].utility - expected).abs() < 1e-9);
    }

    #[test]
    fn zero_shadow_price_gives_zero_size_term() {
        let data = reference(simple_coefficients());
        let prices = ShadowPrices::new(vec![1.0, 1.0, 0.0, 1.0]).unwrap();
        let rows = WorkLocationModel.utilities(&key(1, 1), &ctx(&data, &prices)).unwrap();
        assert!(rows[1].available);
        assert!((rows[1].utility - (0.3 + 0.5 - 1.0)).abs() < 1e-9);
    }

    #[test]
    fn probabilities_sum_to_one_and_exclude_unavailable() {
        let data = reference(simple_coefficients());
        let prices = prices();
        let set = WorkLocationModel.choice_set(&key(1, 1), &ctx(&data, &prices)).unwrap();
        let dist = set.distribution().unwrap();
        assert_eq!(dist.zones(), &[ZoneId(1), ZoneId(2)]);
        let sum: f64 = dist.probabilities().iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
        // U1 - U2 = 0.5 → p1 = 1 / (1 + e^-0.5)
        let p1 = 1.0 / (1.0 + (-0.5f64).exp());
        assert!((dist.probability(ZoneId(1)).unwrap() - p1).abs() < 1e-9);
        assert_eq!(dist.probability(ZoneId(3)), None);
    }

    #[test]
    fn occupation_restricts_choice_set() {
        let data = reference(simple_coefficients());
        let prices = prices();
        let set = WorkLocationModel.choice_set(&key(2, 2), &ctx(&data, &prices)).unwrap();
        assert_eq!(set.distribution().unwrap().zones(), &[ZoneId(1)]);
    }

    #[test]
    fn no_occupation_is_empty_not_error() {
        let data = reference(simple_coefficients());
        let prices = prices();
        let c = ctx(&data, &prices);
        assert_eq!(WorkLocationModel.choice_set(&key(1, 0), &c).unwrap(), ChoiceSet::Empty);
        assert_eq!(WorkLocationModel.choice_set(&key(1, 9), &c).unwrap(), ChoiceSet::Empty);
        assert_eq!(
            WorkLocationModel.anomaly(&key(1, 0), &c),
            Some(Anomaly::UndefinedOccupation(Occupation(0)))
        );
        assert_eq!(
            WorkLocationModel.anomaly(&key(1, 9), &c),
            Some(Anomaly::UnknownOccupation(Occupation(9)))
        );
        assert_eq!(WorkLocationModel.anomaly(&key(1, 1), &c), None);
    }

    #[test]
    fn unknown_home_zone_is_error() {
        let data = reference(simple_coefficients());
        let prices = prices();
        let err = WorkLocationModel.choice_set(&key(42, 1), &ctx(&data, &prices)).unwrap_err();
        assert!(matches!(err, ChoiceError::UnknownZone(ZoneId(42))));
    }

    #[test]
    fn unknown_segment_is_error() {
        let data = reference(simple_coefficients());
        let prices = prices();
        let k = CohortKey { segment: SegmentId(3), ..key(1, 1) };
        let err = WorkLocationModel.choice_set(&k, &ctx(&data, &prices)).unwrap_err();
        assert!(matches!(err, ChoiceError::UnknownSegment { segments: 1, .. }));
    }

    #[test]
    fn short_price_vector_is_error() {
        let data = reference(simple_coefficients());
        let prices = ShadowPrices::uniform(2, 1.0).unwrap();
        assert!(matches!(
            WorkLocationModel.choice_set(&key(1, 1), &ctx(&data, &prices)),
            Err(ChoiceError::ShadowPrices(_))
        ));
    }
}

// ── Shadow prices ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod shadow {
    use super::*;

    #[test]
    fn rejects_negative_and_nan() {
        assert!(ShadowPrices::new(vec![1.0, -0.1]).is_err());
        assert!(ShadowPrices::new(vec![f64::NAN]).is_err());
    }

    #[test]
    fn coverage() {
        let p = ShadowPrices::uniform(4, 1.0).unwrap();
        assert!(p.covers(ZoneId(3)));
        assert!(!p.covers(ZoneId(4)));
        assert_eq!(p.get(ZoneId(2)), Some(1.0));
        assert_eq!(p.get(ZoneId(9)), None);
    }
}

// ── Sampler ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod sampler {
    use super::*;
    use crate::{
        ChoiceError, ChoiceModel, ChoiceSet, ProbabilityDistribution, SampleOutcome, Sampler,
        WorkLocationModel,
    };

    #[test]
    fn empty_choice_set_falls_back_to_home() {
        let mut p = person(1, 3, 0, 0, true, 11);
        let outcome = Sampler::new(1).choose(&mut p, &ChoiceSet::Empty).unwrap();
        assert_eq!(outcome, SampleOutcome::Fallback(ZoneId(3)));
        assert!(outcome.is_fallback());
        assert_eq!(p.work_zone(), Some(ZoneId(3)));
    }

    #[test]
    fn same_seed_same_zone() {
        let data = reference(simple_coefficients());
        let prices = prices();
        let set = WorkLocationModel.choice_set(&key(1, 1), &ctx(&data, &prices)).unwrap();
        let sampler = Sampler::new(2024);
        for seed in 0..200 {
            let mut a = person(1, 1, 0, 1, true, seed);
            let mut b = person(2, 1, 0, 1, true, seed);
            assert_eq!(sampler.choose(&mut a, &set).unwrap(), sampler.choose(&mut b, &set).unwrap());
        }
    }

    #[test]
    fn unavailable_zone_never_sampled() {
        let data = reference(simple_coefficients());
        let prices = prices();
        let set = WorkLocationModel.choice_set(&key(1, 1), &ctx(&data, &prices)).unwrap();
        let sampler = Sampler::new(7);
        let mut seen = [0usize; 4];
        for seed in 0..2_000 {
            let mut p = person(seed as u32, 1, 0, 1, true, seed);
            let zone = sampler.choose(&mut p, &set).unwrap().zone();
            seen[zone.index()] += 1;
        }
        assert_eq!(seen[3], 0);
        assert!(seen[1] > seen[2], "zone 1 has the higher probability: {seen:?}");
        assert!(seen[2] > 0);
    }

    #[test]
    fn draw_selects_by_cumulative_probability() {
        let dist = ProbabilityDistribution::from_utilities(vec![ZoneId(1), ZoneId(2)], &[2.0, 1.0])
            .unwrap();
        let set = ChoiceSet::Available(dist.clone());
        let sampler = Sampler::new(99);
        let mut p = person(1, 1, 0, 1, true, 5);
        let expected = dist.select(sampler.draw(&p));
        assert_eq!(sampler.choose(&mut p, &set).unwrap(), SampleOutcome::Sampled(expected));
    }

    #[test]
    fn unemployed_person_is_rejected() {
        let mut p = person(1, 1, 0, 1, false, 5);
        let err = Sampler::new(1).choose(&mut p, &ChoiceSet::Empty).unwrap_err();
        assert!(matches!(err, ChoiceError::Population(_)));
        assert_eq!(p.work_zone(), None);
    }
}
