//! Unit tests for dc-core primitives.

#[cfg(test)]
mod ids {
    use crate::{DistrictId, Occupation, ZoneId};

    #[test]
    fn index_roundtrip() {
        let id = ZoneId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(ZoneId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(ZoneId::INVALID.0, u32::MAX);
        assert_eq!(DistrictId::INVALID.0, u16::MAX);
        assert!(!ZoneId::default().is_valid());
    }

    #[test]
    fn district_overflow_rejected() {
        assert!(DistrictId::try_from(70_000usize).is_err());
    }

    #[test]
    fn display() {
        assert_eq!(ZoneId(7).to_string(), "ZoneId(7)");
    }

    #[test]
    fn occupation_codes() {
        assert!(Occupation(3).is_defined());
        assert!(!Occupation(0).is_defined());
        assert!(!Occupation(-1).is_defined());
        assert_eq!(Occupation::default(), Occupation::NONE);
    }
}

#[cfg(test)]
mod purpose {
    use crate::Purpose;

    #[test]
    fn indices_are_dense() {
        let mut seen: Vec<usize> = Purpose::ALL.iter().map(|p| p.index()).collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..Purpose::COUNT).collect::<Vec<_>>());
    }

    #[test]
    fn parse_code_and_name() {
        assert_eq!("w".parse::<Purpose>().unwrap(), Purpose::Work);
        assert_eq!("B".parse::<Purpose>().unwrap(), Purpose::WorkBased);
        assert_eq!("shop".parse::<Purpose>().unwrap(), Purpose::Shop);
        assert!("x".parse::<Purpose>().is_err());
    }

    #[test]
    fn display() {
        assert_eq!(Purpose::Work.to_string(), "work");
        assert_eq!(Purpose::WorkBased.to_string(), "work_based");
    }
}

#[cfg(test)]
mod config {
    use crate::{EngineConfig, ModelCoefficients};

    #[test]
    fn default_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_bad_distance_cap() {
        let mut cfg = EngineConfig::default();
        cfg.coefficients.max_distance = 0.0;
        assert!(cfg.validate().is_err());
        cfg.coefficients.max_distance = f64::INFINITY;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_nan_coefficient() {
        let coeffs = ModelCoefficients { logsum: f64::NAN, ..ModelCoefficients::default() };
        assert!(coeffs.validate().is_err());
    }

    #[test]
    fn rejects_empty_catalog_key_and_zero_threads() {
        let cfg = EngineConfig { zone_catalog: "  ".into(), ..EngineConfig::default() };
        assert!(cfg.validate().is_err());
        let cfg = EngineConfig { num_threads: Some(0), ..EngineConfig::default() };
        assert!(cfg.validate().is_err());
    }
}

#[cfg(test)]
mod rng {
    use crate::{PersonRng, SeedRng};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = PersonRng::new(12345, 7);
        let mut r2 = PersonRng::new(12345, 7);
        for _ in 0..100 {
            assert_eq!(r1.uniform(), r2.uniform());
        }
    }

    #[test]
    fn different_persons_differ() {
        let mut r0 = PersonRng::new(1, 0);
        let mut r1 = PersonRng::new(1, 1);
        assert_ne!(r0.uniform(), r1.uniform(), "seeds for adjacent persons should diverge");
    }

    #[test]
    fn different_base_seeds_differ() {
        let a = PersonRng::new(1, 99).uniform();
        let b = PersonRng::new(2, 99).uniform();
        assert_ne!(a, b);
    }

    #[test]
    fn uniform_in_unit_interval() {
        for seed in 0..1000 {
            let u = PersonRng::new(3, seed).uniform();
            assert!((0.0..1.0).contains(&u));
        }
    }

    #[test]
    fn seed_rng_children_are_reproducible() {
        let mut a = SeedRng::new(9);
        let mut b = SeedRng::new(9);
        let x: u64 = a.child(1).random();
        let y: u64 = b.child(1).random();
        assert_eq!(x, y);
        assert!(!a.gen_bool(0.0));
        assert!(a.gen_bool(1.0));
    }
}
