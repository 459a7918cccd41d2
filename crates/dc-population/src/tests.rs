//! Unit tests for dc-population.

use dc_core::{HouseholdId, MemberId, Occupation, SegmentId, ZoneId};

use crate::{Person, PersonKey, PopulationError};

fn worker(hh: u32, member: u8) -> Person {
    Person::new(HouseholdId(hh), MemberId(member), ZoneId(10), SegmentId(0), Occupation(2), true, 77)
}

#[cfg(test)]
mod person {
    use super::*;

    #[test]
    fn key_orders_household_major() {
        let a = PersonKey::new(HouseholdId(1), MemberId(9));
        let b = PersonKey::new(HouseholdId(2), MemberId(1));
        assert!(a < b);
        assert_eq!(a.to_string(), "1/9");
    }

    #[test]
    fn work_zone_starts_unset() {
        assert_eq!(worker(1, 1).work_zone(), None);
    }

    #[test]
    fn assign_once() {
        let mut p = worker(1, 1);
        p.assign_work_zone(ZoneId(5)).unwrap();
        assert_eq!(p.work_zone(), Some(ZoneId(5)));
        assert!(matches!(
            p.assign_work_zone(ZoneId(6)),
            Err(PopulationError::AlreadyAssigned(_))
        ));
        assert_eq!(p.work_zone(), Some(ZoneId(5)));
    }

    #[test]
    fn unemployed_never_assigned() {
        let mut p = worker(1, 2);
        p.employed = false;
        assert!(matches!(p.assign_work_zone(ZoneId(5)), Err(PopulationError::NotEmployed(_))));
        assert_eq!(p.work_zone(), None);
    }
}

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use super::*;
    use crate::{load_persons_csv, load_persons_reader};

    const CSV: &str = "\
household_id,member_id,home_zone,segment,occupation,employed,seed\n\
1,1,101,0,3,1,918273\n\
1,2,101,0,0,0,918274\n\
2,1,204,2,-1,1,55512\n\
";

    #[test]
    fn parses_rows_in_order() {
        let persons = load_persons_reader(Cursor::new(CSV)).unwrap();
        assert_eq!(persons.len(), 3);
        assert_eq!(persons[0].key(), PersonKey::new(HouseholdId(1), MemberId(1)));
        assert_eq!(persons[0].home_zone, ZoneId(101));
        assert_eq!(persons[0].occupation, Occupation(3));
        assert!(persons[0].employed);
        assert!(!persons[1].employed);
        assert_eq!(persons[2].segment, SegmentId(2));
        assert_eq!(persons[2].occupation, Occupation(-1));
        assert_eq!(persons[2].seed, 55512);
        assert!(persons.iter().all(|p| p.work_zone().is_none()));
    }

    #[test]
    fn rejects_bad_employment_flag() {
        let csv = "household_id,member_id,home_zone,segment,occupation,employed,seed\n1,1,1,0,1,2,0\n";
        assert!(matches!(load_persons_reader(Cursor::new(csv)), Err(PopulationError::Parse(_))));
    }

    #[test]
    fn rejects_malformed_number() {
        let csv = "household_id,member_id,home_zone,segment,occupation,employed,seed\nx,1,1,0,1,1,0\n";
        assert!(load_persons_reader(Cursor::new(csv)).is_err());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_persons_csv(std::path::Path::new("/nonexistent/persons.csv")).unwrap_err();
        assert!(matches!(err, PopulationError::Io(_)));
    }
}
