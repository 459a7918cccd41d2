//! Cohort grouping.
//!
//! Persons sharing `(segment, home zone, occupation)` face identical choice
//! probabilities, so utilities are computed once per cohort rather than once
//! per person.
//!
//! Grouping sorts the employed persons by
//! `(segment, home zone, occupation, household, member)` and then collects
//! maximal runs of equal cohort keys in one linear scan.  The trailing
//! person key makes the order total, so cohort contents (and their internal
//! order) are identical for any permutation of the same input.  A sort is
//! used instead of a hash multimap to bound memory on very large batches:
//! each cohort's persons end up contiguous and are moved, never cloned.

use std::fmt;

use dc_core::{Occupation, SegmentId, ZoneId};
use dc_population::Person;

// ── CohortKey ─────────────────────────────────────────────────────────────────

/// Grouping key.  Field order is the sort order.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct CohortKey {
    pub segment:    SegmentId,
    pub home_zone:  ZoneId,
    pub occupation: Occupation,
}

impl CohortKey {
    #[inline]
    pub fn of(person: &Person) -> Self {
        Self {
            segment:    person.segment,
            home_zone:  person.home_zone,
            occupation: person.occupation,
        }
    }
}

impl fmt::Display for CohortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} {} {}]", self.segment, self.home_zone, self.occupation)
    }
}

// ── Cohort ────────────────────────────────────────────────────────────────────

/// Employed persons sharing one [`CohortKey`].  Never empty.
#[derive(Clone, Debug, PartialEq)]
pub struct Cohort {
    pub key:     CohortKey,
    pub persons: Vec<Person>,
}

impl Cohort {
    pub fn len(&self) -> usize {
        self.persons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }
}

// ── Grouping ──────────────────────────────────────────────────────────────────

/// Output of [`group_batch`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GroupedBatch {
    /// Cohorts in ascending key order.
    pub cohorts:          Vec<Cohort>,
    /// Persons excluded because they are not employed.
    pub unemployed_count: usize,
}

impl GroupedBatch {
    /// Number of employed persons across all cohorts.
    pub fn employed_count(&self) -> usize {
        self.cohorts.iter().map(Cohort::len).sum()
    }
}

/// Partition `persons` into cohorts of employed persons.
pub fn group_batch(persons: Vec<Person>) -> GroupedBatch {
    let total = persons.len();
    let mut employed: Vec<Person> = persons.into_iter().filter(|p| p.employed).collect();
    let unemployed_count = total - employed.len();

    employed.sort_unstable_by_key(|p| (CohortKey::of(p), p.key()));

    let mut cohorts: Vec<Cohort> = Vec::new();
    for person in employed {
        let key = CohortKey::of(&person);
        match cohorts.last_mut() {
            Some(current) if current.key == key => current.persons.push(person),
            _ => cohorts.push(Cohort { key, persons: vec![person] }),
        }
    }

    GroupedBatch { cohorts, unemployed_count }
}
