//! Per-batch result tallies.

use std::fmt;

use tracing::warn;

use dc_choice::GroupedBatch;
use dc_core::ZoneId;
use dc_population::PersonKey;

#[cfg(feature = "fx-hash")]
type Map<K, V> = rustc_hash::FxHashMap<K, V>;
#[cfg(not(feature = "fx-hash"))]
type Map<K, V> = std::collections::HashMap<K, V>;

// ── EmploymentCategory ────────────────────────────────────────────────────────

/// Category under which assigned workers are counted per zone.  Work-location
/// choice reports a single total.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
pub enum EmploymentCategory {
    #[default]
    Total,
}

impl EmploymentCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            EmploymentCategory::Total => "total_employment",
        }
    }
}

impl fmt::Display for EmploymentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── ResultSet ─────────────────────────────────────────────────────────────────

/// Output of one batch, or of several batches merged by a coordinator.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResultSet {
    zone_counts: Map<EmploymentCategory, Map<ZoneId, u64>>,
    assignments: Map<PersonKey, ZoneId>,

    /// Persons received, employed or not.
    pub processed_count:  u64,
    pub unemployed_count: u64,
    /// Persons assigned their home zone because their choice set was empty.
    pub fallback_count:   u64,
    /// Employed persons whose cohort had a data-quality anomaly.
    pub anomaly_count:    u64,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tally a sampled batch in one pass.
    ///
    /// Every person with a work zone adds one to that zone's
    /// [`EmploymentCategory::Total`] count and one entry to the person map.
    /// `fallback_count` and `anomaly_count` are left for the caller.
    pub fn aggregate(batch: &GroupedBatch) -> Self {
        let mut results = Self::new();
        results.unemployed_count = batch.unemployed_count as u64;
        results.processed_count = (batch.employed_count() + batch.unemployed_count) as u64;

        for person in batch.cohorts.iter().flat_map(|c| &c.persons) {
            if let Some(zone) = person.work_zone() {
                results.record(person.key(), zone);
            }
        }
        results
    }

    fn record(&mut self, person: PersonKey, zone: ZoneId) {
        *self
            .zone_counts
            .entry(EmploymentCategory::Total)
            .or_default()
            .entry(zone)
            .or_insert(0) += 1;
        self.assignments.insert(person, zone);
    }

    /// Fold another result set into this one.
    ///
    /// Batches are expected to hold disjoint persons.  A person present in
    /// both keeps the zone from `other` and is logged.
    pub fn merge(&mut self, other: ResultSet) {
        for (category, counts) in other.zone_counts {
            let into = self.zone_counts.entry(category).or_default();
            for (zone, n) in counts {
                *into.entry(zone).or_insert(0) += n;
            }
        }
        for (person, zone) in other.assignments {
            if let Some(previous) = self.assignments.insert(person, zone) {
                warn!(%person, %previous, %zone, "person assigned in more than one batch");
            }
        }
        self.processed_count += other.processed_count;
        self.unemployed_count += other.unemployed_count;
        self.fallback_count += other.fallback_count;
        self.anomaly_count += other.anomaly_count;
    }

    /// Workers assigned to `zone` under `category`.
    pub fn zone_count(&self, category: EmploymentCategory, zone: ZoneId) -> u64 {
        self.zone_counts
            .get(&category)
            .and_then(|m| m.get(&zone))
            .copied()
            .unwrap_or(0)
    }

    /// Per-zone totals sorted by zone id.
    pub fn zone_totals(&self) -> Vec<(ZoneId, u64)> {
        let mut totals: Vec<(ZoneId, u64)> = self
            .zone_counts
            .get(&EmploymentCategory::Total)
            .map(|m| m.iter().map(|(&z, &n)| (z, n)).collect())
            .unwrap_or_default();
        totals.sort_unstable_by_key(|&(z, _)| z);
        totals
    }

    /// Sum of all per-zone totals.  Equals the number of employed persons
    /// processed.
    pub fn total_assigned(&self) -> u64 {
        self.zone_counts
            .get(&EmploymentCategory::Total)
            .map_or(0, |m| m.values().sum())
    }

    pub fn assignment(&self, person: PersonKey) -> Option<ZoneId> {
        self.assignments.get(&person).copied()
    }

    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }

    /// Person → zone pairs sorted by person key.
    pub fn sorted_assignments(&self) -> Vec<(PersonKey, ZoneId)> {
        let mut v: Vec<(PersonKey, ZoneId)> =
            self.assignments.iter().map(|(&p, &z)| (p, z)).collect();
        v.sort_unstable_by_key(|&(p, _)| p);
        v
    }
}
