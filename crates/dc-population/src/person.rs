//! The `Person` record and its composite key.

use std::fmt;

use dc_core::{HouseholdId, MemberId, Occupation, SegmentId, ZoneId};

use crate::{PopulationError, PopulationResult};

// ── PersonKey ─────────────────────────────────────────────────────────────────

/// Stable composite identity of a person: `(household, member)`.
///
/// Ordering is household-major, so a sorted result map lists household
/// members together.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PersonKey {
    pub household: HouseholdId,
    pub member:    MemberId,
}

impl PersonKey {
    #[inline]
    pub fn new(household: HouseholdId, member: MemberId) -> Self {
        Self { household, member }
    }
}

impl fmt::Display for PersonKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.household.0, self.member.0)
    }
}

// ── Person ────────────────────────────────────────────────────────────────────

/// One member of the simulated population.
///
/// Every field but the work zone is fixed before the person reaches the
/// engine.  The work zone starts unset and is written once through
/// [`Person::assign_work_zone`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Person {
    pub household:  HouseholdId,
    pub member:     MemberId,
    pub home_zone:  ZoneId,
    pub segment:    SegmentId,
    pub occupation: Occupation,
    pub employed:   bool,
    /// Stable per-person seed, assigned by the population synthesizer.
    pub seed:       u64,
    work_zone:      Option<ZoneId>,
}

impl Person {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        household:  HouseholdId,
        member:     MemberId,
        home_zone:  ZoneId,
        segment:    SegmentId,
        occupation: Occupation,
        employed:   bool,
        seed:       u64,
    ) -> Self {
        Self {
            household,
            member,
            home_zone,
            segment,
            occupation,
            employed,
            seed,
            work_zone: None,
        }
    }

    #[inline]
    pub fn key(&self) -> PersonKey {
        PersonKey::new(self.household, self.member)
    }

    /// The assigned work zone, or `None` before sampling (and always for
    /// persons who are not employed).
    #[inline]
    pub fn work_zone(&self) -> Option<ZoneId> {
        self.work_zone
    }

    /// Record the chosen work zone.
    ///
    /// Fails if the person is not employed or already has a work zone.
    pub fn assign_work_zone(&mut self, zone: ZoneId) -> PopulationResult<()> {
        if !self.employed {
            return Err(PopulationError::NotEmployed(self.key()));
        }
        if self.work_zone.is_some() {
            return Err(PopulationError::AlreadyAssigned(self.key()));
        }
        self.work_zone = Some(zone);
        Ok(())
    }
}
