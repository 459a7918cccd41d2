//! Reproducible per-person destination sampling.

use tracing::warn;

use dc_core::{PersonRng, ZoneId};
use dc_population::Person;

use crate::{ChoiceResult, ChoiceSet};

/// How a person's work zone was decided.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SampleOutcome {
    /// Drawn from the cohort's distribution.
    Sampled(ZoneId),
    /// The choice set was empty; the home zone was used instead.
    Fallback(ZoneId),
}

impl SampleOutcome {
    #[inline]
    pub fn zone(self) -> ZoneId {
        match self {
            SampleOutcome::Sampled(z) | SampleOutcome::Fallback(z) => z,
        }
    }

    #[inline]
    pub fn is_fallback(self) -> bool {
        matches!(self, SampleOutcome::Fallback(_))
    }
}

/// Draws destinations with a per-person RNG seeded from `base_seed` and the
/// person's own seed.
#[derive(Clone, Copy, Debug)]
pub struct Sampler {
    base_seed: u64,
}

impl Sampler {
    pub fn new(base_seed: u64) -> Self {
        Self { base_seed }
    }

    pub fn base_seed(&self) -> u64 {
        self.base_seed
    }

    /// The person's uniform variate in `[0, 1)`.  Depends only on the base
    /// seed and the person's seed.
    #[inline]
    pub fn draw(&self, person: &Person) -> f64 {
        PersonRng::new(self.base_seed, person.seed).uniform()
    }

    /// Choose a work zone for `person` and record it on the person.
    ///
    /// An empty choice set falls back to the home zone and logs a warning;
    /// it is never an error.  Errors come only from recording the zone on a
    /// person who is unemployed or already assigned.
    pub fn choose(&self, person: &mut Person, choice: &ChoiceSet) -> ChoiceResult<SampleOutcome> {
        let outcome = match choice {
            ChoiceSet::Available(dist) => SampleOutcome::Sampled(dist.select(self.draw(person))),
            ChoiceSet::Empty => {
                warn!(
                    person = %person.key(),
                    home_zone = person.home_zone.0,
                    "no available work zones; assigning home zone"
                );
                SampleOutcome::Fallback(person.home_zone)
            }
        };
        person.assign_work_zone(outcome.zone())?;
        Ok(outcome)
    }
}
