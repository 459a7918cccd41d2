//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sort
//! keys without ceremony.  The inner integer is `pub`; callers that index a
//! dense `Vec` by id should prefer the `.index()` helpers for clarity.

use std::fmt;

/// Generate a typed ID wrapper around an unsigned integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            #[inline(always)]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so unset IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Traffic analysis zone.  Zone ids are sparse in practice; the catalog
    /// maps them to dense positions.
    pub struct ZoneId(u32);
}

typed_id! {
    /// Aggregation of zones used as the first two calibration axes.
    pub struct DistrictId(u16);
}

typed_id! {
    /// Household identity as written by the population synthesizer.
    pub struct HouseholdId(u32);
}

typed_id! {
    /// Person number within a household.
    pub struct MemberId(u8);
}

typed_id! {
    /// Market segment; selects the skim layer used for distance and logsum.
    pub struct SegmentId(u8);
}

// ── Occupation ────────────────────────────────────────────────────────────────

/// Occupation code of a worker.
///
/// Codes are signed because the population files use `0` and negative values
/// for "no occupation".  Such persons have zero segmented employment in every
/// zone and therefore an empty choice set.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Occupation(pub i16);

impl Occupation {
    pub const NONE: Occupation = Occupation(0);

    /// `true` for positive codes, which index the employment-share table.
    #[inline]
    pub fn is_defined(self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for Occupation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Occupation({})", self.0)
    }
}
