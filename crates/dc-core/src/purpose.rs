//! Travel purposes.
//!
//! The purpose is the third axis of the calibration-constant table.  The
//! engine assigns work locations, so [`Purpose::Work`] is the default, but
//! the table is loaded for every purpose so other destination models can
//! share it.

use std::str::FromStr;

use crate::DcError;

/// Activity purpose of the tour whose destination is being chosen.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Purpose {
    #[default]
    Work,
    School,
    Shop,
    Recreate,
    Other,
    /// Work-based sub-tour.
    WorkBased,
}

impl Purpose {
    /// Number of purposes; the size of the calibration table's third axis.
    pub const COUNT: usize = 6;

    pub const ALL: [Purpose; Purpose::COUNT] = [
        Purpose::Work,
        Purpose::School,
        Purpose::Shop,
        Purpose::Recreate,
        Purpose::Other,
        Purpose::WorkBased,
    ];

    /// Stable position along the calibration table's purpose axis.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Purpose::Work      => 0,
            Purpose::School    => 1,
            Purpose::Shop      => 2,
            Purpose::Recreate  => 3,
            Purpose::Other     => 4,
            Purpose::WorkBased => 5,
        }
    }

    /// One-letter code used in calibration files.
    pub fn code(self) -> &'static str {
        match self {
            Purpose::Work      => "w",
            Purpose::School    => "c",
            Purpose::Shop      => "s",
            Purpose::Recreate  => "r",
            Purpose::Other     => "o",
            Purpose::WorkBased => "b",
        }
    }
}

impl FromStr for Purpose {
    type Err = DcError;

    /// Accepts the one-letter code or the lowercase name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Purpose::ALL
            .into_iter()
            .find(|p| p.code().eq_ignore_ascii_case(s) || p.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| DcError::Parse(format!("unknown purpose {s:?}")))
    }
}

impl std::fmt::Display for Purpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Purpose::Work      => "work",
            Purpose::School    => "school",
            Purpose::Shop      => "shop",
            Purpose::Recreate  => "recreate",
            Purpose::Other     => "other",
            Purpose::WorkBased => "work_based",
        })
    }
}
