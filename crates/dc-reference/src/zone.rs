//! Zones and the zone catalog.
//!
//! # Data layout
//!
//! Zones are stored in ascending `ZoneId` order.  Zone ids are sparse, so a
//! dense lookup table maps `ZoneId::index()` to the zone's position:
//!
//! ```text
//! position[zone.index()]  → index into `zones`, or u32::MAX if absent
//! ```
//!
//! Skim matrices are indexed by the same positions, so the hot loop never
//! hashes a zone id.
//!
//! The catalog also fixes the **alternative set**: the ordered subset of
//! zones (ascending id) that may be chosen as destinations.  Which zones
//! qualify is decided by a [`CatalogStrategy`] at build time.

use dc_core::{DistrictId, ZoneId};

use crate::{CatalogStrategy, ReferenceError, ReferenceResult};

const ABSENT: u32 = u32::MAX;

/// Largest accepted zone id.  The position table is sized by the largest id
/// in use, so this caps it at 64 MiB.
pub const MAX_ZONE_ID: ZoneId = ZoneId(16_777_215);

// ── Zone ──────────────────────────────────────────────────────────────────────

/// One traffic analysis zone.
#[derive(Clone, Debug, PartialEq)]
pub struct Zone {
    pub id:         ZoneId,
    pub district:   DistrictId,
    /// Employment per industry, in the catalog's industry order.
    pub employment: Vec<f64>,
}

impl Zone {
    /// Total employment across all industries.
    pub fn total_employment(&self) -> f64 {
        self.employment.iter().sum()
    }
}

// ── ZoneTable ─────────────────────────────────────────────────────────────────

/// Raw zone records as delivered by a reference source, before the catalog
/// is indexed and its alternative set chosen.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ZoneTable {
    pub industries: Vec<String>,
    pub zones:      Vec<Zone>,
}

// ── ZoneCatalog ───────────────────────────────────────────────────────────────

/// Immutable, indexed set of zones plus the ordered alternative set.
///
/// Do not construct directly; use [`ZoneCatalogBuilder`].
#[derive(Debug)]
pub struct ZoneCatalog {
    industries:   Vec<String>,
    zones:        Vec<Zone>,
    position:     Vec<u32>,
    alternatives: Vec<u32>,
    districts:    usize,
}

impl ZoneCatalog {
    pub fn zone_count(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Industry names; the order of every `Zone::employment` vector.
    pub fn industries(&self) -> &[String] {
        &self.industries
    }

    pub fn industry_index(&self, name: &str) -> Option<usize> {
        self.industries.iter().position(|i| i == name)
    }

    /// All zones in ascending id order.
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    /// Dense position of `id`, or `None` if the zone is not in the catalog.
    #[inline]
    pub fn position(&self, id: ZoneId) -> Option<usize> {
        match self.position.get(id.index()) {
            Some(&p) if p != ABSENT => Some(p as usize),
            _ => None,
        }
    }

    #[inline]
    pub fn contains(&self, id: ZoneId) -> bool {
        self.position(id).is_some()
    }

    pub fn zone(&self, id: ZoneId) -> Option<&Zone> {
        self.position(id).map(|p| &self.zones[p])
    }

    #[inline]
    pub fn zone_at(&self, position: usize) -> &Zone {
        &self.zones[position]
    }

    /// Positions of the alternative zones, ascending by zone id.
    pub fn alternative_positions(&self) -> &[u32] {
        &self.alternatives
    }

    /// Iterator over the alternative zones in catalog order.
    pub fn alternatives(&self) -> impl Iterator<Item = &Zone> + '_ {
        self.alternatives.iter().map(|&p| &self.zones[p as usize])
    }

    pub fn alternative_count(&self) -> usize {
        self.alternatives.len()
    }

    /// Number of districts (`max district id + 1`); the size of the first two
    /// calibration axes.
    pub fn district_count(&self) -> usize {
        self.districts
    }

    /// Largest zone id in the catalog, if any.
    pub fn max_zone_id(&self) -> Option<ZoneId> {
        self.zones.last().map(|z| z.id)
    }
}

// ── ZoneCatalogBuilder ────────────────────────────────────────────────────────

/// Incremental builder for [`ZoneCatalog`].
///
/// ```rust
/// use dc_core::{DistrictId, ZoneId};
/// use dc_reference::{AllZones, ZoneCatalogBuilder};
///
/// let mut b = ZoneCatalogBuilder::new(vec!["retail".into(), "office".into()]);
/// b.add_zone(ZoneId(2), DistrictId(0), vec![10.0, 5.0]).unwrap();
/// b.add_zone(ZoneId(1), DistrictId(1), vec![0.0, 40.0]).unwrap();
/// let catalog = b.build(&AllZones, &[]).unwrap();
///
/// assert_eq!(catalog.zone_count(), 2);
/// assert_eq!(catalog.position(ZoneId(1)), Some(0));
/// assert_eq!(catalog.district_count(), 2);
/// ```
pub struct ZoneCatalogBuilder {
    industries: Vec<String>,
    zones:      Vec<Zone>,
}

impl ZoneCatalogBuilder {
    pub fn new(industries: Vec<String>) -> Self {
        Self { industries, zones: Vec::new() }
    }

    /// Start from raw zone records, validating each one.
    pub fn from_table(table: ZoneTable) -> ReferenceResult<Self> {
        let mut b = Self::new(table.industries);
        for zone in table.zones {
            b.add_zone(zone.id, zone.district, zone.employment)?;
        }
        Ok(b)
    }

    /// Add a zone.  `employment` must have one value per industry.
    pub fn add_zone(
        &mut self,
        id:         ZoneId,
        district:   DistrictId,
        employment: Vec<f64>,
    ) -> ReferenceResult<()> {
        if !id.is_valid() {
            return Err(ReferenceError::Invalid(format!("zone id {} is reserved", id.0)));
        }
        if id > MAX_ZONE_ID {
            return Err(ReferenceError::Invalid(format!(
                "zone id {} exceeds the maximum of {}",
                id.0, MAX_ZONE_ID.0
            )));
        }
        if !district.is_valid() {
            return Err(ReferenceError::Invalid(format!("zone {id} has reserved district id")));
        }
        if employment.len() != self.industries.len() {
            return Err(ReferenceError::EmploymentWidth {
                zone:     id,
                expected: self.industries.len(),
                got:      employment.len(),
            });
        }
        if let Some(bad) = employment.iter().find(|e| !e.is_finite() || **e < 0.0) {
            return Err(ReferenceError::Invalid(format!("zone {id} has employment value {bad}")));
        }
        self.zones.push(Zone { id, district, employment });
        Ok(())
    }

    /// Index the zones and select the alternative set with `strategy`.
    ///
    /// `externals` lists zones outside the modelled area; every entry must be
    /// a zone added to this builder.
    pub fn build(
        mut self,
        strategy:  &dyn CatalogStrategy,
        externals: &[ZoneId],
    ) -> ReferenceResult<ZoneCatalog> {
        self.zones.sort_by_key(|z| z.id);
        if let Some(w) = self.zones.windows(2).find(|w| w[0].id == w[1].id) {
            return Err(ReferenceError::DuplicateZone(w[0].id));
        }

        let table_len = self.zones.last().map_or(0, |z| z.id.index() + 1);
        let mut position = vec![ABSENT; table_len];
        for (p, zone) in self.zones.iter().enumerate() {
            position[zone.id.index()] = p as u32;
        }

        let mut externals = externals.to_vec();
        externals.sort_unstable();
        externals.dedup();
        for &ext in &externals {
            if position.get(ext.index()).is_none_or(|&p| p == ABSENT) {
                return Err(ReferenceError::UnknownZone(ext));
            }
        }

        let alternatives = self
            .zones
            .iter()
            .enumerate()
            .filter(|(_, z)| strategy.is_alternative(z, &externals))
            .map(|(p, _)| p as u32)
            .collect();

        let districts = self
            .zones
            .iter()
            .map(|z| z.district.index() + 1)
            .max()
            .unwrap_or(0);

        Ok(ZoneCatalog {
            industries: self.industries,
            zones: self.zones,
            position,
            alternatives,
            districts,
        })
    }
}
