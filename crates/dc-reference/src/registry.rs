//! Zone-catalog strategies and the registry that resolves them by name.
//!
//! # Pluggability
//!
//! The alternative set is chosen by a [`CatalogStrategy`].  Workers name the
//! strategy in configuration (`EngineConfig::zone_catalog`) and the
//! [`CatalogRegistry`] resolves the key once at startup.  Applications add
//! their own strategies with [`CatalogRegistry::register`] before the
//! initialization gate runs.

use std::collections::BTreeMap;

use dc_core::ZoneId;

use crate::{ReferenceError, ReferenceResult, Zone};

// ── CatalogStrategy ───────────────────────────────────────────────────────────

/// Decides which catalog zones are choice alternatives.
pub trait CatalogStrategy: Send + Sync {
    /// `externals` is sorted and deduplicated.
    fn is_alternative(&self, zone: &Zone, externals: &[ZoneId]) -> bool;
}

/// Every zone except those on the externals list.  The default.
pub struct InternalZones;

impl CatalogStrategy for InternalZones {
    fn is_alternative(&self, zone: &Zone, externals: &[ZoneId]) -> bool {
        externals.binary_search(&zone.id).is_err()
    }
}

/// Every zone, externals included.
pub struct AllZones;

impl CatalogStrategy for AllZones {
    fn is_alternative(&self, _zone: &Zone, _externals: &[ZoneId]) -> bool {
        true
    }
}

// ── CatalogRegistry ───────────────────────────────────────────────────────────

/// Name → strategy map.
pub struct CatalogRegistry {
    strategies: BTreeMap<String, Box<dyn CatalogStrategy>>,
}

impl Default for CatalogRegistry {
    /// Registry holding the built-in `"internal"` and `"all"` strategies.
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register("internal", InternalZones);
        registry.register("all", AllZones);
        registry
    }
}

impl CatalogRegistry {
    pub fn empty() -> Self {
        Self { strategies: BTreeMap::new() }
    }

    /// Register `strategy` under `key`, replacing any previous entry.
    pub fn register<S: CatalogStrategy + 'static>(&mut self, key: &str, strategy: S) -> &mut Self {
        self.strategies.insert(key.to_string(), Box::new(strategy));
        self
    }

    /// Look up a strategy by key.
    pub fn resolve(&self, key: &str) -> ReferenceResult<&dyn CatalogStrategy> {
        self.strategies
            .get(key.trim())
            .map(|s| s.as_ref())
            .ok_or_else(|| ReferenceError::UnknownStrategy(key.to_string()))
    }

    /// Registered keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.strategies.keys().map(String::as_str)
    }
}
