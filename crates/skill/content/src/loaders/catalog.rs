//! Effect catalog loader.

use std::path::Path;

use serde::{Deserialize, Serialize};
use skill_core::EffectPrototype;

use crate::loaders::{LoadResult, read_file};

/// One effect pool to build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectEntry {
    pub prototype: EffectPrototype,
    /// Instances to pre-create. Falls back to the runtime default when absent.
    #[serde(default)]
    pub pool_capacity: Option<usize>,
}

impl EffectEntry {
    /// Pairs the prototype with its capacity, using `default_capacity` if unset.
    pub fn into_pool_entry(self, default_capacity: usize) -> (EffectPrototype, usize) {
        let capacity = self.pool_capacity.unwrap_or(default_capacity);
        (self.prototype, capacity)
    }
}

/// Effect catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectCatalog {
    pub effects: Vec<EffectEntry>,
}

/// Loader for the effect catalog from RON files.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load the effect catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<EffectEntry>> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    /// Catalog embedded in the crate.
    pub fn builtin() -> LoadResult<Vec<EffectEntry>> {
        Self::parse(include_str!("../../data/effects.ron"))
    }

    /// Parse catalog RON text.
    ///
    /// Blank names and non-positive radii are rejected. Duplicate names are
    /// kept; the runtime lets the last one win.
    pub fn parse(content: &str) -> LoadResult<Vec<EffectEntry>> {
        let catalog: EffectCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse effect catalog RON: {}", e))?;

        for entry in &catalog.effects {
            let prototype = &entry.prototype;
            if prototype.name.trim().is_empty() {
                anyhow::bail!("Effect prototype with blank name");
            }
            if !(prototype.volume.radius.is_finite() && prototype.volume.radius > 0.0) {
                anyhow::bail!(
                    "Effect '{}' has invalid radius {}",
                    prototype.name,
                    prototype.volume.radius
                );
            }
        }

        Ok(catalog.effects)
    }
}
