//! Data-driven skill content.
//!
//! Provides loaders for the two content files the skill subsystem reads:
//! - Effect catalog (RON): the prototypes each effect pool is built from
//! - Skill table (TOML): skill definitions bound to effects at use time
//!
//! Built-in copies of both files are embedded for tools and tests that run
//! without a content directory.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{CatalogLoader, EffectCatalog, EffectEntry, LoadResult, SkillLoader, SkillTable};
