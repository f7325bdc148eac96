//! Skill table loader.

use std::path::Path;

use serde::{Deserialize, Serialize};
use skill_core::SkillEffectDefinition;

use crate::loaders::{LoadResult, read_file};

/// Skill table structure for TOML files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillTable {
    #[serde(default)]
    pub skills: Vec<SkillEffectDefinition>,
}

/// Loader for skill definitions from TOML files.
pub struct SkillLoader;

impl SkillLoader {
    /// Load skill definitions from a TOML file.
    ///
    /// Every definition is validated; the first invalid one fails the load.
    pub fn load(path: &Path) -> LoadResult<Vec<SkillEffectDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    /// Skill table embedded in the crate.
    pub fn builtin() -> LoadResult<Vec<SkillEffectDefinition>> {
        Self::parse(include_str!("../../data/skills.toml"))
    }

    pub fn parse(content: &str) -> LoadResult<Vec<SkillEffectDefinition>> {
        let table: SkillTable = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse skill table TOML: {}", e))?;

        for skill in &table.skills {
            skill
                .validate()
                .map_err(|e| anyhow::anyhow!("Invalid skill '{}': {}", skill.name, e))?;
        }

        Ok(table.skills)
    }
}
