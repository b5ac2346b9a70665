//! Research tree and skill loader.

use std::path::Path;

use keystrike_core::{ResearchDef, SkillDef};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron, read_file};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResearchCatalog {
    #[serde(default)]
    pub research: Vec<ResearchDef>,
    #[serde(default)]
    pub skills: Vec<SkillDef>,
}

pub struct ResearchLoader;

impl ResearchLoader {
    pub fn load(path: &Path) -> LoadResult<ResearchCatalog> {
        Self::parse(&read_file(path)?)
    }

    /// Prerequisites and skill requirements must point inside the catalog.
    pub fn parse(content: &str) -> LoadResult<ResearchCatalog> {
        let catalog: ResearchCatalog = parse_ron(content, "research catalog")?;
        for def in &catalog.research {
            for prerequisite in &def.prerequisites {
                if !catalog.research.iter().any(|other| &other.id == prerequisite) {
                    anyhow::bail!("research '{}' requires unknown '{}'", def.id, prerequisite);
                }
            }
        }
        for skill in &catalog.skills {
            if let Some(required) = &skill.requires {
                if !catalog.skills.iter().any(|other| &other.id == required) {
                    anyhow::bail!("skill '{}' requires unknown '{}'", skill.id, required);
                }
            }
        }
        Ok(catalog)
    }
}
