//! Enemy-kind table loader.

use std::path::Path;

use keystrike_core::EnemyKindDef;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron, read_file};

/// Enemy catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyCatalog {
    pub enemies: Vec<EnemyKindDef>,
}

/// Loader for enemy kinds from RON files.
pub struct EnemyLoader;

impl EnemyLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<EnemyKindDef>> {
        Self::parse(&read_file(path)?)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<EnemyKindDef>> {
        let catalog: EnemyCatalog = parse_ron(content, "enemy catalog")?;
        for def in &catalog.enemies {
            if def.tier == 0 {
                anyhow::bail!("enemy kind '{}' has tier 0; tiers start at 1", def.kind);
            }
        }
        Ok(catalog.enemies)
    }
}
