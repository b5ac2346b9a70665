//! Tower and spell table loader.

use std::collections::BTreeSet;
use std::path::Path;

use keystrike_core::{SpellDef, TowerDef};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron, read_file};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TowerCatalog {
    pub towers: Vec<TowerDef>,
    #[serde(default)]
    pub spells: Vec<SpellDef>,
}

pub struct TowerLoader;

impl TowerLoader {
    pub fn load(path: &Path) -> LoadResult<TowerCatalog> {
        Self::parse(&read_file(path)?)
    }

    /// Spell words must be unique so typing one is never ambiguous.
    pub fn parse(content: &str) -> LoadResult<TowerCatalog> {
        let catalog: TowerCatalog = parse_ron(content, "tower catalog")?;
        let mut words = BTreeSet::new();
        for spell in &catalog.spells {
            if !words.insert(spell.word.to_lowercase()) {
                anyhow::bail!("spell word '{}' is used twice", spell.word);
            }
        }
        for tower in &catalog.towers {
            if tower.cooldown_turns == 0 {
                anyhow::bail!("tower '{}' needs a cooldown of at least 1 turn", tower.id);
            }
        }
        Ok(catalog)
    }
}
