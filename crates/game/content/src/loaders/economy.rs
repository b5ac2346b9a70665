//! Building, crafting and faction table loader.

use std::path::Path;

use keystrike_core::{BuildingDef, FactionDef, ItemDef, ItemEffect, RecipeDef};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron, read_file};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EconomyCatalog {
    #[serde(default)]
    pub buildings: Vec<BuildingDef>,
    #[serde(default)]
    pub recipes: Vec<RecipeDef>,
    #[serde(default)]
    pub items: Vec<ItemDef>,
    #[serde(default)]
    pub factions: Vec<FactionDef>,
}

pub struct EconomyLoader;

impl EconomyLoader {
    pub fn load(path: &Path) -> LoadResult<EconomyCatalog> {
        Self::parse(&read_file(path)?)
    }

    /// Every recipe must produce an item the catalog defines, and buff items
    /// must last at least one day.
    pub fn parse(content: &str) -> LoadResult<EconomyCatalog> {
        let catalog: EconomyCatalog = parse_ron(content, "economy catalog")?;
        for recipe in &catalog.recipes {
            if !catalog.items.iter().any(|item| item.id == recipe.output_item) {
                anyhow::bail!(
                    "recipe '{}' produces unknown item '{}'",
                    recipe.id,
                    recipe.output_item
                );
            }
        }
        for item in &catalog.items {
            if let ItemEffect::Buff { days: 0, .. } = item.effect {
                anyhow::bail!("item '{}' grants a buff lasting 0 days", item.id);
            }
        }
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recipes_must_name_known_items() {
        let result = EconomyLoader::parse(
            r#"(recipes: [(id: "potion", cost: (gold: 1), output_item: "elixir", quantity: 1)])"#,
        );
        assert!(result.unwrap_err().to_string().contains("elixir"));
    }

    #[test]
    fn buff_items_need_a_duration() {
        let result = EconomyLoader::parse(
            r#"(items: [(id: "dud", name: "Dud", effect: Buff(buff_id: "dud", days: 0, deltas: {}))])"#,
        );
        assert!(result.unwrap_err().to_string().contains("0 days"));
    }
}
