//! Content factory for building a [`ContentBundle`] from data files.

use std::path::{Path, PathBuf};

use keystrike_core::{ContentBundle, GameConfig};

use crate::loaders::{
    ConfigLoader, EconomyCatalog, EconomyLoader, EnemyLoader, LexiconLoader, LoadResult,
    ResearchCatalog, ResearchLoader, ScenarioCatalog, ScenarioLoader, TowerCatalog, TowerLoader,
};

pub const CONFIG_FILE: &str = "game.toml";
pub const ENEMIES_FILE: &str = "enemies.ron";
pub const TOWERS_FILE: &str = "towers.ron";
pub const ECONOMY_FILE: &str = "economy.ron";
pub const RESEARCH_FILE: &str = "research.ron";
pub const LEXICON_FILE: &str = "lexicon.ron";
pub const SCENARIO_FILE: &str = "scenario.ron";

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── game.toml
/// ├── enemies.ron
/// ├── towers.ron
/// ├── economy.ron
/// ├── research.ron
/// ├── lexicon.ron
/// └── scenario.ron
/// ```
///
/// Any file that is missing falls back to the built-in copy, so a mod
/// directory only needs the tables it changes.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn load_config(&self) -> LoadResult<GameConfig> {
        match self.existing(CONFIG_FILE) {
            Some(path) => ConfigLoader::load(&path),
            None => crate::builtin::config(),
        }
    }

    pub fn load_bundle(&self) -> LoadResult<ContentBundle> {
        let enemies = match self.existing(ENEMIES_FILE) {
            Some(path) => EnemyLoader::load(&path)?,
            None => EnemyLoader::parse(crate::builtin::ENEMIES)?,
        };
        let towers = match self.existing(TOWERS_FILE) {
            Some(path) => TowerLoader::load(&path)?,
            None => TowerLoader::parse(crate::builtin::TOWERS)?,
        };
        let economy = match self.existing(ECONOMY_FILE) {
            Some(path) => EconomyLoader::load(&path)?,
            None => EconomyLoader::parse(crate::builtin::ECONOMY)?,
        };
        let research = match self.existing(RESEARCH_FILE) {
            Some(path) => ResearchLoader::load(&path)?,
            None => ResearchLoader::parse(crate::builtin::RESEARCH)?,
        };
        let lexicon = match self.existing(LEXICON_FILE) {
            Some(path) => LexiconLoader::load(&path)?,
            None => LexiconLoader::parse(crate::builtin::LEXICON)?,
        };
        let scenario = match self.existing(SCENARIO_FILE) {
            Some(path) => ScenarioLoader::load(&path)?,
            None => ScenarioLoader::parse(crate::builtin::SCENARIO)?,
        };

        let bundle = assemble(enemies, towers, economy, research, lexicon, scenario);
        tracing::info!(
            dir = %self.data_dir.display(),
            enemies = bundle.enemies.len(),
            towers = bundle.towers.len(),
            lessons = bundle.lexicon.len(),
            "content loaded"
        );
        Ok(bundle)
    }

    fn existing(&self, file: &str) -> Option<PathBuf> {
        let path = self.data_dir.join(file);
        path.is_file().then_some(path)
    }
}

/// Folds loaded catalogs into one registry.
pub fn assemble(
    enemies: Vec<keystrike_core::EnemyKindDef>,
    towers: TowerCatalog,
    economy: EconomyCatalog,
    research: ResearchCatalog,
    lexicon: std::collections::BTreeMap<String, Vec<String>>,
    scenario: ScenarioCatalog,
) -> ContentBundle {
    let mut bundle = ContentBundle::new();
    bundle = enemies.into_iter().fold(bundle, ContentBundle::with_enemy);
    bundle = towers.towers.into_iter().fold(bundle, ContentBundle::with_tower);
    bundle = towers.spells.into_iter().fold(bundle, ContentBundle::with_spell);
    bundle = economy.buildings.into_iter().fold(bundle, ContentBundle::with_building);
    bundle = economy.recipes.into_iter().fold(bundle, ContentBundle::with_recipe);
    bundle = economy.items.into_iter().fold(bundle, ContentBundle::with_item);
    bundle = economy.factions.into_iter().fold(bundle, ContentBundle::with_faction);
    bundle = research.research.into_iter().fold(bundle, ContentBundle::with_research);
    bundle = research.skills.into_iter().fold(bundle, ContentBundle::with_skill);
    bundle = lexicon
        .into_iter()
        .fold(bundle, |bundle, (lesson, words)| bundle.with_lesson(lesson, words));
    bundle = scenario.profiles.into_iter().fold(bundle, ContentBundle::with_profile);
    bundle = scenario.quests.into_iter().fold(bundle, ContentBundle::with_quest);
    bundle = scenario
        .achievements
        .into_iter()
        .fold(bundle, ContentBundle::with_achievement);
    scenario
        .campaign
        .into_iter()
        .fold(bundle, ContentBundle::with_campaign_node)
}
