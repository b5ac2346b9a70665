//! Content tables compiled into the binary.

use keystrike_core::{ContentBundle, GameConfig};

use crate::loaders::{
    ConfigLoader, EconomyLoader, EnemyLoader, LexiconLoader, LoadResult, ResearchLoader,
    ScenarioLoader, TowerLoader, factory::assemble,
};

pub const CONFIG: &str = include_str!("../data/game.toml");
pub const ENEMIES: &str = include_str!("../data/enemies.ron");
pub const TOWERS: &str = include_str!("../data/towers.ron");
pub const ECONOMY: &str = include_str!("../data/economy.ron");
pub const RESEARCH: &str = include_str!("../data/research.ron");
pub const LEXICON: &str = include_str!("../data/lexicon.ron");
pub const SCENARIO: &str = include_str!("../data/scenario.ron");

pub fn config() -> LoadResult<GameConfig> {
    ConfigLoader::parse(CONFIG)
}

pub fn bundle() -> LoadResult<ContentBundle> {
    Ok(assemble(
        EnemyLoader::parse(ENEMIES)?,
        TowerLoader::parse(TOWERS)?,
        EconomyLoader::parse(ECONOMY)?,
        ResearchLoader::parse(RESEARCH)?,
        LexiconLoader::parse(LEXICON)?,
        ScenarioLoader::parse(SCENARIO)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use keystrike_core::{
        BuildingKind, EconomyOracle, EnemyKind, EnemyOracle, LexiconOracle, ResearchOracle,
        ScenarioOracle, TowerOracle,
    };

    #[test]
    fn built_in_tables_parse_and_cross_reference() {
        let bundle = bundle().expect("built-in content");
        let config = config().expect("built-in config");

        assert!(bundle.tower(&config.default_tower).is_some());
        for kind in [
            BuildingKind::Farm,
            BuildingKind::LumberMill,
            BuildingKind::Quarry,
            BuildingKind::House,
            BuildingKind::Wall,
            BuildingKind::Market,
            BuildingKind::Tower,
        ] {
            assert!(bundle.building(kind).is_some(), "missing {kind}");
        }
        for profile in bundle.profiles.values() {
            assert!(!bundle.words(&profile.lesson_id).is_empty());
            for kind in &profile.kinds {
                assert!(bundle.enemy(kind).is_some(), "profile kind {kind}");
            }
        }
        for lesson in ["home_row", "top_row", "full"] {
            assert!(bundle.words(lesson).len() >= 8, "lesson {lesson}");
        }
        assert!(bundle.enemy(&EnemyKind::new("raider")).is_some());
        assert!(bundle.research("commerce").is_some());
        assert!(bundle.profile("first_night").is_some());
        assert_eq!(bundle.kinds_up_to_tier(1).len(), 2);
    }

    #[test]
    fn spell_words_never_collide_with_lesson_words() {
        let bundle = bundle().expect("built-in content");
        for spell in bundle.spells() {
            for words in bundle.lexicon.values() {
                assert!(!words.contains(&spell.word), "{} is a lesson word", spell.word);
            }
        }
    }
}
