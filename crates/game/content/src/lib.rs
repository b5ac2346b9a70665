//! Data-driven content definitions and loaders.
//!
//! This crate houses the built-in game tables and provides loaders for
//! RON/TOML data files:
//! - Enemy kinds, towers and spells
//! - Buildings, recipes, items and factions
//! - The research tree and skills
//! - Lesson word lists
//! - Wave profiles, quests, achievements and the campaign map
//! - Game configuration (TOML)
//!
//! Content is consumed by the core through its oracle traits and never
//! appears in game state.

#[cfg(feature = "loaders")]
pub mod builtin;
#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, EconomyCatalog, EconomyLoader, EnemyLoader, LexiconLoader,
    LoadResult, ResearchCatalog, ResearchLoader, ScenarioCatalog, ScenarioLoader, TowerCatalog,
    TowerLoader,
};
