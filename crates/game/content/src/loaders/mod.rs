//! Content loaders for reading game data from files.
//!
//! Each loader turns one RON/TOML document into core definition types. Every
//! loader has a `parse` entry point for in-memory text (used for the embedded
//! defaults) and a `load` entry point for files on disk.

pub mod config;
pub mod economy;
pub mod enemies;
pub mod factory;
pub mod lexicon;
pub mod research;
pub mod scenario;
pub mod towers;

pub use config::ConfigLoader;
pub use economy::{EconomyCatalog, EconomyLoader};
pub use enemies::EnemyLoader;
pub use factory::ContentFactory;
pub use lexicon::LexiconLoader;
pub use research::{ResearchCatalog, ResearchLoader};
pub use scenario::{ScenarioCatalog, ScenarioLoader};
pub use towers::{TowerCatalog, TowerLoader};

use std::path::Path;

use serde::de::DeserializeOwned;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Parses a RON document, naming `what` in the error.
pub(crate) fn parse_ron<T: DeserializeOwned>(content: &str, what: &str) -> LoadResult<T> {
    ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse {} RON: {}", what, e))
}
