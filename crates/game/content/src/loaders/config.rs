//! Game configuration loader.

use std::path::Path;

use keystrike_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Fields missing from the document keep their compiled defaults.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        validate(&config)?;
        Ok(config)
    }
}

fn validate(config: &GameConfig) -> LoadResult<()> {
    if config.map_width == 0 || config.map_height == 0 {
        anyhow::bail!("map must be at least 1x1, got {}x{}", config.map_width, config.map_height);
    }
    if config.relation_min > config.relation_max {
        anyhow::bail!(
            "relation_min ({}) is above relation_max ({})",
            config.relation_min,
            config.relation_max
        );
    }
    if !(config.trade_threshold <= config.pact_threshold
        && config.pact_threshold <= config.alliance_threshold)
    {
        anyhow::bail!("diplomacy thresholds must rise from trade to pact to alliance");
    }
    if config.gift_gold_per_point == 0 {
        anyhow::bail!("gift_gold_per_point must be positive");
    }
    Ok(())
}
