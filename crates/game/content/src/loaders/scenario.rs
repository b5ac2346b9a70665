//! Wave profile, quest, achievement and campaign loader.

use std::path::Path;

use keystrike_core::{AchievementDef, CampaignNode, QuestDef, WaveProfile};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron, read_file};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenarioCatalog {
    #[serde(default)]
    pub profiles: Vec<WaveProfile>,
    #[serde(default)]
    pub quests: Vec<QuestDef>,
    #[serde(default)]
    pub achievements: Vec<AchievementDef>,
    #[serde(default)]
    pub campaign: Vec<CampaignNode>,
}

pub struct ScenarioLoader;

impl ScenarioLoader {
    pub fn load(path: &Path) -> LoadResult<ScenarioCatalog> {
        Self::parse(&read_file(path)?)
    }

    pub fn parse(content: &str) -> LoadResult<ScenarioCatalog> {
        let catalog: ScenarioCatalog = parse_ron(content, "scenario")?;
        for node in &catalog.campaign {
            for required in &node.requires {
                if !catalog.campaign.iter().any(|other| &other.id == required) {
                    anyhow::bail!("campaign node '{}' requires unknown '{}'", node.id, required);
                }
            }
        }
        Ok(catalog)
    }
}
