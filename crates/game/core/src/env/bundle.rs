//! In-memory registry implementing every oracle.
//!
//! `keystrike-content` fills a [`ContentBundle`] from RON files; tests build
//! small ones by hand.

use std::collections::BTreeMap;

use super::{
    AchievementDef, BuildingDef, CampaignNode, EconomyOracle, EnemyKind, EnemyKindDef,
    EnemyOracle, FactionDef, GameEnv, ItemDef, LexiconOracle, QuestDef, RecipeDef, ResearchDef,
    ResearchOracle, ScenarioOracle, SkillDef, SpellDef, TowerDef, TowerOracle, WaveProfile,
};
use crate::state::BuildingKind;

#[derive(Clone, Debug, Default)]
pub struct ContentBundle {
    pub enemies: BTreeMap<EnemyKind, EnemyKindDef>,
    pub towers: BTreeMap<String, TowerDef>,
    pub spells: BTreeMap<String, SpellDef>,
    pub buildings: BTreeMap<BuildingKind, BuildingDef>,
    pub recipes: BTreeMap<String, RecipeDef>,
    pub items: BTreeMap<String, ItemDef>,
    pub factions: BTreeMap<String, FactionDef>,
    pub research: BTreeMap<String, ResearchDef>,
    pub skills: BTreeMap<String, SkillDef>,
    pub lexicon: BTreeMap<String, Vec<String>>,
    pub profiles: BTreeMap<String, WaveProfile>,
    pub quests: Vec<QuestDef>,
    pub achievements: Vec<AchievementDef>,
    pub campaign: Vec<CampaignNode>,
}

impl ContentBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn env(&self) -> GameEnv<'_> {
        GameEnv::uniform(self)
    }

    pub fn with_enemy(mut self, def: EnemyKindDef) -> Self {
        self.enemies.insert(def.kind.clone(), def);
        self
    }

    pub fn with_tower(mut self, def: TowerDef) -> Self {
        self.towers.insert(def.id.clone(), def);
        self
    }

    pub fn with_spell(mut self, def: SpellDef) -> Self {
        self.spells.insert(def.id.clone(), def);
        self
    }

    pub fn with_building(mut self, def: BuildingDef) -> Self {
        self.buildings.insert(def.kind, def);
        self
    }

    pub fn with_recipe(mut self, def: RecipeDef) -> Self {
        self.recipes.insert(def.id.clone(), def);
        self
    }

    pub fn with_item(mut self, def: ItemDef) -> Self {
        self.items.insert(def.id.clone(), def);
        self
    }

    pub fn with_faction(mut self, def: FactionDef) -> Self {
        self.factions.insert(def.id.clone(), def);
        self
    }

    pub fn with_research(mut self, def: ResearchDef) -> Self {
        self.research.insert(def.id.clone(), def);
        self
    }

    pub fn with_skill(mut self, def: SkillDef) -> Self {
        self.skills.insert(def.id.clone(), def);
        self
    }

    pub fn with_lesson(mut self, lesson: impl Into<String>, words: Vec<String>) -> Self {
        self.lexicon.insert(lesson.into(), words);
        self
    }

    pub fn with_profile(mut self, def: WaveProfile) -> Self {
        self.profiles.insert(def.id.clone(), def);
        self
    }

    pub fn with_quest(mut self, def: QuestDef) -> Self {
        self.quests.push(def);
        self
    }

    pub fn with_achievement(mut self, def: AchievementDef) -> Self {
        self.achievements.push(def);
        self
    }

    pub fn with_campaign_node(mut self, node: CampaignNode) -> Self {
        self.campaign.push(node);
        self
    }
}

impl EnemyOracle for ContentBundle {
    fn enemy(&self, kind: &EnemyKind) -> Option<&EnemyKindDef> {
        self.enemies.get(kind)
    }

    fn kinds_up_to_tier(&self, max_tier: u8) -> Vec<EnemyKind> {
        self.enemies
            .values()
            .filter(|def| def.tier <= max_tier)
            .map(|def| def.kind.clone())
            .collect()
    }
}

impl TowerOracle for ContentBundle {
    fn tower(&self, id: &str) -> Option<&TowerDef> {
        self.towers.get(id)
    }

    fn spell(&self, id: &str) -> Option<&SpellDef> {
        self.spells.get(id)
    }

    fn spells(&self) -> Vec<&SpellDef> {
        self.spells.values().collect()
    }
}

impl EconomyOracle for ContentBundle {
    fn building(&self, kind: BuildingKind) -> Option<&BuildingDef> {
        self.buildings.get(&kind)
    }

    fn recipe(&self, id: &str) -> Option<&RecipeDef> {
        self.recipes.get(id)
    }

    fn item(&self, id: &str) -> Option<&ItemDef> {
        self.items.get(id)
    }

    fn faction(&self, id: &str) -> Option<&FactionDef> {
        self.factions.get(id)
    }

    fn factions(&self) -> Vec<&FactionDef> {
        self.factions.values().collect()
    }
}

impl ResearchOracle for ContentBundle {
    fn research(&self, id: &str) -> Option<&ResearchDef> {
        self.research.get(id)
    }

    fn research_all(&self) -> Vec<&ResearchDef> {
        self.research.values().collect()
    }

    fn skill(&self, id: &str) -> Option<&SkillDef> {
        self.skills.get(id)
    }
}

impl LexiconOracle for ContentBundle {
    fn words(&self, lesson: &str) -> &[String] {
        self.lexicon.get(lesson).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl ScenarioOracle for ContentBundle {
    fn profile(&self, id: &str) -> Option<&WaveProfile> {
        self.profiles.get(id)
    }

    fn quests(&self) -> &[QuestDef] {
        &self.quests
    }

    fn achievements(&self) -> &[AchievementDef] {
        &self.achievements
    }

    fn campaign_nodes(&self) -> &[CampaignNode] {
        &self.campaign
    }
}
