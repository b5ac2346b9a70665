use super::EnemyKind;

/// Fixed wave description for the vertical-slice mode.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaveProfile {
    pub id: String,
    pub start_day: u32,
    pub start_hp: u32,
    pub start_gold: u32,
    pub wave_spawn_total: u32,
    pub lesson_id: String,
    /// Spawn kinds, cycled in order.
    pub kinds: Vec<EnemyKind>,
}

/// Condition shared by quests and achievements.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QuestCondition {
    EnemiesDefeated(u32),
    StructuresBuilt(u32),
    GoldAtLeast(u32),
    ComboReached(u32),
    DayReached(u32),
    WavesSurvived(u32),
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuestDef {
    pub id: String,
    pub name: String,
    pub condition: QuestCondition,
    pub reward_gold: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AchievementDef {
    pub id: String,
    pub name: String,
    /// Badge id added to `unlocked_badges`.
    pub badge: String,
    pub condition: QuestCondition,
}

/// A node on the campaign map.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CampaignNode {
    pub id: String,
    pub act: u32,
    pub unlock_day: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub requires: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub reward_gold: u32,
}

/// Wave profiles, quests, achievements and the campaign map.
pub trait ScenarioOracle: Send + Sync {
    fn profile(&self, id: &str) -> Option<&WaveProfile>;

    fn quests(&self) -> &[QuestDef];

    fn achievements(&self) -> &[AchievementDef];

    fn campaign_nodes(&self) -> &[CampaignNode];
}

/// Typing lesson word pools.
pub trait LexiconOracle: Send + Sync {
    /// Words for a lesson; empty when the lesson is unknown.
    fn words(&self, lesson: &str) -> &[String];
}
