//! Traits describing read-only game data.
//!
//! Oracles expose the enemy, tower, economy, research, lexicon and scenario
//! tables. The [`GameEnv`] aggregate bundles them so subsystems can access
//! everything they need without coupling to a concrete registry, and
//! [`SimRng`] supplies the only source of randomness.
mod bundle;
mod economy;
mod enemies;
mod research;
mod rng;
mod scenario;
mod towers;

pub use bundle::ContentBundle;
pub use economy::{
    BuildingDef, Cost, EconomyOracle, FactionDef, ItemDef, ItemEffect, Output, Production,
    RecipeDef,
};
pub use enemies::{EnemyAbilities, EnemyKind, EnemyKindDef, EnemyOracle};
pub use research::{ResearchDef, ResearchOracle, SkillDef};
pub use rng::SimRng;
pub use scenario::{
    AchievementDef, CampaignNode, LexiconOracle, QuestCondition, QuestDef, ScenarioOracle,
    WaveProfile,
};
pub use towers::{SpellDef, SpellTarget, StatusApplication, TowerDef, TowerOracle};

/// Aggregates the read-only oracles required by the dispatcher and subsystems.
#[derive(Clone, Copy)]
pub struct GameEnv<'a> {
    enemies: &'a dyn EnemyOracle,
    towers: &'a dyn TowerOracle,
    economy: &'a dyn EconomyOracle,
    research: &'a dyn ResearchOracle,
    lexicon: &'a dyn LexiconOracle,
    scenario: &'a dyn ScenarioOracle,
}

impl<'a> GameEnv<'a> {
    pub fn new(
        enemies: &'a dyn EnemyOracle,
        towers: &'a dyn TowerOracle,
        economy: &'a dyn EconomyOracle,
        research: &'a dyn ResearchOracle,
        lexicon: &'a dyn LexiconOracle,
        scenario: &'a dyn ScenarioOracle,
    ) -> Self {
        Self {
            enemies,
            towers,
            economy,
            research,
            lexicon,
            scenario,
        }
    }

    /// Uses one registry for every oracle.
    pub fn uniform<T>(source: &'a T) -> Self
    where
        T: EnemyOracle
            + TowerOracle
            + EconomyOracle
            + ResearchOracle
            + LexiconOracle
            + ScenarioOracle,
    {
        Self::new(source, source, source, source, source, source)
    }

    pub fn enemies(&self) -> &'a dyn EnemyOracle {
        self.enemies
    }

    pub fn towers(&self) -> &'a dyn TowerOracle {
        self.towers
    }

    pub fn economy(&self) -> &'a dyn EconomyOracle {
        self.economy
    }

    pub fn research(&self) -> &'a dyn ResearchOracle {
        self.research
    }

    pub fn lexicon(&self) -> &'a dyn LexiconOracle {
        self.lexicon
    }

    pub fn scenario(&self) -> &'a dyn ScenarioOracle {
        self.scenario
    }
}

impl std::fmt::Debug for GameEnv<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEnv").finish_non_exhaustive()
    }
}
