//! Deterministic simulation core for a typing-combat defense game.
//!
//! `keystrike-core` owns the rules: the day economy, the night battle, wave
//! planning, research, diplomacy and progression. It exposes pure APIs that a
//! frontend drives with text commands, typed intents and wall-clock ticks.
//! All state mutation flows through [`engine::GameController`], and supporting
//! crates depend on the types re-exported here.
pub mod combat;
pub mod config;
pub mod economy;
pub mod engine;
pub mod env;
pub mod error;
pub mod invariants;
#[cfg(feature = "serde")]
pub mod snapshot;
pub mod state;
pub mod stats;
pub mod wave;

pub use combat::{CombatError, DamageType, TypingBonus};
pub use config::{GameConfig, TypedAttack};
pub use economy::{DiplomacyError, EconomyError, ResearchError};
pub use engine::{
    Command, CommandError, DispatchError, DispatchStage, EventLog, GameController, Intent,
    PhaseError, PhaseRule, SimContext,
};
pub use env::{
    AchievementDef, BuildingDef, CampaignNode, ContentBundle, Cost, EconomyOracle, EnemyAbilities,
    EnemyKind, EnemyKindDef, EnemyOracle, FactionDef, GameEnv, ItemDef, ItemEffect,
    LexiconOracle, Output, Production, QuestCondition, QuestDef, RecipeDef, ResearchDef,
    ResearchOracle, ScenarioOracle, SimRng, SkillDef, SpellDef, SpellTarget, StatusApplication,
    TowerDef, TowerOracle, WaveProfile,
};
pub use error::{ErrorSeverity, GameError};
pub use state::{
    AgreementKind, BuildingKind, Enemy, GameMode, GameState, GridPos, Phase, ResourceKind,
    Resources, StructureIndex, TargetMode,
};
pub use stats::{EffectKey, Modifiers, TypingMetrics};
