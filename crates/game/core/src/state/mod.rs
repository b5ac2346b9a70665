//! Authoritative game state representation.
//!
//! This module owns the data structures that describe a run: the economy,
//! the settlement grid, the night field and progression bookkeeping. Callers
//! clone or query this state but mutate it exclusively through
//! [`crate::GameController`].
mod common;
mod economy;
mod enemy;

use std::collections::{BTreeMap, BTreeSet};

pub use common::{
    AgreementKind, BuildingKind, GameMode, GridPos, Phase, ResourceKind, Resources,
    StructureIndex, TargetMode,
};
pub use economy::{Buff, Expedition, TowerInstance};
pub use enemy::{Affix, Enemy, Lifecycle, StatusEffect, StatusEffects, StatusKind};

use crate::config::GameConfig;
use crate::env::SimRng;
use crate::stats::TypingMetrics;

/// Canonical snapshot of the deterministic game state.
///
/// Every collection is ordered so iteration (and therefore RNG call order and
/// serialization) is reproducible.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    // ===== identity & progress =====
    pub day: u32,
    pub phase: Phase,
    pub mode: GameMode,
    /// Seed string the run was started with.
    pub rng_seed: String,
    pub rng: SimRng,
    pub current_act: u32,
    /// Waves survived.
    pub wave: u32,
    /// Incremented once per accepted dispatch.
    pub nonce: u64,

    // ===== resources =====
    pub hp: u32,
    pub max_hp: u32,
    pub gold: u32,
    pub threat: u32,
    pub resources: Resources,
    pub inventory: BTreeMap<String, u32>,
    /// Action points left today.
    pub ap: u32,

    // ===== population =====
    pub worker_count: u32,
    pub max_workers: u32,
    pub worker_assignments: BTreeMap<StructureIndex, u32>,

    // ===== structures =====
    pub buildings: BTreeMap<BuildingKind, u32>,
    pub structures: BTreeMap<StructureIndex, BuildingKind>,
    pub towers: BTreeMap<StructureIndex, TowerInstance>,
    pub player_pos: GridPos,

    // ===== combat =====
    pub enemies: Vec<Enemy>,
    pub next_enemy_id: u32,
    /// Mirrors the active enemy's word; empty when none is live.
    pub night_prompt: String,
    pub night_spawn_remaining: u32,
    pub night_wave_total: u32,
    pub night_turn: u32,
    pub enemies_defeated: u32,
    pub max_combo_ever: u32,
    pub target_mode: TargetMode,
    /// Seconds until each spell can be cast again.
    pub spell_cooldowns: BTreeMap<String, f64>,

    // ===== economy extensions =====
    pub active_research: Option<String>,
    pub research_progress: u32,
    pub completed_research: BTreeSet<String>,
    pub relations: BTreeMap<String, i32>,
    pub faction_agreements: BTreeMap<AgreementKind, BTreeSet<String>>,
    pub active_expeditions: Vec<Expedition>,
    pub next_expedition_id: u32,
    pub active_buffs: Vec<Buff>,

    pub typing: TypingMetrics,

    // ===== progression =====
    pub unlocked_skills: BTreeSet<String>,
    pub unlocked_badges: BTreeSet<String>,
    pub completed_quests: BTreeSet<String>,
    pub milestones: BTreeSet<String>,
    pub completed_nodes: BTreeSet<String>,
}

impl GameState {
    /// Creates a fresh day-one state from config starting values.
    pub fn new(seed: &str, mode: GameMode, config: &GameConfig) -> Self {
        Self {
            day: 1,
            phase: Phase::Day,
            mode,
            rng_seed: seed.to_string(),
            rng: SimRng::from_seed(seed),
            current_act: 1,
            wave: 0,
            nonce: 0,
            hp: config.start_hp,
            max_hp: config.start_hp,
            gold: config.start_gold,
            threat: 0,
            resources: Resources::new(config.start_wood, config.start_stone, config.start_food),
            inventory: BTreeMap::new(),
            ap: config.ap_per_day,
            worker_count: config.start_workers,
            max_workers: config.base_max_workers.max(config.start_workers),
            worker_assignments: BTreeMap::new(),
            buildings: BTreeMap::new(),
            structures: BTreeMap::new(),
            towers: BTreeMap::new(),
            player_pos: GridPos::new(
                (config.map_width / 2) as i32,
                (config.map_height / 2) as i32,
            ),
            enemies: Vec::new(),
            next_enemy_id: 1,
            night_prompt: String::new(),
            night_spawn_remaining: 0,
            night_wave_total: 0,
            night_turn: 0,
            enemies_defeated: 0,
            max_combo_ever: 0,
            target_mode: TargetMode::default(),
            spell_cooldowns: BTreeMap::new(),
            active_research: None,
            research_progress: 0,
            completed_research: BTreeSet::new(),
            relations: BTreeMap::new(),
            faction_agreements: BTreeMap::new(),
            active_expeditions: Vec::new(),
            next_expedition_id: 1,
            active_buffs: Vec::new(),
            typing: TypingMetrics::default(),
            unlocked_skills: BTreeSet::new(),
            unlocked_badges: BTreeSet::new(),
            completed_quests: BTreeSet::new(),
            milestones: BTreeSet::new(),
            completed_nodes: BTreeSet::new(),
        }
    }

    /// Index of the active enemy: smallest distance, ties broken by lowest id.
    pub fn active_enemy_index(&self) -> Option<usize> {
        self.enemies
            .iter()
            .enumerate()
            .filter(|(_, enemy)| enemy.is_live())
            .min_by_key(|(_, enemy)| (enemy.distance, enemy.id))
            .map(|(index, _)| index)
    }

    pub fn active_enemy(&self) -> Option<&Enemy> {
        self.active_enemy_index().map(|index| &self.enemies[index])
    }

    pub fn live_enemy_count(&self) -> usize {
        self.enemies.iter().filter(|enemy| enemy.is_live()).count()
    }

    /// Re-syncs `night_prompt` with the active enemy.
    pub fn refresh_prompt(&mut self) {
        self.night_prompt = self
            .active_enemy()
            .map(|enemy| enemy.word.clone())
            .unwrap_or_default();
    }

    /// Drops defeated and arrived enemies from the field.
    pub fn remove_finished_enemies(&mut self) {
        self.enemies.retain(Enemy::is_live);
    }

    /// Allocates the next enemy id. Ids are never reused within a run.
    pub fn allocate_enemy_id(&mut self) -> u32 {
        let id = self.next_enemy_id;
        self.next_enemy_id = self.next_enemy_id.saturating_add(1);
        id
    }

    pub fn building_count(&self, kind: BuildingKind) -> u32 {
        self.buildings.get(&kind).copied().unwrap_or(0)
    }

    pub fn total_structures(&self) -> u32 {
        self.structures.len() as u32
    }

    pub fn item_count(&self, item: &str) -> u32 {
        self.inventory.get(item).copied().unwrap_or(0)
    }

    pub fn has_agreement(&self, kind: AgreementKind, faction: &str) -> bool {
        self.faction_agreements
            .get(&kind)
            .is_some_and(|factions| factions.contains(faction))
    }

    pub fn agreement_count(&self, kind: AgreementKind) -> u32 {
        self.faction_agreements
            .get(&kind)
            .map(|factions| factions.len() as u32)
            .unwrap_or(0)
    }

    /// Workers not assigned to any building.
    pub fn available_workers(&self) -> u32 {
        let assigned: u32 = self.worker_assignments.values().sum();
        self.worker_count.saturating_sub(assigned)
    }

    /// Words held by live enemies.
    pub fn live_words(&self) -> BTreeSet<&str> {
        self.enemies
            .iter()
            .filter(|enemy| enemy.is_live())
            .map(|enemy| enemy.word.as_str())
            .collect()
    }
}
