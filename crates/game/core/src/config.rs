use crate::combat::DamageType;

/// Game configuration constants and tunable parameters.
///
/// Every field has a default so partial TOML documents only need to name the
/// values they override.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Settlement grid width in tiles.
    pub map_width: u32,
    /// Settlement grid height in tiles.
    pub map_height: u32,

    pub start_hp: u32,
    pub start_gold: u32,
    pub start_wood: u32,
    pub start_stone: u32,
    pub start_food: u32,
    pub start_workers: u32,
    /// Worker cap before any housing is built.
    pub base_max_workers: u32,
    /// Action points restored at the start of each day.
    pub ap_per_day: u32,

    /// Campaign day whose night, once survived, wins the game.
    pub victory_day: u32,

    /// The attack fired by a correctly typed word.
    pub typed_attack: TypedAttack,
    /// Tower type placed by `build tower x y` without an explicit type.
    pub default_tower: String,
    pub tower_max_level: u32,
    /// Gold per current level to upgrade a tower.
    pub tower_upgrade_gold: u32,

    pub spawn_distance: i32,
    /// Extra spawn distance rolled in `0..=spawn_jitter`.
    pub spawn_jitter: i32,
    /// Enemies spawned immediately when a night begins.
    pub initial_spawns: u32,
    pub max_live_enemies: u32,

    pub gather_base: u32,
    /// Extra gathered units rolled in `0..=gather_bonus_max`.
    pub gather_bonus_max: u32,
    pub hire_gold: u32,
    pub hire_food: u32,
    /// Food eaten per worker at the start of each day.
    pub food_upkeep: u32,
    pub explore_food_cost: u32,
    pub threat_per_day: u32,

    pub relation_min: i32,
    pub relation_max: i32,
    pub trade_threshold: i32,
    pub pact_threshold: i32,
    pub alliance_threshold: i32,
    /// Gold spent per relation point when gifting.
    pub gift_gold_per_point: u32,
    /// Relation gained when an expedition makes contact with a faction.
    pub contact_relation_gain: i32,
    /// Gold paid per allied faction each morning.
    pub alliance_gold: u32,

    /// Trade rates are expressed in thousandths to keep conversions exact.
    pub trade_base_permille: u32,
    pub trade_market_bonus_permille: u32,
    pub trade_cap_permille: u32,
    pub trade_agreement_bonus_permille: u32,
}

/// Damage profile of the attack fired when the player completes a word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypedAttack {
    pub base_damage: u32,
    pub damage_type: DamageType,
}

impl Default for TypedAttack {
    fn default() -> Self {
        Self {
            base_damage: 5,
            damage_type: DamageType::Physical,
        }
    }
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_STATUS_EFFECTS: usize = 6;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAP_WIDTH: u32 = 16;
    pub const DEFAULT_MAP_HEIGHT: u32 = 10;
    pub const DEFAULT_VICTORY_DAY: u32 = 20;

    pub fn new() -> Self {
        Self {
            map_width: Self::DEFAULT_MAP_WIDTH,
            map_height: Self::DEFAULT_MAP_HEIGHT,
            start_hp: 20,
            start_gold: 25,
            start_wood: 10,
            start_stone: 5,
            start_food: 10,
            start_workers: 1,
            base_max_workers: 3,
            ap_per_day: 3,
            victory_day: Self::DEFAULT_VICTORY_DAY,
            typed_attack: TypedAttack::default(),
            default_tower: "arrow".to_string(),
            tower_max_level: 5,
            tower_upgrade_gold: 10,
            spawn_distance: 10,
            spawn_jitter: 2,
            initial_spawns: 2,
            max_live_enemies: 4,
            gather_base: 3,
            gather_bonus_max: 2,
            hire_gold: 10,
            hire_food: 5,
            food_upkeep: 1,
            explore_food_cost: 2,
            threat_per_day: 1,
            relation_min: -100,
            relation_max: 100,
            trade_threshold: 10,
            pact_threshold: 30,
            alliance_threshold: 60,
            gift_gold_per_point: 5,
            contact_relation_gain: 5,
            alliance_gold: 2,
            trade_base_permille: 500,
            trade_market_bonus_permille: 100,
            trade_cap_permille: 900,
            trade_agreement_bonus_permille: 100,
        }
    }

    /// Returns the victory day override used by short scripted runs.
    pub fn with_victory_day(mut self, victory_day: u32) -> Self {
        self.victory_day = victory_day;
        self
    }

    /// Clamps a relation score into the configured range.
    pub fn clamp_relation(&self, relation: i32) -> i32 {
        relation.clamp(self.relation_min, self.relation_max)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
