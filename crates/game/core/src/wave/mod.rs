//! Wave planning, spawning and enemy movement.
//!
//! Each mode has its own spawn policy:
//!
//! | Mode | Total | HP | Kind pool | Affix chance |
//! |---|---|---|---|---|
//! | Campaign | `2 + day + threat/3` | `+ day/3 + threat/4` | tiers `min(4, 1 + day/4)` | `min(0.4, 0.02·day)` from day 4 |
//! | Vertical slice | profile total | base | profile kinds, cycled | none |
//! | Endless | `3 + w + 2·⌊w/5⌋` | `base + ⌊base·0.2·(w-1)⌋` | widens at waves 3, 7, 15 | `min(0.5, 0.03·w)` from wave 5 |

mod advance;
mod spawner;
mod words;

pub use advance::advance_enemies;
pub use spawner::{begin_wave, fill_spawns, spawn_next};
pub use words::{FALLBACK_WORDS, assign_word};

use crate::engine::SimContext;
use crate::env::EnemyKind;
use crate::state::{GameMode, GameState};

/// How spawned hp is derived from the kind's base hp.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HpScaling {
    /// Flat bonus added to base hp.
    Bonus(u32),
    /// Endless growth for the given wave number.
    EndlessWave(u32),
}

impl HpScaling {
    pub fn apply(self, base: u32) -> u32 {
        match self {
            Self::Bonus(bonus) => base.saturating_add(bonus),
            Self::EndlessWave(wave) => endless_enemy_hp(base, wave),
        }
    }
}

/// Everything the spawner needs for the current night.
#[derive(Clone, Debug, PartialEq)]
pub struct WavePlan {
    pub total: u32,
    pub hp: HpScaling,
    pub max_tier: u8,
    pub affix_chance: f64,
    pub lesson: String,
    /// When non-empty, spawns cycle through these kinds in order.
    pub fixed_kinds: Vec<EnemyKind>,
}

// ============================================================================
// Campaign
// ============================================================================

pub fn campaign_wave_total(day: u32, threat: u32) -> u32 {
    day.saturating_add(2).saturating_add(threat / 3)
}

pub fn campaign_hp_bonus(day: u32, threat: u32) -> u32 {
    day / 3 + threat / 4
}

pub fn campaign_max_tier(day: u32) -> u8 {
    (1 + day / 4).min(4) as u8
}

pub fn campaign_affix_chance(day: u32) -> f64 {
    if day < 4 {
        return 0.0;
    }
    (0.02 * f64::from(day)).min(0.4)
}

// ============================================================================
// Endless
// ============================================================================

pub fn endless_wave_size(wave: u32) -> u32 {
    3 + wave + 2 * (wave / 5)
}

/// `base + ⌊base × 0.2 × (wave - 1)⌋`, computed in integers.
pub fn endless_enemy_hp(base: u32, wave: u32) -> u32 {
    let growth = u64::from(base) * u64::from(wave.saturating_sub(1)) / 5;
    u64::from(base)
        .saturating_add(growth)
        .min(u64::from(u32::MAX)) as u32
}

/// Kind pool widens in discrete steps at waves 3, 7 and 15.
pub fn endless_max_tier(wave: u32) -> u8 {
    match wave {
        0..=2 => 1,
        3..=6 => 2,
        7..=14 => 3,
        _ => 4,
    }
}

pub fn endless_affix_chance(wave: u32) -> f64 {
    if wave < 5 {
        return 0.0;
    }
    (0.03 * f64::from(wave)).min(0.5)
}

/// Lesson word pool for a day (or endless wave) number.
pub fn lesson_for_day(day: u32) -> &'static str {
    match day {
        0..=3 => "home_row",
        4..=7 => "top_row",
        _ => "full",
    }
}

/// Builds the plan for the night about to start (or in progress).
pub fn plan_for(state: &GameState, ctx: &SimContext<'_>) -> WavePlan {
    match &state.mode {
        GameMode::Campaign => campaign_plan(state),
        GameMode::VerticalSlice { profile_id } => match ctx.env.scenario().profile(profile_id) {
            Some(profile) => WavePlan {
                total: profile.wave_spawn_total,
                hp: HpScaling::Bonus(0),
                max_tier: 1,
                affix_chance: 0.0,
                lesson: profile.lesson_id.clone(),
                fixed_kinds: profile.kinds.clone(),
            },
            None => {
                tracing::warn!(profile = %profile_id, "wave profile missing; using campaign plan");
                campaign_plan(state)
            }
        },
        GameMode::Endless => {
            let wave = state.wave + 1;
            WavePlan {
                total: endless_wave_size(wave),
                hp: HpScaling::EndlessWave(wave),
                max_tier: endless_max_tier(wave),
                affix_chance: endless_affix_chance(wave),
                lesson: lesson_for_day(wave).to_string(),
                fixed_kinds: Vec::new(),
            }
        }
    }
}

fn campaign_plan(state: &GameState) -> WavePlan {
    WavePlan {
        total: campaign_wave_total(state.day, state.threat),
        hp: HpScaling::Bonus(campaign_hp_bonus(state.day, state.threat)),
        max_tier: campaign_max_tier(state.day),
        affix_chance: campaign_affix_chance(state.day),
        lesson: lesson_for_day(state.day).to_string(),
        fixed_kinds: Vec::new(),
    }
}
