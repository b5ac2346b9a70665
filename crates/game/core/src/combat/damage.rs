//! Damage calculation and application.
//!
//! # Pipeline
//!
//! ```text
//! base_at_level = base × upgrade_multiplier^(level-1) × effect_multiplier
//! after_armor   = apply_damage_type(base_at_level, type, defense)   (≥ 0)
//! final         = max(1, round(after_armor × combo_multiplier × typing_bonus))
//! ```

use crate::state::{Affix, Enemy, StatusEffects, StatusKind};
use crate::stats::TypingMetrics;

// ============================================================================
// Damage Type
// ============================================================================

/// Damage type carried by towers, spells and the typed attack.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DamageType {
    /// Full armor. Frozen targets take ×1.25.
    Physical,
    /// Half armor. ×1.5 against Armored.
    Siege,
    /// Ignores armor. ×0.5 against Warded.
    Magical,
    /// Half armor. ×1.5 against Unholy, ×0.5 against Warded.
    Holy,
    /// Half armor. ×1.25 against Shocked, ×0.5 against Stormborn.
    Lightning,
    /// Ignores armor. ×0.25 against Plagued.
    Poison,
    /// Half armor. ×0.5 against Frostborn, ×1.5 against Fireborn.
    Cold,
    /// Half armor. ×0.5 against Fireborn, ×1.5 against Frostborn.
    Fire,
    /// Unchanged.
    Pure,
}

// ============================================================================
// Typing Bonus
// ============================================================================

/// Speed/accuracy bonus computed from live typing metrics only.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TypingBonus {
    #[default]
    None,
    /// `multiplier` while accuracy stays at or above `min_accuracy`.
    AccuracyGated { min_accuracy: f64, multiplier: f64 },
    /// `1 + min(max_bonus, chars_per_second × per_char_per_sec)`.
    Sustained {
        per_char_per_sec: f64,
        max_bonus: f64,
    },
}

impl TypingBonus {
    pub fn multiplier(&self, metrics: &TypingMetrics) -> f64 {
        self.multiplier_for(metrics.accuracy(), metrics.chars_per_second())
    }

    pub(crate) fn multiplier_for(&self, accuracy: f64, chars_per_second: f64) -> f64 {
        match *self {
            Self::None => 1.0,
            Self::AccuracyGated {
                min_accuracy,
                multiplier,
            } => {
                if accuracy >= min_accuracy {
                    multiplier.max(0.0)
                } else {
                    1.0
                }
            }
            Self::Sustained {
                per_char_per_sec,
                max_bonus,
            } => 1.0 + (chars_per_second * per_char_per_sec).clamp(0.0, max_bonus.max(0.0)),
        }
    }
}

// ============================================================================
// Defense
// ============================================================================

/// What a target brings to the damage calculation.
#[derive(Clone, Copy, Debug)]
pub struct DefenseProfile<'a> {
    pub armor: u32,
    pub affix: Option<Affix>,
    pub statuses: &'a StatusEffects,
}

impl<'a> DefenseProfile<'a> {
    pub fn of(enemy: &'a Enemy) -> Self {
        Self {
            armor: enemy.armor,
            affix: enemy.affix,
            statuses: &enemy.status_effects,
        }
    }
}

// ============================================================================
// Damage Calculation
// ============================================================================

/// Scales base damage by tower level.
pub fn base_damage_at_level(base: u32, upgrade_multiplier: f64, level: u32) -> f64 {
    let steps = level.saturating_sub(1).min(i32::MAX as u32) as i32;
    f64::from(base) * upgrade_multiplier.max(0.0).powi(steps)
}

/// Applies armor and type matchups. The result is never negative.
pub fn apply_damage_type(amount: f64, damage_type: DamageType, defense: &DefenseProfile<'_>) -> f64 {
    let mut armor = f64::from(defense.armor);
    if defense.statuses.has(StatusKind::Exposed) {
        armor /= 2.0;
    }
    let affix = defense.affix;
    let half = armor / 2.0;

    let result = match damage_type {
        DamageType::Physical => {
            let mut value = amount - armor;
            if defense.statuses.has(StatusKind::Frozen) {
                value *= 1.25;
            }
            value
        }
        DamageType::Siege => {
            let value = amount - half;
            if affix == Some(Affix::Armored) {
                value * 1.5
            } else {
                value
            }
        }
        DamageType::Magical => {
            if affix == Some(Affix::Warded) {
                amount * 0.5
            } else {
                amount
            }
        }
        DamageType::Holy => {
            let value = amount - half;
            match affix {
                Some(Affix::Unholy) => value * 1.5,
                Some(Affix::Warded) => value * 0.5,
                _ => value,
            }
        }
        DamageType::Lightning => {
            let mut value = amount - half;
            if defense.statuses.has(StatusKind::Shocked) {
                value *= 1.25;
            }
            if affix == Some(Affix::Stormborn) {
                value *= 0.5;
            }
            value
        }
        DamageType::Poison => {
            if affix == Some(Affix::Plagued) {
                amount * 0.25
            } else {
                amount
            }
        }
        DamageType::Cold => {
            let value = amount - half;
            match affix {
                Some(Affix::Frostborn) => value * 0.5,
                Some(Affix::Fireborn) => value * 1.5,
                _ => value,
            }
        }
        DamageType::Fire => {
            let value = amount - half;
            match affix {
                Some(Affix::Fireborn) => value * 0.5,
                Some(Affix::Frostborn) => value * 1.5,
                _ => value,
            }
        }
        DamageType::Pure => amount,
    };

    if result.is_nan() { 0.0 } else { result.max(0.0) }
}

/// Rounds and floors the scaled damage. Always at least 1.
pub fn final_damage(after_armor: f64, combo_multiplier: f64, typing_bonus: f64) -> u32 {
    let raw = after_armor * combo_multiplier * typing_bonus;
    if !raw.is_finite() {
        return 1;
    }
    raw.round().clamp(1.0, f64::from(u32::MAX)) as u32
}

/// Everything the pipeline needs about the attack side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DamageRequest {
    /// Already scaled by level and effect multipliers.
    pub base: f64,
    pub damage_type: DamageType,
    pub combo_multiplier: f64,
    pub typing_bonus: f64,
}

impl DamageRequest {
    pub fn new(base: f64, damage_type: DamageType) -> Self {
        Self {
            base,
            damage_type,
            combo_multiplier: 1.0,
            typing_bonus: 1.0,
        }
    }

    pub fn with_combo(mut self, combo_multiplier: f64) -> Self {
        self.combo_multiplier = combo_multiplier;
        self
    }

    pub fn with_typing_bonus(mut self, typing_bonus: f64) -> Self {
        self.typing_bonus = typing_bonus;
        self
    }
}

/// Runs the full pipeline against one target.
pub fn resolve_damage(request: &DamageRequest, defense: &DefenseProfile<'_>) -> u32 {
    let after_armor = apply_damage_type(request.base, request.damage_type, defense);
    final_damage(after_armor, request.combo_multiplier, request.typing_bonus)
}

/// Apply damage to current HP (clamped to 0).
pub fn apply_damage(current_hp: u32, damage: u32) -> u32 {
    current_hp.saturating_sub(damage)
}
