//! Offline tower calculator.
//!
//! Uses assumed typing presets instead of live metrics. [`PresetTyping`] has
//! no conversion into [`crate::stats::TypingMetrics`], so preset numbers can
//! never leak into a real volley.

use super::damage::{DamageRequest, DefenseProfile, base_damage_at_level, resolve_damage};
use crate::env::TowerDef;
use crate::state::{Affix, StatusEffects};

/// Assumed typing performance for previews.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PresetTyping {
    pub wpm: f64,
    pub accuracy: f64,
}

impl PresetTyping {
    pub const CASUAL: Self = Self {
        wpm: 30.0,
        accuracy: 0.85,
    };
    pub const STEADY: Self = Self {
        wpm: 50.0,
        accuracy: 0.93,
    };
    pub const EXPERT: Self = Self {
        wpm: 80.0,
        accuracy: 0.98,
    };

    fn chars_per_second(&self) -> f64 {
        self.wpm * 5.0 / 60.0
    }
}

/// Expected numbers for one tower against one target profile.
#[derive(Clone, Debug, PartialEq)]
pub struct TowerPreview {
    pub tower_id: String,
    pub level: u32,
    pub damage_per_hit: u32,
    pub hits_per_volley: u32,
    pub cooldown_turns: u32,
    /// Total damage per volley divided by the cooldown.
    pub damage_per_turn: f64,
}

pub fn preview_tower(
    def: &TowerDef,
    level: u32,
    typing: PresetTyping,
    target_armor: u32,
    target_affix: Option<Affix>,
) -> TowerPreview {
    let statuses = StatusEffects::empty();
    let defense = DefenseProfile {
        armor: target_armor,
        affix: target_affix,
        statuses: &statuses,
    };
    let bonus = def
        .typing_bonus
        .multiplier_for(typing.accuracy, typing.chars_per_second());
    let request = DamageRequest::new(
        base_damage_at_level(def.base_damage, def.upgrade_multiplier, level),
        def.damage_type,
    )
    .with_typing_bonus(bonus);
    let damage_per_hit = resolve_damage(&request, &defense);
    let hits = def.hits_per_attack.max(1);
    let cooldown = def.cooldown_turns.max(1);

    TowerPreview {
        tower_id: def.id.clone(),
        level,
        damage_per_hit,
        hits_per_volley: hits,
        cooldown_turns: cooldown,
        damage_per_turn: f64::from(damage_per_hit) * f64::from(hits) / f64::from(cooldown),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{DamageType, TypingBonus};

    #[test]
    fn preview_scales_dps_by_hits_not_hit_damage() {
        let def = TowerDef {
            id: "tesla".into(),
            name: "Tesla".into(),
            damage_type: DamageType::Lightning,
            base_damage: 4,
            upgrade_multiplier: 1.25,
            cooldown_turns: 2,
            hits_per_attack: 3,
            typing_bonus: TypingBonus::AccuracyGated {
                min_accuracy: 0.95,
                multiplier: 1.5,
            },
            applies: None,
        };

        let casual = preview_tower(&def, 1, PresetTyping::CASUAL, 0, None);
        assert_eq!(casual.damage_per_hit, 4);
        assert_eq!(casual.damage_per_turn, 6.0);

        let expert = preview_tower(&def, 1, PresetTyping::EXPERT, 0, None);
        assert_eq!(expert.damage_per_hit, 6);
        assert_eq!(expert.hits_per_volley, 3);
    }
}
