//! Effect multipliers from research, skills and buffs.
//!
//! Research and skill effects stack multiplicatively as `Π(1 + delta)`.
//! Buff deltas for the same key are summed first and applied as one
//! `(1 + Σdelta)` factor.

use std::collections::BTreeMap;

use strum::IntoEnumIterator;

use crate::env::ResearchOracle;
use crate::state::GameState;

/// Keys an effect can modify.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum EffectKey {
    TowerDamage,
    TypingDamage,
    Production,
    GoldIncome,
    TradeRate,
}

/// Resolved multiplier per effect key for one state.
#[derive(Clone, Debug, PartialEq)]
pub struct Modifiers {
    factors: BTreeMap<EffectKey, f64>,
}

impl Modifiers {
    /// Collects every active effect. Unknown research or skill ids are
    /// skipped with a warning.
    pub fn collect(state: &GameState, research: &dyn ResearchOracle) -> Self {
        let mut factors: BTreeMap<EffectKey, f64> =
            EffectKey::iter().map(|key| (key, 1.0)).collect();

        for id in &state.completed_research {
            match research.research(id) {
                Some(def) => multiply_into(&mut factors, &def.effects),
                None => tracing::warn!(research = %id, "completed research has no definition"),
            }
        }
        for id in &state.unlocked_skills {
            match research.skill(id) {
                Some(def) => multiply_into(&mut factors, &def.effects),
                None => tracing::warn!(skill = %id, "unlocked skill has no definition"),
            }
        }

        let mut buff_sums: BTreeMap<EffectKey, f64> = BTreeMap::new();
        for buff in &state.active_buffs {
            for (key, delta) in &buff.effect_deltas {
                *buff_sums.entry(*key).or_insert(0.0) += delta;
            }
        }
        for (key, sum) in buff_sums {
            if let Some(factor) = factors.get_mut(&key) {
                *factor *= (1.0 + sum).max(0.0);
            }
        }

        Self { factors }
    }

    pub fn factor(&self, key: EffectKey) -> f64 {
        self.factors.get(&key).copied().unwrap_or(1.0)
    }
}

fn multiply_into(factors: &mut BTreeMap<EffectKey, f64>, effects: &BTreeMap<EffectKey, f64>) {
    for (key, delta) in effects {
        if let Some(factor) = factors.get_mut(key) {
            *factor *= (1.0 + delta).max(0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::env::{ContentBundle, ResearchDef, SkillDef};
    use crate::state::{Buff, GameMode};

    #[test]
    fn research_and_skills_multiply_buffs_sum() {
        let content = ContentBundle::new()
            .with_research(ResearchDef {
                id: "drills".into(),
                name: "Drills".into(),
                cost_gold: 10,
                prerequisites: vec![],
                waves_required: 1,
                effects: BTreeMap::from([(EffectKey::TypingDamage, 0.5)]),
            })
            .with_skill(SkillDef {
                id: "hands".into(),
                name: "Quick Hands".into(),
                cost_gold: 5,
                requires: None,
                effects: BTreeMap::from([(EffectKey::TypingDamage, 0.2)]),
            });
        let mut state = GameState::new("s", GameMode::Campaign, &GameConfig::default());
        state.completed_research.insert("drills".into());
        state.unlocked_skills.insert("hands".into());
        for id in ["a", "b"] {
            state.active_buffs.push(Buff {
                buff_id: id.into(),
                remaining_days: 1,
                effect_deltas: BTreeMap::from([(EffectKey::Production, 0.25)]),
            });
        }

        let modifiers = Modifiers::collect(&state, &content);
        assert!((modifiers.factor(EffectKey::TypingDamage) - 1.8).abs() < 1e-9);
        assert!((modifiers.factor(EffectKey::Production) - 1.5).abs() < 1e-9);
        assert_eq!(modifiers.factor(EffectKey::TowerDamage), 1.0);
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let content = ContentBundle::new();
        let mut state = GameState::new("s", GameMode::Campaign, &GameConfig::default());
        state.completed_research.insert("ghost".into());
        let modifiers = Modifiers::collect(&state, &content);
        assert_eq!(modifiers.factor(EffectKey::TowerDamage), 1.0);
    }
}
