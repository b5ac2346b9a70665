use crate::combat::{DamageType, TypingBonus};
use crate::state::StatusKind;

/// A status applied to every enemy a tower or spell hits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusApplication {
    pub kind: StatusKind,
    /// Night turns the status lasts.
    pub turns: u32,
}

/// Static stats for one tower type.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TowerDef {
    pub id: String,
    pub name: String,
    pub damage_type: DamageType,
    pub base_damage: u32,
    /// Damage scales by `upgrade_multiplier^(level - 1)`.
    pub upgrade_multiplier: f64,
    /// Fires on night turns divisible by this value.
    pub cooldown_turns: u32,
    /// Distinct targets hit per volley.
    pub hits_per_attack: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub typing_bonus: TypingBonus,
    #[cfg_attr(feature = "serde", serde(default))]
    pub applies: Option<StatusApplication>,
}

impl TowerDef {
    /// Default stats used when a placed tower's type has no definition.
    pub fn fallback(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: id.to_string(),
            damage_type: DamageType::Physical,
            base_damage: 2,
            upgrade_multiplier: 1.0,
            cooldown_turns: 1,
            hits_per_attack: 1,
            typing_bonus: TypingBonus::None,
            applies: None,
        }
    }
}

/// Which enemies a spell hits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpellTarget {
    All,
    #[default]
    Active,
}

/// A spell cast by typing its word at night.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellDef {
    pub id: String,
    /// The word that casts the spell. Never handed out as an enemy word.
    pub word: String,
    pub damage: u32,
    pub damage_type: DamageType,
    #[cfg_attr(feature = "serde", serde(default))]
    pub target: SpellTarget,
    #[cfg_attr(feature = "serde", serde(default))]
    pub applies: Option<StatusApplication>,
    pub cooldown_seconds: f64,
}

/// Tower and spell tables.
pub trait TowerOracle: Send + Sync {
    fn tower(&self, id: &str) -> Option<&TowerDef>;

    fn spell(&self, id: &str) -> Option<&SpellDef>;

    /// All spells, ordered by id.
    fn spells(&self) -> Vec<&SpellDef>;

    /// Looks a spell up by its casting word.
    fn spell_by_word(&self, word: &str) -> Option<&SpellDef> {
        self.spells().into_iter().find(|spell| spell.word == word)
    }
}
