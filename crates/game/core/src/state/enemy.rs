//! Enemies and the status effects that tick on them.
//!
//! # Turn-based Duration
//!
//! Effects store `remaining_turns`; each night turn decrements every effect
//! once and drops those that reach zero. Reapplying an effect keeps the
//! longer of the two durations.

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::env::{EnemyAbilities, EnemyKind};

/// Random modifier rolled onto some spawns.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Affix {
    /// +2 armor; Siege deals extra damage.
    Armored,
    /// +1 speed.
    Swift,
    /// Halves Magical and Holy damage.
    Warded,
    Fireborn,
    Frostborn,
    Stormborn,
    Plagued,
    Unholy,
}

impl Affix {
    pub const ARMORED_BONUS: u32 = 2;
    pub const SWIFT_BONUS: u32 = 1;
}

/// Conditions applied by towers and spells.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatusKind {
    /// 1 damage per turn.
    Burning,
    /// 1 damage per turn, ignoring armor.
    Poisoned,
    /// No movement; Physical damage ×1.25.
    Frozen,
    /// −1 speed.
    Slowed,
    /// Lightning damage ×1.25.
    Shocked,
    /// Armor halved before damage.
    Exposed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: StatusKind,
    pub remaining_turns: u32,
}

/// Active status effects on an enemy, bounded by [`GameConfig::MAX_STATUS_EFFECTS`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { GameConfig::MAX_STATUS_EFFECTS }>,
}

impl StatusEffects {
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    pub fn has(&self, kind: StatusKind) -> bool {
        self.effects
            .iter()
            .any(|e| e.kind == kind && e.remaining_turns > 0)
    }

    /// Adds an effect, or extends an existing one to the longer duration.
    ///
    /// New kinds are dropped silently once the set is full.
    pub fn apply(&mut self, kind: StatusKind, turns: u32) {
        if turns == 0 {
            return;
        }
        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == kind) {
            existing.remaining_turns = existing.remaining_turns.max(turns);
            return;
        }
        if !self.effects.is_full() {
            self.effects.push(StatusEffect {
                kind,
                remaining_turns: turns,
            });
        }
    }

    pub fn remove(&mut self, kind: StatusKind) {
        self.effects.retain(|e| e.kind != kind);
    }

    /// Decrements every effect and drops expired ones.
    pub fn tick(&mut self) {
        for effect in self.effects.iter_mut() {
            effect.remaining_turns = effect.remaining_turns.saturating_sub(1);
        }
        self.effects.retain(|e| e.remaining_turns > 0);
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

/// `Spawned → Advancing → (Defeated | ReachedBase)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Lifecycle {
    #[default]
    Spawned,
    Advancing,
    Defeated,
    ReachedBase,
}

impl Lifecycle {
    pub fn is_live(self) -> bool {
        matches!(self, Self::Spawned | Self::Advancing)
    }
}

/// A live enemy on the night field.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Enemy {
    /// Unique per run; never reused.
    pub id: u32,
    pub kind: EnemyKind,
    pub hp: u32,
    pub max_hp: u32,
    pub armor: u32,
    pub damage: u32,
    pub speed: u32,
    /// Tiles from the base. Reaching zero hits the base.
    pub distance: i32,
    /// The word the player types to strike this enemy.
    pub word: String,
    pub affix: Option<Affix>,
    pub status_effects: StatusEffects,
    pub abilities: EnemyAbilities,
    pub reward: u32,
    pub lifecycle: Lifecycle,
}

impl Enemy {
    pub fn is_live(&self) -> bool {
        self.lifecycle.is_live() && self.hp > 0
    }

    /// Tiles moved this turn after abilities and statuses.
    pub fn effective_speed(&self) -> u32 {
        if self.status_effects.has(StatusKind::Frozen) {
            return 0;
        }
        let mut speed = self.speed;
        if self.abilities.contains(EnemyAbilities::SWIFT) {
            speed += 1;
        }
        if self.status_effects.has(StatusKind::Slowed) {
            speed = speed.saturating_sub(1);
        }
        speed
    }
}
