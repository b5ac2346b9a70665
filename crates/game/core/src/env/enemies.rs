use std::fmt;

use bitflags::bitflags;

/// String identifier into the enemy-kind table.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EnemyKind(pub String);

impl EnemyKind {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EnemyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

bitflags! {
    /// Innate abilities copied from the kind definition onto each spawned enemy.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct EnemyAbilities: u8 {
        /// Heals 1 hp per night turn.
        const REGENERATING = 1 << 0;
        /// Advances one extra tile per night turn.
        const SWIFT        = 1 << 1;
        /// Ignores walls when reaching the base.
        const FLYING       = 1 << 2;
    }
}

/// Static stats for one enemy kind.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyKindDef {
    pub kind: EnemyKind,
    pub name: String,
    /// Kinds unlock by tier as days (or endless waves) progress.
    pub tier: u8,
    pub hp: u32,
    pub damage: u32,
    pub speed: u32,
    pub armor: u32,
    /// Gold paid when defeated.
    pub reward: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub abilities: EnemyAbilities,
}

impl EnemyKindDef {
    /// Default stats used when a referenced kind has no definition.
    pub fn fallback(kind: &EnemyKind) -> Self {
        Self {
            kind: kind.clone(),
            name: kind.0.clone(),
            tier: 1,
            hp: 3,
            damage: 1,
            speed: 1,
            armor: 0,
            reward: 1,
            abilities: EnemyAbilities::empty(),
        }
    }
}

/// Enemy-kind table.
pub trait EnemyOracle: Send + Sync {
    fn enemy(&self, kind: &EnemyKind) -> Option<&EnemyKindDef>;

    /// Kinds with `tier <= max_tier`, in a stable order.
    fn kinds_up_to_tier(&self, max_tier: u8) -> Vec<EnemyKind>;
}
