use std::collections::BTreeMap;
use std::fmt;

use crate::state::{BuildingKind, ResourceKind, Resources};
use crate::stats::EffectKey;

/// Gold plus stockpile resources required by a build, recipe or upgrade.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Cost {
    pub gold: u32,
    pub resources: Resources,
}

impl Cost {
    pub fn gold(gold: u32) -> Self {
        Self {
            gold,
            resources: Resources::default(),
        }
    }

    pub fn with_resource(mut self, kind: ResourceKind, amount: u32) -> Self {
        *self.resources.get_mut(kind) = amount;
        self
    }

    pub fn is_free(&self) -> bool {
        self.gold == 0 && self.resources.is_empty()
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_free() {
            return f.write_str("free");
        }
        let mut parts = Vec::new();
        if self.gold > 0 {
            parts.push(format!("{} gold", self.gold));
        }
        for (kind, amount) in self.resources.iter() {
            parts.push(format!("{amount} {kind}"));
        }
        f.write_str(&parts.join(", "))
    }
}

/// What a producing building yields each morning.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Output {
    Resource(ResourceKind),
    Gold,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Production {
    pub output: Output,
    pub base: u32,
    pub per_worker: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuildingDef {
    pub kind: BuildingKind,
    pub cost: Cost,
    #[cfg_attr(feature = "serde", serde(default))]
    pub production: Option<Production>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub worker_slots: u32,
    /// Extra worker capacity granted while standing.
    #[cfg_attr(feature = "serde", serde(default))]
    pub housing: u32,
    /// Damage absorbed from each enemy that reaches the base.
    #[cfg_attr(feature = "serde", serde(default))]
    pub defense: u32,
}

impl BuildingDef {
    pub fn fallback(kind: BuildingKind) -> Self {
        Self {
            kind,
            cost: Cost::gold(10),
            production: None,
            worker_slots: 0,
            housing: 0,
            defense: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecipeDef {
    pub id: String,
    pub cost: Cost,
    pub output_item: String,
    pub quantity: u32,
}

/// What consuming an item does.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemEffect {
    /// Restores base hp up to `max_hp`.
    Heal(u32),
    /// Adds a timed buff.
    Buff {
        buff_id: String,
        days: u32,
        deltas: BTreeMap<EffectKey, f64>,
    },
    /// Advances the active research by this many waves.
    ResearchProgress(u32),
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDef {
    pub id: String,
    pub name: String,
    pub effect: ItemEffect,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FactionDef {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub starting_relation: i32,
}

/// Buildings, crafting and faction tables.
pub trait EconomyOracle: Send + Sync {
    fn building(&self, kind: BuildingKind) -> Option<&BuildingDef>;

    fn recipe(&self, id: &str) -> Option<&RecipeDef>;

    fn item(&self, id: &str) -> Option<&ItemDef>;

    fn faction(&self, id: &str) -> Option<&FactionDef>;

    /// All factions, ordered by id.
    fn factions(&self) -> Vec<&FactionDef>;
}
