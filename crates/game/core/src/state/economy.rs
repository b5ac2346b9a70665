use std::collections::BTreeMap;

use crate::stats::EffectKey;

/// A tower placed on the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TowerInstance {
    pub tower_type: String,
    pub level: u32,
}

impl TowerInstance {
    pub fn new(tower_type: impl Into<String>) -> Self {
        Self {
            tower_type: tower_type.into(),
            level: 1,
        }
    }
}

/// Timed modifier from a consumed item.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Buff {
    pub buff_id: String,
    /// Decremented at each day start; removed at zero.
    pub remaining_days: u32,
    pub effect_deltas: BTreeMap<EffectKey, f64>,
}

/// Scouting party that returns with gold.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Expedition {
    pub id: u32,
    pub days_remaining: u32,
    pub reward_gold: u32,
}
