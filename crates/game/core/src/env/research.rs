use std::collections::BTreeMap;

use crate::stats::EffectKey;

/// A node in the research tree.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResearchDef {
    pub id: String,
    pub name: String,
    pub cost_gold: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub prerequisites: Vec<String>,
    /// Waves that must be survived while this research is active.
    pub waves_required: u32,
    /// Permanent multipliers `(1 + delta)` once completed.
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: BTreeMap<EffectKey, f64>,
}

/// A player skill unlocked with `learn`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillDef {
    pub id: String,
    pub name: String,
    pub cost_gold: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub requires: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: BTreeMap<EffectKey, f64>,
}

/// Research tree and skill table.
pub trait ResearchOracle: Send + Sync {
    fn research(&self, id: &str) -> Option<&ResearchDef>;

    /// All research nodes, ordered by id.
    fn research_all(&self) -> Vec<&ResearchDef>;

    fn skill(&self, id: &str) -> Option<&SkillDef>;
}
