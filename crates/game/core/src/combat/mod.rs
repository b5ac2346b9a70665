//! Combat resolution: damage math, targeting, typed input, towers and spells.
//!
//! The live path ([`resolve`], [`spells`]) reads typing bonuses from
//! `GameState::typing` only. [`preview`] is the offline calculator and works
//! from assumed presets.

pub mod damage;
mod error;
pub mod preview;
pub mod resolve;
pub mod spells;
pub mod targeting;

pub use damage::{
    DamageRequest, DamageType, DefenseProfile, TypingBonus, apply_damage, apply_damage_type,
    base_damage_at_level, final_damage, resolve_damage,
};
pub use error::CombatError;
pub use preview::{PresetTyping, TowerPreview, preview_tower};
pub use resolve::{resolve_typed_input, strike, tower_volley};
pub use targeting::select_targets;
