//! Derived numbers: typing telemetry, combo scaling and effect multipliers.
//!
//! Both submodules are pure. [`TypingMetrics`] is the only stored piece and
//! lives on [`crate::GameState`]; [`Modifiers`] is recomputed from state and
//! the research oracle whenever a subsystem needs a multiplier.

pub mod modifiers;
pub mod typing;

pub use modifiers::{EffectKey, Modifiers};
pub use typing::{TypingMetrics, combo_multiplier, common_prefix_len};
