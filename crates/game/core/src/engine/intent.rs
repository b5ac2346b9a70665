use super::phase::PhaseRule;

/// Structured player intent.
///
/// Serialized adjacently tagged, e.g.
/// `{"kind": "defend_input", "payload": {"text": "fast"}}`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "kind", content = "payload", rename_all = "snake_case")
)]
pub enum Intent {
    /// A line typed during the night.
    DefendInput { text: String },
    CastSpell { spell: String },
    Build { building: String, x: i32, y: i32 },
    MovePlayer { dx: i32, dy: i32 },
    Wait,
}

impl Intent {
    /// Verb used in phase rejections.
    pub fn action(&self) -> &'static str {
        match self {
            Intent::DefendInput { .. } => "defend",
            Intent::CastSpell { .. } => "cast spells",
            Intent::Build { .. } => "build",
            Intent::MovePlayer { .. } => "move",
            Intent::Wait => "wait",
        }
    }

    pub fn phase_rule(&self) -> PhaseRule {
        match self {
            Intent::DefendInput { .. } | Intent::CastSpell { .. } | Intent::Wait => {
                PhaseRule::Night
            }
            Intent::Build { .. } | Intent::MovePlayer { .. } => PhaseRule::Day,
        }
    }
}
