use crate::error::{ErrorSeverity, GameError};

/// Errors surfaced while resolving night actions.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CombatError {
    #[error("Type an enemy's word to attack.")]
    EmptyInput,

    #[error("Unknown spell '{0}'.")]
    UnknownSpell(String),

    #[error("{spell} is recharging ({seconds:.1}s left).")]
    SpellOnCooldown { spell: String, seconds: f64 },

    #[error("No enemies to target.")]
    NoTargets,
}

impl GameError for CombatError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::EmptyInput | Self::UnknownSpell(_) => ErrorSeverity::Validation,
            Self::SpellOnCooldown { .. } | Self::NoTargets => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyInput => "COMBAT_EMPTY_INPUT",
            Self::UnknownSpell(_) => "COMBAT_UNKNOWN_SPELL",
            Self::SpellOnCooldown { .. } => "COMBAT_SPELL_ON_COOLDOWN",
            Self::NoTargets => "COMBAT_NO_TARGETS",
        }
    }
}
