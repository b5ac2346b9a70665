//! Error types for the dispatch pipeline.

use super::command::CommandError;
use super::phase::PhaseError;
use crate::combat::CombatError;
use crate::economy::{DiplomacyError, EconomyError, ResearchError};
use crate::error::{ErrorSeverity, GameError};

/// Identifies which stage of the dispatch pipeline rejected a call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DispatchStage {
    Parse,
    PhaseCheck,
    Apply,
}

impl DispatchStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            DispatchStage::Parse => "parse",
            DispatchStage::PhaseCheck => "phase_check",
            DispatchStage::Apply => "apply",
        }
    }
}

/// Any user error a command or intent can produce.
///
/// The Display text is the single event line reported for a rejection.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum DispatchError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Phase(#[from] PhaseError),

    #[error(transparent)]
    Economy(#[from] EconomyError),

    #[error(transparent)]
    Research(#[from] ResearchError),

    #[error(transparent)]
    Diplomacy(#[from] DiplomacyError),

    #[error(transparent)]
    Combat(#[from] CombatError),
}

impl DispatchError {
    pub fn stage(&self) -> DispatchStage {
        match self {
            DispatchError::Command(_) => DispatchStage::Parse,
            DispatchError::Phase(_) => DispatchStage::PhaseCheck,
            _ => DispatchStage::Apply,
        }
    }
}

impl GameError for DispatchError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            DispatchError::Command(e) => e.severity(),
            DispatchError::Phase(e) => e.severity(),
            DispatchError::Economy(e) => e.severity(),
            DispatchError::Research(e) => e.severity(),
            DispatchError::Diplomacy(e) => e.severity(),
            DispatchError::Combat(e) => e.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            DispatchError::Command(e) => e.error_code(),
            DispatchError::Phase(e) => e.error_code(),
            DispatchError::Economy(e) => e.error_code(),
            DispatchError::Research(e) => e.error_code(),
            DispatchError::Diplomacy(e) => e.error_code(),
            DispatchError::Combat(e) => e.error_code(),
        }
    }
}
