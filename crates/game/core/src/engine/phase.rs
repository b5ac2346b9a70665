//! Phase gating.
//!
//! `Day -> Night -> Day`, with `Victory` and `GameOver` absorbing. Each
//! command or intent declares the phases it is legal in; the dispatcher
//! checks the rule before touching the state.

use crate::error::{ErrorSeverity, GameError};
use crate::state::Phase;

/// Phases in which an action is legal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhaseRule {
    Day,
    Night,
    /// Day or Night.
    Live,
    /// Including after the run has ended.
    Always,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PhaseError {
    #[error("You can only {action} during the day.")]
    DayOnly { action: &'static str },

    #[error("You can only {action} at night.")]
    NightOnly { action: &'static str },

    #[error("The run is over ({phase}). Type 'new' or 'restart' to play again.")]
    RunOver { phase: Phase },
}

impl GameError for PhaseError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DayOnly { .. } => "PHASE_DAY_ONLY",
            Self::NightOnly { .. } => "PHASE_NIGHT_ONLY",
            Self::RunOver { .. } => "PHASE_RUN_OVER",
        }
    }
}

impl PhaseRule {
    pub fn check(self, action: &'static str, phase: Phase) -> Result<(), PhaseError> {
        match self {
            PhaseRule::Always => Ok(()),
            _ if !phase.is_live() => Err(PhaseError::RunOver { phase }),
            PhaseRule::Live => Ok(()),
            PhaseRule::Day if phase == Phase::Day => Ok(()),
            PhaseRule::Day => Err(PhaseError::DayOnly { action }),
            PhaseRule::Night if phase == Phase::Night => Ok(()),
            PhaseRule::Night => Err(PhaseError::NightOnly { action }),
        }
    }
}
