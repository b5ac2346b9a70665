//! Common error infrastructure for keystrike-core.
//!
//! Domain-specific errors (e.g. `EconomyError`, `CombatError`) live next to
//! the subsystems that produce them. Every one of them is a *user* error:
//! the dispatcher reports it as a single event line and leaves the state
//! untouched. Missing data definitions are not errors at all (they fall back
//! to default stats with a warning) and invariant violations are clamped by
//! [`crate::invariants`].

/// Severity level of an error, used for categorization and logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The same command may succeed later (more gold, another phase, ...).
    ///
    /// Examples: insufficient resources, wrong phase, spell on cooldown
    Recoverable,

    /// The input itself is wrong and must change before retrying.
    ///
    /// Examples: unknown verb, unknown building, coordinates off the map
    Validation,

    /// Unexpected state inconsistency. Indicates a bug.
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }
}

/// Common trait for all keystrike-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl; the Display
///   text is what the player reads in the event log
/// - Classify severity based on recoverability, not impact
/// - Error codes are stable identifiers for tests and log filtering
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
