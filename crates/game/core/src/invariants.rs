//! Invariant clamps.
//!
//! A violated invariant is a bug, not a user error: it trips a debug
//! assertion in debug builds and is clamped and logged in release builds so
//! a run keeps going with a visibly wrong number instead of crashing.

use crate::config::GameConfig;
use crate::state::GameState;

fn violation(what: &str, found: i64, clamped: i64) {
    tracing::error!(invariant = what, found, clamped, "invariant violated; clamping");
    debug_assert!(false, "invariant violated: {what} was {found}, clamped to {clamped}");
}

/// Clamps `value` into `[0, max]`.
pub fn clamp_u32(what: &str, value: u32, max: u32) -> u32 {
    if value > max {
        violation(what, i64::from(value), i64::from(max));
        return max;
    }
    value
}

/// Clamps a frame delta. Negative or non-finite deltas come from the caller,
/// so they are logged without asserting.
pub fn clamp_dt(dt: f64) -> f64 {
    if dt.is_finite() && dt >= 0.0 {
        return dt;
    }
    tracing::error!(dt, "invalid tick delta; clamping to 0");
    0.0
}

/// Checks the state-wide invariants after a dispatch.
pub fn enforce(state: &mut GameState, config: &GameConfig) {
    state.hp = clamp_u32("hp <= max_hp", state.hp, state.max_hp);

    let assigned: u32 = state.worker_assignments.values().sum();
    if assigned > state.worker_count {
        violation(
            "assigned workers <= worker_count",
            i64::from(assigned),
            i64::from(state.worker_count),
        );
        crate::economy::trim_assignments(state);
    }

    for enemy in &mut state.enemies {
        enemy.hp = clamp_u32("enemy hp <= max_hp", enemy.hp, enemy.max_hp);
    }

    for relation in state.relations.values_mut() {
        let clamped = config.clamp_relation(*relation);
        if clamped != *relation {
            violation("relation in range", i64::from(*relation), i64::from(clamped));
            *relation = clamped;
        }
    }

    // Always re-derived rather than asserted.
    state.refresh_prompt();
}
