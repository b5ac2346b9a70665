use super::{EconomyError, spend_ap};
use crate::engine::{EventLog, SimContext};
use crate::state::{GameState, ResourceKind};
use crate::stats::EffectKey;

/// Spends one AP to gather `gather_base + roll(0..=gather_bonus_max)` units,
/// scaled by the production multiplier.
pub fn gather(
    state: &mut GameState,
    ctx: &SimContext<'_>,
    kind: ResourceKind,
    events: &mut EventLog,
) -> Result<(), EconomyError> {
    spend_ap(state)?;

    let roll = state
        .rng
        .roll_range(0, i64::from(ctx.config.gather_bonus_max)) as u32;
    let raw = ctx.config.gather_base + roll;
    let factor = ctx.modifiers(state).factor(EffectKey::Production);
    let amount = (f64::from(raw) * factor).floor().max(0.0) as u32;

    state.resources.credit(kind, amount);
    events.push(format!(
        "You gather {amount} {kind}. ({} AP left)",
        state.ap
    ));
    Ok(())
}
