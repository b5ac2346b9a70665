use strum::IntoEnumIterator;

use super::diplomacy::adjust_relation;
use super::{EconomyError, credit_gold, spend_ap, try_debit_resource};
use crate::engine::{EventLog, SimContext};
use crate::state::{Expedition, GameState, ResourceKind};

const FIND_CHANCE: i64 = 40;
const EXPEDITION_CHANCE: i64 = 70;

/// Sends scouts beyond the walls: one AP plus food, and the threat rises.
///
/// A d100 roll decides the outcome: a resource cache, a gold expedition
/// that returns after a few days, or contact with a faction.
pub fn explore(
    state: &mut GameState,
    ctx: &SimContext<'_>,
    events: &mut EventLog,
) -> Result<(), EconomyError> {
    if state.ap == 0 {
        return Err(EconomyError::NoActionPoints);
    }
    try_debit_resource(state, ResourceKind::Food, ctx.config.explore_food_cost)?;
    spend_ap(state)?;
    state.threat = state.threat.saturating_add(1);

    let roll = state.rng.roll_range(1, 100);
    if roll <= FIND_CHANCE {
        let kinds: Vec<ResourceKind> = ResourceKind::iter().collect();
        let kind = state
            .rng
            .pick(&kinds)
            .copied()
            .unwrap_or(ResourceKind::Wood);
        let amount = state.rng.roll_range(2, 6) as u32;
        state.resources.credit(kind, amount);
        events.push(format!("Your scouts find a cache of {amount} {kind}."));
    } else if roll <= EXPEDITION_CHANCE {
        let days = state.rng.roll_range(1, 3) as u32;
        let reward_gold = state.rng.roll_range(5, 15) as u32;
        let id = state.next_expedition_id;
        state.next_expedition_id = state.next_expedition_id.saturating_add(1);
        state.active_expeditions.push(Expedition {
            id,
            days_remaining: days,
            reward_gold,
        });
        events.push(format!(
            "Your scouts set out on an expedition. They will return in {days} days."
        ));
    } else {
        let factions: Vec<String> = ctx
            .env
            .economy()
            .factions()
            .into_iter()
            .map(|def| def.id.clone())
            .collect();
        match state.rng.pick(&factions).cloned() {
            Some(faction) => {
                let now = adjust_relation(state, ctx, &faction, ctx.config.contact_relation_gain);
                events.push(format!(
                    "Your scouts make contact with {faction}. Relation is now {now}."
                ));
            }
            None => events.push("Your scouts return having met no one."),
        }
    }
    Ok(())
}

/// Counts expeditions down by a day and pays out the ones that return.
pub fn progress_expeditions(state: &mut GameState, events: &mut EventLog) {
    let mut returned = Vec::new();
    state.active_expeditions.retain_mut(|expedition| {
        expedition.days_remaining = expedition.days_remaining.saturating_sub(1);
        if expedition.days_remaining == 0 {
            returned.push(expedition.reward_gold);
            false
        } else {
            true
        }
    });
    for gold in returned {
        credit_gold(state, gold);
        events.push(format!("An expedition returns with {gold} gold."));
    }
}
