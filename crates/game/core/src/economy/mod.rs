//! Day-phase economy: stockpiles, buildings, workers, research, diplomacy,
//! trade, crafting, expeditions and the morning update.
//!
//! Every action validates completely before it mutates. Costs go through
//! [`try_debit`], which checks every component first so a failed payment
//! leaves all balances untouched.

mod buildings;
mod crafting;
mod daily;
pub mod diplomacy;
mod error;
mod expeditions;
pub mod research;
mod resources;
mod trade;
mod workers;

pub use buildings::{build, upgrade_tower, upgrade_cost, wall_defense};
pub use crafting::{craft, use_item};
pub use daily::begin_day_economy;
pub use diplomacy::DiplomacyError;
pub use error::EconomyError;
pub use expeditions::{explore, progress_expeditions};
pub use research::ResearchError;
pub use resources::gather;
pub use trade::{trade, trade_quote, trade_rate_permille};
pub use workers::{assign_worker, hire_worker, trim_assignments, unassign_worker};

use crate::env::Cost;
use crate::state::{GameState, ResourceKind};

/// Spends one action point.
pub fn spend_ap(state: &mut GameState) -> Result<(), EconomyError> {
    if state.ap == 0 {
        return Err(EconomyError::NoActionPoints);
    }
    state.ap -= 1;
    Ok(())
}

/// Fails with the first missing component, without mutating anything.
pub fn check_cost(state: &GameState, cost: &Cost) -> Result<(), EconomyError> {
    if state.gold < cost.gold {
        return Err(EconomyError::InsufficientGold {
            need: cost.gold,
            have: state.gold,
        });
    }
    for (kind, need) in cost.resources.iter() {
        let have = state.resources.get(kind);
        if have < need {
            return Err(EconomyError::InsufficientResource { kind, need, have });
        }
    }
    Ok(())
}

/// Atomically pays `cost`: either every component is debited or none is.
pub fn try_debit(state: &mut GameState, cost: &Cost) -> Result<(), EconomyError> {
    check_cost(state, cost)?;
    state.gold -= cost.gold;
    for (kind, amount) in cost.resources.iter() {
        *state.resources.get_mut(kind) -= amount;
    }
    Ok(())
}

/// Debits one resource, failing without mutation when short.
pub fn try_debit_resource(
    state: &mut GameState,
    kind: ResourceKind,
    amount: u32,
) -> Result<(), EconomyError> {
    let have = state.resources.get(kind);
    if have < amount {
        return Err(EconomyError::InsufficientResource {
            kind,
            need: amount,
            have,
        });
    }
    *state.resources.get_mut(kind) = have - amount;
    Ok(())
}

/// Saturating gold credit.
pub fn credit_gold(state: &mut GameState, amount: u32) {
    state.gold = state.gold.saturating_add(amount);
}
