use super::buildings::{building_def, structure_index};
use super::{EconomyError, try_debit};
use crate::engine::{EventLog, SimContext};
use crate::env::Cost;
use crate::state::{GameState, GridPos, ResourceKind};

pub fn assign_worker(
    state: &mut GameState,
    ctx: &SimContext<'_>,
    pos: GridPos,
    events: &mut EventLog,
) -> Result<(), EconomyError> {
    let index = structure_index(ctx, pos)?;
    let kind = *state
        .structures
        .get(&index)
        .ok_or(EconomyError::NoStructure { pos })?;
    if state.available_workers() == 0 {
        return Err(EconomyError::NoFreeWorkers);
    }
    let slots = building_def(ctx.env.economy(), kind).worker_slots;
    let assigned = state.worker_assignments.get(&index).copied().unwrap_or(0);
    if assigned >= slots {
        return Err(EconomyError::NoWorkerSlots { building: kind });
    }

    state.worker_assignments.insert(index, assigned + 1);
    events.push(format!(
        "Assigned a worker to the {kind} at {pos} ({}/{slots}).",
        assigned + 1
    ));
    Ok(())
}

pub fn unassign_worker(
    state: &mut GameState,
    ctx: &SimContext<'_>,
    pos: GridPos,
    events: &mut EventLog,
) -> Result<(), EconomyError> {
    let index = structure_index(ctx, pos)?;
    let assigned = state.worker_assignments.get(&index).copied().unwrap_or(0);
    if assigned == 0 {
        return Err(EconomyError::NoWorkersAssigned { pos });
    }
    if assigned == 1 {
        state.worker_assignments.remove(&index);
    } else {
        state.worker_assignments.insert(index, assigned - 1);
    }
    events.push(format!("A worker leaves the post at {pos}."));
    Ok(())
}

pub fn hire_worker(
    state: &mut GameState,
    ctx: &SimContext<'_>,
    events: &mut EventLog,
) -> Result<(), EconomyError> {
    if state.worker_count >= state.max_workers {
        return Err(EconomyError::HousingFull {
            max: state.max_workers,
        });
    }
    let cost = Cost::gold(ctx.config.hire_gold).with_resource(ResourceKind::Food, ctx.config.hire_food);
    try_debit(state, &cost)?;
    state.worker_count += 1;
    events.push(format!(
        "Hired a worker for {cost}. Workers: {}/{}.",
        state.worker_count, state.max_workers
    ));
    Ok(())
}

/// Removes assignments until they fit `worker_count`, newest structures first.
pub fn trim_assignments(state: &mut GameState) {
    let mut excess = state
        .worker_assignments
        .values()
        .sum::<u32>()
        .saturating_sub(state.worker_count);
    while excess > 0 {
        let Some((&index, &assigned)) = state.worker_assignments.iter().next_back() else {
            break;
        };
        let removed = assigned.min(excess);
        if removed == assigned {
            state.worker_assignments.remove(&index);
        } else {
            state.worker_assignments.insert(index, assigned - removed);
        }
        excess -= removed;
    }
}
