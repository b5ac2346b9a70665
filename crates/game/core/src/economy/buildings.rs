use super::{EconomyError, spend_ap, try_debit};
use crate::engine::{EventLog, SimContext};
use crate::env::{BuildingDef, Cost, EconomyOracle};
use crate::state::{BuildingKind, GameState, GridPos, StructureIndex, TowerInstance};

/// Looks up a building definition, falling back to defaults with a warning.
pub(crate) fn building_def(economy: &dyn EconomyOracle, kind: BuildingKind) -> BuildingDef {
    match economy.building(kind) {
        Some(def) => def.clone(),
        None => {
            tracing::warn!(building = %kind, "building has no definition; using fallback stats");
            BuildingDef::fallback(kind)
        }
    }
}

pub(crate) fn structure_index(
    ctx: &SimContext<'_>,
    pos: GridPos,
) -> Result<StructureIndex, EconomyError> {
    StructureIndex::from_pos(pos, ctx.config.map_width, ctx.config.map_height)
        .ok_or(EconomyError::OutOfBounds { pos })
}

/// Places a building. Towers take an optional type, defaulting to the
/// configured default tower.
pub fn build(
    state: &mut GameState,
    ctx: &SimContext<'_>,
    kind: BuildingKind,
    pos: GridPos,
    tower_type: Option<&str>,
    events: &mut EventLog,
) -> Result<(), EconomyError> {
    let index = structure_index(ctx, pos)?;
    if state.structures.contains_key(&index) {
        return Err(EconomyError::TileOccupied { pos });
    }

    let tower = if kind == BuildingKind::Tower {
        let tower_type = tower_type
            .map(str::to_lowercase)
            .unwrap_or_else(|| ctx.config.default_tower.clone());
        if ctx.env.towers().tower(&tower_type).is_none() {
            return Err(EconomyError::UnknownTowerType(tower_type));
        }
        Some(TowerInstance::new(tower_type))
    } else {
        None
    };

    let def = building_def(ctx.env.economy(), kind);
    if state.ap == 0 {
        return Err(EconomyError::NoActionPoints);
    }
    try_debit(state, &def.cost)?;
    spend_ap(state)?;

    state.structures.insert(index, kind);
    *state.buildings.entry(kind).or_insert(0) += 1;
    state.max_workers = state.max_workers.saturating_add(def.housing);

    let label = match &tower {
        Some(tower) => format!("{} tower", tower.tower_type),
        None => kind.to_string(),
    };
    if let Some(tower) = tower {
        state.towers.insert(index, tower);
    }
    events.push(format!("Built {label} at {pos} for {}.", def.cost));
    Ok(())
}

/// Gold to raise a tower from `level` to `level + 1`.
pub fn upgrade_cost(ctx: &SimContext<'_>, level: u32) -> u32 {
    ctx.config.tower_upgrade_gold.saturating_mul(level)
}

pub fn upgrade_tower(
    state: &mut GameState,
    ctx: &SimContext<'_>,
    pos: GridPos,
    events: &mut EventLog,
) -> Result<(), EconomyError> {
    let index = structure_index(ctx, pos)?;
    let level = match (state.structures.get(&index), state.towers.get(&index)) {
        (None, _) => return Err(EconomyError::NoStructure { pos }),
        (Some(_), None) => return Err(EconomyError::NotATower { pos }),
        (Some(_), Some(tower)) => tower.level,
    };
    let max = ctx.config.tower_max_level;
    if level >= max {
        return Err(EconomyError::TowerMaxLevel { max });
    }

    try_debit(state, &Cost::gold(upgrade_cost(ctx, level)))?;
    if let Some(tower) = state.towers.get_mut(&index) {
        tower.level += 1;
        events.push(format!(
            "Upgraded the {} tower at {pos} to level {}.",
            tower.tower_type, tower.level
        ));
    }
    Ok(())
}

/// Damage absorbed by walls from each enemy that reaches the base.
pub fn wall_defense(state: &GameState, economy: &dyn EconomyOracle) -> u32 {
    state
        .structures
        .values()
        .map(|kind| economy.building(*kind).map(|def| def.defense).unwrap_or(0))
        .sum()
}
