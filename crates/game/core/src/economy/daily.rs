use std::collections::BTreeMap;

use super::buildings::building_def;
use super::diplomacy::alliance_income;
use super::expeditions::progress_expeditions;
use super::workers::trim_assignments;
use crate::engine::{EventLog, SimContext};
use crate::env::Output;
use crate::state::{AgreementKind, GameState, ResourceKind};
use crate::stats::EffectKey;

/// Morning economy update, run once when a day begins.
///
/// Order: production, food upkeep, alliance income, buff expiry,
/// expeditions, threat growth.
pub fn begin_day_economy(state: &mut GameState, ctx: &SimContext<'_>, events: &mut EventLog) {
    produce(state, ctx, events);
    feed_workers(state, ctx, events);
    alliance_income(state, ctx, events);
    expire_buffs(state, events);
    progress_expeditions(state, events);

    let pacts = state.agreement_count(AgreementKind::NonAggression);
    let growth = ctx.config.threat_per_day.saturating_sub(pacts);
    state.threat = state.threat.saturating_add(growth);
}

fn produce(state: &mut GameState, ctx: &SimContext<'_>, events: &mut EventLog) {
    let modifiers = ctx.modifiers(state);
    let mut raw: BTreeMap<Option<ResourceKind>, u32> = BTreeMap::new();
    for (index, kind) in &state.structures {
        let Some(production) = building_def(ctx.env.economy(), *kind).production else {
            continue;
        };
        let workers = state.worker_assignments.get(index).copied().unwrap_or(0);
        let amount = production
            .base
            .saturating_add(production.per_worker.saturating_mul(workers));
        let key = match production.output {
            Output::Resource(resource) => Some(resource),
            Output::Gold => None,
        };
        let total = raw.entry(key).or_insert(0);
        *total = total.saturating_add(amount);
    }

    let mut parts = Vec::new();
    for (key, amount) in raw {
        let effect = if key.is_some() {
            EffectKey::Production
        } else {
            EffectKey::GoldIncome
        };
        let scaled = (f64::from(amount) * modifiers.factor(effect)).floor().max(0.0) as u32;
        if scaled == 0 {
            continue;
        }
        match key {
            Some(resource) => {
                state.resources.credit(resource, scaled);
                parts.push(format!("{scaled} {resource}"));
            }
            None => {
                state.gold = state.gold.saturating_add(scaled);
                parts.push(format!("{scaled} gold"));
            }
        }
    }
    if !parts.is_empty() {
        events.push(format!("Your buildings produce {}.", parts.join(", ")));
    }
}

fn feed_workers(state: &mut GameState, ctx: &SimContext<'_>, events: &mut EventLog) {
    let need = state.worker_count.saturating_mul(ctx.config.food_upkeep);
    if state.resources.food >= need {
        state.resources.food -= need;
        return;
    }

    state.resources.food = 0;
    if state.worker_count > 0 {
        state.worker_count -= 1;
        trim_assignments(state);
        events.push("Food runs out. A hungry worker leaves the settlement.");
        tracing::debug!(workers = state.worker_count, "worker left over food shortage");
    }
}

fn expire_buffs(state: &mut GameState, events: &mut EventLog) {
    let mut expired = Vec::new();
    state.active_buffs.retain_mut(|buff| {
        buff.remaining_days = buff.remaining_days.saturating_sub(1);
        if buff.remaining_days == 0 {
            expired.push(buff.buff_id.clone());
            false
        } else {
            true
        }
    });
    for buff in expired {
        events.push(format!("{buff} wears off."));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::env::{BuildingDef, ContentBundle, Production};
    use crate::state::{Buff, BuildingKind, GameMode, StructureIndex};

    fn content() -> ContentBundle {
        ContentBundle::new()
            .with_building(BuildingDef {
                production: Some(Production {
                    output: Output::Resource(ResourceKind::Food),
                    base: 2,
                    per_worker: 2,
                }),
                worker_slots: 2,
                ..BuildingDef::fallback(BuildingKind::Farm)
            })
            .with_building(BuildingDef {
                production: Some(Production {
                    output: Output::Gold,
                    base: 3,
                    per_worker: 0,
                }),
                ..BuildingDef::fallback(BuildingKind::Market)
            })
    }

    #[test]
    fn production_and_upkeep() {
        let content = content();
        let config = GameConfig::default();
        let ctx = SimContext::new(content.env(), &config);
        let mut state = GameState::new("daily", GameMode::Campaign, &config);
        state.worker_count = 2;
        state.resources.food = 0;
        state.gold = 0;
        state.structures.insert(StructureIndex(0), BuildingKind::Farm);
        state.structures.insert(StructureIndex(1), BuildingKind::Market);
        state.worker_assignments.insert(StructureIndex(0), 1);

        let mut events = EventLog::new();
        begin_day_economy(&mut state, &ctx, &mut events);
        // farm 2 + 2*1 = 4 food, minus 2 upkeep
        assert_eq!(state.resources.food, 2);
        assert_eq!(state.gold, 3);
        assert_eq!(state.worker_count, 2);
        assert_eq!(state.threat, config.threat_per_day);
        assert_eq!(events.lines()[0], "Your buildings produce 3 gold, 4 food.");
    }

    #[test]
    fn shortage_sends_a_worker_away() {
        let content = ContentBundle::new();
        let config = GameConfig::default();
        let ctx = SimContext::new(content.env(), &config);
        let mut state = GameState::new("daily", GameMode::Campaign, &config);
        state.worker_count = 3;
        state.resources.food = 1;
        state.worker_assignments.insert(StructureIndex(2), 3);

        let mut events = EventLog::new();
        begin_day_economy(&mut state, &ctx, &mut events);
        assert_eq!(state.resources.food, 0);
        assert_eq!(state.worker_count, 2);
        assert_eq!(state.worker_assignments.get(&StructureIndex(2)), Some(&2));
    }

    #[test]
    fn buffs_expire_and_pacts_slow_threat() {
        let content = ContentBundle::new();
        let config = GameConfig::default();
        let ctx = SimContext::new(content.env(), &config);
        let mut state = GameState::new("daily", GameMode::Campaign, &config);
        state.active_buffs.push(Buff {
            buff_id: "rally".into(),
            remaining_days: 1,
            effect_deltas: BTreeMap::new(),
        });
        state
            .faction_agreements
            .entry(AgreementKind::NonAggression)
            .or_default()
            .insert("northwatch".into());

        let mut events = EventLog::new();
        begin_day_economy(&mut state, &ctx, &mut events);
        assert!(state.active_buffs.is_empty());
        assert!(events.lines().contains(&"rally wears off.".to_string()));
        assert_eq!(state.threat, 0);
    }

    #[test]
    fn production_totals_saturate() {
        let content = ContentBundle::new().with_building(BuildingDef {
            production: Some(Production {
                output: Output::Gold,
                base: u32::MAX,
                per_worker: 0,
            }),
            ..BuildingDef::fallback(BuildingKind::Market)
        });
        let config = GameConfig::default();
        let ctx = SimContext::new(content.env(), &config);
        let mut state = GameState::new("daily", GameMode::Campaign, &config);
        state.gold = 0;
        state.structures.insert(StructureIndex(0), BuildingKind::Market);
        state.structures.insert(StructureIndex(1), BuildingKind::Market);

        let mut events = EventLog::new();
        begin_day_economy(&mut state, &ctx, &mut events);
        assert_eq!(state.gold, u32::MAX);
    }
}
