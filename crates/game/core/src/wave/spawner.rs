use strum::IntoEnumIterator;

use super::{WavePlan, assign_word, plan_for};
use crate::engine::{EventLog, SimContext};
use crate::env::{EnemyKind, EnemyKindDef};
use crate::state::{Affix, Enemy, GameState, Lifecycle, StatusEffects};

/// Kind used when the tier pool is empty.
const FALLBACK_KIND: &str = "raider";

/// Sets up the night's counters and spawns the opening enemies.
pub fn begin_wave(state: &mut GameState, ctx: &SimContext<'_>, events: &mut EventLog) {
    let plan = plan_for(state, ctx);
    state.night_wave_total = plan.total;
    state.night_spawn_remaining = plan.total;
    state.night_turn = 0;

    events.push(format!(
        "Night {} falls. {} enemies approach.",
        state.day, plan.total
    ));

    let opening = ctx.config.initial_spawns.min(plan.total);
    for _ in 0..opening {
        spawn_next(state, ctx, &plan, events);
    }
    state.refresh_prompt();
}

/// Spawns one enemy if the night still has any left. Returns true on spawn.
pub fn spawn_next(
    state: &mut GameState,
    ctx: &SimContext<'_>,
    plan: &WavePlan,
    events: &mut EventLog,
) -> bool {
    if state.night_spawn_remaining == 0 {
        return false;
    }
    let spawn_index = state
        .night_wave_total
        .saturating_sub(state.night_spawn_remaining) as usize;

    let kind = if plan.fixed_kinds.is_empty() {
        let pool = ctx.env.enemies().kinds_up_to_tier(plan.max_tier);
        match state.rng.pick(&pool) {
            Some(kind) => kind.clone(),
            None => {
                tracing::warn!(max_tier = plan.max_tier, "no enemy kinds unlocked; using fallback kind");
                EnemyKind::new(FALLBACK_KIND)
            }
        }
    } else {
        plan.fixed_kinds[spawn_index % plan.fixed_kinds.len()].clone()
    };

    let def = match ctx.env.enemies().enemy(&kind) {
        Some(def) => def.clone(),
        None => {
            tracing::warn!(kind = %kind, "enemy kind has no definition; using fallback stats");
            EnemyKindDef::fallback(&kind)
        }
    };

    let affix = if plan.affix_chance > 0.0 && state.rng.chance(plan.affix_chance) {
        let affixes: Vec<Affix> = Affix::iter().collect();
        state.rng.pick(&affixes).copied()
    } else {
        None
    };

    let mut armor = def.armor;
    let mut speed = def.speed;
    match affix {
        Some(Affix::Armored) => armor += Affix::ARMORED_BONUS,
        Some(Affix::Swift) => speed += Affix::SWIFT_BONUS,
        _ => {}
    }

    let hp = plan.hp.apply(def.hp).max(1);
    let jitter = state.rng.roll_range(0, i64::from(ctx.config.spawn_jitter.max(0)));
    let distance = ctx.config.spawn_distance.saturating_add(jitter as i32);
    let word = assign_word(state, ctx, &plan.lesson);
    let id = state.allocate_enemy_id();

    let label = match affix {
        Some(affix) => format!("{affix} {}", def.name),
        None => def.name.clone(),
    };
    events.push(format!("{label} '{word}' appears {distance} tiles out."));

    state.enemies.push(Enemy {
        id,
        kind,
        hp,
        max_hp: hp,
        armor,
        damage: def.damage,
        speed,
        distance,
        word,
        affix,
        status_effects: StatusEffects::empty(),
        abilities: def.abilities,
        reward: def.reward,
        lifecycle: Lifecycle::Spawned,
    });
    state.night_spawn_remaining -= 1;
    true
}

/// Spawns one enemy per night turn while the field is below the live cap.
pub fn fill_spawns(state: &mut GameState, ctx: &SimContext<'_>, events: &mut EventLog) {
    if state.night_spawn_remaining == 0 {
        return;
    }
    if state.live_enemy_count() >= ctx.config.max_live_enemies as usize {
        return;
    }
    let plan = plan_for(state, ctx);
    spawn_next(state, ctx, &plan, events);
    state.refresh_prompt();
}
