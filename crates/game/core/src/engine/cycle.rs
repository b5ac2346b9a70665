//! Day/night cycle: starting nights, running night turns and resolving
//! the end of a night.

use super::context::{EventLog, SimContext};
use super::progression;
use crate::combat::tower_volley;
use crate::economy::{begin_day_economy, research::advance_research};
use crate::state::{GameMode, GameState, Phase};
use crate::wave::{advance_enemies, begin_wave, fill_spawns};

/// Day -> Night. Spawns the opening enemies of the wave.
pub fn start_night(state: &mut GameState, ctx: &SimContext<'_>, events: &mut EventLog) {
    state.phase = Phase::Night;
    begin_wave(state, ctx, events);
    tracing::info!(day = state.day, total = state.night_wave_total, "night started");
    resolve_night(state, ctx, events);
}

/// One night turn: towers fire, enemies advance, reinforcements arrive.
pub fn run_night_turn(state: &mut GameState, ctx: &SimContext<'_>, events: &mut EventLog) {
    if state.phase != Phase::Night {
        return;
    }
    state.night_turn = state.night_turn.saturating_add(1);
    tower_volley(state, ctx, events);
    advance_enemies(state, ctx, events);
    fill_spawns(state, ctx, events);
    state.refresh_prompt();
    resolve_night(state, ctx, events);
}

/// Checks for defeat, then for a cleared night.
pub fn resolve_night(state: &mut GameState, ctx: &SimContext<'_>, events: &mut EventLog) {
    if state.phase != Phase::Night {
        return;
    }
    if state.hp == 0 {
        state.phase = Phase::GameOver;
        events.push(format!(
            "The gate falls on night {}. Game over after {} waves.",
            state.day, state.wave
        ));
        tracing::info!(day = state.day, waves = state.wave, "game over");
        return;
    }
    if state.night_spawn_remaining > 0 || !state.enemies.is_empty() {
        return;
    }

    state.wave = state.wave.saturating_add(1);
    events.push(format!("Dawn breaks. You survived night {}.", state.day));
    advance_research(state, ctx, events);

    let victorious = match state.mode {
        GameMode::Campaign => state.day >= ctx.config.victory_day,
        GameMode::VerticalSlice { .. } => true,
        GameMode::Endless => false,
    };
    if victorious {
        state.phase = Phase::Victory;
        events.push(format!("Victory! The settlement stands after {} waves.", state.wave));
        tracing::info!(day = state.day, waves = state.wave, "victory");
        return;
    }
    begin_day(state, ctx, events);
}

/// Night -> Day: new day, fresh action points, the morning economy.
pub fn begin_day(state: &mut GameState, ctx: &SimContext<'_>, events: &mut EventLog) {
    state.day = state.day.saturating_add(1);
    state.phase = Phase::Day;
    state.ap = ctx.config.ap_per_day;
    state.night_turn = 0;
    state.night_prompt.clear();

    events.push(format!("Day {} begins. You have {} AP.", state.day, state.ap));
    begin_day_economy(state, ctx, events);
    progression::unlock_campaign_nodes(state, ctx, events);
    tracing::info!(day = state.day, threat = state.threat, "day started");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::env::{ContentBundle, EnemyAbilities, EnemyKind, EnemyKindDef};

    fn content() -> ContentBundle {
        ContentBundle::new().with_enemy(EnemyKindDef {
            kind: EnemyKind::new("raider"),
            name: "Raider".into(),
            tier: 1,
            hp: 3,
            damage: 2,
            speed: 5,
            armor: 0,
            reward: 1,
            abilities: EnemyAbilities::empty(),
        })
    }

    #[test]
    fn undefended_nights_end_the_run() {
        let content = content();
        let config = GameConfig::default();
        let ctx = SimContext::new(content.env(), &config);
        let mut state = GameState::new("cycle", GameMode::Campaign, &config);
        state.hp = 1;
        let mut events = EventLog::new();

        start_night(&mut state, &ctx, &mut events);
        assert_eq!(state.phase, Phase::Night);
        for _ in 0..10 {
            run_night_turn(&mut state, &ctx, &mut events);
        }
        assert_eq!(state.phase, Phase::GameOver);
        assert_eq!(state.hp, 0);
    }

    #[test]
    fn cleared_nights_start_the_next_day() {
        let content = content();
        let config = GameConfig::default();
        let ctx = SimContext::new(content.env(), &config);
        let mut state = GameState::new("cycle", GameMode::Campaign, &config);
        state.phase = Phase::Night;
        state.ap = 0;
        let mut events = EventLog::new();

        resolve_night(&mut state, &ctx, &mut events);
        assert_eq!(state.phase, Phase::Day);
        assert_eq!(state.day, 2);
        assert_eq!(state.wave, 1);
        assert_eq!(state.ap, config.ap_per_day);
    }

    #[test]
    fn surviving_the_last_night_wins() {
        let content = content();
        let config = GameConfig::default().with_victory_day(1);
        let ctx = SimContext::new(content.env(), &config);
        let mut state = GameState::new("cycle", GameMode::Campaign, &config);
        state.phase = Phase::Night;
        let mut events = EventLog::new();

        resolve_night(&mut state, &ctx, &mut events);
        assert_eq!(state.phase, Phase::Victory);
        assert_eq!(state.day, 1);
    }
}
