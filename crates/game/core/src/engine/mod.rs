//! Dispatch pipeline and the day/night cycle.
//!
//! The [`GameController`] is the single owner of [`GameState`]. Commands and
//! intents flow through the same stages:
//! parse -> phase check -> apply -> progression and invariants.
//! A rejection at any stage leaves the state exactly as it was and reports a
//! single event line. Accepted dispatches bump `state.nonce`, which is the
//! only change signal callers need.

mod command;
mod context;
mod cycle;
mod errors;
mod intent;
mod phase;
pub mod progression;
mod status;

pub use command::{Command, CommandError, VERBS, VerbHelp, help_lines};
pub use context::{EventLog, SimContext};
pub use cycle::{begin_day, resolve_night, run_night_turn, start_night};
pub use errors::{DispatchError, DispatchStage};
pub use intent::Intent;
pub use phase::{PhaseError, PhaseRule};
pub use status::{preview_lines, research_lines, status_lines};

use std::str::FromStr;

use crate::combat::{CombatError, resolve_typed_input, spells};
use crate::config::GameConfig;
use crate::economy::{self, EconomyError, diplomacy, research};
use crate::env::GameEnv;
use crate::error::GameError;
use crate::invariants;
use crate::state::{BuildingKind, GameMode, GameState, Phase};

/// Authoritative owner of a run.
pub struct GameController<'a> {
    ctx: SimContext<'a>,
    state: GameState,
}

impl<'a> GameController<'a> {
    /// Creates a controller with a fresh run. Returns the opening events.
    pub fn new(
        env: GameEnv<'a>,
        config: &'a GameConfig,
        seed: &str,
        mode: GameMode,
    ) -> (Self, Vec<String>) {
        let ctx = SimContext::new(env, config);
        let (state, events) = fresh_state(&ctx, seed, mode);
        (Self { ctx, state }, events.into_lines())
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn context(&self) -> &SimContext<'a> {
        &self.ctx
    }

    /// Replaces the state wholesale, e.g. from a decoded save.
    pub fn restore(&mut self, state: GameState) {
        tracing::debug!(day = state.day, nonce = state.nonce, "state restored");
        self.state = state;
    }

    /// Starts a new run. The nonce keeps counting so observers see a change.
    pub fn new_game(&mut self, seed: &str, mode: GameMode) -> Vec<String> {
        let nonce = self.state.nonce;
        let (mut state, events) = fresh_state(&self.ctx, seed, mode);
        state.nonce = nonce.saturating_add(1);
        tracing::info!(seed, mode = %state.mode, "new game");
        self.state = state;
        events.into_lines()
    }

    /// Restarts with the current seed and mode. Vertical slices replay
    /// identically.
    pub fn restart(&mut self) -> Vec<String> {
        let seed = self.state.rng_seed.clone();
        let mode = self.state.mode.clone();
        self.new_game(&seed, mode)
    }

    /// Applies one line of text.
    ///
    /// At night, text that names a live enemy's word or a spell word is a
    /// strike, as is anything that is not a known verb.
    pub fn apply_command(&mut self, text: &str) -> Vec<String> {
        if self.state.phase == Phase::Night && self.is_combat_word(text) {
            return self.apply_intent(Intent::DefendInput {
                text: text.to_string(),
            });
        }

        let command = match Command::parse(text) {
            Ok(command) => command,
            Err(CommandError::UnknownVerb(_)) if self.state.phase == Phase::Night => {
                return self.apply_intent(Intent::DefendInput {
                    text: text.to_string(),
                });
            }
            Err(err) => return self.reject("command", err.into()),
        };

        if command.is_read_only() {
            return self.report(&command);
        }

        match command {
            Command::New(seed) => {
                let seed =
                    seed.unwrap_or_else(|| format!("{:016x}", self.state.rng.next_u64()));
                let mode = self.state.mode.clone();
                self.new_game(&seed, mode)
            }
            Command::Restart => self.restart(),
            command => {
                let verb = command.verb();
                let rule = command.phase_rule();
                self.dispatch(verb, rule, move |state, ctx, events| {
                    execute_command(state, ctx, command, events)
                })
            }
        }
    }

    /// Answers a read-only command without touching the state.
    fn report(&self, command: &Command) -> Vec<String> {
        match command {
            Command::Help(verb) => help_lines(verb.as_deref()),
            Command::Status => status_lines(&self.state, &self.ctx),
            Command::Research(None) => research_lines(&self.state, &self.ctx),
            Command::Preview { tower, level } => preview_lines(&self.ctx, tower, *level),
            _ => Vec::new(),
        }
    }

    pub fn apply_intent(&mut self, intent: Intent) -> Vec<String> {
        let action = intent.action();
        let rule = intent.phase_rule();
        self.dispatch(action, rule, move |state, ctx, events| {
            execute_intent(state, ctx, intent, events)
        })
    }

    /// Advances wall-clock time. Typing time and spell cooldowns only run at
    /// night.
    pub fn tick(&mut self, dt: f64) -> Vec<String> {
        let dt = invariants::clamp_dt(dt);
        if self.state.phase != Phase::Night || dt == 0.0 {
            return Vec::new();
        }
        let mut events = EventLog::new();
        self.state.typing.advance(dt);
        spells::tick_cooldowns(&mut self.state, dt, &mut events);
        events.into_lines()
    }

    fn is_combat_word(&self, text: &str) -> bool {
        let typed = text.trim().to_lowercase();
        !typed.is_empty()
            && (self.state.live_words().contains(typed.as_str())
                || self.ctx.env.towers().spell_by_word(&typed).is_some())
    }

    fn dispatch<F>(&mut self, action: &'static str, rule: PhaseRule, apply: F) -> Vec<String>
    where
        F: FnOnce(&mut GameState, &SimContext<'a>, &mut EventLog) -> Result<(), DispatchError>,
    {
        if let Err(err) = rule.check(action, self.state.phase) {
            return self.reject(action, err.into());
        }

        let before = self.state.clone();
        let mut events = EventLog::new();
        match apply(&mut self.state, &self.ctx, &mut events) {
            Ok(()) => {
                progression::evaluate(&mut self.state, &self.ctx, &mut events);
                invariants::enforce(&mut self.state, self.ctx.config);
                self.state.nonce = self.state.nonce.saturating_add(1);
                tracing::debug!(
                    action,
                    nonce = self.state.nonce,
                    events = events.len(),
                    "dispatch accepted"
                );
                events.into_lines()
            }
            Err(err) => {
                self.state = before;
                self.reject(action, err)
            }
        }
    }

    fn reject(&self, action: &str, err: DispatchError) -> Vec<String> {
        tracing::debug!(
            action,
            stage = err.stage().as_str(),
            code = err.error_code(),
            severity = err.severity().as_str(),
            "dispatch rejected"
        );
        vec![err.to_string()]
    }
}

fn fresh_state(ctx: &SimContext<'_>, seed: &str, mode: GameMode) -> (GameState, EventLog) {
    let mut state = GameState::new(seed, mode, ctx.config);
    let mut events = EventLog::new();
    diplomacy::seed_relations(&mut state, ctx);

    if let GameMode::VerticalSlice { profile_id } = state.mode.clone() {
        state.rng.reseed(&format!("{seed}:{profile_id}"));
        match ctx.env.scenario().profile(&profile_id) {
            Some(profile) => {
                state.day = profile.start_day.max(1);
                state.hp = profile.start_hp;
                state.max_hp = profile.start_hp;
                state.gold = profile.start_gold;
            }
            None => {
                tracing::warn!(profile = %profile_id, "wave profile missing; using starting config")
            }
        }
        events.push(format!("Scenario '{profile_id}' begins."));
        start_night(&mut state, ctx, &mut events);
    } else {
        events.push(format!(
            "Day {} begins. You have {} AP. Type 'help' for commands.",
            state.day, state.ap
        ));
    }
    state.refresh_prompt();
    (state, events)
}

fn cast_spell(
    state: &mut GameState,
    ctx: &SimContext<'_>,
    name: &str,
    events: &mut EventLog,
) -> Result<(), CombatError> {
    let name = name.trim().to_lowercase();
    let towers = ctx.env.towers();
    let id = towers
        .spell(&name)
        .or_else(|| towers.spell_by_word(&name))
        .map(|spell| spell.id.clone())
        .ok_or(CombatError::UnknownSpell(name))?;
    spells::cast(state, ctx, &id, events)
}

fn execute_command(
    state: &mut GameState,
    ctx: &SimContext<'_>,
    command: Command,
    events: &mut EventLog,
) -> Result<(), DispatchError> {
    match command {
        Command::Gather(kind) => economy::gather(state, ctx, kind, events)?,
        Command::Build {
            kind,
            pos,
            tower_type,
        } => economy::build(state, ctx, kind, pos, tower_type.as_deref(), events)?,
        Command::Upgrade(pos) => economy::upgrade_tower(state, ctx, pos, events)?,
        Command::Assign(pos) => economy::assign_worker(state, ctx, pos, events)?,
        Command::Unassign(pos) => economy::unassign_worker(state, ctx, pos, events)?,
        Command::Hire => economy::hire_worker(state, ctx, events)?,
        Command::Explore => economy::explore(state, ctx, events)?,
        Command::Research(Some(id)) => research::start_research(state, ctx, &id, events)?,
        Command::Learn(skill) => research::learn_skill(state, ctx, &skill, events)?,
        Command::Trade { from, to, amount } => economy::trade(state, ctx, from, to, amount, events)?,
        Command::Craft(recipe) => economy::craft(state, ctx, &recipe, events)?,
        Command::Use(item) => economy::use_item(state, ctx, &item, events)?,
        Command::Gift { faction, gold } => diplomacy::gift(state, ctx, &faction, gold, events)?,
        Command::Propose { proposal, faction } => {
            diplomacy::propose(state, ctx, &proposal, &faction, events)?
        }
        Command::Target(mode) => {
            state.target_mode = mode;
            events.push(format!("Towers now target the {mode} enemy."));
        }
        Command::End => {
            events.push(format!("You end day {}.", state.day));
            start_night(state, ctx, events);
        }
        Command::Cast(spell) => {
            cast_spell(state, ctx, &spell, events)?;
            run_night_turn(state, ctx, events);
        }
        Command::Wait => {
            events.push("You hold your ground.");
            run_night_turn(state, ctx, events);
        }
        // Answered before dispatch.
        Command::Help(_)
        | Command::Status
        | Command::Research(None)
        | Command::Preview { .. }
        | Command::New(_)
        | Command::Restart => {}
    }
    Ok(())
}

fn execute_intent(
    state: &mut GameState,
    ctx: &SimContext<'_>,
    intent: Intent,
    events: &mut EventLog,
) -> Result<(), DispatchError> {
    match intent {
        Intent::DefendInput { text } => {
            resolve_typed_input(state, ctx, &text, events)?;
            run_night_turn(state, ctx, events);
        }
        Intent::CastSpell { spell } => {
            cast_spell(state, ctx, &spell, events)?;
            run_night_turn(state, ctx, events);
        }
        Intent::Build { building, x, y } => {
            let kind = BuildingKind::from_str(&building)
                .map_err(|_| EconomyError::UnknownBuilding(building.clone()))?;
            let pos = crate::state::GridPos::new(x, y);
            economy::build(state, ctx, kind, pos, None, events)?;
        }
        Intent::MovePlayer { dx, dy } => {
            let next = state.player_pos.offset(dx, dy);
            if !next.in_bounds(ctx.config.map_width, ctx.config.map_height) {
                return Err(EconomyError::OutOfBounds { pos: next }.into());
            }
            state.player_pos = next;
            events.push(format!("You walk to {next}."));
        }
        Intent::Wait => run_night_turn(state, ctx, events),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::DamageType;
    use crate::env::{
        ContentBundle, EnemyAbilities, EnemyKind, EnemyKindDef, SpellDef, SpellTarget, TowerDef,
    };
    use crate::state::{Enemy, Lifecycle, StatusEffects};

    fn content() -> ContentBundle {
        ContentBundle::new()
            .with_enemy(EnemyKindDef {
                kind: EnemyKind::new("raider"),
                name: "Raider".into(),
                tier: 1,
                hp: 5,
                damage: 1,
                speed: 1,
                armor: 0,
                reward: 3,
                abilities: EnemyAbilities::empty(),
            })
            .with_tower(TowerDef {
                id: "arrow".into(),
                name: "Arrow Tower".into(),
                damage_type: DamageType::Physical,
                base_damage: 5,
                upgrade_multiplier: 1.5,
                cooldown_turns: 1,
                hits_per_attack: 1,
                typing_bonus: Default::default(),
                applies: None,
            })
            .with_spell(SpellDef {
                id: "nova".into(),
                word: "nova".into(),
                damage: 2,
                damage_type: DamageType::Magical,
                target: SpellTarget::All,
                applies: None,
                cooldown_seconds: 5.0,
            })
            .with_lesson("home_row", vec!["asdf".into(), "jkl".into(), "sad".into()])
    }

    fn lone_enemy(word: &str) -> Enemy {
        Enemy {
            id: 99,
            kind: EnemyKind::new("raider"),
            hp: 5,
            max_hp: 5,
            armor: 0,
            damage: 1,
            speed: 1,
            distance: 8,
            word: word.into(),
            affix: None,
            status_effects: StatusEffects::empty(),
            abilities: EnemyAbilities::empty(),
            reward: 3,
            lifecycle: Lifecycle::Advancing,
        }
    }

    #[test]
    fn typing_a_word_kills_and_pays() {
        let content = content();
        let config = GameConfig::default();
        let (mut game, _) =
            GameController::new(content.env(), &config, "kill", GameMode::Campaign);
        let mut state = game.state().clone();
        state.phase = Phase::Night;
        state.enemies = vec![lone_enemy("zebra")];
        state.night_spawn_remaining = 0;
        state.refresh_prompt();
        let gold = state.gold;
        game.restore(state);

        let events = game.apply_intent(Intent::DefendInput {
            text: "zebra".into(),
        });
        assert!(events.iter().any(|line| line.contains("defeats")));
        let state = game.state();
        assert_eq!(state.enemies_defeated, 1);
        assert_eq!(state.gold, gold + 3);
        // The last enemy fell, so the night is over.
        assert_eq!(state.phase, Phase::Day);
        assert_eq!(state.wave, 1);
    }

    #[test]
    fn phase_gating_is_a_single_event_no_op() {
        let content = content();
        let config = GameConfig::default();
        let (mut game, _) =
            GameController::new(content.env(), &config, "gate", GameMode::Campaign);
        let before = game.state().clone();

        let events = game.apply_intent(Intent::DefendInput {
            text: "asdf".into(),
        });
        assert_eq!(events, vec!["You can only defend at night.".to_string()]);
        assert_eq!(game.state(), &before);

        let events = game.apply_command("wait");
        assert_eq!(events.len(), 1);
        assert_eq!(game.state(), &before);
    }

    #[test]
    fn rejected_commands_restore_the_state() {
        let content = content();
        let config = GameConfig::default();
        let (mut game, _) =
            GameController::new(content.env(), &config, "reject", GameMode::Campaign);
        let before = game.state().clone();

        let events = game.apply_command("build tower 99 99");
        assert_eq!(events, vec!["(99, 99) is outside the settlement.".to_string()]);
        assert_eq!(game.state(), &before);

        let events = game.apply_command("juggle");
        assert_eq!(events, vec!["Unknown command 'juggle'. Try 'help'.".to_string()]);
        assert_eq!(game.state().nonce, before.nonce);
    }

    #[test]
    fn accepted_commands_bump_the_nonce() {
        let content = content();
        let config = GameConfig::default();
        let (mut game, _) =
            GameController::new(content.env(), &config, "nonce", GameMode::Campaign);

        game.apply_command("gather wood");
        assert_eq!(game.state().nonce, 1);
        game.apply_command("status");
        assert_eq!(game.state().nonce, 1);
    }

    #[test]
    fn ending_the_day_starts_the_night() {
        let content = content();
        let config = GameConfig::default();
        let (mut game, _) =
            GameController::new(content.env(), &config, "night", GameMode::Campaign);

        let events = game.apply_command("end");
        assert_eq!(game.state().phase, Phase::Night);
        assert!(events.iter().any(|line| line.starts_with("Night 1 falls.")));
        assert_eq!(game.state().live_enemy_count(), 2);
        assert_eq!(
            game.state().night_prompt,
            game.state().active_enemy().map(|e| e.word.clone()).unwrap_or_default()
        );
    }

    #[test]
    fn unknown_text_at_night_is_a_miss() {
        let content = content();
        let config = GameConfig::default();
        let (mut game, _) =
            GameController::new(content.env(), &config, "miss", GameMode::Campaign);
        game.apply_command("end");

        let events = game.apply_command("qqqq");
        assert!(events[0].starts_with("Missed: 'qqqq'"));
        assert_eq!(game.state().typing.combo, 0);
    }

    #[test]
    fn spells_recharge_with_ticks() {
        let content = content();
        let config = GameConfig::default();
        let (mut game, _) =
            GameController::new(content.env(), &config, "spell", GameMode::Campaign);
        game.apply_command("end");

        let events = game.apply_command("nova");
        assert!(events.iter().any(|line| line == "You cast nova!"));
        let again = game.apply_intent(Intent::CastSpell {
            spell: "nova".into(),
        });
        assert_eq!(again.len(), 1);
        assert!(again[0].starts_with("nova is recharging"));

        assert!(game.tick(-3.0).is_empty());
        let ready = game.tick(5.0);
        if game.state().phase == Phase::Night {
            assert_eq!(ready, vec!["nova is ready.".to_string()]);
        }
    }

    #[test]
    fn move_player_stays_on_the_map() {
        let content = content();
        let config = GameConfig::default();
        let (mut game, _) =
            GameController::new(content.env(), &config, "walk", GameMode::Campaign);
        let start = game.state().player_pos;

        game.apply_intent(Intent::MovePlayer { dx: 1, dy: 0 });
        assert_eq!(game.state().player_pos, start.offset(1, 0));

        let events = game.apply_intent(Intent::MovePlayer { dx: -100, dy: 0 });
        assert_eq!(events.len(), 1);
        assert_eq!(game.state().player_pos, start.offset(1, 0));
    }

    #[test]
    fn preview_reports_without_dispatching() {
        let content = content();
        let config = GameConfig::default();
        let (mut game, _) =
            GameController::new(content.env(), &config, "preview", GameMode::Campaign);
        let before = game.state().clone();

        let lines = game.apply_command("preview arrow");
        assert_eq!(lines[0], "Arrow Tower level 1, unarmored target:");
        assert_eq!(
            lines[1],
            "  casual (30 wpm, 85%): 5 per hit x1 every 1 turns, 5.0 per turn"
        );
        assert_eq!(lines.len(), 4);

        let capped = game.apply_command("preview arrow 9");
        assert_eq!(capped[0], "Arrow Tower level 5, unarmored target:");
        assert!(capped[3].contains("25 per hit"));

        assert_eq!(
            game.apply_command("preview ballista"),
            vec!["Unknown tower 'ballista'.".to_string()]
        );
        assert_eq!(game.state(), &before);
    }
}
