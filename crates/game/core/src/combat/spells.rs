//! Spells cast by typing their word at night.
//!
//! Cooldowns are plain data in `GameState::spell_cooldowns`, decremented by
//! `tick`.

use super::damage::{DamageRequest, DefenseProfile, resolve_damage};
use super::error::CombatError;
use super::resolve::{apply_status, strike};
use crate::engine::{EventLog, SimContext};
use crate::env::SpellTarget;
use crate::state::GameState;

/// Seconds left before `spell_id` can be cast again.
pub fn cooldown_remaining(state: &GameState, spell_id: &str) -> f64 {
    state.spell_cooldowns.get(spell_id).copied().unwrap_or(0.0)
}

pub fn cast(
    state: &mut GameState,
    ctx: &SimContext<'_>,
    spell_id: &str,
    events: &mut EventLog,
) -> Result<(), CombatError> {
    let spell = ctx
        .env
        .towers()
        .spell(spell_id)
        .ok_or_else(|| CombatError::UnknownSpell(spell_id.to_string()))?;

    let remaining = cooldown_remaining(state, &spell.id);
    if remaining > 0.0 {
        return Err(CombatError::SpellOnCooldown {
            spell: spell.id.clone(),
            seconds: remaining,
        });
    }

    let targets: Vec<usize> = match spell.target {
        SpellTarget::All => {
            let mut live: Vec<usize> = state
                .enemies
                .iter()
                .enumerate()
                .filter(|(_, enemy)| enemy.is_live())
                .map(|(index, _)| index)
                .collect();
            live.sort_by_key(|&i| (state.enemies[i].distance, state.enemies[i].id));
            live
        }
        SpellTarget::Active => state.active_enemy_index().into_iter().collect(),
    };
    if targets.is_empty() {
        return Err(CombatError::NoTargets);
    }

    events.push(format!("You cast {}!", spell.id));
    let request = DamageRequest::new(f64::from(spell.damage), spell.damage_type)
        .with_combo(state.typing.combo_multiplier());
    for target in targets {
        let damage = resolve_damage(&request, &DefenseProfile::of(&state.enemies[target]));
        if !strike(state, target, damage, &spell.id, events) {
            apply_status(state, target, spell.applies);
        }
    }

    state
        .spell_cooldowns
        .insert(spell.id.clone(), spell.cooldown_seconds.max(0.0));
    state.typing.bump("spells_cast", 1.0);
    state.remove_finished_enemies();
    state.refresh_prompt();
    Ok(())
}

/// Decrements every cooldown by `seconds`, announcing spells that come off it.
pub fn tick_cooldowns(state: &mut GameState, seconds: f64, events: &mut EventLog) {
    for (spell, remaining) in state.spell_cooldowns.iter_mut() {
        if *remaining <= 0.0 {
            continue;
        }
        *remaining = (*remaining - seconds).max(0.0);
        if *remaining == 0.0 {
            events.push(format!("{spell} is ready."));
        }
    }
    state.spell_cooldowns.retain(|_, remaining| *remaining > 0.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::DamageType;
    use crate::config::GameConfig;
    use crate::env::{ContentBundle, EnemyAbilities, EnemyKind, SpellDef, StatusApplication};
    use crate::state::{Enemy, GameMode, Lifecycle, StatusEffects, StatusKind};

    fn content() -> ContentBundle {
        ContentBundle::new().with_spell(SpellDef {
            id: "blizzard".into(),
            word: "blizzard".into(),
            damage: 1,
            damage_type: DamageType::Cold,
            target: SpellTarget::Active,
            applies: Some(StatusApplication {
                kind: StatusKind::Frozen,
                turns: 2,
            }),
            cooldown_seconds: 5.0,
        })
    }

    fn state_with_enemy() -> GameState {
        let mut state = GameState::new("spells", GameMode::Campaign, &GameConfig::default());
        state.enemies.push(Enemy {
            id: 1,
            kind: EnemyKind::new("brute"),
            hp: 10,
            max_hp: 10,
            armor: 0,
            damage: 2,
            speed: 1,
            distance: 4,
            word: "boulder".into(),
            affix: None,
            status_effects: StatusEffects::empty(),
            abilities: EnemyAbilities::empty(),
            reward: 4,
            lifecycle: Lifecycle::Advancing,
        });
        state
    }

    #[test]
    fn cast_applies_status_and_starts_cooldown() {
        let content = content();
        let config = GameConfig::default();
        let ctx = SimContext::new(content.env(), &config);
        let mut state = state_with_enemy();
        let mut events = EventLog::new();

        cast(&mut state, &ctx, "blizzard", &mut events).expect("cast");
        assert_eq!(state.enemies[0].hp, 9);
        assert!(state.enemies[0].status_effects.has(StatusKind::Frozen));

        let again = cast(&mut state, &ctx, "blizzard", &mut events);
        assert!(matches!(again, Err(CombatError::SpellOnCooldown { .. })));
    }

    #[test]
    fn cooldowns_tick_down_and_announce() {
        let mut state = state_with_enemy();
        state.spell_cooldowns.insert("blizzard".into(), 5.0);
        let mut events = EventLog::new();

        tick_cooldowns(&mut state, 3.0, &mut events);
        assert_eq!(cooldown_remaining(&state, "blizzard"), 2.0);
        assert!(events.is_empty());

        tick_cooldowns(&mut state, 3.0, &mut events);
        assert_eq!(cooldown_remaining(&state, "blizzard"), 0.0);
        assert_eq!(events.lines(), ["blizzard is ready."]);
        assert!(state.spell_cooldowns.is_empty());
    }

    #[test]
    fn casting_without_targets_is_rejected() {
        let content = content();
        let config = GameConfig::default();
        let ctx = SimContext::new(content.env(), &config);
        let mut state = GameState::new("spells", GameMode::Campaign, &config);
        let mut events = EventLog::new();
        assert_eq!(
            cast(&mut state, &ctx, "blizzard", &mut events),
            Err(CombatError::NoTargets)
        );
    }
}
