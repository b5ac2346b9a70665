//! Live combat: typed words, tower volleys and the kill payout.

use super::damage::{DamageRequest, DefenseProfile, base_damage_at_level, resolve_damage};
use super::error::CombatError;
use super::spells;
use super::targeting::select_targets;
use crate::engine::{EventLog, SimContext};
use crate::env::{StatusApplication, TowerDef};
use crate::state::{GameState, Lifecycle};
use crate::stats::EffectKey;

/// Deals `damage` to the enemy at `index` and pays out on a kill.
///
/// Returns true when the hit defeated the enemy. The enemy stays in the list
/// marked `Defeated` until [`GameState::remove_finished_enemies`] runs.
pub fn strike(
    state: &mut GameState,
    index: usize,
    damage: u32,
    source: &str,
    events: &mut EventLog,
) -> bool {
    let Some(enemy) = state.enemies.get_mut(index) else {
        return false;
    };
    if !enemy.is_live() {
        return false;
    }

    enemy.hp = super::apply_damage(enemy.hp, damage);
    if enemy.hp > 0 {
        events.push(format!(
            "{source} hits {} '{}' for {damage} ({} hp left).",
            enemy.kind, enemy.word, enemy.hp
        ));
        return false;
    }

    events.push(format!(
        "{source} defeats {} '{}' (+{} gold).",
        enemy.kind, enemy.word, enemy.reward
    ));
    defeat(state, index);
    true
}

/// Marks an enemy defeated and credits its reward exactly once.
pub(crate) fn defeat(state: &mut GameState, index: usize) {
    let Some(enemy) = state.enemies.get_mut(index) else {
        return;
    };
    if enemy.lifecycle == Lifecycle::Defeated {
        return;
    }
    enemy.hp = 0;
    enemy.lifecycle = Lifecycle::Defeated;
    let reward = enemy.reward;
    state.gold = state.gold.saturating_add(reward);
    state.enemies_defeated = state.enemies_defeated.saturating_add(1);
}

pub(crate) fn apply_status(state: &mut GameState, index: usize, applies: Option<StatusApplication>) {
    let Some(application) = applies else {
        return;
    };
    if let Some(enemy) = state.enemies.get_mut(index).filter(|enemy| enemy.is_live()) {
        enemy.status_effects.apply(application.kind, application.turns);
    }
}

/// Resolves one line of night input.
///
/// A spell word casts the spell. Otherwise the text is matched against every
/// live enemy's word: a match strikes that enemy with the typed attack, no
/// match is a miss that resets the combo. Only empty input is rejected.
pub fn resolve_typed_input(
    state: &mut GameState,
    ctx: &SimContext<'_>,
    text: &str,
    events: &mut EventLog,
) -> Result<(), CombatError> {
    let typed = text.trim().to_lowercase();
    if typed.is_empty() {
        return Err(CombatError::EmptyInput);
    }

    if let Some(spell) = ctx.env.towers().spell_by_word(&typed) {
        let spell_id = spell.id.clone();
        return spells::cast(state, ctx, &spell_id, events);
    }

    let hit = state
        .enemies
        .iter()
        .position(|enemy| enemy.is_live() && enemy.word == typed);

    match hit {
        Some(index) => {
            // The combo in effect when the word lands; this hit counts toward the next.
            let combo_multiplier = state.typing.combo_multiplier();
            state.typing.record_hit(&typed);
            state.max_combo_ever = state.max_combo_ever.max(state.typing.combo);

            let attack = ctx.config.typed_attack;
            let factor = ctx.modifiers(state).factor(EffectKey::TypingDamage);
            let request = DamageRequest::new(f64::from(attack.base_damage) * factor, attack.damage_type)
                .with_combo(combo_multiplier);
            let damage = resolve_damage(&request, &DefenseProfile::of(&state.enemies[index]));
            strike(state, index, damage, "Your strike", events);
        }
        None => {
            let expected = state.active_enemy().map(|enemy| enemy.word.clone());
            state.typing.record_miss(&typed, expected.as_deref());
            events.push(format!("Missed: '{typed}' matches no enemy. Combo lost."));
        }
    }

    state.remove_finished_enemies();
    state.refresh_prompt();
    Ok(())
}

/// Fires every tower whose cooldown divides the current night turn.
pub fn tower_volley(state: &mut GameState, ctx: &SimContext<'_>, events: &mut EventLog) {
    if state.towers.is_empty() {
        return;
    }
    let modifiers = ctx.modifiers(state);
    let tower_factor = modifiers.factor(EffectKey::TowerDamage);
    let placements: Vec<_> = state
        .towers
        .iter()
        .map(|(index, tower)| (*index, tower.clone()))
        .collect();

    for (index, tower) in placements {
        let def = match ctx.env.towers().tower(&tower.tower_type) {
            Some(def) => def.clone(),
            None => {
                tracing::warn!(
                    tower = %tower.tower_type,
                    index = index.0,
                    "tower type has no definition; using fallback stats"
                );
                TowerDef::fallback(&tower.tower_type)
            }
        };
        if state.night_turn % def.cooldown_turns.max(1) != 0 {
            continue;
        }

        let targets = select_targets(
            &state.enemies,
            state.target_mode,
            def.hits_per_attack.max(1) as usize,
        );
        if targets.is_empty() {
            break;
        }

        let base = base_damage_at_level(def.base_damage, def.upgrade_multiplier, tower.level)
            * tower_factor;
        let request = DamageRequest::new(base, def.damage_type)
            .with_combo(state.typing.combo_multiplier())
            .with_typing_bonus(def.typing_bonus.multiplier(&state.typing));

        for target in targets {
            let damage = resolve_damage(&request, &DefenseProfile::of(&state.enemies[target]));
            let killed = strike(state, target, damage, &def.name, events);
            if !killed {
                apply_status(state, target, def.applies);
            }
        }
    }

    state.remove_finished_enemies();
    state.refresh_prompt();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::env::{ContentBundle, EnemyAbilities, EnemyKind, SpellDef, SpellTarget};
    use crate::state::{Enemy, GameMode, Phase, StatusEffects, StructureIndex, TowerInstance};
    use crate::combat::DamageType;

    fn enemy(id: u32, hp: u32, armor: u32, distance: i32, word: &str) -> Enemy {
        Enemy {
            id,
            kind: EnemyKind::new("raider"),
            hp,
            max_hp: hp,
            armor,
            damage: 2,
            speed: 1,
            distance,
            word: word.to_string(),
            affix: None,
            status_effects: StatusEffects::empty(),
            abilities: EnemyAbilities::empty(),
            reward: 3,
            lifecycle: Lifecycle::Advancing,
        }
    }

    fn night_state() -> GameState {
        let mut state = GameState::new("combat", GameMode::Campaign, &GameConfig::default());
        state.phase = Phase::Night;
        state
    }

    #[test]
    fn basic_kill_pays_reward() {
        let content = ContentBundle::new();
        let config = GameConfig::default();
        let ctx = SimContext::new(content.env(), &config);
        let mut state = night_state();
        state.gold = 0;
        state.enemies.push(enemy(1, 5, 0, 8, "ember"));
        state.refresh_prompt();

        let mut events = EventLog::new();
        resolve_typed_input(&mut state, &ctx, "  Ember ", &mut events).expect("accepted");

        assert!(state.enemies.is_empty());
        assert_eq!(state.enemies_defeated, 1);
        assert_eq!(state.gold, 3);
        assert_eq!(state.typing.combo, 1);
        assert_eq!(state.night_prompt, "");
    }

    #[test]
    fn any_live_word_can_be_struck() {
        let content = ContentBundle::new();
        let config = GameConfig::default();
        let ctx = SimContext::new(content.env(), &config);
        let mut state = night_state();
        state.enemies.push(enemy(1, 20, 0, 2, "near"));
        state.enemies.push(enemy(2, 20, 0, 9, "far"));

        let mut events = EventLog::new();
        resolve_typed_input(&mut state, &ctx, "far", &mut events).expect("accepted");
        assert_eq!(state.enemies[1].hp, 15);
        assert_eq!(state.enemies[0].hp, 20);
        assert_eq!(state.night_prompt, "near");
    }

    #[test]
    fn miss_resets_combo_and_credits_prefix() {
        let content = ContentBundle::new();
        let config = GameConfig::default();
        let ctx = SimContext::new(content.env(), &config);
        let mut state = night_state();
        state.typing.combo = 12;
        state.enemies.push(enemy(1, 20, 0, 2, "granite"));

        let mut events = EventLog::new();
        resolve_typed_input(&mut state, &ctx, "grape", &mut events).expect("accepted");
        assert_eq!(state.typing.combo, 0);
        assert_eq!(state.typing.correct_chars, 3);
        assert_eq!(state.enemies[0].hp, 20);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn empty_input_is_rejected() {
        let content = ContentBundle::new();
        let config = GameConfig::default();
        let ctx = SimContext::new(content.env(), &config);
        let mut state = night_state();
        let mut events = EventLog::new();
        assert_eq!(
            resolve_typed_input(&mut state, &ctx, "   ", &mut events),
            Err(CombatError::EmptyInput)
        );
    }

    #[test]
    fn spell_word_casts_instead_of_missing() {
        let content = ContentBundle::new().with_spell(SpellDef {
            id: "inferno".into(),
            word: "inferno".into(),
            damage: 4,
            damage_type: DamageType::Fire,
            target: SpellTarget::All,
            applies: None,
            cooldown_seconds: 10.0,
        });
        let config = GameConfig::default();
        let ctx = SimContext::new(content.env(), &config);
        let mut state = night_state();
        state.enemies.push(enemy(1, 10, 0, 2, "oak"));
        state.enemies.push(enemy(2, 10, 0, 5, "elm"));

        let mut events = EventLog::new();
        resolve_typed_input(&mut state, &ctx, "inferno", &mut events).expect("cast");
        assert!(state.enemies.iter().all(|e| e.hp == 6));
        assert_eq!(state.spell_cooldowns.get("inferno"), Some(&10.0));
        assert_eq!(state.typing.errors, 0);
    }

    #[test]
    fn towers_hit_distinct_targets_without_scaling_hit_damage() {
        let content = ContentBundle::new().with_tower(TowerDef {
            id: "tesla".into(),
            name: "Tesla Coil".into(),
            damage_type: DamageType::Lightning,
            base_damage: 4,
            upgrade_multiplier: 1.0,
            cooldown_turns: 1,
            hits_per_attack: 2,
            typing_bonus: Default::default(),
            applies: None,
        });
        let config = GameConfig::default();
        let ctx = SimContext::new(content.env(), &config);
        let mut state = night_state();
        state.night_turn = 1;
        state.towers.insert(StructureIndex(0), TowerInstance::new("tesla"));
        state.enemies.push(enemy(1, 10, 0, 3, "a"));
        state.enemies.push(enemy(2, 10, 0, 4, "b"));
        state.enemies.push(enemy(3, 10, 0, 5, "c"));

        let mut events = EventLog::new();
        tower_volley(&mut state, &ctx, &mut events);
        let hps: Vec<u32> = state.enemies.iter().map(|e| e.hp).collect();
        assert_eq!(hps, vec![6, 6, 10]);
    }

    #[test]
    fn unknown_tower_type_falls_back() {
        let content = ContentBundle::new();
        let config = GameConfig::default();
        let ctx = SimContext::new(content.env(), &config);
        let mut state = night_state();
        state.night_turn = 1;
        state.towers.insert(StructureIndex(0), TowerInstance::new("mystery"));
        state.enemies.push(enemy(1, 10, 0, 3, "a"));

        let mut events = EventLog::new();
        tower_volley(&mut state, &ctx, &mut events);
        assert_eq!(state.enemies[0].hp, 8);
    }
}
