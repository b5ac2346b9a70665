use crate::combat::resolve::defeat;
use crate::economy::wall_defense;
use crate::engine::{EventLog, SimContext};
use crate::env::EnemyAbilities;
use crate::state::{GameState, Lifecycle, StatusKind};

/// Damage per turn from each damage-over-time status.
const DOT_DAMAGE: u32 = 1;

/// Runs the per-turn enemy update.
///
/// For each live enemy, in field order: damage-over-time statuses, then
/// regeneration, then movement at the speed its statuses allowed this turn,
/// then status durations tick down. Enemies at `distance <= 0` hit the base
/// for `damage - walls` (at least 1; flyers ignore walls) and leave the field.
pub fn advance_enemies(state: &mut GameState, ctx: &SimContext<'_>, events: &mut EventLog) {
    let walls = wall_defense(state, ctx.env.economy());

    for index in 0..state.enemies.len() {
        if !state.enemies[index].is_live() {
            continue;
        }

        let enemy = &mut state.enemies[index];
        let mut dot = 0;
        if enemy.status_effects.has(StatusKind::Burning) {
            dot += DOT_DAMAGE;
        }
        if enemy.status_effects.has(StatusKind::Poisoned) {
            dot += DOT_DAMAGE;
        }
        if dot > 0 {
            enemy.hp = enemy.hp.saturating_sub(dot);
            if enemy.hp == 0 {
                events.push(format!(
                    "{} '{}' succumbs to its wounds (+{} gold).",
                    enemy.kind, enemy.word, enemy.reward
                ));
                defeat(state, index);
                continue;
            }
        }

        if enemy.abilities.contains(EnemyAbilities::REGENERATING) && enemy.hp < enemy.max_hp {
            enemy.hp += 1;
        }

        let speed = enemy.effective_speed();
        enemy.status_effects.tick();
        enemy.distance = enemy.distance.saturating_sub(speed as i32);
        enemy.lifecycle = Lifecycle::Advancing;

        if enemy.distance <= 0 {
            let blocked = if enemy.abilities.contains(EnemyAbilities::FLYING) {
                0
            } else {
                walls
            };
            let damage = enemy.damage.saturating_sub(blocked).max(1);
            enemy.lifecycle = Lifecycle::ReachedBase;
            events.push(format!(
                "{} '{}' reaches the gate! You lose {damage} hp.",
                enemy.kind, enemy.word
            ));
            state.hp = state.hp.saturating_sub(damage);
        }
    }

    state.remove_finished_enemies();
    state.refresh_prompt();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::env::{BuildingDef, ContentBundle, EnemyKind};
    use crate::state::{BuildingKind, Enemy, GameMode, StatusEffects, StructureIndex};

    fn enemy(id: u32, distance: i32, abilities: EnemyAbilities) -> Enemy {
        Enemy {
            id,
            kind: EnemyKind::new("raider"),
            hp: 3,
            max_hp: 5,
            armor: 0,
            damage: 3,
            speed: 2,
            distance,
            word: format!("w{id}"),
            affix: None,
            status_effects: StatusEffects::empty(),
            abilities,
            reward: 2,
            lifecycle: Lifecycle::Spawned,
        }
    }

    fn walled_content() -> ContentBundle {
        ContentBundle::new().with_building(BuildingDef {
            defense: 2,
            ..BuildingDef::fallback(BuildingKind::Wall)
        })
    }

    #[test]
    fn walls_absorb_damage_but_not_below_one() {
        let content = walled_content();
        let config = GameConfig::default();
        let ctx = SimContext::new(content.env(), &config);
        let mut state = GameState::new("adv", GameMode::Campaign, &config);
        state.structures.insert(StructureIndex(0), BuildingKind::Wall);
        state.structures.insert(StructureIndex(1), BuildingKind::Wall);
        state.enemies.push(enemy(1, 2, EnemyAbilities::empty()));
        state.enemies.push(enemy(2, 1, EnemyAbilities::FLYING));

        let mut events = EventLog::new();
        advance_enemies(&mut state, &ctx, &mut events);
        // Walls block 4: ground enemy deals the minimum 1, the flyer its full 3.
        assert_eq!(state.hp, config.start_hp - 4);
        assert!(state.enemies.is_empty());
        assert_eq!(state.enemies_defeated, 0);
    }

    #[test]
    fn damage_over_time_can_kill_and_pays_out() {
        let content = ContentBundle::new();
        let config = GameConfig::default();
        let ctx = SimContext::new(content.env(), &config);
        let mut state = GameState::new("adv", GameMode::Campaign, &config);
        let gold = state.gold;
        let mut burning = enemy(1, 9, EnemyAbilities::empty());
        burning.hp = 2;
        burning.status_effects.apply(StatusKind::Burning, 3);
        burning.status_effects.apply(StatusKind::Poisoned, 3);
        state.enemies.push(burning);

        let mut events = EventLog::new();
        advance_enemies(&mut state, &ctx, &mut events);
        assert!(state.enemies.is_empty());
        assert_eq!(state.enemies_defeated, 1);
        assert_eq!(state.gold, gold + 2);
    }

    #[test]
    fn regeneration_and_movement() {
        let content = ContentBundle::new();
        let config = GameConfig::default();
        let ctx = SimContext::new(content.env(), &config);
        let mut state = GameState::new("adv", GameMode::Campaign, &config);
        let mut troll = enemy(1, 10, EnemyAbilities::REGENERATING | EnemyAbilities::SWIFT);
        troll.status_effects.apply(StatusKind::Frozen, 1);
        state.enemies.push(troll);

        let mut events = EventLog::new();
        advance_enemies(&mut state, &ctx, &mut events);
        assert_eq!(state.enemies[0].hp, 4);
        assert_eq!(state.enemies[0].distance, 10);

        advance_enemies(&mut state, &ctx, &mut events);
        assert_eq!(state.enemies[0].distance, 7);
        assert_eq!(state.enemies[0].lifecycle, Lifecycle::Advancing);
    }
}
