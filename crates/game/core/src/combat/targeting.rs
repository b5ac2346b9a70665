use std::cmp::Reverse;

use crate::state::{Enemy, TargetMode};

/// Picks up to `count` distinct live enemies in `mode` order.
///
/// Returns indices into `enemies`. Every ordering ends on the enemy id so
/// selection is stable.
pub fn select_targets(enemies: &[Enemy], mode: TargetMode, count: usize) -> Vec<usize> {
    let mut live: Vec<usize> = enemies
        .iter()
        .enumerate()
        .filter(|(_, enemy)| enemy.is_live())
        .map(|(index, _)| index)
        .collect();

    match mode {
        TargetMode::Nearest => live.sort_by_key(|&i| (enemies[i].distance, enemies[i].id)),
        TargetMode::Strongest => live.sort_by_key(|&i| (Reverse(enemies[i].hp), enemies[i].id)),
        TargetMode::Weakest => live.sort_by_key(|&i| (enemies[i].hp, enemies[i].id)),
        TargetMode::Fastest => live.sort_by_key(|&i| {
            (
                Reverse(enemies[i].effective_speed()),
                enemies[i].distance,
                enemies[i].id,
            )
        }),
        TargetMode::Oldest => live.sort_by_key(|&i| enemies[i].id),
    }

    live.truncate(count);
    live
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{EnemyAbilities, EnemyKind};
    use crate::state::{Lifecycle, StatusEffects};

    fn enemy(id: u32, hp: u32, speed: u32, distance: i32) -> Enemy {
        Enemy {
            id,
            kind: EnemyKind::new("raider"),
            hp,
            max_hp: hp,
            armor: 0,
            damage: 1,
            speed,
            distance,
            word: format!("w{id}"),
            affix: None,
            status_effects: StatusEffects::empty(),
            abilities: EnemyAbilities::empty(),
            reward: 1,
            lifecycle: Lifecycle::Advancing,
        }
    }

    fn field() -> Vec<Enemy> {
        vec![
            enemy(4, 9, 1, 3),
            enemy(2, 2, 3, 8),
            enemy(7, 5, 2, 1),
            enemy(5, 9, 1, 6),
        ]
    }

    fn ids(enemies: &[Enemy], picks: Vec<usize>) -> Vec<u32> {
        picks.into_iter().map(|i| enemies[i].id).collect()
    }

    #[test]
    fn modes_order_targets() {
        let enemies = field();
        assert_eq!(ids(&enemies, select_targets(&enemies, TargetMode::Nearest, 2)), vec![7, 4]);
        assert_eq!(ids(&enemies, select_targets(&enemies, TargetMode::Strongest, 2)), vec![4, 5]);
        assert_eq!(ids(&enemies, select_targets(&enemies, TargetMode::Weakest, 1)), vec![2]);
        assert_eq!(ids(&enemies, select_targets(&enemies, TargetMode::Fastest, 1)), vec![2]);
        assert_eq!(ids(&enemies, select_targets(&enemies, TargetMode::Oldest, 3)), vec![2, 4, 5]);
    }

    #[test]
    fn targets_are_distinct_and_capped_by_live_count() {
        let mut enemies = field();
        enemies[0].lifecycle = Lifecycle::Defeated;
        let picks = select_targets(&enemies, TargetMode::Nearest, 10);
        assert_eq!(picks.len(), 3);
        assert!(!picks.contains(&0));
    }
}
