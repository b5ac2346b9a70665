use std::collections::BTreeSet;

use crate::engine::SimContext;
use crate::state::GameState;

/// Used when a lesson has no words.
pub const FALLBACK_WORDS: &[&str] = &[
    "ash", "oak", "elm", "fern", "moss", "reed", "sage", "pine", "dusk", "gale", "hail", "iron",
    "jade", "kelp", "lark", "mist",
];

/// Draws a word for a new enemy.
///
/// The word is unique among live enemies and never equals a spell word.
/// Once the lesson pool is exhausted, words become two-word compounds from
/// the pool, then numbered variants.
pub fn assign_word(state: &mut GameState, ctx: &SimContext<'_>, lesson: &str) -> String {
    let mut taken: BTreeSet<String> = state
        .live_words()
        .into_iter()
        .map(str::to_string)
        .collect();
    taken.extend(
        ctx.env
            .towers()
            .spells()
            .into_iter()
            .map(|spell| spell.word.to_lowercase()),
    );

    let mut pool: Vec<String> = ctx
        .env
        .lexicon()
        .words(lesson)
        .iter()
        .map(|word| word.trim().to_lowercase())
        .filter(|word| !word.is_empty())
        .collect();
    if pool.is_empty() {
        tracing::warn!(lesson, "lesson has no words; using fallback list");
        pool = FALLBACK_WORDS.iter().map(|word| word.to_string()).collect();
    }

    let candidates: Vec<&String> = pool.iter().filter(|word| !taken.contains(*word)).collect();
    if let Some(word) = state.rng.pick(&candidates) {
        return (*word).clone();
    }

    for first in &pool {
        for second in &pool {
            if first == second {
                continue;
            }
            let compound = format!("{first}{second}");
            if !taken.contains(&compound) {
                return compound;
            }
        }
    }

    let base = &pool[0];
    (2u32..)
        .map(|n| format!("{base}{n}"))
        .find(|word| !taken.contains(word))
        .unwrap_or_else(|| base.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::DamageType;
    use crate::config::GameConfig;
    use crate::env::{ContentBundle, EnemyAbilities, EnemyKind, SpellDef, SpellTarget};
    use crate::state::{Enemy, GameMode, Lifecycle, StatusEffects};

    fn enemy_with_word(id: u32, word: &str) -> Enemy {
        Enemy {
            id,
            kind: EnemyKind::new("raider"),
            hp: 3,
            max_hp: 3,
            armor: 0,
            damage: 1,
            speed: 1,
            distance: 5,
            word: word.into(),
            affix: None,
            status_effects: StatusEffects::empty(),
            abilities: EnemyAbilities::empty(),
            reward: 1,
            lifecycle: Lifecycle::Advancing,
        }
    }

    #[test]
    fn words_stay_unique_and_avoid_spells() {
        let content = ContentBundle::new()
            .with_lesson("tiny", vec!["fire".into(), "sad".into(), "lad".into()])
            .with_spell(SpellDef {
                id: "fire".into(),
                word: "fire".into(),
                damage: 1,
                damage_type: DamageType::Fire,
                target: SpellTarget::All,
                applies: None,
                cooldown_seconds: 1.0,
            });
        let config = GameConfig::default();
        let ctx = SimContext::new(content.env(), &config);
        let mut state = GameState::new("words", GameMode::Campaign, &config);
        state.enemies.push(enemy_with_word(1, "sad"));

        let word = assign_word(&mut state, &ctx, "tiny");
        assert_eq!(word, "lad");
    }

    #[test]
    fn exhausted_pool_falls_back_to_compounds() {
        let content = ContentBundle::new().with_lesson("pair", vec!["as".into(), "df".into()]);
        let config = GameConfig::default();
        let ctx = SimContext::new(content.env(), &config);
        let mut state = GameState::new("words", GameMode::Campaign, &config);
        state.enemies.push(enemy_with_word(1, "as"));
        state.enemies.push(enemy_with_word(2, "df"));

        assert_eq!(assign_word(&mut state, &ctx, "pair"), "asdf");
        state.enemies.push(enemy_with_word(3, "asdf"));
        assert_eq!(assign_word(&mut state, &ctx, "pair"), "dfas");
        state.enemies.push(enemy_with_word(4, "dfas"));
        assert_eq!(assign_word(&mut state, &ctx, "pair"), "as2");
    }

    #[test]
    fn unknown_lesson_uses_fallback_words() {
        let content = ContentBundle::new();
        let config = GameConfig::default();
        let ctx = SimContext::new(content.env(), &config);
        let mut state = GameState::new("words", GameMode::Campaign, &config);
        let word = assign_word(&mut state, &ctx, "missing");
        assert!(FALLBACK_WORDS.contains(&word.as_str()));
    }
}
