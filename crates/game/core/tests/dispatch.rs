use keystrike_core::{
    ContentBundle, EnemyAbilities, EnemyKind, EnemyKindDef, GameConfig, GameController, GameMode,
    Intent, Phase, ResearchDef, WaveProfile, snapshot,
};

fn content() -> ContentBundle {
    ContentBundle::new()
        .with_enemy(EnemyKindDef {
            kind: EnemyKind::new("raider"),
            name: "Raider".into(),
            tier: 1,
            hp: 3,
            damage: 1,
            speed: 1,
            armor: 0,
            reward: 2,
            abilities: EnemyAbilities::empty(),
        })
        .with_lesson(
            "home_row",
            ["ask", "dad", "fall", "glass", "salad", "flask"]
                .into_iter()
                .map(String::from)
                .collect(),
        )
        .with_profile(WaveProfile {
            id: "gate".into(),
            start_day: 3,
            start_hp: 10,
            start_gold: 5,
            wave_spawn_total: 2,
            lesson_id: "home_row".into(),
            kinds: vec![EnemyKind::new("raider")],
        })
        .with_research(ResearchDef {
            id: "masonry".into(),
            name: "Masonry".into(),
            cost_gold: 50,
            prerequisites: vec![],
            waves_required: 1,
            effects: Default::default(),
        })
        .with_research(ResearchDef {
            id: "fortify".into(),
            name: "Fortify".into(),
            cost_gold: 10,
            prerequisites: vec!["masonry".into()],
            waves_required: 2,
            effects: Default::default(),
        })
}

fn vertical_slice() -> GameMode {
    GameMode::VerticalSlice {
        profile_id: "gate".into(),
    }
}

#[test]
fn typing_the_prompt_defeats_the_active_enemy() {
    let content = content();
    let config = GameConfig::default();
    let (mut game, _) = GameController::new(content.env(), &config, "kill", GameMode::Campaign);
    game.apply_command("end");
    assert_eq!(game.state().phase, Phase::Night);

    let target = game.state().active_enemy().map(|enemy| enemy.id);
    let word = game.state().night_prompt.clone();
    let gold = game.state().gold;
    let events = game.apply_command(&word);

    assert!(events[0].starts_with("Your strike defeats"));
    assert_eq!(game.state().enemies_defeated, 1);
    assert_eq!(game.state().gold, gold + 2);
    assert!(game.state().enemies.iter().all(|enemy| Some(enemy.id) != target));
    assert_eq!(game.state().typing.combo, 1);
}

#[test]
fn vertical_slice_starts_at_night_with_profile_values() {
    let content = content();
    let config = GameConfig::default();
    let (game, events) = GameController::new(content.env(), &config, "slice", vertical_slice());
    let state = game.state();

    assert_eq!(state.phase, Phase::Night);
    assert_eq!((state.day, state.hp, state.max_hp, state.gold), (3, 10, 10, 5));
    assert_eq!(state.night_wave_total, 2);
    assert_eq!(events[0], "Scenario 'gate' begins.");
}

#[test]
fn vertical_slice_restart_is_deterministic() {
    let content = content();
    let config = GameConfig::default();
    let (mut game, opening) =
        GameController::new(content.env(), &config, "slice", vertical_slice());
    let fresh = game.state().clone();

    game.apply_command("wait");
    let replay = game.restart();

    let mut restarted = game.state().clone();
    assert_eq!(restarted.nonce, 2);
    restarted.nonce = fresh.nonce;
    assert_eq!(restarted, fresh);
    assert_eq!(replay, opening);
}

/// Plays a night to the end by typing each prompt, recording what was
/// typed at and what happened.
fn play_out(game: &mut GameController<'_>) -> Vec<(String, String, Vec<String>)> {
    let mut log = Vec::new();
    let mut guard = 0;
    while game.state().phase == Phase::Night && guard < 200 {
        let kind = game
            .state()
            .active_enemy()
            .map(|enemy| enemy.kind.to_string())
            .unwrap_or_default();
        let word = game.state().night_prompt.clone();
        let events = game.apply_command(&word);
        log.push((kind, word, events));
        guard += 1;
    }
    log
}

#[test]
fn restarted_slice_replays_the_whole_wave() {
    let content = content()
        .with_enemy(EnemyKindDef {
            kind: EnemyKind::new("brute"),
            name: "Brute".into(),
            tier: 2,
            hp: 9,
            damage: 2,
            speed: 1,
            armor: 0,
            reward: 4,
            abilities: EnemyAbilities::empty(),
        })
        .with_profile(WaveProfile {
            id: "siege".into(),
            start_day: 1,
            start_hp: 20,
            start_gold: 0,
            wave_spawn_total: 8,
            lesson_id: "home_row".into(),
            kinds: vec![EnemyKind::new("raider"), EnemyKind::new("brute")],
        });
    let config = GameConfig::default();
    let mode = GameMode::VerticalSlice {
        profile_id: "siege".into(),
    };
    let (mut game, opening) = GameController::new(content.env(), &config, "replay", mode);
    assert_eq!((game.state().hp, game.state().gold), (20, 0));
    assert_eq!(game.state().night_wave_total, 8);

    let first = play_out(&mut game);
    assert_eq!(game.state().phase, Phase::Victory);
    let first_end = game.state().clone();
    assert!(first.iter().any(|(kind, _, _)| kind == "brute"));
    assert!(first.iter().any(|(kind, _, _)| kind == "raider"));

    assert_eq!(game.restart(), opening);
    let second = play_out(&mut game);
    assert_eq!(game.state().phase, Phase::Victory);

    assert_eq!(first, second);
    let mut second_end = game.state().clone();
    second_end.nonce = first_end.nonce;
    assert_eq!(second_end, first_end);
}

#[test]
fn clearing_the_slice_wins() {
    let content = content();
    let config = GameConfig::default();
    let (mut game, _) = GameController::new(content.env(), &config, "slice", vertical_slice());

    while game.state().phase == Phase::Night {
        let word = game.state().night_prompt.clone();
        assert!(!word.is_empty());
        game.apply_intent(Intent::DefendInput { text: word });
    }
    assert_eq!(game.state().phase, Phase::Victory);
    assert_eq!(game.state().wave, 1);

    let events = game.apply_command("gather wood");
    assert_eq!(events.len(), 1);
}

#[test]
fn research_is_gated_by_gold_and_prerequisites() {
    let content = content();
    let config = GameConfig::default();
    let (mut game, _) = GameController::new(content.env(), &config, "lab", GameMode::Campaign);
    let mut state = game.state().clone();
    state.gold = 10;
    game.restore(state);
    let before = game.state().clone();

    let events = game.apply_command("research masonry");
    assert_eq!(events, vec!["Insufficient gold for masonry: need 50, have 10.".to_string()]);
    assert_eq!(game.state(), &before);

    let events = game.apply_command("research fortify");
    assert_eq!(events, vec!["fortify requires masonry first.".to_string()]);
    assert_eq!(game.state(), &before);

    let mut state = game.state().clone();
    state.gold = 60;
    game.restore(state);
    game.apply_command("research masonry");
    assert_eq!(game.state().active_research.as_deref(), Some("masonry"));
    assert_eq!(game.state().gold, 10);
}

#[test]
fn night_actions_are_rejected_by_day() {
    let content = content();
    let config = GameConfig::default();
    let (mut game, _) = GameController::new(content.env(), &config, "gate", GameMode::Campaign);
    let before = game.state().clone();

    for intent in [
        Intent::DefendInput {
            text: "ask".into(),
        },
        Intent::CastSpell {
            spell: "nova".into(),
        },
        Intent::Wait,
    ] {
        let events = game.apply_intent(intent);
        assert_eq!(events.len(), 1);
        assert_eq!(game.state(), &before);
    }
}

#[test]
fn day_actions_are_rejected_at_night() {
    let content = content();
    let config = GameConfig::default();
    let (mut game, _) = GameController::new(content.env(), &config, "gate", GameMode::Campaign);
    game.apply_command("end");
    let before = game.state().clone();

    let events = game.apply_command("explore");
    assert_eq!(events, vec!["You can only explore during the day.".to_string()]);
    assert_eq!(game.state(), &before);
}

#[test]
fn snapshot_round_trip_preserves_the_run() {
    let content = content();
    let config = GameConfig::default();
    let (mut game, _) = GameController::new(content.env(), &config, "save", GameMode::Endless);
    game.apply_command("gather wood");
    game.apply_command("explore");
    game.apply_command("end");

    let bytes = snapshot::encode(game.state()).expect("encode");
    let (mut copy, _) = GameController::new(content.env(), &config, "other", GameMode::Campaign);
    copy.restore(snapshot::decode(&bytes).expect("decode"));

    assert_eq!(
        snapshot::digest(copy.state()).expect("digest"),
        snapshot::digest(game.state()).expect("digest")
    );
    assert_eq!(copy.apply_command("wait"), game.apply_command("wait"));
    assert_eq!(copy.state(), game.state());
}
