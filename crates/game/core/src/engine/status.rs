use super::context::SimContext;
use crate::combat::spells::cooldown_remaining;
use crate::combat::{PresetTyping, preview_tower};
use crate::economy::{research::research_overview, trade_rate_permille};
use crate::state::{BuildingKind, GameState, Phase};

/// Human-readable summary of the run, for the `status` command.
pub fn status_lines(state: &GameState, ctx: &SimContext<'_>) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Day {} ({}) | Act {} | Mode {} | Waves survived {}",
            state.day, state.phase, state.current_act, state.mode, state.wave
        ),
        format!(
            "HP {}/{} | Gold {} | Threat {} | AP {}",
            state.hp, state.max_hp, state.gold, state.threat, state.ap
        ),
        format!(
            "Wood {} | Stone {} | Food {}",
            state.resources.wood, state.resources.stone, state.resources.food
        ),
        format!(
            "Workers {}/{} ({} free)",
            state.worker_count,
            state.max_workers,
            state.available_workers()
        ),
    ];

    if !state.buildings.is_empty() {
        let counts: Vec<String> = state
            .buildings
            .iter()
            .map(|(kind, count)| format!("{kind} x{count}"))
            .collect();
        lines.push(format!("Buildings: {}", counts.join(", ")));
    }
    for (index, tower) in &state.towers {
        lines.push(format!(
            "  {} tower level {} at {}",
            tower.tower_type,
            tower.level,
            index.to_pos(ctx.config.map_width)
        ));
    }
    if !state.inventory.is_empty() {
        let items: Vec<String> = state
            .inventory
            .iter()
            .map(|(item, count)| format!("{item} x{count}"))
            .collect();
        lines.push(format!("Inventory: {}", items.join(", ")));
    }
    if let Some(active) = &state.active_research {
        lines.push(format!(
            "Researching {active} ({} waves so far)",
            state.research_progress
        ));
    }
    if state.building_count(BuildingKind::Market) > 0 {
        lines.push(format!(
            "Trade rate {:.2}",
            f64::from(trade_rate_permille(state, ctx)) / 1000.0
        ));
    }
    if !state.relations.is_empty() {
        let relations: Vec<String> = state
            .relations
            .iter()
            .map(|(faction, relation)| format!("{faction} {relation}"))
            .collect();
        lines.push(format!("Relations: {}", relations.join(", ")));
    }

    lines.push(format!(
        "Combo {} (best {}) | Accuracy {:.0}% | WPM {:.1}",
        state.typing.combo,
        state.max_combo_ever,
        state.typing.accuracy() * 100.0,
        state.typing.wpm()
    ));

    if state.phase == Phase::Night {
        lines.push(format!(
            "Night turn {} | {} enemies still to come | Targeting {}",
            state.night_turn, state.night_spawn_remaining, state.target_mode
        ));
        let mut field: Vec<_> = state.enemies.iter().filter(|enemy| enemy.is_live()).collect();
        field.sort_by_key(|enemy| (enemy.distance, enemy.id));
        for enemy in field {
            lines.push(format!(
                "  '{}' {} hp {}/{} at {}",
                enemy.word, enemy.kind, enemy.hp, enemy.max_hp, enemy.distance
            ));
        }
        for spell in ctx.env.towers().spells() {
            let remaining = cooldown_remaining(state, &spell.id);
            if remaining > 0.0 {
                lines.push(format!("  {} ({}) ready in {remaining:.1}s", spell.id, spell.word));
            } else {
                lines.push(format!("  {} ({}) ready", spell.id, spell.word));
            }
        }
    }
    lines
}

/// Lines for `research` without an id.
pub fn research_lines(state: &GameState, ctx: &SimContext<'_>) -> Vec<String> {
    let mut lines = vec!["Research:".to_string()];
    lines.extend(research_overview(state, ctx));
    if lines.len() == 1 {
        lines.push("  nothing to research".to_string());
    }
    lines
}

/// Lines for `preview <tower> [level]`: expected damage against an
/// unarmored target at each typing preset.
pub fn preview_lines(ctx: &SimContext<'_>, tower_id: &str, level: u32) -> Vec<String> {
    let Some(def) = ctx.env.towers().tower(tower_id) else {
        return vec![format!("Unknown tower '{tower_id}'.")];
    };
    let level = level.clamp(1, ctx.config.tower_max_level.max(1));
    let mut lines = vec![format!("{} level {level}, unarmored target:", def.name)];
    for (label, typing) in [
        ("casual", PresetTyping::CASUAL),
        ("steady", PresetTyping::STEADY),
        ("expert", PresetTyping::EXPERT),
    ] {
        let preview = preview_tower(def, level, typing, 0, None);
        lines.push(format!(
            "  {label} ({:.0} wpm, {:.0}%): {} per hit x{} every {} turns, {:.1} per turn",
            typing.wpm,
            typing.accuracy * 100.0,
            preview.damage_per_hit,
            preview.hits_per_volley,
            preview.cooldown_turns,
            preview.damage_per_turn
        ));
    }
    lines
}
