//! Quests, achievements, milestones and the campaign map.

use super::context::{EventLog, SimContext};
use crate::economy::credit_gold;
use crate::env::QuestCondition;
use crate::state::GameState;

/// Day numbers that record a milestone when reached.
pub const MILESTONE_DAYS: [u32; 3] = [5, 10, 15];

pub fn condition_met(state: &GameState, condition: QuestCondition) -> bool {
    match condition {
        QuestCondition::EnemiesDefeated(n) => state.enemies_defeated >= n,
        QuestCondition::StructuresBuilt(n) => state.total_structures() >= n,
        QuestCondition::GoldAtLeast(n) => state.gold >= n,
        QuestCondition::ComboReached(n) => state.max_combo_ever >= n,
        QuestCondition::DayReached(n) => state.day >= n,
        QuestCondition::WavesSurvived(n) => state.wave >= n,
    }
}

/// Runs after every accepted dispatch. Each quest pays once; each
/// achievement and milestone is recorded once.
pub fn evaluate(state: &mut GameState, ctx: &SimContext<'_>, events: &mut EventLog) {
    for quest in ctx.env.scenario().quests() {
        if state.completed_quests.contains(&quest.id) || !condition_met(state, quest.condition) {
            continue;
        }
        state.completed_quests.insert(quest.id.clone());
        credit_gold(state, quest.reward_gold);
        events.push(format!(
            "Quest complete: {} (+{} gold).",
            quest.name, quest.reward_gold
        ));
    }

    for achievement in ctx.env.scenario().achievements() {
        if state.unlocked_badges.contains(&achievement.badge)
            || !condition_met(state, achievement.condition)
        {
            continue;
        }
        state.unlocked_badges.insert(achievement.badge.clone());
        events.push(format!("Achievement unlocked: {}.", achievement.name));
    }

    for day in MILESTONE_DAYS {
        let milestone = format!("day_{day}");
        if state.day >= day && !state.milestones.contains(&milestone) {
            state.milestones.insert(milestone);
            events.push(format!("Milestone: you reached day {day}."));
        }
    }
}

/// Completes every campaign node that is unlocked by day and prerequisites.
/// `current_act` follows the highest completed act.
pub fn unlock_campaign_nodes(state: &mut GameState, ctx: &SimContext<'_>, events: &mut EventLog) {
    let nodes = ctx.env.scenario().campaign_nodes();
    loop {
        let ready = nodes.iter().find(|node| {
            !state.completed_nodes.contains(&node.id)
                && state.day >= node.unlock_day
                && node
                    .requires
                    .iter()
                    .all(|required| state.completed_nodes.contains(required))
        });
        let Some(node) = ready else {
            break;
        };

        state.completed_nodes.insert(node.id.clone());
        credit_gold(state, node.reward_gold);
        events.push(format!(
            "Campaign: {} secured (+{} gold).",
            node.id, node.reward_gold
        ));
        if node.act > state.current_act {
            state.current_act = node.act;
            events.push(format!("Act {} begins.", node.act));
            tracing::info!(act = node.act, "act advanced");
        }
    }
}
