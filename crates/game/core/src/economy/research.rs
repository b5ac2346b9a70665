//! Research tree and skills.
//!
//! One research runs at a time. It advances by one per wave survived and
//! completes once progress reaches `waves_required`; its effects then join
//! the permanent multiplier table. Skills unlock immediately for gold.

use crate::engine::{EventLog, SimContext};
use crate::error::{ErrorSeverity, GameError};
use crate::state::GameState;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResearchError {
    #[error("Unknown research '{0}'.")]
    UnknownResearch(String),

    #[error("Already researching {active}.")]
    AlreadyActive { active: String },

    #[error("{0} is already researched.")]
    AlreadyCompleted(String),

    #[error("{id} requires {missing} first.")]
    MissingPrerequisite { id: String, missing: String },

    #[error("Insufficient gold for {id}: need {need}, have {have}.")]
    InsufficientGold { id: String, need: u32, have: u32 },

    #[error("Unknown skill '{0}'.")]
    UnknownSkill(String),

    #[error("You already know {0}.")]
    SkillAlreadyLearned(String),

    #[error("{skill} requires {requires} first.")]
    SkillRequires { skill: String, requires: String },
}

impl GameError for ResearchError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownResearch(_) | Self::UnknownSkill(_) => ErrorSeverity::Validation,
            _ => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownResearch(_) => "RESEARCH_UNKNOWN",
            Self::AlreadyActive { .. } => "RESEARCH_ALREADY_ACTIVE",
            Self::AlreadyCompleted(_) => "RESEARCH_ALREADY_COMPLETED",
            Self::MissingPrerequisite { .. } => "RESEARCH_MISSING_PREREQUISITE",
            Self::InsufficientGold { .. } => "RESEARCH_INSUFFICIENT_GOLD",
            Self::UnknownSkill(_) => "RESEARCH_UNKNOWN_SKILL",
            Self::SkillAlreadyLearned(_) => "RESEARCH_SKILL_ALREADY_LEARNED",
            Self::SkillRequires { .. } => "RESEARCH_SKILL_REQUIRES",
        }
    }
}

/// Starts a research project, paying its gold cost up front.
pub fn start_research(
    state: &mut GameState,
    ctx: &SimContext<'_>,
    id: &str,
    events: &mut EventLog,
) -> Result<(), ResearchError> {
    let id = id.to_lowercase();
    let def = ctx
        .env
        .research()
        .research(&id)
        .ok_or_else(|| ResearchError::UnknownResearch(id.clone()))?;

    if let Some(active) = &state.active_research {
        return Err(ResearchError::AlreadyActive {
            active: active.clone(),
        });
    }
    if state.completed_research.contains(&def.id) {
        return Err(ResearchError::AlreadyCompleted(def.id.clone()));
    }
    if let Some(missing) = def
        .prerequisites
        .iter()
        .find(|prerequisite| !state.completed_research.contains(*prerequisite))
    {
        return Err(ResearchError::MissingPrerequisite {
            id: def.id.clone(),
            missing: missing.clone(),
        });
    }
    if state.gold < def.cost_gold {
        return Err(ResearchError::InsufficientGold {
            id: def.id.clone(),
            need: def.cost_gold,
            have: state.gold,
        });
    }

    state.gold -= def.cost_gold;
    state.active_research = Some(def.id.clone());
    state.research_progress = 0;
    events.push(format!(
        "Started researching {} ({} waves).",
        def.name, def.waves_required
    ));
    Ok(())
}

/// Adds progress to the active research, completing it when done.
pub fn add_progress(
    state: &mut GameState,
    ctx: &SimContext<'_>,
    amount: u32,
    events: &mut EventLog,
) {
    let Some(active) = state.active_research.clone() else {
        return;
    };
    state.research_progress = state.research_progress.saturating_add(amount);

    let required = match ctx.env.research().research(&active) {
        Some(def) => def.waves_required,
        None => {
            tracing::warn!(research = %active, "active research has no definition; completing it");
            0
        }
    };
    if state.research_progress >= required {
        let name = ctx
            .env
            .research()
            .research(&active)
            .map(|def| def.name.clone())
            .unwrap_or_else(|| active.clone());
        state.completed_research.insert(active);
        state.active_research = None;
        state.research_progress = 0;
        events.push(format!("Research complete: {name}."));
        tracing::info!(research = %name, "research completed");
    }
}

/// Called once per wave survived.
pub fn advance_research(state: &mut GameState, ctx: &SimContext<'_>, events: &mut EventLog) {
    add_progress(state, ctx, 1, events);
}

/// Unlocks a skill for gold.
pub fn learn_skill(
    state: &mut GameState,
    ctx: &SimContext<'_>,
    id: &str,
    events: &mut EventLog,
) -> Result<(), ResearchError> {
    let id = id.to_lowercase();
    let def = ctx
        .env
        .research()
        .skill(&id)
        .ok_or_else(|| ResearchError::UnknownSkill(id.clone()))?;

    if state.unlocked_skills.contains(&def.id) {
        return Err(ResearchError::SkillAlreadyLearned(def.name.clone()));
    }
    if let Some(requires) = def
        .requires
        .as_ref()
        .filter(|requires| !state.unlocked_skills.contains(*requires))
    {
        return Err(ResearchError::SkillRequires {
            skill: def.id.clone(),
            requires: requires.clone(),
        });
    }
    if state.gold < def.cost_gold {
        return Err(ResearchError::InsufficientGold {
            id: def.id.clone(),
            need: def.cost_gold,
            have: state.gold,
        });
    }

    state.gold -= def.cost_gold;
    state.unlocked_skills.insert(def.id.clone());
    events.push(format!("Learned {}.", def.name));
    Ok(())
}

/// One line per research node: done, active or available.
pub fn research_overview(state: &GameState, ctx: &SimContext<'_>) -> Vec<String> {
    ctx.env
        .research()
        .research_all()
        .into_iter()
        .map(|def| {
            let status = if state.completed_research.contains(&def.id) {
                "done".to_string()
            } else if state.active_research.as_deref() == Some(def.id.as_str()) {
                format!("active {}/{}", state.research_progress, def.waves_required)
            } else if def
                .prerequisites
                .iter()
                .all(|prerequisite| state.completed_research.contains(prerequisite))
            {
                format!("{} gold", def.cost_gold)
            } else {
                format!("needs {}", def.prerequisites.join(", "))
            };
            format!("  {} ({}): {status}", def.id, def.name)
        })
        .collect()
}
