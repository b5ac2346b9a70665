//! Faction relations and agreements.
//!
//! Relations are clamped to the configured range. Agreements unlock once the
//! relation reaches their threshold and are never revoked.

use super::credit_gold;
use crate::engine::{EventLog, SimContext};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{AgreementKind, GameState};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DiplomacyError {
    #[error("Unknown faction '{0}'.")]
    UnknownFaction(String),

    #[error("Unknown proposal '{0}'. Try trade, pact or alliance.")]
    UnknownProposal(String),

    #[error("A gift must be at least {min} gold.")]
    GiftTooSmall { min: u32 },

    #[error("Not enough gold: need {need}, have {have}.")]
    InsufficientGold { need: u32, have: u32 },

    #[error("{faction} will not agree to a {kind} below relation {need} (now {have}).")]
    RelationTooLow {
        faction: String,
        kind: AgreementKind,
        need: i32,
        have: i32,
    },

    #[error("You already have a {kind} with {faction}.")]
    AlreadyAgreed { faction: String, kind: AgreementKind },
}

impl GameError for DiplomacyError {
    fn severity(&self) -> ErrorSeverity {
        use DiplomacyError::*;
        match self {
            UnknownFaction(_) | UnknownProposal(_) | GiftTooSmall { .. } => {
                ErrorSeverity::Validation
            }
            InsufficientGold { .. } | RelationTooLow { .. } | AlreadyAgreed { .. } => {
                ErrorSeverity::Recoverable
            }
        }
    }

    fn error_code(&self) -> &'static str {
        use DiplomacyError::*;
        match self {
            UnknownFaction(_) => "DIPLOMACY_UNKNOWN_FACTION",
            UnknownProposal(_) => "DIPLOMACY_UNKNOWN_PROPOSAL",
            GiftTooSmall { .. } => "DIPLOMACY_GIFT_TOO_SMALL",
            InsufficientGold { .. } => "DIPLOMACY_INSUFFICIENT_GOLD",
            RelationTooLow { .. } => "DIPLOMACY_RELATION_TOO_LOW",
            AlreadyAgreed { .. } => "DIPLOMACY_ALREADY_AGREED",
        }
    }
}

pub fn relation(state: &GameState, faction: &str) -> i32 {
    state.relations.get(faction).copied().unwrap_or(0)
}

/// Adds `delta` to a faction's relation, clamped to the configured range.
pub fn adjust_relation(state: &mut GameState, ctx: &SimContext<'_>, faction: &str, delta: i32) -> i32 {
    let next = ctx
        .config
        .clamp_relation(relation(state, faction).saturating_add(delta));
    state.relations.insert(faction.to_string(), next);
    next
}

/// Relation required before a faction accepts `kind`.
pub fn threshold(ctx: &SimContext<'_>, kind: AgreementKind) -> Option<i32> {
    match kind {
        AgreementKind::TradeAgreement => Some(ctx.config.trade_threshold),
        AgreementKind::NonAggression => Some(ctx.config.pact_threshold),
        AgreementKind::Alliance => Some(ctx.config.alliance_threshold),
        AgreementKind::War => None,
    }
}

fn known_faction(ctx: &SimContext<'_>, faction: &str) -> Result<String, DiplomacyError> {
    let faction = faction.to_lowercase();
    ctx.env
        .economy()
        .faction(&faction)
        .map(|def| def.id.clone())
        .ok_or(DiplomacyError::UnknownFaction(faction))
}

/// Converts gold into relation. Only whole points are bought; the remainder
/// stays in the treasury.
pub fn gift(
    state: &mut GameState,
    ctx: &SimContext<'_>,
    faction: &str,
    gold: u32,
    events: &mut EventLog,
) -> Result<(), DiplomacyError> {
    let faction = known_faction(ctx, faction)?;
    let per_point = ctx.config.gift_gold_per_point.max(1);
    let points = gold / per_point;
    if points == 0 {
        return Err(DiplomacyError::GiftTooSmall { min: per_point });
    }
    if state.gold < gold {
        return Err(DiplomacyError::InsufficientGold {
            need: gold,
            have: state.gold,
        });
    }

    let spent = points * per_point;
    state.gold -= spent;
    let delta = i32::try_from(points).unwrap_or(i32::MAX);
    let now = adjust_relation(state, ctx, &faction, delta);
    events.push(format!(
        "You send {spent} gold to {faction}. Relation is now {now}."
    ));
    Ok(())
}

/// Proposes an agreement (`trade`, `pact` or `alliance`).
pub fn propose(
    state: &mut GameState,
    ctx: &SimContext<'_>,
    proposal: &str,
    faction: &str,
    events: &mut EventLog,
) -> Result<(), DiplomacyError> {
    let kind = AgreementKind::from_proposal(proposal)
        .ok_or_else(|| DiplomacyError::UnknownProposal(proposal.to_string()))?;
    let faction = known_faction(ctx, faction)?;

    if state.has_agreement(kind, &faction) {
        return Err(DiplomacyError::AlreadyAgreed { faction, kind });
    }
    let need = threshold(ctx, kind).ok_or_else(|| DiplomacyError::UnknownProposal(proposal.to_string()))?;
    let have = relation(state, &faction);
    if have < need {
        return Err(DiplomacyError::RelationTooLow {
            faction,
            kind,
            need,
            have,
        });
    }

    state
        .faction_agreements
        .entry(kind)
        .or_default()
        .insert(faction.clone());
    events.push(format!("{faction} accepts a {kind}."));
    tracing::info!(faction = %faction, agreement = %kind, "agreement signed");
    Ok(())
}

/// Morning payout from every alliance.
pub fn alliance_income(state: &mut GameState, ctx: &SimContext<'_>, events: &mut EventLog) {
    let allies = state.agreement_count(AgreementKind::Alliance);
    if allies == 0 {
        return;
    }
    let income = allies.saturating_mul(ctx.config.alliance_gold);
    credit_gold(state, income);
    events.push(format!("Your allies send {income} gold."));
}

/// Seeds starting relations from the faction table.
pub fn seed_relations(state: &mut GameState, ctx: &SimContext<'_>) {
    for def in ctx.env.economy().factions() {
        state
            .relations
            .insert(def.id.clone(), ctx.config.clamp_relation(def.starting_relation));
    }
}
