use super::{EconomyError, try_debit_resource};
use crate::engine::{EventLog, SimContext};
use crate::state::{AgreementKind, BuildingKind, GameState, ResourceKind};
use crate::stats::EffectKey;

const PERMILLE: u32 = 1000;

/// Current exchange rate in thousandths.
///
/// Markets raise the base rate up to the market cap; any trade agreement adds
/// a flat bonus; the result is scaled by the trade-rate modifier and never
/// exceeds one-for-one.
pub fn trade_rate_permille(state: &GameState, ctx: &SimContext<'_>) -> u32 {
    let config = ctx.config;
    let markets = state.building_count(BuildingKind::Market);
    let mut rate = config
        .trade_base_permille
        .saturating_add(config.trade_market_bonus_permille.saturating_mul(markets))
        .min(config.trade_cap_permille);
    if state.agreement_count(AgreementKind::TradeAgreement) > 0 {
        rate = rate.saturating_add(config.trade_agreement_bonus_permille);
    }
    let factor = ctx.modifiers(state).factor(EffectKey::TradeRate);
    let scaled = (f64::from(rate) * factor).floor();
    if scaled.is_finite() {
        (scaled.max(0.0) as u32).min(PERMILLE)
    } else {
        rate.min(PERMILLE)
    }
}

/// Units received for `amount` at `permille`.
pub fn trade_quote(amount: u32, permille: u32) -> u32 {
    (u64::from(amount) * u64::from(permille) / u64::from(PERMILLE)) as u32
}

pub fn trade(
    state: &mut GameState,
    ctx: &SimContext<'_>,
    from: ResourceKind,
    to: ResourceKind,
    amount: u32,
    events: &mut EventLog,
) -> Result<(), EconomyError> {
    if from == to {
        return Err(EconomyError::SameResource);
    }
    if amount == 0 {
        return Err(EconomyError::InvalidAmount);
    }
    if state.building_count(BuildingKind::Market) == 0 {
        return Err(EconomyError::MarketRequired);
    }
    let have = state.resources.get(from);
    if have < amount {
        return Err(EconomyError::InsufficientResource {
            kind: from,
            need: amount,
            have,
        });
    }
    let received = trade_quote(amount, trade_rate_permille(state, ctx));
    if received == 0 {
        return Err(EconomyError::TradeTooSmall { amount });
    }

    try_debit_resource(state, from, amount)?;
    state.resources.credit(to, received);
    events.push(format!("Traded {amount} {from} for {received} {to}."));
    Ok(())
}
