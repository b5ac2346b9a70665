use super::research::add_progress;
use super::{EconomyError, try_debit};
use crate::engine::{EventLog, SimContext};
use crate::env::ItemEffect;
use crate::state::{Buff, GameState};

/// Consumes a recipe's cost and adds its output to the inventory.
pub fn craft(
    state: &mut GameState,
    ctx: &SimContext<'_>,
    recipe: &str,
    events: &mut EventLog,
) -> Result<(), EconomyError> {
    let recipe = recipe.to_lowercase();
    let def = ctx
        .env
        .economy()
        .recipe(&recipe)
        .ok_or(EconomyError::UnknownRecipe(recipe))?;

    try_debit(state, &def.cost)?;
    let count = state.inventory.entry(def.output_item.clone()).or_insert(0);
    *count = count.saturating_add(def.quantity);
    events.push(format!(
        "Crafted {} {} for {}.",
        def.quantity, def.output_item, def.cost
    ));
    Ok(())
}

/// Consumes one item from the inventory and applies its effect.
pub fn use_item(
    state: &mut GameState,
    ctx: &SimContext<'_>,
    item: &str,
    events: &mut EventLog,
) -> Result<(), EconomyError> {
    let item = item.to_lowercase();
    let def = ctx
        .env
        .economy()
        .item(&item)
        .ok_or_else(|| EconomyError::UnknownItem(item.clone()))?;
    if state.item_count(&def.id) == 0 {
        return Err(EconomyError::ItemNotOwned(def.name.clone()));
    }

    match &def.effect {
        ItemEffect::Heal(amount) => {
            if state.hp >= state.max_hp {
                return Err(EconomyError::AlreadyAtFullHealth);
            }
            let healed = (*amount).min(state.max_hp - state.hp);
            state.hp += healed;
            events.push(format!("You use {} and recover {healed} hp.", def.name));
        }
        ItemEffect::Buff {
            buff_id,
            days,
            deltas,
        } => {
            if *days == 0 {
                events.push(format!("You use {}, but {buff_id} fades at once.", def.name));
            } else {
                state.active_buffs.push(Buff {
                    buff_id: buff_id.clone(),
                    remaining_days: *days,
                    effect_deltas: deltas.clone(),
                });
                events.push(format!("You use {}. {buff_id} lasts {days} days.", def.name));
            }
        }
        ItemEffect::ResearchProgress(amount) => {
            if state.active_research.is_none() {
                return Err(EconomyError::NoActiveResearch);
            }
            events.push(format!("You use {}.", def.name));
            add_progress(state, ctx, *amount, events);
        }
    }

    if let Some(count) = state.inventory.get_mut(&def.id) {
        *count -= 1;
        if *count == 0 {
            state.inventory.remove(&def.id);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::config::GameConfig;
    use crate::env::{ContentBundle, Cost, ItemDef, RecipeDef, ResearchDef};
    use crate::state::{GameMode, ResourceKind};
    use crate::stats::EffectKey;

    fn content() -> ContentBundle {
        ContentBundle::new()
            .with_recipe(RecipeDef {
                id: "poultice".into(),
                cost: Cost::gold(0).with_resource(ResourceKind::Food, 3),
                output_item: "poultice".into(),
                quantity: 1,
            })
            .with_item(ItemDef {
                id: "poultice".into(),
                name: "Poultice".into(),
                effect: ItemEffect::Heal(5),
            })
            .with_item(ItemDef {
                id: "war_banner".into(),
                name: "War Banner".into(),
                effect: ItemEffect::Buff {
                    buff_id: "rally".into(),
                    days: 2,
                    deltas: BTreeMap::from([(EffectKey::TowerDamage, 0.2)]),
                },
            })
            .with_item(ItemDef {
                id: "scroll".into(),
                name: "Scroll".into(),
                effect: ItemEffect::ResearchProgress(1),
            })
            .with_research(ResearchDef {
                id: "masonry".into(),
                name: "Masonry".into(),
                cost_gold: 0,
                prerequisites: vec![],
                waves_required: 1,
                effects: BTreeMap::new(),
            })
    }

    #[test]
    fn crafted_items_heal_up_to_max() {
        let content = content();
        let config = GameConfig::default();
        let ctx = SimContext::new(content.env(), &config);
        let mut state = GameState::new("craft", GameMode::Campaign, &config);
        state.resources.food = 6;
        let mut events = EventLog::new();

        craft(&mut state, &ctx, "poultice", &mut events).expect("crafted");
        assert_eq!(state.item_count("poultice"), 1);
        assert_eq!(state.resources.food, 3);

        assert_eq!(
            use_item(&mut state, &ctx, "poultice", &mut events),
            Err(EconomyError::AlreadyAtFullHealth)
        );
        state.hp = state.max_hp - 2;
        use_item(&mut state, &ctx, "poultice", &mut events).expect("used");
        assert_eq!(state.hp, state.max_hp);
        assert_eq!(state.item_count("poultice"), 0);
        assert!(!state.inventory.contains_key("poultice"));
    }

    #[test]
    fn buffs_and_research_items() {
        let content = content();
        let config = GameConfig::default();
        let ctx = SimContext::new(content.env(), &config);
        let mut state = GameState::new("craft", GameMode::Campaign, &config);
        state.inventory.insert("war_banner".into(), 1);
        state.inventory.insert("scroll".into(), 1);
        let mut events = EventLog::new();

        use_item(&mut state, &ctx, "war_banner", &mut events).expect("used");
        assert_eq!(state.active_buffs.len(), 1);
        assert!((ctx.modifiers(&state).factor(EffectKey::TowerDamage) - 1.2).abs() < 1e-9);

        assert_eq!(
            use_item(&mut state, &ctx, "scroll", &mut events),
            Err(EconomyError::NoActiveResearch)
        );
        state.active_research = Some("masonry".into());
        use_item(&mut state, &ctx, "scroll", &mut events).expect("used");
        assert!(state.completed_research.contains("masonry"));

        assert_eq!(
            use_item(&mut state, &ctx, "scroll", &mut events),
            Err(EconomyError::ItemNotOwned("Scroll".into()))
        );
    }

    #[test]
    fn zero_day_buffs_never_apply() {
        let content = ContentBundle::new().with_item(ItemDef {
            id: "dud".into(),
            name: "Dud".into(),
            effect: ItemEffect::Buff {
                buff_id: "spark".into(),
                days: 0,
                deltas: BTreeMap::from([(EffectKey::TowerDamage, 0.5)]),
            },
        });
        let config = GameConfig::default();
        let ctx = SimContext::new(content.env(), &config);
        let mut state = GameState::new("craft", GameMode::Campaign, &config);
        state.inventory.insert("dud".into(), 1);
        let mut events = EventLog::new();

        use_item(&mut state, &ctx, "dud", &mut events).expect("used");
        assert!(state.active_buffs.is_empty());
        assert_eq!(ctx.modifiers(&state).factor(EffectKey::TowerDamage), 1.0);
        assert_eq!(state.item_count("dud"), 0);
    }
}
