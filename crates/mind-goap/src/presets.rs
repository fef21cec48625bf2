//! Default goals, steps, predicates and effects.

use mind_context::{DecisionContext, InputKind};
use mind_core::AgentId;

use crate::registry::StepContext;
use crate::{GoalPlanner, PlannerRegistry, PlannerResult, load_plan_library_toml};

pub const DEFAULT_PLANS_TOML: &str = include_str!("../assets/plans.toml");

/// A planner holding the default plan library.
pub fn default_planner() -> PlannerResult<GoalPlanner> {
    let mut planner = GoalPlanner::new(builtin_registry());
    load_plan_library_toml(DEFAULT_PLANS_TOML)?.install(&mut planner)?;
    Ok(planner)
}

/// Every predicate and effect the default library names.
pub fn builtin_registry() -> PlannerRegistry {
    let mut r = PlannerRegistry::new();

    r.register_predicate("is_hungry", above(InputKind::Hunger, 0.6));
    r.register_predicate("is_thirsty", above(InputKind::Thirst, 0.6));
    r.register_predicate("is_tired", above(InputKind::Fatigue, 0.7));
    r.register_predicate("has_target", |_, ctx: &DecisionContext| ctx.target.is_some());
    r.register_predicate("fed_and_watered", |_, ctx: &DecisionContext| {
        ctx.get(InputKind::Hunger) <= 0.6 && ctx.get(InputKind::Thirst) <= 0.6
    });
    r.register_predicate("rested", |_, ctx: &DecisionContext| ctx.get(InputKind::Fatigue) <= 0.7);
    r.register_predicate("not_lonely", |_, ctx: &DecisionContext| ctx.get(InputKind::Loneliness) <= 0.6);
    r.register_predicate("curiosity_sated", |_, ctx: &DecisionContext| ctx.get(InputKind::Curiosity) <= 0.5);

    r.register_effect("eat", fill("hunger", 0.6));
    r.register_effect("drink", fill("thirst", 0.6));
    r.register_effect("sleep", fill("fatigue", 0.8));
    r.register_effect("explore", fill("curiosity", 0.3));
    r.register_effect("socialize", |cx: &mut StepContext<'_, '_>| {
        if let Some(there) = cx.decision.target.and_then(|t| cx.world.live_position(t)) {
            cx.actuator.set_destination(cx.agent, there)?;
        }
        cx.actuator.fill_need(cx.agent, "social", 0.4)
    });
    r
}

fn above(kind: InputKind, threshold: f32) -> impl Fn(AgentId, &DecisionContext) -> bool {
    move |_, ctx| ctx.get(kind) > threshold
}

fn fill(
    need:  &'static str,
    delta: f32,
) -> impl Fn(&mut StepContext<'_, '_>) -> mind_core::MindResult<()> {
    move |cx: &mut StepContext<'_, '_>| cx.actuator.fill_need(cx.agent, need, delta)
}
