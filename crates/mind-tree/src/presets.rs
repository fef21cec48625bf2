//! Built-in handlers and the default life-stage trees.
//!
//! The trees themselves are data (`assets/trees.toml`); this module only
//! supplies the functions their leaves name.

use tracing::debug;

use mind_context::{DecisionContext, InputKind};
use mind_core::{AgentId, Position};

use crate::handlers::LeafContext;
use crate::{HandlerRegistry, Status, TreeEngine, TreeResult, load_templates_toml};

/// Default Baby / Child / Adult / Elder trees.
pub const DEFAULT_TREES_TOML: &str = include_str!("../assets/trees.toml");

/// A compiled engine holding the default trees and built-in handlers.
pub fn default_engine() -> TreeResult<TreeEngine> {
    let mut engine = TreeEngine::new(builtin_handlers());
    for template in load_templates_toml(DEFAULT_TREES_TOML)? {
        engine.add_template(&template)?;
    }
    Ok(engine)
}

/// Registry with every condition and action the default trees use.
pub fn builtin_handlers() -> HandlerRegistry {
    let mut r = HandlerRegistry::new();

    r.register_condition("is_hungry", above(InputKind::Hunger, 0.6));
    r.register_condition("is_thirsty", above(InputKind::Thirst, 0.6));
    r.register_condition("is_tired", above(InputKind::Fatigue, 0.7));
    r.register_condition("is_lonely", above(InputKind::Loneliness, 0.6));
    r.register_condition("is_bored", above(InputKind::Boredom, 0.5));
    r.register_condition("is_curious", above(InputKind::Curiosity, 0.5));
    r.register_condition("is_dirty", above(InputKind::Hygiene, 0.7));
    r.register_condition("is_afraid", above(InputKind::Fear, 0.5));
    r.register_condition("is_angry", above(InputKind::Aggression, 0.6));
    r.register_condition("bad_weather", above(InputKind::WeatherSeverity, 0.49));
    r.register_condition("has_target", |_, ctx: &DecisionContext| ctx.target.is_some());
    r.register_condition("is_dark", |_, ctx: &DecisionContext| {
        ctx.is_known(InputKind::Sunlight) && ctx.get(InputKind::Sunlight) < 0.2
    });

    r.register_action("eat", timed("Eat", "hunger", 2, 0.6));
    r.register_action("drink", timed("Drink", "thirst", 1, 0.6));
    r.register_action("sleep", timed("Sleep", "fatigue", 4, 0.8));
    r.register_action("groom", timed("Groom", "hygiene", 1, 0.5));
    r.register_action("play", timed("Play", "fun", 1, 0.4));
    r.register_action("seek_shelter", timed("SeekShelter", "comfort", 1, 0.3));
    r.register_action("cry", cry);
    r.register_action("socialize", socialize);
    r.register_action("explore", explore);
    r.register_action("flee", flee);
    r.register_action("wander", wander);
    r
}

fn above(kind: InputKind, threshold: f32) -> impl Fn(AgentId, &DecisionContext) -> bool {
    move |_, ctx| ctx.get(kind) > threshold
}

/// An action that adopts `goal`, keeps the agent busy for `ticks`, then
/// relieves `need` by `relief`.
fn timed(
    goal:   &'static str,
    need:   &'static str,
    ticks:  u64,
    relief: f32,
) -> impl Fn(&mut LeafContext<'_, '_>) -> Status {
    move |leaf: &mut LeafContext<'_, '_>| {
        if leaf.elapsed == 0
            && let Err(e) = leaf.actuator.force_goal(leaf.agent, goal)
        {
            debug!(agent = %leaf.agent, goal, error = %e, "cannot adopt goal");
            return Status::Failure;
        }
        if leaf.elapsed < ticks {
            return Status::Running;
        }
        match leaf.actuator.fill_need(leaf.agent, need, relief) {
            Ok(()) => Status::Success,
            Err(e) => {
                debug!(agent = %leaf.agent, need, error = %e, "cannot fill need");
                Status::Failure
            }
        }
    }
}

fn cry(leaf: &mut LeafContext<'_, '_>) -> Status {
    Status::from_bool(leaf.actuator.force_goal(leaf.agent, "CallForCare").is_ok())
}

fn socialize(leaf: &mut LeafContext<'_, '_>) -> Status {
    let Some(target) = leaf.decision.target else {
        return Status::Failure;
    };
    let Some(there) = leaf.world.live_position(target) else {
        debug!(agent = %leaf.agent, %target, "social target vanished");
        return Status::Failure;
    };
    let ok = leaf.actuator.set_destination(leaf.agent, there).is_ok()
        && leaf.actuator.fill_need(leaf.agent, "social", 0.4).is_ok();
    Status::from_bool(ok)
}

fn explore(leaf: &mut LeafContext<'_, '_>) -> Status {
    let Some(here) = leaf.world.position(leaf.agent) else {
        return Status::Failure;
    };
    let dest = jitter(leaf, here, 12.0);
    let ok = leaf.actuator.set_destination(leaf.agent, dest).is_ok()
        && leaf.actuator.fill_need(leaf.agent, "curiosity", 0.3).is_ok();
    Status::from_bool(ok)
}

fn flee(leaf: &mut LeafContext<'_, '_>) -> Status {
    let Some(here) = leaf.world.position(leaf.agent) else {
        return Status::Failure;
    };
    let threat = leaf.decision.target.and_then(|t| leaf.world.live_position(t));
    let dest = match threat {
        // Run directly away from the threat.
        Some(t) => here.lerp(t, -1.5),
        None => jitter(leaf, here, 15.0),
    };
    let ok = leaf.actuator.force_goal(leaf.agent, "Flee").is_ok()
        && leaf.actuator.set_destination(leaf.agent, dest).is_ok();
    Status::from_bool(ok)
}

fn wander(leaf: &mut LeafContext<'_, '_>) -> Status {
    let Some(here) = leaf.world.position(leaf.agent) else {
        return Status::Failure;
    };
    let dest = jitter(leaf, here, 5.0);
    Status::from_bool(leaf.actuator.set_destination(leaf.agent, dest).is_ok())
}

fn jitter(leaf: &mut LeafContext<'_, '_>, around: Position, reach: f32) -> Position {
    Position::new(
        around.x + leaf.rng.gen_range(-reach..=reach),
        around.y + leaf.rng.gen_range(-reach..=reach),
    )
}
