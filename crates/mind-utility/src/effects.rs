//! The fixed set of action effects.
//!
//! An effect is what actually happens when an action executes: it writes
//! through the actuator and reports how much utility the agent gained.
//! Effects are looked up by action name when the action is registered.
//!
//! | Name           | Effect                                                   |
//! |----------------|----------------------------------------------------------|
//! | `eat`          | fill `hunger` by 0.5                                     |
//! | `drink`        | fill `thirst` by 0.5                                     |
//! | `sleep`        | fill `fatigue` by 0.6                                    |
//! | `rest`         | fill `fatigue` by 0.3                                    |
//! | `groom`        | fill `hygiene` by 0.4                                    |
//! | `play`         | fill `fun` by 0.4                                        |
//! | `explore`      | head somewhere nearby, fill `curiosity` by 0.3           |
//! | `socialize`    | approach the target, fill `social` by 0.4 (needs target) |
//! | `attack`       | adopt `Attack`, approach the target (needs target)       |
//! | `flee`         | adopt `Flee`, run away from the target or anywhere       |
//! | `seek_shelter` | adopt `SeekShelter`                                      |
//! | `wander`       | head somewhere close by                                  |
//!
//! A missing target is a refusal (`"no target"`); a target that is no
//! longer alive is a [`MindError::InvalidTarget`], which the scorer turns
//! into a failure and a cache invalidation.

use mind_context::{Actuator, DecisionContext, InputKind, WorldContext};
use mind_core::{AgentId, AgentRng, MindError, MindResult, Position, Tick};

/// Failure reasons reported in [`ActionResult::failure_reason`].
pub mod reason {
    pub const UNKNOWN_ACTION: &str = "unknown action";
    pub const NO_TARGET: &str = "no target";
    pub const INSUFFICIENT_RESOURCES: &str = "insufficient resources";
    pub const ON_COOLDOWN: &str = "on cooldown";
    pub const TARGET_LOST: &str = "target lost";
    pub const NO_ACTUATOR: &str = "no actuator";
    pub const NO_POSITION: &str = "no position";
}

/// Outcome of executing one action.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ActionResult {
    pub success:        bool,
    pub utility_gained: f32,
    pub failure_reason: Option<&'static str>,
}

impl ActionResult {
    pub fn succeeded(utility_gained: f32) -> Self {
        Self { success: true, utility_gained, failure_reason: None }
    }

    pub fn failed(reason: &'static str) -> Self {
        Self { success: false, utility_gained: 0.0, failure_reason: Some(reason) }
    }
}

/// Everything an effect may read or write.
pub struct EffectContext<'a, 'w> {
    pub agent:    AgentId,
    pub tick:     Tick,
    pub world:    &'a WorldContext<'w>,
    pub decision: &'a DecisionContext,
    pub actuator: &'a mut dyn Actuator,
    pub rng:      &'a mut AgentRng,
}

pub type EffectFn = fn(&mut EffectContext<'_, '_>) -> MindResult<ActionResult>;

/// Built-in effect for an action name, if there is one.
pub fn builtin_effect(name: &str) -> Option<EffectFn> {
    let f: EffectFn = match name {
        "eat" => eat,
        "drink" => drink,
        "sleep" => sleep,
        "rest" => rest,
        "groom" => groom,
        "play" => play,
        "explore" => explore,
        "socialize" => socialize,
        "attack" => attack,
        "flee" => flee,
        "seek_shelter" => seek_shelter,
        "wander" => wander,
        _ => return None,
    };
    Some(f)
}

// ── Need relief ───────────────────────────────────────────────────────────────

fn relieve(cx: &mut EffectContext<'_, '_>, input: InputKind, relief: f32) -> MindResult<ActionResult> {
    let need = input.need_name().unwrap_or(input.as_str());
    cx.actuator.fill_need(cx.agent, need, relief)?;
    Ok(ActionResult::succeeded(relief.min(cx.decision.get(input))))
}

fn eat(cx: &mut EffectContext<'_, '_>) -> MindResult<ActionResult> {
    relieve(cx, InputKind::Hunger, 0.5)
}

fn drink(cx: &mut EffectContext<'_, '_>) -> MindResult<ActionResult> {
    relieve(cx, InputKind::Thirst, 0.5)
}

fn sleep(cx: &mut EffectContext<'_, '_>) -> MindResult<ActionResult> {
    relieve(cx, InputKind::Fatigue, 0.6)
}

fn rest(cx: &mut EffectContext<'_, '_>) -> MindResult<ActionResult> {
    relieve(cx, InputKind::Fatigue, 0.3)
}

fn groom(cx: &mut EffectContext<'_, '_>) -> MindResult<ActionResult> {
    relieve(cx, InputKind::Hygiene, 0.4)
}

fn play(cx: &mut EffectContext<'_, '_>) -> MindResult<ActionResult> {
    relieve(cx, InputKind::Boredom, 0.4)
}

// ── Movement ──────────────────────────────────────────────────────────────────

fn explore(cx: &mut EffectContext<'_, '_>) -> MindResult<ActionResult> {
    let Some(here) = cx.world.position(cx.agent) else {
        return Ok(ActionResult::failed(reason::NO_POSITION));
    };
    let dest = jitter(cx.rng, here, 12.0);
    cx.actuator.set_destination(cx.agent, dest)?;
    relieve(cx, InputKind::Curiosity, 0.3)
}

fn wander(cx: &mut EffectContext<'_, '_>) -> MindResult<ActionResult> {
    let Some(here) = cx.world.position(cx.agent) else {
        return Ok(ActionResult::failed(reason::NO_POSITION));
    };
    let dest = jitter(cx.rng, here, 5.0);
    cx.actuator.set_destination(cx.agent, dest)?;
    Ok(ActionResult::succeeded(0.05))
}

fn flee(cx: &mut EffectContext<'_, '_>) -> MindResult<ActionResult> {
    let Some(here) = cx.world.position(cx.agent) else {
        return Ok(ActionResult::failed(reason::NO_POSITION));
    };
    let threat = cx.decision.target.and_then(|t| cx.world.live_position(t));
    let dest = match threat {
        Some(t) => here.lerp(t, -1.5),
        None => jitter(cx.rng, here, 15.0),
    };
    cx.actuator.force_goal(cx.agent, "Flee")?;
    cx.actuator.set_destination(cx.agent, dest)?;
    Ok(ActionResult::succeeded(cx.decision.get(InputKind::Fear)))
}

fn seek_shelter(cx: &mut EffectContext<'_, '_>) -> MindResult<ActionResult> {
    cx.actuator.force_goal(cx.agent, "SeekShelter")?;
    Ok(ActionResult::succeeded(cx.decision.get(InputKind::WeatherSeverity)))
}

// ── Targeted ──────────────────────────────────────────────────────────────────

/// Position of the live interaction target, or why there is none.
fn target_position(cx: &EffectContext<'_, '_>) -> MindResult<Option<Position>> {
    let Some(target) = cx.decision.target else {
        return Ok(None);
    };
    cx.world
        .live_position(target)
        .map(Some)
        .ok_or(MindError::InvalidTarget(target))
}

fn socialize(cx: &mut EffectContext<'_, '_>) -> MindResult<ActionResult> {
    let Some(there) = target_position(cx)? else {
        return Ok(ActionResult::failed(reason::NO_TARGET));
    };
    cx.actuator.set_destination(cx.agent, there)?;
    relieve(cx, InputKind::Loneliness, 0.4)
}

fn attack(cx: &mut EffectContext<'_, '_>) -> MindResult<ActionResult> {
    let Some(there) = target_position(cx)? else {
        return Ok(ActionResult::failed(reason::NO_TARGET));
    };
    cx.actuator.force_goal(cx.agent, "Attack")?;
    cx.actuator.set_destination(cx.agent, there)?;
    Ok(ActionResult::succeeded(cx.decision.get(InputKind::Aggression)))
}

fn jitter(rng: &mut AgentRng, around: Position, reach: f32) -> Position {
    Position::new(
        around.x + rng.gen_range(-reach..=reach),
        around.y + rng.gen_range(-reach..=reach),
    )
}
