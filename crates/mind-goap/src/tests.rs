//! Unit tests for mind-goap.

use mind_context::{ActuatorCall, CommandBuffer, DecisionContext, InputKind, StaticWorld, WorldContext};
use mind_core::{AgentId, GoalId, Position, StepId, Tick};

use crate::{
    GoalDef, GoalPlanner, PlannerError, PlannerEvent, PlannerPhase, PlannerRegistry, PlannerState,
    StepContext, StepDef, default_planner, load_plan_library_file, load_plan_library_toml,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

const A: AgentId = AgentId(0);

fn world() -> StaticWorld {
    let mut w = StaticWorld::new();
    w.spawn(A, Position::ORIGIN);
    w
}

fn update(
    planner:  &GoalPlanner,
    state:    &mut PlannerState,
    world:    &StaticWorld,
    buffer:   &mut CommandBuffer,
    decision: &DecisionContext,
    tick:     u64,
) -> PlannerEvent {
    let view = WorldContext::new(Tick(tick), world, Some(world));
    let mut cx = StepContext { agent: A, tick: Tick(tick), world: &view, decision, actuator: buffer };
    planner.update(state, &mut cx)
}

fn ctx(pairs: &[(InputKind, f32)]) -> DecisionContext {
    pairs
        .iter()
        .fold(DecisionContext::empty(Tick::ZERO), |c, &(k, v)| c.with(k, v))
}

/// Two goals gated on a flag-like input and three steps.
fn small_planner() -> GoalPlanner {
    let mut r = PlannerRegistry::new();
    r.register_predicate("fed", |_, c: &DecisionContext| c.get(InputKind::Hunger) < 0.5);
    r.register_predicate("always", |_, _| true);
    r.register_effect("eat", |cx: &mut StepContext<'_, '_>| cx.actuator.fill_need(cx.agent, "hunger", 0.5));

    let mut p = GoalPlanner::new(r);
    p.add_goal(GoalDef::new("Eat", 1.0).satisfied_when("fed")).unwrap();
    p.add_goal(GoalDef::new("Roam", 0.2)).unwrap();
    p.add_step(StepDef::new("forage", 2).requires("always").then("eat")).unwrap();
    p.add_step(StepDef::new("blocked", 1).requires("nonexistent")).unwrap();
    p.add_step(StepDef::new("pause", 0)).unwrap();
    p
}

// ── State machine ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod planner_tests {
    use super::*;

    #[test]
    fn empty_planner_never_leaves_idle() {
        let p = GoalPlanner::new(PlannerRegistry::new());
        let mut state = PlannerState::new();
        let w = world();
        let mut buf = CommandBuffer::new();
        for t in 0..5 {
            assert_eq!(update(&p, &mut state, &w, &mut buf, &DecisionContext::default(), t), PlannerEvent::Idle);
        }
        assert_eq!(state.phase(), PlannerPhase::Idle);
    }

    #[test]
    fn goals_without_steps_bounce_back_to_idle() {
        let mut p = GoalPlanner::new(PlannerRegistry::new());
        p.add_goal(GoalDef::new("Anything", 1.0)).unwrap();
        let mut state = PlannerState::new();
        let w = world();
        let mut buf = CommandBuffer::new();
        let c = DecisionContext::default();
        assert_eq!(update(&p, &mut state, &w, &mut buf, &c, 0), PlannerEvent::GoalSelected(GoalId(0)));
        assert_eq!(update(&p, &mut state, &w, &mut buf, &c, 1), PlannerEvent::NoPlan);
        assert_eq!(state.phase(), PlannerPhase::Idle);
        assert_eq!(state.goal(), None);
    }

    #[test]
    fn full_cycle_runs_steps_in_declaration_order() {
        let p = small_planner();
        let mut state = PlannerState::new();
        let w = world();
        let mut buf = CommandBuffer::new();
        let hungry = ctx(&[(InputKind::Hunger, 0.9)]);

        assert_eq!(update(&p, &mut state, &w, &mut buf, &hungry, 0), PlannerEvent::GoalSelected(GoalId(0)));
        assert_eq!(state.phase(), PlannerPhase::Planning);
        assert_eq!(update(&p, &mut state, &w, &mut buf, &hungry, 1), PlannerEvent::PlanBuilt { steps: 2 });
        assert_eq!(state.plan(), &[StepId(0), StepId(2)], "unbound precondition never eligible");
        assert_eq!(state.current_step(), Some(StepId(0)));

        assert_eq!(update(&p, &mut state, &w, &mut buf, &hungry, 2), PlannerEvent::StepInProgress(StepId(0)));
        assert_eq!(state.elapsed(), 1);
        assert_eq!(update(&p, &mut state, &w, &mut buf, &hungry, 3), PlannerEvent::StepCompleted(StepId(0)));
        assert_eq!(
            buf.pending(),
            &[ActuatorCall::FillNeed { agent: A, need: "hunger".into(), delta: 0.5 }]
        );

        assert_eq!(update(&p, &mut state, &w, &mut buf, &hungry, 4), PlannerEvent::PlanFinished(StepId(2)));
        assert_eq!(state.phase(), PlannerPhase::Idle);
        assert!(state.plan().is_empty());
        assert_eq!(buf.pending().len(), 1, "step without an effect is a no-op");
    }

    #[test]
    fn elapsed_is_charged_by_tick_gaps() {
        let p = small_planner();
        let mut state = PlannerState::new();
        let w = world();
        let mut buf = CommandBuffer::new();
        let hungry = ctx(&[(InputKind::Hunger, 0.9)]);
        update(&p, &mut state, &w, &mut buf, &hungry, 0);
        update(&p, &mut state, &w, &mut buf, &hungry, 1);
        // One update, five ticks later: forage (duration 2) completes at once.
        assert_eq!(update(&p, &mut state, &w, &mut buf, &hungry, 6), PlannerEvent::StepCompleted(StepId(0)));
    }

    #[test]
    fn highest_priority_unsatisfied_goal_wins() {
        let p = default_planner().unwrap();
        let mut state = PlannerState::new();
        let c = ctx(&[(InputKind::Fatigue, 0.9), (InputKind::Thirst, 0.8)]);
        let ev = update(&p, &mut state, &world(), &mut CommandBuffer::new(), &c, 0);
        assert_eq!(ev, PlannerEvent::GoalSelected(p.goal_id("Survive").unwrap()));

        let mut state = PlannerState::new();
        let c = ctx(&[(InputKind::Fatigue, 0.9)]);
        let ev = update(&p, &mut state, &world(), &mut CommandBuffer::new(), &c, 0);
        assert_eq!(ev, PlannerEvent::GoalSelected(p.goal_id("Rest").unwrap()));
    }

    #[test]
    fn forced_goal_discards_plan_and_ignores_satisfaction() {
        let p = small_planner();
        let mut state = PlannerState::new();
        let w = world();
        let mut buf = CommandBuffer::new();
        let hungry = ctx(&[(InputKind::Hunger, 0.9)]);
        update(&p, &mut state, &w, &mut buf, &hungry, 0);
        update(&p, &mut state, &w, &mut buf, &hungry, 1);
        assert!(state.is_busy());

        assert!(!p.force_goal(&mut state, "Fly"));
        assert_eq!(state.phase(), PlannerPhase::ExecutingPlan);

        assert!(p.force_goal(&mut state, "Eat"));
        assert_eq!(state.phase(), PlannerPhase::Idle);
        assert!(state.plan().is_empty());
        let fed = ctx(&[(InputKind::Hunger, 0.1)]);
        assert_eq!(update(&p, &mut state, &w, &mut buf, &fed, 2), PlannerEvent::GoalSelected(GoalId(0)));
    }

    #[test]
    fn describe_shows_plan() {
        let p = small_planner();
        let mut state = PlannerState::new();
        let w = world();
        let mut buf = CommandBuffer::new();
        let hungry = ctx(&[(InputKind::Hunger, 0.9)]);
        update(&p, &mut state, &w, &mut buf, &hungry, 0);
        update(&p, &mut state, &w, &mut buf, &hungry, 1);
        assert_eq!(
            p.describe(&state),
            "phase=ExecutingPlan goal=Eat plan=[forage>pause] step=0/2 elapsed=0"
        );
    }

    #[test]
    fn duplicates_rejected() {
        let mut p = small_planner();
        assert!(matches!(p.add_goal(GoalDef::new("Eat", 0.1)), Err(PlannerError::DuplicateGoal(_))));
        assert!(matches!(p.add_step(StepDef::new("pause", 3)), Err(PlannerError::DuplicateStep(_))));
        assert_eq!(p.goal_count(), 2);
        assert_eq!(p.step_count(), 3);
    }

    #[test]
    fn non_finite_priorities_rejected() {
        let mut p = small_planner();
        for priority in [f32::NAN, f32::INFINITY] {
            let err = p.add_goal(GoalDef::new("Stare", priority));
            assert!(matches!(err, Err(PlannerError::InvalidPriority { goal, .. }) if goal == "Stare"));
        }
        assert_eq!(p.goal_count(), 2);
        assert!(p.goal_id("Stare").is_none());
    }
}

// ── Loader and presets ────────────────────────────────────────────────────────

#[cfg(test)]
mod loader_tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn default_library_loads() {
        let p = default_planner().unwrap();
        assert_eq!(p.goal_count(), 4);
        assert_eq!(p.step_count(), 5);
        assert_eq!(p.step(p.step_id("look_around").unwrap()).unwrap().precondition, None);
    }

    #[test]
    fn parse_errors() {
        assert!(matches!(load_plan_library_toml("[[goal]]\nname = 3"), Err(PlannerError::Parse(_))));
        let lib = load_plan_library_toml("").unwrap();
        assert!(lib.goals.is_empty() && lib.steps.is_empty());
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[[step]]\nname = \"nap\"\nduration = 3").unwrap();
        let lib = load_plan_library_file(file.path()).unwrap();
        assert_eq!(lib.steps, vec![StepDef::new("nap", 3)]);
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod property_tests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #[test]
        fn satisfied_agents_stay_idle(
            hunger in 0.0f32..=0.6,
            thirst in 0.0f32..=0.6,
            fatigue in 0.0f32..=0.7,
            lonely in 0.0f32..=0.6,
            curious in 0.0f32..=0.5,
            updates in 1u64..20,
        ) {
            let p = default_planner().unwrap();
            let c = ctx(&[
                (InputKind::Hunger, hunger),
                (InputKind::Thirst, thirst),
                (InputKind::Fatigue, fatigue),
                (InputKind::Loneliness, lonely),
                (InputKind::Curiosity, curious),
            ]);
            let w = world();
            let mut buf = CommandBuffer::new();
            let mut state = PlannerState::new();
            for t in 0..updates {
                prop_assert_eq!(update(&p, &mut state, &w, &mut buf, &c, t), PlannerEvent::Idle);
            }
            prop_assert!(buf.pending().is_empty());
        }
    }
}
