//! Unit tests for mind-utility.

use std::io::Cursor;

use mind_context::{
    Actuator, ActuatorCall, CommandBuffer, DecisionContext, InputKind, StaticWorld, WorldContext,
};
use mind_core::{ActionId, AgentId, AgentRng, MindError, MindResult, Position, Tick};

use crate::{
    ActionKind, ActionResult, Consideration, EffectContext, ResponseCurve, TypeWeights,
    UtilityAction, UtilityError, UtilityScorer, UtilityState, default_scorer, load_actions_csv,
    load_actions_reader, reason,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

const A: AgentId = AgentId(0);
const B: AgentId = AgentId(1);

fn ctx(pairs: &[(InputKind, f32)]) -> DecisionContext {
    pairs
        .iter()
        .fold(DecisionContext::empty(Tick::ZERO), |c, &(k, v)| c.with(k, v))
}

fn eat() -> UtilityAction {
    UtilityAction::new("eat", ActionKind::Survival, 1.0)
        .with_costs(0.0, 2)
        .consider(Consideration::new(InputKind::Hunger, 2.0))
}

fn explore() -> UtilityAction {
    UtilityAction::new("explore", ActionKind::Exploration, 1.0)
        .consider(Consideration::new(InputKind::Curiosity, 1.5))
}

fn scorer(actions: Vec<UtilityAction>, interval: u64) -> UtilityScorer {
    UtilityScorer::new(interval)
        .with_type_weights(TypeWeights::uniform())
        .with_actions(actions)
        .unwrap()
}

fn run(
    scorer:   &UtilityScorer,
    state:    &mut UtilityState,
    name:     &str,
    world:    &StaticWorld,
    buffer:   &mut CommandBuffer,
    decision: &DecisionContext,
    tick:     u64,
) -> ActionResult {
    let view = WorldContext::new(Tick(tick), world, Some(world));
    let mut rng = AgentRng::new(3, A);
    let mut cx = EffectContext {
        agent:    A,
        tick:     Tick(tick),
        world:    &view,
        decision,
        actuator: buffer,
        rng:      &mut rng,
    };
    scorer.execute_named(state, name, &mut cx)
}

// ── Curves and considerations ─────────────────────────────────────────────────

#[cfg(test)]
mod curve_tests {
    use super::*;

    #[test]
    fn shapes() {
        assert_eq!(ResponseCurve::Inverse.evaluate(0.25), 0.75);
        assert_eq!(ResponseCurve::QUADRATIC.evaluate(0.5), 0.25);
        assert_eq!(ResponseCurve::Step { threshold: 0.5 }.evaluate(0.49), 0.0);
        assert_eq!(ResponseCurve::Step { threshold: 0.5 }.evaluate(0.5), 1.0);
        let mid = ResponseCurve::Logistic { steepness: 10.0, midpoint: 0.5 }.evaluate(0.5);
        assert!((mid - 0.5).abs() < 1e-6);
    }

    #[test]
    fn output_is_clamped() {
        let steep = ResponseCurve::Linear { slope: 3.0, intercept: -0.5 };
        assert_eq!(steep.evaluate(1.0), 1.0);
        assert_eq!(steep.evaluate(0.0), 0.0);
        assert_eq!(ResponseCurve::Power { exponent: f32::NAN }.evaluate(0.5), 0.0);
    }

    #[test]
    fn from_parts() {
        assert_eq!(ResponseCurve::from_parts("", None, None), Ok(None));
        assert_eq!(
            ResponseCurve::from_parts("Step", Some(0.3), None),
            Ok(Some(ResponseCurve::Step { threshold: 0.3 }))
        );
        assert!(ResponseCurve::from_parts("power", None, None).is_err());
        assert!(ResponseCurve::from_parts("sawtooth", None, None).is_err());
    }

    #[test]
    fn normalize_uses_valid_range() {
        let c = Consideration::new(InputKind::Hunger, 1.0).with_range(0.2, 0.6);
        assert_eq!(c.normalize(0.1), 0.0);
        assert!((c.normalize(0.4) - 0.5).abs() < 1e-6);
        assert_eq!(c.normalize(0.9), 1.0);
    }

    #[test]
    fn degenerate_range_is_a_threshold() {
        let c = Consideration::new(InputKind::Hunger, 1.0).with_range(0.5, 0.5);
        assert_eq!(c.normalize(0.49), 0.0);
        assert_eq!(c.normalize(0.5), 1.0);
    }

    #[test]
    fn heavy_weight_saturates_at_one() {
        let c = Consideration::new(InputKind::Hunger, 5.0);
        assert_eq!(c.factor(&ctx(&[(InputKind::Hunger, 1.0)])), 1.0);
        assert!((c.factor(&ctx(&[(InputKind::Hunger, 0.1)])) - 0.55).abs() < 1e-6);
    }

    #[test]
    fn zero_response_floors_at_a_tenth() {
        let c = Consideration::new(InputKind::Hunger, 2.0);
        assert!((c.factor(&DecisionContext::default()) - 0.1).abs() < 1e-6);
    }
}

// ── Scoring and selection ─────────────────────────────────────────────────────

#[cfg(test)]
mod scoring_tests {
    use super::*;

    #[test]
    fn hungry_eat_outscores_mild_curiosity() {
        let s = scorer(vec![explore(), eat()], 0);
        let mut state = UtilityState::new();
        let c = ctx(&[(InputKind::Hunger, 0.9), (InputKind::Curiosity, 0.3)]);

        let eat_score = s.score(&state, ActionId(1), Tick(0), &c);
        let explore_score = s.score(&state, ActionId(0), Tick(0), &c);
        // 0.9 × 2 saturates the consideration.
        assert_eq!(eat_score, 1.0);
        assert!((explore_score - 0.505).abs() < 1e-4, "{explore_score}");
        assert_eq!(s.best_action(&mut state, Tick(0), &c), Some(ActionId(1)));
    }

    #[test]
    fn ties_go_to_registry_order() {
        let a = UtilityAction::new("a", ActionKind::Leisure, 0.5);
        let b = UtilityAction::new("b", ActionKind::Leisure, 0.5);
        let s = scorer(vec![a, b], 0);
        let mut state = UtilityState::new();
        assert_eq!(s.best_action(&mut state, Tick(0), &DecisionContext::default()), Some(ActionId(0)));
    }

    #[test]
    fn type_weight_scales_score() {
        let mut w = TypeWeights::uniform();
        w.set(ActionKind::Survival, 0.5);
        let s = UtilityScorer::new(0).with_type_weights(w).with_actions([eat()]).unwrap();
        let c = ctx(&[(InputKind::Hunger, 0.9)]);
        let score = s.score(&UtilityState::new(), ActionId(0), Tick(0), &c);
        assert!((score - 0.5).abs() < 1e-6);
    }

    #[test]
    fn base_priority_is_clamped() {
        let loud = UtilityAction::new("loud", ActionKind::Leisure, 7.0);
        let s = scorer(vec![loud], 0);
        assert_eq!(s.score(&UtilityState::new(), ActionId(0), Tick(0), &DecisionContext::default()), 1.0);
    }

    #[test]
    fn recency_penalty_window_is_twice_time_cost() {
        let s = scorer(vec![eat()], 0);
        let c = ctx(&[(InputKind::Hunger, 0.9)]);
        let mut state = UtilityState::new();
        let fresh = s.score(&state, ActionId(0), Tick(10), &c);

        state.record_execution(ActionId(0), Tick(10));
        for t in [12, 13] {
            let penalised = s.score(&state, ActionId(0), Tick(t), &c);
            assert!((penalised - fresh * 0.5).abs() < 1e-6, "tick {t}");
        }
        assert_eq!(s.score(&state, ActionId(0), Tick(14), &c), fresh);
        assert_eq!(s.score(&state, ActionId(0), Tick(20), &c), fresh);
    }

    #[test]
    fn cooldown_blocks_selection_until_time_cost_passes() {
        let s = scorer(vec![eat(), explore()], 0);
        let c = ctx(&[(InputKind::Hunger, 0.9), (InputKind::Curiosity, 0.2)]);
        let mut state = UtilityState::new();
        state.record_execution(ActionId(0), Tick(10));

        assert_eq!(s.blocked_reason(&state, ActionId(0), Tick(11), &c), Some(reason::ON_COOLDOWN));
        assert_eq!(s.best_action(&mut state, Tick(11), &c), Some(ActionId(1)));
        assert!(s.can_execute(&state, ActionId(0), Tick(12), &c));
        // Penalised but still the best at T+2: 0.5 > 0.37.
        assert_eq!(s.best_action(&mut state, Tick(12), &c), Some(ActionId(0)));
    }

    #[test]
    fn combat_requires_a_target() {
        let bite = UtilityAction::new("attack", ActionKind::Combat, 1.0);
        let s = scorer(vec![bite], 0);
        let mut state = UtilityState::new();
        let mut c = DecisionContext::default();
        assert_eq!(s.best_action(&mut state, Tick(0), &c), None);
        assert_eq!(state.last_scores().to_vec(), vec![1.0f32]);

        c.target = Some(B);
        assert_eq!(s.best_action(&mut state, Tick(1), &c), Some(ActionId(0)));
    }

    #[test]
    fn decisions_are_debounced() {
        let s = scorer(vec![eat(), explore()], 3);
        let mut state = UtilityState::new();
        let hungry = ctx(&[(InputKind::Hunger, 0.9)]);
        let curious = ctx(&[(InputKind::Curiosity, 1.0)]);

        assert_eq!(s.best_action(&mut state, Tick(5), &hungry), Some(ActionId(0)));
        assert!(state.decided_at(Tick(5)));
        assert_eq!(s.best_action(&mut state, Tick(7), &curious), Some(ActionId(0)));
        assert!(!state.decided_at(Tick(7)));
        assert_eq!(s.best_action(&mut state, Tick(8), &curious), Some(ActionId(1)));

        state.invalidate();
        assert_eq!(s.best_action(&mut state, Tick(9), &hungry), Some(ActionId(0)));
    }

    #[test]
    fn negative_weight_rejected() {
        let odd = UtilityAction::new("odd", ActionKind::Leisure, 1.0)
            .consider(Consideration::new(InputKind::Hunger, -5.0))
            .consider(Consideration::new(InputKind::Thirst, -5.0));
        let err = UtilityScorer::new(0).with_actions([eat(), odd]).err();
        assert!(matches!(err, Some(UtilityError::InvalidAction { action, .. }) if action == "odd"));
    }

    #[test]
    fn duplicate_names_rejected() {
        let err = UtilityScorer::new(0).with_actions([eat(), eat()]).err();
        assert!(matches!(err, Some(UtilityError::DuplicateAction(n)) if n == "eat"));
    }

    #[test]
    fn scored_pairs_follow_registry_order() {
        let s = scorer(vec![eat(), explore()], 0);
        let mut state = UtilityState::new();
        s.best_action(&mut state, Tick(0), &ctx(&[(InputKind::Hunger, 0.9)]));
        let names: Vec<&str> = s.scored(&state).map(|(n, _)| n).collect();
        assert_eq!(names, vec!["eat", "explore"]);
    }
}

// ── Execution ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod execute_tests {
    use super::*;

    fn world() -> StaticWorld {
        let mut w = StaticWorld::new();
        w.spawn(A, Position::ORIGIN);
        w.spawn(B, Position::new(3.0, 4.0));
        w
    }

    #[test]
    fn eat_fills_hunger_charges_energy_and_starts_cooldown() {
        let s = scorer(vec![eat().with_costs(0.1, 2)], 0);
        let mut state = UtilityState::new();
        let w = world();
        let mut buf = CommandBuffer::new();
        let c = ctx(&[(InputKind::Hunger, 0.9), (InputKind::Energy, 0.8)]);

        let r = run(&s, &mut state, "eat", &w, &mut buf, &c, 4);
        assert!(r.success);
        assert_eq!(r.utility_gained, 0.5);
        assert_eq!(
            buf.pending(),
            &[
                ActuatorCall::FillNeed { agent: A, need: "hunger".into(), delta: 0.5 },
                ActuatorCall::FillNeed { agent: A, need: "fatigue".into(), delta: -0.1 },
            ]
        );
        assert_eq!(state.last_executed(ActionId(0)), Some(Tick(4)));

        let again = run(&s, &mut state, "eat", &w, &mut buf, &c, 5);
        assert_eq!(again.failure_reason, Some(reason::ON_COOLDOWN));
    }

    #[test]
    fn unknown_names_fail() {
        let dance = UtilityAction::new("dance", ActionKind::Leisure, 1.0);
        let s = scorer(vec![dance], 0);
        let mut state = UtilityState::new();
        let w = world();
        let mut buf = CommandBuffer::new();
        let c = DecisionContext::default();

        let r = run(&s, &mut state, "teleport", &w, &mut buf, &c, 0);
        assert_eq!(r, ActionResult::failed(reason::UNKNOWN_ACTION));
        let r = run(&s, &mut state, "dance", &w, &mut buf, &c, 0);
        assert_eq!(r.failure_reason, Some(reason::UNKNOWN_ACTION));
        assert!(buf.pending().is_empty());
    }

    #[test]
    fn socialize_without_target_is_refused() {
        let talk = UtilityAction::new("socialize", ActionKind::Social, 1.0);
        let s = scorer(vec![talk], 0);
        let mut state = UtilityState::new();
        let r = run(&s, &mut state, "socialize", &world(), &mut CommandBuffer::new(), &DecisionContext::default(), 0);
        assert_eq!(r.failure_reason, Some(reason::NO_TARGET));
        assert_eq!(state.last_executed(ActionId(0)), None);
    }

    #[test]
    fn socialize_walks_to_target() {
        let talk = UtilityAction::new("socialize", ActionKind::Social, 1.0);
        let s = scorer(vec![talk], 0);
        let mut state = UtilityState::new();
        let mut buf = CommandBuffer::new();
        let mut c = ctx(&[(InputKind::Loneliness, 0.2)]);
        c.target = Some(B);

        let r = run(&s, &mut state, "socialize", &world(), &mut buf, &c, 0);
        assert!(r.success);
        assert!((r.utility_gained - 0.2).abs() < 1e-6);
        assert_eq!(
            buf.pending()[0],
            ActuatorCall::SetDestination { agent: A, destination: Position::new(3.0, 4.0) }
        );
    }

    #[test]
    fn vanished_target_fails_and_invalidates_the_decision() {
        let bite = UtilityAction::new("attack", ActionKind::Combat, 1.0);
        let s = scorer(vec![bite], 5);
        let mut state = UtilityState::new();
        let mut c = DecisionContext::default();
        c.target = Some(B);
        assert_eq!(s.best_action(&mut state, Tick(0), &c), Some(ActionId(0)));

        let mut w = world();
        w.kill(B);
        let r = run(&s, &mut state, "attack", &w, &mut CommandBuffer::new(), &c, 0);
        assert_eq!(r.failure_reason, Some(reason::TARGET_LOST));
        assert_eq!(state.current(), None);
        assert_eq!(state.last_decision(), None);
    }

    #[test]
    fn exhausted_agent_lacks_resources() {
        let s = scorer(vec![explore().with_costs(0.3, 0)], 0);
        let mut state = UtilityState::new();
        let c = ctx(&[(InputKind::Energy, 0.1)]);
        let r = run(&s, &mut state, "explore", &world(), &mut CommandBuffer::new(), &c, 0);
        assert_eq!(r.failure_reason, Some(reason::INSUFFICIENT_RESOURCES));
    }

    /// Forwards to a buffer but refuses fatigue charges.
    struct NoFatigue(CommandBuffer);

    impl Actuator for NoFatigue {
        fn force_goal(&mut self, agent: AgentId, goal: &str) -> MindResult<()> {
            self.0.force_goal(agent, goal)
        }

        fn set_destination(&mut self, agent: AgentId, destination: Position) -> MindResult<()> {
            self.0.set_destination(agent, destination)
        }

        fn fill_need(&mut self, agent: AgentId, need: &str, delta: f32) -> MindResult<()> {
            if need == "fatigue" {
                return Err(MindError::missing(agent, "fatigue store"));
            }
            self.0.fill_need(agent, need, delta)
        }
    }

    #[test]
    fn refused_energy_charge_keeps_the_success_and_cooldown() {
        let s = scorer(vec![eat().with_costs(0.1, 2)], 0);
        let mut state = UtilityState::new();
        let w = world();
        let view = WorldContext::new(Tick(3), &w, Some(&w));
        let decision = DecisionContext::default();
        let mut rng = AgentRng::new(3, A);
        let mut actuator = NoFatigue(CommandBuffer::new());
        let mut cx = EffectContext {
            agent:    A,
            tick:     Tick(3),
            world:    &view,
            decision: &decision,
            actuator: &mut actuator,
            rng:      &mut rng,
        };

        let r = s.execute_named(&mut state, "eat", &mut cx);
        assert!(r.success, "{r:?}");
        assert_eq!(state.last_executed(ActionId(0)), Some(Tick(3)));
        assert!(actuator.0.pending().iter().any(|c| matches!(
            c,
            ActuatorCall::FillNeed { need, .. } if need == "hunger"
        )));
    }

    #[test]
    fn missing_actuator_is_a_failure() {
        let s = scorer(vec![eat()], 0);
        let mut state = UtilityState::new();
        let mut buf = CommandBuffer::new();
        buf.detached.insert(A);
        let r = run(&s, &mut state, "eat", &world(), &mut buf, &DecisionContext::default(), 0);
        assert_eq!(r.failure_reason, Some(reason::NO_ACTUATOR));
        assert_eq!(state.last_executed(ActionId(0)), None);
    }
}

// ── Loader and presets ────────────────────────────────────────────────────────

#[cfg(test)]
mod loader_tests {
    use std::io::Write;

    use super::*;

    const HEADER: &str = "action,kind,base_priority,energy_cost,time_cost,input,weight,min,max,curve,curve_a,curve_b\n";

    #[test]
    fn rows_group_by_action_in_file_order() {
        let text = format!(
            "{HEADER}\
             nap,rest,0.5,0,4,fatigue,2.0,0.3,1.0,quadratic,,\n\
             wander,exploration,0.3,,,,,,,,,\n\
             nap,rest,0.9,1,9,sunlight,1.0,,,inverse,,\n"
        );
        let actions = load_actions_reader(Cursor::new(text)).unwrap();
        assert_eq!(actions.len(), 2);

        let nap = &actions[0];
        assert_eq!(nap.name, "nap");
        assert_eq!(nap.base_priority, 0.5, "first row wins");
        assert_eq!(nap.time_cost, 4);
        assert_eq!(nap.considerations.len(), 2);
        assert_eq!(nap.considerations[0].curve, Some(ResponseCurve::QUADRATIC));
        assert_eq!(nap.considerations[0].min, 0.3);
        assert_eq!(nap.considerations[1].input, InputKind::Sunlight);

        assert_eq!(actions[1].name, "wander");
        assert!(actions[1].considerations.is_empty());
        assert_eq!(actions[1].energy_cost, 0.0);
    }

    #[test]
    fn bad_kind_and_bad_curve_are_parse_errors() {
        let text = format!("{HEADER}nap,siesta,0.5,0,4,,,,,,,\n");
        assert!(matches!(load_actions_reader(Cursor::new(text)), Err(UtilityError::Parse(_))));

        let text = format!("{HEADER}nap,rest,0.5,0,4,fatigue,1,,,wobble,,\n");
        assert!(matches!(load_actions_reader(Cursor::new(text)), Err(UtilityError::Parse(_))));

        let text = format!("{HEADER}nap,rest,lots,0,4,,,,,,,\n");
        assert!(matches!(load_actions_reader(Cursor::new(text)), Err(UtilityError::Parse(_))));

        let text = format!("{HEADER}nap,rest,0.5,0,4,fatigue,-5,,,,,\n");
        assert!(matches!(load_actions_reader(Cursor::new(text)), Err(UtilityError::Parse(e)) if e.contains("row 1")));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}eat,survival,1,0,2,hunger,2,,,,,").unwrap();
        let actions = load_actions_csv(file.path()).unwrap();
        assert_eq!(actions[0], eat());
    }

    #[test]
    fn default_set_covers_every_builtin_effect() {
        let s = default_scorer().unwrap();
        assert_eq!(s.action_count(), 12);
        for (_, action) in s.actions() {
            assert!(crate::builtin_effect(&action.name).is_some(), "{}", action.name);
        }
    }

    #[test]
    fn default_set_eats_when_hungry_and_flees_when_afraid() {
        let s = default_scorer().unwrap();
        let hungry = ctx(&[(InputKind::Hunger, 0.9)]);
        let mut state = UtilityState::new();
        let pick = s.best_action(&mut state, Tick(0), &hungry);
        assert_eq!(pick.and_then(|id| s.action_name(id)), Some("eat"));

        let scared = hungry.with(InputKind::Fear, 0.9);
        let mut state = UtilityState::new();
        let pick = s.best_action(&mut state, Tick(0), &scared);
        assert_eq!(pick.and_then(|id| s.action_name(id)), Some("flee"));
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod property_tests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #[test]
        fn score_is_non_decreasing_in_weight(
            input in 0.0f32..=1.0,
            w1 in 0.0f32..4.0,
            dw in 0.0f32..4.0,
            base in 0.0f32..=1.0,
        ) {
            let c = ctx(&[(InputKind::Hunger, input)]);
            let with = |w: f32| {
                UtilityAction::new("x", ActionKind::Survival, base)
                    .consider(Consideration::new(InputKind::Hunger, w))
                    .raw_score(&c)
            };
            prop_assert!(with(w1 + dw) >= with(w1));
        }

        #[test]
        fn raw_score_stays_in_unit_range(
            hunger in -1.0f32..2.0,
            thirst in -1.0f32..2.0,
            w1 in 0.0f32..100.0,
            w2 in 0.0f32..100.0,
            base in -2.0f32..3.0,
        ) {
            let c = ctx(&[(InputKind::Hunger, hunger), (InputKind::Thirst, thirst)]);
            let score = UtilityAction::new("x", ActionKind::Survival, base)
                .consider(Consideration::new(InputKind::Hunger, w1))
                .consider(Consideration::new(InputKind::Thirst, w2))
                .raw_score(&c);
            prop_assert!((0.0..=1.0).contains(&score), "{score}");
        }

        #[test]
        fn curves_stay_in_unit_range(x in -1.0f32..2.0, k in -20.0f32..20.0, m in 0.0f32..1.0) {
            for curve in [
                ResponseCurve::Linear { slope: k, intercept: m },
                ResponseCurve::Power { exponent: k.abs() },
                ResponseCurve::Logistic { steepness: k, midpoint: m },
                ResponseCurve::Inverse,
                ResponseCurve::Step { threshold: m },
            ] {
                let y = curve.evaluate(x);
                prop_assert!((0.0..=1.0).contains(&y), "{curve:?}({x}) = {y}");
            }
        }
    }
}
