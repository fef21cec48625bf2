//! The `Scheduler` and its firing-tick loop.
//!
//! # Firing tick
//!
//! ```text
//! tick(now):
//!   ① Gate    fewer than update_interval ticks since the last firing
//!             tick: return at once.
//!   ② Select  the next min(max_per_tick, N) slots after the round-robin
//!             cursor, wrapping; the cursor moves past them.
//!   ③ Visit   per selected agent, in order:
//!               invalid handle → skip, remember for removal
//!               dead / inactive → skip
//!               beyond throttle radius → evaluate with probability p
//!               otherwise → rebuild context, run the agent's engine
//!   ④ Sweep   drop the invalid entries remembered in ③.
//! ```
//!
//! Reads go through `&dyn Sensors`/`&dyn Environment` for the whole tick and
//! writes through one `&mut dyn Actuator`, so a world can hand the scheduler
//! a read view of itself and a command buffer at the same time.

use rustc_hash::FxHashMap;
use tracing::{debug, trace, warn};

use mind_context::{Actuator, Environment, Intent, PerceptionConfig, Sensors, WorldContext};
use mind_core::{AgentId, MindError, MindResult, Position, Tick};
use mind_goap::{GoalPlanner, PlannerEvent, StepContext};
use mind_tree::{Status, TreeEngine};
use mind_utility::{EffectContext, UtilityScorer, UtilityState};

use crate::slot::{AgentSlot, Mind};
use crate::snapshot::AgentSnapshot;
use crate::{
    DecisionStyle, NoopObserver, SchedulerConfig, SchedulerObserver, SkipReason, ThrottleConfig,
    TickReport,
};

// ── Engines ───────────────────────────────────────────────────────────────────

/// The shared, read-only half of the scheduler.
pub(crate) struct Engines {
    pub(crate) trees:      TreeEngine,
    pub(crate) scorer:     UtilityScorer,
    pub(crate) planner:    GoalPlanner,
    pub(crate) perception: PerceptionConfig,
}

impl Engines {
    /// Gate checks, then one evaluation.
    fn visit(
        &self,
        slot:     &mut AgentSlot,
        world:    &WorldContext<'_>,
        actuator: &mut dyn Actuator,
        focus:    Option<Position>,
        throttle: Option<&ThrottleConfig>,
    ) -> Result<Intent, SkipReason> {
        let agent = slot.agent;
        if !world.sensors.is_valid(agent) {
            return Err(SkipReason::InvalidHandle);
        }
        if !world.sensors.is_alive(agent) {
            return Err(SkipReason::Dead);
        }
        if !slot.active {
            return Err(SkipReason::Inactive);
        }
        if let (Some(t), Some(focus)) = (throttle, focus)
            && let Some(here) = world.position(agent)
            && !here.within(focus, t.radius)
            && !slot.rng.gen_bool(t.far_evaluation_chance)
        {
            return Err(SkipReason::Throttled);
        }
        self.evaluate(slot, world, actuator)
    }

    fn evaluate(
        &self,
        slot:     &mut AgentSlot,
        world:    &WorldContext<'_>,
        actuator: &mut dyn Actuator,
    ) -> Result<Intent, SkipReason> {
        let agent = slot.agent;
        let now = world.tick;
        slot.context.refresh(agent, world, &self.perception);
        slot.evaluations += 1;
        slot.last_evaluated = Some(now);

        if let Some(name) = slot.forced_action.take() {
            let mut scratch = UtilityState::new();
            let state = match &mut slot.mind {
                Mind::Utility { utility, .. } => utility,
                Mind::Tree(_) => &mut scratch,
            };
            let mut cx = EffectContext {
                agent,
                tick: now,
                world,
                decision: &slot.context,
                actuator: &mut *actuator,
                rng: &mut slot.rng,
            };
            let result = self.scorer.execute_named(state, &name, &mut cx);
            if !result.success {
                debug!(%agent, action = %name, reason = ?result.failure_reason, "forced action failed");
                return Ok(Intent::Idle);
            }
            return Ok(Intent::Action(name));
        }

        match &mut slot.mind {
            Mind::Tree(instance) => {
                if instance.is_none() {
                    let stage = world.sensors.life_stage(agent);
                    let category = stage.as_deref().unwrap_or(self.trees.fallback_category());
                    match self.trees.instantiate(category) {
                        Ok(i) => *instance = Some(i),
                        Err(e) => {
                            warn!(%agent, category, error = %e, "no behavior tree for agent");
                            return Err(SkipReason::NoTemplate);
                        }
                    }
                }
                let Some(inst) = instance.as_mut() else {
                    return Err(SkipReason::NoTemplate);
                };
                let status = self.trees.execute(inst, agent, world, &slot.context, actuator, &mut slot.rng);
                slot.last_status = Some(status);
                Ok(match (status, self.trees.last_action_name(inst)) {
                    (Status::Failure, _) | (_, None) => Intent::Idle,
                    (_, Some(name)) => Intent::Action(name.to_owned()),
                })
            }

            Mind::Utility { planner, utility } => {
                let event = {
                    let mut cx = StepContext {
                        agent,
                        tick: now,
                        world,
                        decision: &slot.context,
                        actuator: &mut *actuator,
                    };
                    self.planner.update(planner, &mut cx)
                };
                let goal_name = |p: &mind_goap::PlannerState| {
                    p.goal().and_then(|g| self.planner.goal_name(g)).map(str::to_owned)
                };
                match event {
                    PlannerEvent::GoalSelected(_) => {
                        let Some(goal) = goal_name(&*planner) else {
                            return Ok(Intent::Idle);
                        };
                        if let Err(e) = actuator.force_goal(agent, &goal) {
                            debug!(%agent, %goal, error = %e, "cannot publish goal");
                        }
                        Ok(Intent::Goal(goal))
                    }
                    PlannerEvent::PlanBuilt { .. } => {
                        Ok(goal_name(&*planner).map_or(Intent::Idle, Intent::Goal))
                    }
                    PlannerEvent::StepInProgress(step)
                    | PlannerEvent::StepCompleted(step)
                    | PlannerEvent::PlanFinished(step) => Ok(self
                        .planner
                        .step_name(step)
                        .map_or(Intent::Idle, |n| Intent::Action(n.to_owned()))),
                    PlannerEvent::Idle | PlannerEvent::NoPlan => {
                        let Some(id) = self.scorer.best_action(utility, now, &slot.context) else {
                            return Ok(Intent::Idle);
                        };
                        let name = self.scorer.action_name(id).unwrap_or_default().to_owned();
                        if !utility.decided_at(now) {
                            // Debounced: keep doing what was chosen last time.
                            return Ok(Intent::Action(name));
                        }
                        let mut cx = EffectContext {
                            agent,
                            tick: now,
                            world,
                            decision: &slot.context,
                            actuator: &mut *actuator,
                            rng: &mut slot.rng,
                        };
                        let result = self.scorer.execute_action(utility, id, &mut cx);
                        if result.success {
                            Ok(Intent::Action(name))
                        } else {
                            debug!(%agent, action = %name, reason = ?result.failure_reason, "utility action failed");
                            Ok(Intent::Idle)
                        }
                    }
                }
            }
        }
    }
}

// ── Scheduler ─────────────────────────────────────────────────────────────────

/// Registry of agents plus the engines that decide for them.
///
/// Create via [`SchedulerBuilder`][crate::SchedulerBuilder].
pub struct Scheduler {
    pub(crate) config:     SchedulerConfig,
    pub(crate) engines:    Engines,
    pub(crate) slots:      Vec<AgentSlot>,
    pub(crate) index:      FxHashMap<AgentId, usize>,
    pub(crate) cursor:     usize,
    pub(crate) last_fired: Option<Tick>,
    pub(crate) focus:      Option<Position>,
}

impl Scheduler {
    // ── Registration ──────────────────────────────────────────────────────

    /// Register `agent` with the default decision style.  Returns `false`
    /// (and changes nothing) if it is already registered.
    pub fn register_agent(&mut self, agent: AgentId) -> bool {
        self.register_agent_with(agent, self.config.default_style)
    }

    pub fn register_agent_with(&mut self, agent: AgentId, style: DecisionStyle) -> bool {
        if self.index.contains_key(&agent) {
            return false;
        }
        self.index.insert(agent, self.slots.len());
        self.slots.push(AgentSlot::new(agent, style, self.config.seed));
        debug!(%agent, %style, "agent registered");
        true
    }

    /// Discard all state for `agent`.  Returns `false` if it was not
    /// registered.
    ///
    /// Slot order is preserved and the cursor follows the slot it pointed
    /// at, so the agents still waiting in the current round keep their turn.
    pub fn unregister_agent(&mut self, agent: AgentId) -> bool {
        let Some(i) = self.index.remove(&agent) else {
            return false;
        };
        self.slots.remove(i);
        for (j, slot) in self.slots.iter().enumerate().skip(i) {
            self.index.insert(slot.agent, j);
        }
        if i < self.cursor {
            self.cursor -= 1;
        }
        if self.cursor >= self.slots.len() {
            self.cursor = 0;
        }
        debug!(%agent, "agent unregistered");
        true
    }

    pub fn is_registered(&self, agent: AgentId) -> bool {
        self.index.contains_key(&agent)
    }

    /// Number of registered agents.
    pub fn active_count(&self) -> usize {
        self.slots.len()
    }

    pub fn slot(&self, agent: AgentId) -> Option<&AgentSlot> {
        self.index.get(&agent).map(|&i| &self.slots[i])
    }

    /// Registered agents in slot order.
    pub fn agents(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.slots.iter().map(|s| s.agent)
    }

    fn slot_mut(&mut self, agent: AgentId) -> MindResult<&mut AgentSlot> {
        match self.index.get(&agent) {
            Some(&i) => Ok(&mut self.slots[i]),
            None => Err(MindError::AgentNotFound(agent)),
        }
    }

    // ── Control ───────────────────────────────────────────────────────────

    /// Forget cached per-agent decisions: the tree is re-picked from the
    /// agent's current life stage and the utility choice is rescored on the
    /// next evaluation.
    pub fn refresh_agent(&mut self, agent: AgentId) -> MindResult<()> {
        let slot = self.slot_mut(agent)?;
        match &mut slot.mind {
            Mind::Tree(instance) => *instance = None,
            Mind::Utility { utility, .. } => utility.invalidate(),
        }
        slot.context = Default::default();
        Ok(())
    }

    /// Switch `agent` to another engine.  Its previous engine state is
    /// dropped; switching to the current style is a no-op.
    pub fn set_style(&mut self, agent: AgentId, style: DecisionStyle) -> MindResult<()> {
        let slot = self.slot_mut(agent)?;
        if slot.mind.style() != style {
            slot.mind = Mind::new(style);
        }
        Ok(())
    }

    /// Inactive agents are skipped until reactivated.
    pub fn set_active(&mut self, agent: AgentId, active: bool) -> MindResult<()> {
        let slot = self.slot_mut(agent)?;
        slot.active = active;
        if let Mind::Tree(Some(instance)) = &mut slot.mind {
            instance.set_active(active);
        }
        Ok(())
    }

    /// Abandon whatever `agent` is doing and adopt `goal` now.
    ///
    /// Running tree leaves, plans and the cached utility choice are
    /// discarded.  Utility-style agents whose planner knows `goal` plan for
    /// it on their next evaluation.
    pub fn force_goal(&mut self, agent: AgentId, goal: &str, actuator: &mut dyn Actuator) -> MindResult<()> {
        let i = *self.index.get(&agent).ok_or(MindError::AgentNotFound(agent))?;
        let slot = &mut self.slots[i];
        slot.mind.interrupt();
        if let Mind::Utility { planner, .. } = &mut slot.mind
            && !self.engines.planner.force_goal(planner, goal)
        {
            debug!(%agent, goal, "goal unknown to planner; publishing only");
        }
        actuator.force_goal(agent, goal)?;
        slot.last_intent = Intent::Goal(goal.to_owned());
        Ok(())
    }

    /// Abandon whatever `agent` is doing and run `action` at its next
    /// evaluation, bypassing scoring.
    pub fn force_action(&mut self, agent: AgentId, action: &str) -> MindResult<()> {
        let slot = self.slot_mut(agent)?;
        slot.mind.interrupt();
        slot.forced_action = Some(action.to_owned());
        Ok(())
    }

    /// Centre of the distance throttle (usually the camera).  `None` turns
    /// throttling off regardless of configuration.
    pub fn set_focus(&mut self, focus: Option<Position>) {
        self.focus = focus;
    }

    pub fn focus(&self) -> Option<Position> {
        self.focus
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn trees(&self) -> &TreeEngine {
        &self.engines.trees
    }

    pub fn scorer(&self) -> &UtilityScorer {
        &self.engines.scorer
    }

    pub fn planner(&self) -> &GoalPlanner {
        &self.engines.planner
    }

    pub fn last_fired(&self) -> Option<Tick> {
        self.last_fired
    }

    /// Human-readable state of one agent.
    pub fn debug_snapshot(&self, agent: AgentId) -> Option<AgentSnapshot> {
        self.slot(agent).map(|slot| AgentSnapshot::capture(&self.engines, slot))
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// [`tick_observed`][Self::tick_observed] without an observer.
    pub fn tick(
        &mut self,
        now:         Tick,
        sensors:     &dyn Sensors,
        environment: Option<&dyn Environment>,
        actuator:    &mut dyn Actuator,
    ) -> TickReport {
        self.tick_observed(now, sensors, environment, actuator, &mut NoopObserver)
    }

    /// Advance the scheduler to `now`.
    ///
    /// No error from any single agent escapes: problems become skips,
    /// failed actions and log lines.
    pub fn tick_observed<O: SchedulerObserver>(
        &mut self,
        now:         Tick,
        sensors:     &dyn Sensors,
        environment: Option<&dyn Environment>,
        actuator:    &mut dyn Actuator,
        observer:    &mut O,
    ) -> TickReport {
        if now.within(self.last_fired, self.config.update_interval) {
            return TickReport::idle(now);
        }
        self.last_fired = Some(now);
        observer.on_tick_start(now);

        let world = WorldContext::new(now, sensors, environment);
        let mut report = TickReport { tick: now, fired: true, ..TickReport::default() };
        let mut invalid = Vec::new();

        let len = self.slots.len();
        let take = self.config.max_per_tick.min(len);
        let start = self.cursor;
        if len > 0 {
            self.cursor = (start + take) % len;
        }

        for k in 0..take {
            let slot = &mut self.slots[(start + k) % len];
            let agent = slot.agent;
            let outcome = self.engines.visit(slot, &world, actuator, self.focus, self.config.throttle.as_ref());
            match outcome {
                Ok(intent) => {
                    trace!(%agent, %intent, "agent evaluated");
                    report.evaluated += 1;
                    observer.on_agent_evaluated(agent, &intent);
                    slot.last_intent = intent;
                }
                Err(reason) => {
                    match reason {
                        SkipReason::Throttled => report.throttled += 1,
                        SkipReason::InvalidHandle => {
                            report.skipped += 1;
                            invalid.push(agent);
                        }
                        _ => report.skipped += 1,
                    }
                    debug!(%agent, %reason, "agent skipped");
                    observer.on_agent_skipped(agent, reason);
                }
            }
        }

        for agent in invalid {
            warn!(%agent, "dropping scheduler entry with invalid handle");
            if self.unregister_agent(agent) {
                report.removed += 1;
            }
        }

        observer.on_tick_end(now, &report);
        trace!(%report, "tick done");
        report
    }
}
