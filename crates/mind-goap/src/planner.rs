//! The planner state machine.
//!
//! ```text
//!        ┌──────────── plan exhausted ─────────────┐
//!        ▼                                         │
//!      Idle ── unsatisfied goal ──▶ Planning ── steps ──▶ ExecutingPlan
//!        ▲                            │
//!        └──────── no eligible step ──┘
//! ```
//!
//! Each [`GoalPlanner::update`] makes at most one transition.  Planning
//! does not search: the plan is every step whose precondition currently
//! holds, in declaration order.  That makes each step legal when planned
//! but does not promise the goal gets met.

use std::fmt;

use rustc_hash::FxHashMap;
use tracing::{debug, trace, warn};

use mind_core::{GoalId, StepId, Tick};

use crate::registry::StepContext;
use crate::{GoalDef, PlannerError, PlannerRegistry, PlannerResult, StepDef};

// ── Compiled definitions ──────────────────────────────────────────────────────

/// Where a predicate name resolved to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Check {
    /// No predicate named.
    Absent,
    Slot(usize),
    /// Named but unregistered.
    Unbound,
}

struct Goal {
    def:       GoalDef,
    satisfied: Check,
}

struct Step {
    def:          StepDef,
    precondition: Check,
    effect:       Option<usize>,
}

// ── PlannerState ──────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum PlannerPhase {
    #[default]
    Idle,
    Planning,
    ExecutingPlan,
}

impl PlannerPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            PlannerPhase::Idle          => "Idle",
            PlannerPhase::Planning      => "Planning",
            PlannerPhase::ExecutingPlan => "ExecutingPlan",
        }
    }
}

impl fmt::Display for PlannerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What one [`GoalPlanner::update`] did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlannerEvent {
    /// Idle with nothing to pursue.
    Idle,
    GoalSelected(GoalId),
    PlanBuilt { steps: usize },
    /// Planning found no eligible step; back to idle.
    NoPlan,
    /// Still working on this step.
    StepInProgress(StepId),
    StepCompleted(StepId),
    /// The last step completed; back to idle.
    PlanFinished(StepId),
}

/// Per-agent planner state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlannerState {
    phase:       PlannerPhase,
    goal:        Option<GoalId>,
    plan:        Vec<StepId>,
    cursor:      usize,
    elapsed:     u64,
    forced:      Option<GoalId>,
    last_update: Option<Tick>,
}

impl PlannerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> PlannerPhase {
        self.phase
    }

    pub fn goal(&self) -> Option<GoalId> {
        self.goal
    }

    pub fn plan(&self) -> &[StepId] {
        &self.plan
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Ticks spent on the current step.
    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }

    pub fn current_step(&self) -> Option<StepId> {
        match self.phase {
            PlannerPhase::ExecutingPlan => self.plan.get(self.cursor).copied(),
            _ => None,
        }
    }

    /// `true` while a goal is being planned for or a plan executed.
    pub fn is_busy(&self) -> bool {
        self.phase != PlannerPhase::Idle
    }

    /// Drop the goal and plan; the next update starts from `Idle`.
    /// A pending forced goal survives.
    pub fn reset(&mut self) {
        self.phase = PlannerPhase::Idle;
        self.goal = None;
        self.plan.clear();
        self.cursor = 0;
        self.elapsed = 0;
    }
}

// ── GoalPlanner ───────────────────────────────────────────────────────────────

/// Shared goal and step registries.
pub struct GoalPlanner {
    registry:   PlannerRegistry,
    goals:      Vec<Goal>,
    steps:      Vec<Step>,
    goal_index: FxHashMap<String, GoalId>,
    step_index: FxHashMap<String, StepId>,
}

impl GoalPlanner {
    pub fn new(registry: PlannerRegistry) -> Self {
        Self {
            registry,
            goals:      Vec::new(),
            steps:      Vec::new(),
            goal_index: FxHashMap::default(),
            step_index: FxHashMap::default(),
        }
    }

    pub fn registry(&self) -> &PlannerRegistry {
        &self.registry
    }

    pub fn add_goal(&mut self, def: GoalDef) -> PlannerResult<GoalId> {
        if self.goal_index.contains_key(&def.name) {
            return Err(PlannerError::DuplicateGoal(def.name));
        }
        if !def.priority.is_finite() {
            return Err(PlannerError::InvalidPriority { goal: def.name, priority: def.priority });
        }
        let id = GoalId::try_from(self.goals.len()).map_err(|_| PlannerError::Capacity("goals"))?;
        let satisfied = self.resolve_predicate(&def.name, def.satisfied.as_deref());
        self.goal_index.insert(def.name.clone(), id);
        self.goals.push(Goal { def, satisfied });
        Ok(id)
    }

    pub fn add_step(&mut self, def: StepDef) -> PlannerResult<StepId> {
        if self.step_index.contains_key(&def.name) {
            return Err(PlannerError::DuplicateStep(def.name));
        }
        let id = StepId::try_from(self.steps.len()).map_err(|_| PlannerError::Capacity("plan steps"))?;
        let precondition = self.resolve_predicate(&def.name, def.precondition.as_deref());
        let effect = def.effect.as_deref().and_then(|name| {
            let slot = self.registry.effect_slot(name);
            if slot.is_none() {
                warn!(step = %def.name, effect = name, "unregistered step effect; step will do nothing");
            }
            slot
        });
        self.step_index.insert(def.name.clone(), id);
        self.steps.push(Step { def, precondition, effect });
        Ok(id)
    }

    fn resolve_predicate(&self, owner: &str, name: Option<&str>) -> Check {
        match name {
            None => Check::Absent,
            Some(p) => match self.registry.predicate_slot(p) {
                Some(slot) => Check::Slot(slot),
                None => {
                    warn!(owner, predicate = p, "unregistered predicate; it will never hold");
                    Check::Unbound
                }
            },
        }
    }

    pub fn goal_count(&self) -> usize {
        self.goals.len()
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn goal_id(&self, name: &str) -> Option<GoalId> {
        self.goal_index.get(name).copied()
    }

    pub fn step_id(&self, name: &str) -> Option<StepId> {
        self.step_index.get(name).copied()
    }

    pub fn goal(&self, id: GoalId) -> Option<&GoalDef> {
        self.goals.get(id.index()).map(|g| &g.def)
    }

    pub fn step(&self, id: StepId) -> Option<&StepDef> {
        self.steps.get(id.index()).map(|s| &s.def)
    }

    pub fn goal_name(&self, id: GoalId) -> Option<&str> {
        self.goal(id).map(|g| g.name.as_str())
    }

    pub fn step_name(&self, id: StepId) -> Option<&str> {
        self.step(id).map(|s| s.name.as_str())
    }

    // ── Control ───────────────────────────────────────────────────────────

    /// Abandon the current plan and pursue `goal` on the next update,
    /// whether or not it is satisfied.  Returns `false` for an unknown name.
    pub fn force_goal(&self, state: &mut PlannerState, goal: &str) -> bool {
        let Some(id) = self.goal_id(goal) else {
            return false;
        };
        state.reset();
        state.forced = Some(id);
        true
    }

    /// Advance `state` by one transition.  Time since the previous update
    /// is charged to the current step.
    pub fn update(&self, state: &mut PlannerState, cx: &mut StepContext<'_, '_>) -> PlannerEvent {
        let dt = state.last_update.map_or(0, |t| cx.tick.since(t));
        state.last_update = Some(cx.tick);

        match state.phase {
            PlannerPhase::Idle => self.select_goal(state, cx),
            PlannerPhase::Planning => self.build_plan(state, cx),
            PlannerPhase::ExecutingPlan => self.execute(state, cx, dt),
        }
    }

    fn select_goal(&self, state: &mut PlannerState, cx: &StepContext<'_, '_>) -> PlannerEvent {
        let chosen = state.forced.take().or_else(|| self.most_pressing_goal(cx));
        let Some(goal) = chosen else {
            return PlannerEvent::Idle;
        };
        state.goal = Some(goal);
        state.phase = PlannerPhase::Planning;
        debug!(agent = %cx.agent, goal = %self.goals[goal.index()].def.name, "goal selected");
        PlannerEvent::GoalSelected(goal)
    }

    /// Highest-priority goal not yet satisfied; ties go to the first
    /// registered.
    fn most_pressing_goal(&self, cx: &StepContext<'_, '_>) -> Option<GoalId> {
        let mut best: Option<(GoalId, f32)> = None;
        for (i, g) in self.goals.iter().enumerate() {
            let satisfied = match g.satisfied {
                Check::Slot(slot) => self.registry.holds(slot, cx.agent, cx.decision),
                Check::Absent | Check::Unbound => false,
            };
            if satisfied {
                continue;
            }
            if best.is_none_or(|(_, p)| g.def.priority > p) {
                best = Some((GoalId(i as u16), g.def.priority));
            }
        }
        best.map(|(id, _)| id)
    }

    fn build_plan(&self, state: &mut PlannerState, cx: &StepContext<'_, '_>) -> PlannerEvent {
        state.plan.clear();
        for (i, s) in self.steps.iter().enumerate() {
            let eligible = match s.precondition {
                Check::Absent => true,
                Check::Slot(slot) => self.registry.holds(slot, cx.agent, cx.decision),
                Check::Unbound => false,
            };
            if eligible {
                state.plan.push(StepId(i as u16));
            }
        }
        state.cursor = 0;
        state.elapsed = 0;

        if state.plan.is_empty() {
            debug!(agent = %cx.agent, "no eligible plan steps");
            state.reset();
            return PlannerEvent::NoPlan;
        }
        state.phase = PlannerPhase::ExecutingPlan;
        trace!(agent = %cx.agent, steps = state.plan.len(), "plan built");
        PlannerEvent::PlanBuilt { steps: state.plan.len() }
    }

    fn execute(&self, state: &mut PlannerState, cx: &mut StepContext<'_, '_>, dt: u64) -> PlannerEvent {
        let Some(id) = state.plan.get(state.cursor).copied() else {
            state.reset();
            return PlannerEvent::Idle;
        };
        let Some(step) = self.steps.get(id.index()) else {
            warn!(agent = %cx.agent, step = %id, "plan refers to a missing step; dropping plan");
            state.reset();
            return PlannerEvent::Idle;
        };

        state.elapsed = state.elapsed.saturating_add(dt);
        if state.elapsed < step.def.duration {
            return PlannerEvent::StepInProgress(id);
        }

        if let Some(slot) = step.effect
            && let Err(e) = self.registry.run(slot, cx)
        {
            debug!(agent = %cx.agent, step = %step.def.name, error = %e, "step effect failed");
        }
        state.cursor += 1;
        state.elapsed = 0;

        if state.cursor >= state.plan.len() {
            debug!(agent = %cx.agent, "plan finished");
            state.reset();
            PlannerEvent::PlanFinished(id)
        } else {
            PlannerEvent::StepCompleted(id)
        }
    }

    /// One-line description for debug snapshots.
    pub fn describe(&self, state: &PlannerState) -> String {
        let goal = state
            .goal
            .and_then(|g| self.goal_name(g))
            .unwrap_or("-");
        let plan: Vec<&str> = state
            .plan
            .iter()
            .map(|&s| self.step_name(s).unwrap_or("?"))
            .collect();
        format!(
            "phase={} goal={goal} plan=[{}] step={}/{} elapsed={}",
            state.phase,
            plan.join(">"),
            state.cursor,
            state.plan.len(),
            state.elapsed
        )
    }
}
