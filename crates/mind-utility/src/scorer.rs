//! Action scoring, selection and execution.
//!
//! # Score
//!
//! ```text
//! score  = clamp(base_priority, 0, 1)
//! score *= lerp(0.1, 1.0, curve(normalized input) * weight)   per consideration
//! score *= type_weight(kind)
//! score *= 0.5   if the action ran less than 2 × time_cost ticks ago
//! ```
//!
//! The highest score wins; ties go to the action registered first.  Actions
//! the [`can_execute`][UtilityScorer::can_execute] gate blocks are scored
//! (and show up in the debug snapshot) but never selected.

use rustc_hash::FxHashMap;
use tracing::{debug, trace, warn};

use mind_context::{DecisionContext, InputKind};
use mind_core::{ActionId, MindError, Tick};

use crate::effects::{ActionResult, EffectContext, EffectFn, builtin_effect, reason};
use crate::{TypeWeights, UtilityAction, UtilityError, UtilityResult};

const RECENCY_PENALTY: f32 = 0.5;

// ── UtilityState ──────────────────────────────────────────────────────────────

/// Per-agent scorer state.  Indexed by [`ActionId`]; never shared.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UtilityState {
    last_executed: Vec<Option<Tick>>,
    current:       Option<ActionId>,
    last_decision: Option<Tick>,
    last_scores:   Vec<f32>,
}

impl UtilityState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Action chosen by the latest decision.
    pub fn current(&self) -> Option<ActionId> {
        self.current
    }

    pub fn last_decision(&self) -> Option<Tick> {
        self.last_decision
    }

    /// `true` if a decision was taken at `now` (rather than served from
    /// the debounce cache).
    pub fn decided_at(&self, now: Tick) -> bool {
        self.last_decision == Some(now)
    }

    /// Scores from the latest decision, in registry order.
    pub fn last_scores(&self) -> &[f32] {
        &self.last_scores
    }

    pub fn last_executed(&self, action: ActionId) -> Option<Tick> {
        self.last_executed.get(action.index()).copied().flatten()
    }

    /// Record that `action` ran at `at`.
    pub fn record_execution(&mut self, action: ActionId, at: Tick) {
        let i = action.index();
        if self.last_executed.len() <= i {
            self.last_executed.resize(i + 1, None);
        }
        self.last_executed[i] = Some(at);
    }

    /// Forget the cached decision so the next call rescores.  Cooldowns are
    /// kept.
    pub fn invalidate(&mut self) {
        self.current = None;
        self.last_decision = None;
    }
}

// ── UtilityScorer ─────────────────────────────────────────────────────────────

/// Registry of action templates plus the scoring rules.  Read-only once
/// built; all per-agent state lives in [`UtilityState`].
pub struct UtilityScorer {
    actions:           Vec<UtilityAction>,
    effects:           Vec<Option<EffectFn>>,
    by_name:           FxHashMap<String, ActionId>,
    decision_interval: u64,
    type_weights:      TypeWeights,
}

impl UtilityScorer {
    /// An empty scorer that rescores at most once every `decision_interval`
    /// ticks per agent.
    pub fn new(decision_interval: u64) -> Self {
        Self {
            actions: Vec::new(),
            effects: Vec::new(),
            by_name: FxHashMap::default(),
            decision_interval,
            type_weights: TypeWeights::default(),
        }
    }

    pub fn with_decision_interval(mut self, ticks: u64) -> Self {
        self.decision_interval = ticks;
        self
    }

    pub fn with_type_weights(mut self, weights: TypeWeights) -> Self {
        self.type_weights = weights;
        self
    }

    /// Register every action in order.
    pub fn with_actions(mut self, actions: impl IntoIterator<Item = UtilityAction>) -> UtilityResult<Self> {
        for a in actions {
            self.add_action(a)?;
        }
        Ok(self)
    }

    /// Register `action`.  Names must be unique.  An action with no built-in
    /// effect is accepted (it still scores) but fails with "unknown action"
    /// when executed.
    pub fn add_action(&mut self, action: UtilityAction) -> UtilityResult<ActionId> {
        if self.by_name.contains_key(&action.name) {
            return Err(UtilityError::DuplicateAction(action.name));
        }
        validate(&action)?;
        let id = ActionId::try_from(self.actions.len()).map_err(|_| UtilityError::Capacity)?;
        let effect = builtin_effect(&action.name);
        if effect.is_none() {
            warn!(action = %action.name, "no built-in effect for action; executing it will fail");
        }
        self.by_name.insert(action.name.clone(), id);
        self.actions.push(action);
        self.effects.push(effect);
        Ok(id)
    }

    pub fn action_count(&self) -> usize {
        self.actions.len()
    }

    pub fn action(&self, id: ActionId) -> Option<&UtilityAction> {
        self.actions.get(id.index())
    }

    pub fn action_id(&self, name: &str) -> Option<ActionId> {
        self.by_name.get(name).copied()
    }

    pub fn action_name(&self, id: ActionId) -> Option<&str> {
        self.action(id).map(|a| a.name.as_str())
    }

    pub fn actions(&self) -> impl Iterator<Item = (ActionId, &UtilityAction)> {
        self.actions.iter().enumerate().map(|(i, a)| (ActionId(i as u16), a))
    }

    pub fn decision_interval(&self) -> u64 {
        self.decision_interval
    }

    pub fn type_weights(&self) -> &TypeWeights {
        &self.type_weights
    }

    // ── Scoring ───────────────────────────────────────────────────────────

    /// Full score of `id` for an agent in `state` at `now`.
    pub fn score(&self, state: &UtilityState, id: ActionId, now: Tick, ctx: &DecisionContext) -> f32 {
        let Some(action) = self.action(id) else {
            return 0.0;
        };
        let mut score = action.raw_score(ctx) * self.type_weights.get(action.kind);
        if now.within(state.last_executed(id), action.time_cost.saturating_mul(2)) {
            score *= RECENCY_PENALTY;
        }
        score
    }

    /// Why `id` cannot run right now, if it cannot.
    pub fn blocked_reason(
        &self,
        state: &UtilityState,
        id:    ActionId,
        now:   Tick,
        ctx:   &DecisionContext,
    ) -> Option<&'static str> {
        let Some(action) = self.action(id) else {
            return Some(reason::UNKNOWN_ACTION);
        };
        if now.within(state.last_executed(id), action.time_cost) {
            return Some(reason::ON_COOLDOWN);
        }
        if action.kind.needs_target() && ctx.target.is_none() {
            return Some(reason::NO_TARGET);
        }
        None
    }

    pub fn can_execute(&self, state: &UtilityState, id: ActionId, now: Tick, ctx: &DecisionContext) -> bool {
        self.blocked_reason(state, id, now, ctx).is_none()
    }

    /// Pick the best action for the agent owning `state`.
    ///
    /// Within `decision_interval` ticks of the previous decision the cached
    /// choice is returned unchanged.
    pub fn best_action(&self, state: &mut UtilityState, now: Tick, ctx: &DecisionContext) -> Option<ActionId> {
        if now.within(state.last_decision, self.decision_interval) {
            return state.current;
        }

        let mut scores = std::mem::take(&mut state.last_scores);
        scores.clear();
        let mut best: Option<(ActionId, f32)> = None;
        for (id, action) in self.actions() {
            let s = self.score(state, id, now, ctx);
            scores.push(s);
            if let Some(why) = self.blocked_reason(state, id, now, ctx) {
                trace!(action = %action.name, score = s, why, "action blocked");
                continue;
            }
            if best.is_none_or(|(_, b)| s > b) {
                best = Some((id, s));
            }
        }

        state.last_scores = scores;
        state.last_decision = Some(now);
        state.current = best.map(|(id, _)| id);
        if let Some((id, s)) = best {
            debug!(action = %self.actions[id.index()].name, score = s, %now, "utility decision");
        }
        state.current
    }

    // ── Execution ─────────────────────────────────────────────────────────

    /// Run `id`'s effect for `cx.agent`.
    ///
    /// Never returns an error: blocked actions, refusals and collaborator
    /// problems all come back as a failed [`ActionResult`].  A vanished
    /// target also invalidates the cached decision.
    pub fn execute_action(
        &self,
        state: &mut UtilityState,
        id:    ActionId,
        cx:    &mut EffectContext<'_, '_>,
    ) -> ActionResult {
        let Some(action) = self.action(id) else {
            return ActionResult::failed(reason::UNKNOWN_ACTION);
        };
        if let Some(why) = self.blocked_reason(state, id, cx.tick, cx.decision) {
            debug!(agent = %cx.agent, action = %action.name, why, "action blocked");
            return ActionResult::failed(why);
        }
        if action.energy_cost > 0.0
            && cx.decision.is_known(InputKind::Energy)
            && cx.decision.get(InputKind::Energy) < action.energy_cost
        {
            return ActionResult::failed(reason::INSUFFICIENT_RESOURCES);
        }
        let Some(effect) = self.effects[id.index()] else {
            return ActionResult::failed(reason::UNKNOWN_ACTION);
        };

        match effect(cx) {
            Ok(r) => {
                if r.success {
                    // Cooldown starts once the effect lands, charged or not.
                    state.record_execution(id, cx.tick);
                    if action.energy_cost > 0.0
                        && let Err(e) = cx.actuator.fill_need(cx.agent, "fatigue", -action.energy_cost)
                    {
                        debug!(agent = %cx.agent, action = %action.name, error = %e, "energy charge refused");
                    }
                }
                r
            }
            Err(MindError::InvalidTarget(target)) => {
                debug!(agent = %cx.agent, action = %action.name, %target, "target lost; rescoring next time");
                state.invalidate();
                ActionResult::failed(reason::TARGET_LOST)
            }
            Err(e) => {
                debug!(agent = %cx.agent, action = %action.name, error = %e, "action failed");
                ActionResult::failed(reason::NO_ACTUATOR)
            }
        }
    }

    /// [`execute_action`][Self::execute_action] by name.
    pub fn execute_named(
        &self,
        state: &mut UtilityState,
        name:  &str,
        cx:    &mut EffectContext<'_, '_>,
    ) -> ActionResult {
        match self.action_id(name) {
            Some(id) => self.execute_action(state, id, cx),
            None => ActionResult::failed(reason::UNKNOWN_ACTION),
        }
    }

    /// `(name, score)` pairs from the latest decision.
    pub fn scored<'s>(&'s self, state: &'s UtilityState) -> impl Iterator<Item = (&'s str, f32)> {
        self.actions
            .iter()
            .zip(state.last_scores.iter())
            .map(|(a, &s)| (a.name.as_str(), s))
    }
}

fn validate(action: &UtilityAction) -> UtilityResult<()> {
    let bad = |reason: &str| UtilityError::InvalidAction {
        action: action.name.clone(),
        reason: reason.to_owned(),
    };
    if action.name.trim().is_empty() {
        return Err(bad("name is empty"));
    }
    if !action.base_priority.is_finite() {
        return Err(bad("base priority is not a number"));
    }
    if !action.energy_cost.is_finite() || action.energy_cost < 0.0 {
        return Err(bad("energy cost must be a non-negative number"));
    }
    if action.considerations.iter().any(|c| !c.weight.is_finite() || c.weight < 0.0) {
        return Err(bad("consideration weight must be a non-negative number"));
    }
    Ok(())
}
