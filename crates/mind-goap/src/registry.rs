//! Name-keyed predicates and step effects.

use rustc_hash::FxHashMap;
use tracing::warn;

use mind_context::{Actuator, DecisionContext, WorldContext};
use mind_core::{AgentId, MindResult, Tick};

/// What a step effect may read or write.
pub struct StepContext<'a, 'w> {
    pub agent:    AgentId,
    pub tick:     Tick,
    pub world:    &'a WorldContext<'w>,
    pub decision: &'a DecisionContext,
    pub actuator: &'a mut dyn Actuator,
}

pub type PredicateFn = Box<dyn Fn(AgentId, &DecisionContext) -> bool + Send + Sync>;

pub type StepEffectFn = Box<dyn Fn(&mut StepContext<'_, '_>) -> MindResult<()> + Send + Sync>;

/// Predicates (goal satisfaction, step preconditions) and step effects.
#[derive(Default)]
pub struct PlannerRegistry {
    predicates: FxHashMap<String, usize>,
    pred_fns:   Vec<PredicateFn>,
    effects:    FxHashMap<String, usize>,
    effect_fns: Vec<StepEffectFn>,
}

impl PlannerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_predicate<F>(&mut self, name: &str, f: F)
    where
        F: Fn(AgentId, &DecisionContext) -> bool + Send + Sync + 'static,
    {
        match self.predicates.get(name) {
            Some(&i) => {
                warn!(name, "predicate registered twice; replacing");
                self.pred_fns[i] = Box::new(f);
            }
            None => {
                self.predicates.insert(name.to_owned(), self.pred_fns.len());
                self.pred_fns.push(Box::new(f));
            }
        }
    }

    pub fn register_effect<F>(&mut self, name: &str, f: F)
    where
        F: Fn(&mut StepContext<'_, '_>) -> MindResult<()> + Send + Sync + 'static,
    {
        match self.effects.get(name) {
            Some(&i) => {
                warn!(name, "step effect registered twice; replacing");
                self.effect_fns[i] = Box::new(f);
            }
            None => {
                self.effects.insert(name.to_owned(), self.effect_fns.len());
                self.effect_fns.push(Box::new(f));
            }
        }
    }

    pub(crate) fn predicate_slot(&self, name: &str) -> Option<usize> {
        self.predicates.get(name).copied()
    }

    pub(crate) fn effect_slot(&self, name: &str) -> Option<usize> {
        self.effects.get(name).copied()
    }

    #[inline]
    pub(crate) fn holds(&self, slot: usize, agent: AgentId, ctx: &DecisionContext) -> bool {
        (self.pred_fns[slot])(agent, ctx)
    }

    #[inline]
    pub(crate) fn run(&self, slot: usize, cx: &mut StepContext<'_, '_>) -> MindResult<()> {
        (self.effect_fns[slot])(cx)
    }
}
