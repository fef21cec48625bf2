//! Read-only views of one agent's decision state.

use std::fmt;

use mind_context::Intent;
use mind_core::{AgentId, Tick};

use crate::DecisionStyle;
use crate::scheduler::Engines;
use crate::slot::{AgentSlot, Mind};

/// Returned by [`Scheduler::debug_snapshot`][crate::Scheduler::debug_snapshot].
#[derive(Clone, Debug, PartialEq)]
pub struct AgentSnapshot {
    pub agent:          AgentId,
    pub style:          DecisionStyle,
    pub active:         bool,
    /// Engine state line, e.g. `tree=Adult active=true running=eat last=running`.
    pub state:          String,
    pub last_intent:    Intent,
    /// Utility scores from the latest decision, in registry order.
    pub scores:         Vec<(String, f32)>,
    /// Step names of the current plan.
    pub plan:           Vec<String>,
    pub last_evaluated: Option<Tick>,
    pub evaluations:    u64,
}

impl AgentSnapshot {
    pub(crate) fn capture(engines: &Engines, slot: &AgentSlot) -> Self {
        let (state, scores, plan) = match &slot.mind {
            Mind::Tree(Some(instance)) => (engines.trees.describe(instance), Vec::new(), Vec::new()),
            Mind::Tree(None) => ("tree=<unresolved>".to_owned(), Vec::new(), Vec::new()),
            Mind::Utility { planner, utility } => {
                let scores = engines
                    .scorer
                    .scored(utility)
                    .map(|(name, s)| (name.to_owned(), s))
                    .collect();
                let plan = planner
                    .plan()
                    .iter()
                    .filter_map(|&s| engines.planner.step_name(s))
                    .map(str::to_owned)
                    .collect();
                (engines.planner.describe(planner), scores, plan)
            }
        };
        Self {
            agent: slot.agent,
            style: slot.mind.style(),
            active: slot.active,
            state,
            last_intent: slot.last_intent.clone(),
            scores,
            plan,
            last_evaluated: slot.last_evaluated,
            evaluations: slot.evaluations,
        }
    }

    /// Highest-scoring action of the latest utility decision.
    pub fn top_score(&self) -> Option<(&str, f32)> {
        self.scores
            .iter()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(n, s)| (n.as_str(), *s))
    }
}

impl fmt::Display for AgentSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} [{}{}]", self.agent, self.style, if self.active { "" } else { ", inactive" })?;
        writeln!(f, "  {}", self.state)?;
        match self.last_evaluated {
            Some(t) => writeln!(f, "  intent {} (t={t}, {} evaluations)", self.last_intent, self.evaluations)?,
            None => writeln!(f, "  never evaluated")?,
        }
        for (name, score) in &self.scores {
            writeln!(f, "  {name:<14} {score:.3}")?;
        }
        Ok(())
    }
}
