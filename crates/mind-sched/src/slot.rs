//! Per-agent scheduler entries.

use mind_context::{DecisionContext, Intent};
use mind_core::{AgentId, AgentRng, Tick};
use mind_goap::PlannerState;
use mind_tree::{Status, TreeInstance};
use mind_utility::UtilityState;

use crate::DecisionStyle;

/// The engine state of one agent.  Exactly one engine is active at a time.
#[derive(Clone, Debug, PartialEq)]
pub enum Mind {
    /// `None` until the first evaluation resolves the agent's life stage.
    Tree(Option<TreeInstance>),
    Utility {
        planner: PlannerState,
        utility: UtilityState,
    },
}

impl Mind {
    pub fn new(style: DecisionStyle) -> Self {
        match style {
            DecisionStyle::Tree => Mind::Tree(None),
            DecisionStyle::Utility => Mind::Utility {
                planner: PlannerState::new(),
                utility: UtilityState::new(),
            },
        }
    }

    pub fn style(&self) -> DecisionStyle {
        match self {
            Mind::Tree(_) => DecisionStyle::Tree,
            Mind::Utility { .. } => DecisionStyle::Utility,
        }
    }

    /// Drop every in-progress state (running leaf, plan, cached choice).
    /// Cooldowns survive.
    pub fn interrupt(&mut self) {
        match self {
            Mind::Tree(instance) => {
                if let Some(i) = instance {
                    i.reset();
                }
            }
            Mind::Utility { planner, utility } => {
                planner.reset();
                utility.invalidate();
            }
        }
    }
}

/// Everything the scheduler keeps for one registered agent.
#[derive(Clone, Debug)]
pub struct AgentSlot {
    pub(crate) agent:          AgentId,
    pub(crate) mind:           Mind,
    pub(crate) active:         bool,
    pub(crate) context:        DecisionContext,
    pub(crate) rng:            AgentRng,
    pub(crate) forced_action:  Option<String>,
    pub(crate) last_intent:    Intent,
    pub(crate) last_status:    Option<Status>,
    pub(crate) last_evaluated: Option<Tick>,
    pub(crate) evaluations:    u64,
}

impl AgentSlot {
    pub(crate) fn new(agent: AgentId, style: DecisionStyle, seed: u64) -> Self {
        Self {
            agent,
            mind:           Mind::new(style),
            active:         true,
            context:        DecisionContext::default(),
            rng:            AgentRng::new(seed, agent),
            forced_action:  None,
            last_intent:    Intent::Idle,
            last_status:    None,
            last_evaluated: None,
            evaluations:    0,
        }
    }

    pub fn agent(&self) -> AgentId {
        self.agent
    }

    pub fn mind(&self) -> &Mind {
        &self.mind
    }

    pub fn style(&self) -> DecisionStyle {
        self.mind.style()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn context(&self) -> &DecisionContext {
        &self.context
    }

    pub fn last_intent(&self) -> &Intent {
        &self.last_intent
    }

    pub fn last_evaluated(&self) -> Option<Tick> {
        self.last_evaluated
    }

    /// Times this agent has been evaluated since registration.
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }
}
