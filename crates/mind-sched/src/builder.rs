//! Assembling a [`Scheduler`] from configuration and engines.

use rustc_hash::FxHashMap;
use tracing::info;

use mind_goap::{GoalPlanner, default_planner};
use mind_tree::{TreeEngine, default_engine};
use mind_utility::{UtilityScorer, default_scorer_with_interval};

use crate::scheduler::{Engines, Scheduler};
use crate::{SchedResult, SchedulerConfig};

/// Builder for [`Scheduler`].  Any engine not supplied is replaced by the
/// built-in preset.
///
/// ```rust,ignore
/// let scheduler = SchedulerBuilder::new(SchedulerConfig::from_toml_file("mind.toml")?)
///     .scorer(load_actions_csv("actions.csv").map(|a| UtilityScorer::new(2).with_actions(a))??)
///     .build()?;
/// ```
pub struct SchedulerBuilder {
    config:  SchedulerConfig,
    trees:   Option<TreeEngine>,
    scorer:  Option<UtilityScorer>,
    planner: Option<GoalPlanner>,
}

impl SchedulerBuilder {
    pub fn new(config: SchedulerConfig) -> Self {
        Self { config, trees: None, scorer: None, planner: None }
    }

    pub fn trees(mut self, engine: TreeEngine) -> Self {
        self.trees = Some(engine);
        self
    }

    pub fn scorer(mut self, scorer: UtilityScorer) -> Self {
        self.scorer = Some(scorer);
        self
    }

    pub fn planner(mut self, planner: GoalPlanner) -> Self {
        self.planner = Some(planner);
        self
    }

    /// Validate the configuration and assemble the scheduler.
    ///
    /// The configured fallback category must resolve to a template, and the
    /// scorer's debounce is overridden by `decision_interval`.
    pub fn build(self) -> SchedResult<Scheduler> {
        let config = self.config;
        config.validate()?;

        let trees = match self.trees {
            Some(t) => t,
            None => default_engine()?,
        }
        .with_fallback(config.fallback_category.clone());
        trees.resolve(&config.fallback_category)?;

        let scorer = match self.scorer {
            Some(s) => s.with_decision_interval(config.decision_interval),
            None => default_scorer_with_interval(config.decision_interval)?,
        };
        let planner = match self.planner {
            Some(p) => p,
            None => default_planner()?,
        };

        info!(
            trees = trees.template_count(),
            actions = scorer.action_count(),
            goals = planner.goal_count(),
            steps = planner.step_count(),
            style = %config.default_style,
            "scheduler ready"
        );

        let perception = config.perception.clone();
        Ok(Scheduler {
            config,
            engines: Engines { trees, scorer, planner, perception },
            slots: Vec::new(),
            index: FxHashMap::default(),
            cursor: 0,
            last_fired: None,
            focus: None,
        })
    }
}
