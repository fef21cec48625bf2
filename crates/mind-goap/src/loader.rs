//! TOML plan library loader.
//!
//! ```toml
//! [[goal]]
//! name      = "Survive"
//! priority  = 1.0
//! satisfied = "fed_and_watered"
//!
//! [[step]]
//! name         = "find_food"
//! duration     = 2
//! precondition = "is_hungry"
//! effect       = "eat"
//! ```
//!
//! Goals and steps keep file order.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{GoalDef, GoalPlanner, PlannerError, PlannerResult, StepDef};

/// Every goal and step in one document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanLibrary {
    #[serde(default, rename = "goal")]
    pub goals: Vec<GoalDef>,

    #[serde(default, rename = "step")]
    pub steps: Vec<StepDef>,
}

impl PlanLibrary {
    /// Register every goal, then every step.
    pub fn install(self, planner: &mut GoalPlanner) -> PlannerResult<()> {
        for g in self.goals {
            planner.add_goal(g)?;
        }
        for s in self.steps {
            planner.add_step(s)?;
        }
        Ok(())
    }
}

pub fn load_plan_library_toml(text: &str) -> PlannerResult<PlanLibrary> {
    toml::from_str(text).map_err(|e| PlannerError::Parse(e.to_string()))
}

pub fn load_plan_library_file(path: impl AsRef<Path>) -> PlannerResult<PlanLibrary> {
    let text = std::fs::read_to_string(path)?;
    load_plan_library_toml(&text)
}
