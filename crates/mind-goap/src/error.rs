use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("a goal named '{0}' is already registered")]
    DuplicateGoal(String),

    #[error("goal '{goal}' has priority {priority}; priorities must be finite")]
    InvalidPriority { goal: String, priority: f32 },

    #[error("a plan step named '{0}' is already registered")]
    DuplicateStep(String),

    #[error("too many {0} registered")]
    Capacity(&'static str),

    #[error("plan library parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type PlannerResult<T> = Result<T, PlannerError>;
