use mind_goap::PlannerError;
use mind_tree::TreeError;
use mind_utility::UtilityError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchedError {
    #[error("scheduler configuration error: {0}")]
    Config(String),

    #[error("behavior tree error: {0}")]
    Tree(#[from] TreeError),

    #[error("utility scorer error: {0}")]
    Utility(#[from] UtilityError),

    #[error("planner error: {0}")]
    Planner(#[from] PlannerError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SchedResult<T> = Result<T, SchedError>;
