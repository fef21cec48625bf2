use thiserror::Error;

#[derive(Debug, Error)]
pub enum UtilityError {
    #[error("an action named '{0}' is already registered")]
    DuplicateAction(String),

    #[error("action '{action}': {reason}")]
    InvalidAction {
        action: String,
        reason: String,
    },

    #[error("too many actions registered")]
    Capacity,

    #[error("action CSV parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type UtilityResult<T> = Result<T, UtilityError>;
