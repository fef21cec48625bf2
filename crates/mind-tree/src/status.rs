//! Node evaluation result.

use std::fmt;

/// What a node reports after one evaluation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    Success,
    Failure,
    /// Started but not finished; the same leaf is re-entered on the agent's
    /// next evaluation.
    Running,
}

impl Status {
    #[inline]
    pub fn from_bool(ok: bool) -> Self {
        if ok { Status::Success } else { Status::Failure }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Success => "success",
            Status::Failure => "failure",
            Status::Running => "running",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
