//! Check outcomes.

use std::fmt;

/// Classification of a single check.
///
/// `TodoPass` and `TodoFail` come from checks that are known to be broken:
/// a todo that fails is expected, a todo that passes is worth looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Pass,
    Fail,
    /// Expected to fail, but passed.
    TodoPass,
    /// Expected to fail, and did.
    TodoFail,
}

impl Outcome {
    /// Outcome of a regular check.
    pub fn from_check(ok: bool) -> Self {
        if ok {
            Outcome::Pass
        } else {
            Outcome::Fail
        }
    }

    /// Outcome of a todo check.
    pub fn from_todo(ok: bool) -> Self {
        if ok {
            Outcome::TodoPass
        } else {
            Outcome::TodoFail
        }
    }

    /// True for the outcomes a run should be flagged for: `Fail` and `TodoPass`.
    pub fn is_failure(self) -> bool {
        matches!(self, Outcome::Fail | Outcome::TodoPass)
    }

    pub fn is_todo(self) -> bool {
        matches!(self, Outcome::TodoPass | Outcome::TodoFail)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Outcome::Pass => "PASS",
            Outcome::Fail => "FAIL",
            Outcome::TodoPass => "XPASS",
            Outcome::TodoFail => "XFAIL",
        };
        f.write_str(label)
    }
}
