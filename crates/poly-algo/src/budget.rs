//! Work budget for the exact NP-hard searches.

/// Step budget handed to exhaustive backtracking searches. The searches are
/// exact while the budget lasts; once it is spent they stop and report the
/// distinguished [`SearchOutcome::Exhausted`] result instead of running
/// unbounded.
#[derive(Debug, Clone, Copy)]
pub struct SearchBudget {
    remaining: u64,
}

impl SearchBudget {
    /// Default number of search steps, enough for graphs of a few dozen nodes.
    pub const DEFAULT_STEPS: u64 = 1_000_000;

    /// Creates a budget with the given number of steps.
    pub fn steps(steps: u64) -> Self {
        Self { remaining: steps }
    }

    /// Consumes one step, returning `false` once the budget is spent.
    pub fn spend(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }

    /// Remaining steps.
    pub fn remaining(&self) -> u64 {
        self.remaining
    }
}

impl Default for SearchBudget {
    fn default() -> Self {
        Self::steps(Self::DEFAULT_STEPS)
    }
}

/// Result of a budgeted exact search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome<T> {
    /// The search completed and found a witness.
    Found(T),
    /// The search completed without finding a witness.
    Absent,
    /// The budget ran out before the search space was covered.
    Exhausted,
}

impl<T> SearchOutcome<T> {
    /// Returns the witness, if any.
    pub fn found(self) -> Option<T> {
        match self {
            SearchOutcome::Found(value) => Some(value),
            SearchOutcome::Absent | SearchOutcome::Exhausted => None,
        }
    }

    /// Returns whether the search completed without a witness.
    pub fn is_absent(&self) -> bool {
        matches!(self, SearchOutcome::Absent)
    }
}
