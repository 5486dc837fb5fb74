//! What a completed solve reports back.

use crate::context::Counters;
use crate::types::Mapping;

/// The verdict of a solve.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Report {
    /// A mapping exists; under count mode, at least one was found.
    Satisfiable,

    /// No mapping exists.
    Unsatisfiable,

    /// The time limit was hit before a verdict.
    Aborted,
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Satisfiable => write!(f, "Satisfiable"),
            Self::Unsatisfiable => write!(f, "Unsatisfiable"),
            Self::Aborted => write!(f, "Aborted"),
        }
    }
}

/// Everything a solve has to say.
#[derive(Debug)]
pub struct SolveOutcome {
    pub report: Report,

    /// The mapping of a decisive satisfiable; absent under count mode.
    pub mapping: Option<Mapping>,

    /// Mappings found; at most one unless counting.
    pub solution_count: u128,

    pub counters: Counters,
}
