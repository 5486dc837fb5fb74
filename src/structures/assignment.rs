/*!
Assignments of target vertices to pattern vertices, and the trail of them.

# Overview

An [Assignment] pairs a pattern vertex with the target vertex it has been
mapped to.
The [Trail] is the ordered stack of assignments made so far, decisions and
unit propagations alike, in the order they were made.

Backtracking is by truncation: a search frame remembers the length of the
trail on entry and cuts the trail back to that length before returning,
whatever else happened in between.
The trail is never copied.

# Invariants

- No two records on the trail share a pattern vertex.
- A record is a decision exactly if it was pushed by branching; records pushed
  by unit propagation carry `-1` for both the discrepancy and choice counts.
*/

use crate::types::{Mapping, Vertex};

/// A pattern vertex paired with the target vertex it is mapped to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Assignment {
    pub pattern_vertex: Vertex,
    pub target_vertex: Vertex,
}

/// An assignment on the trail, together with how it came to be made.
#[derive(Clone, Copy, Debug)]
pub struct AssignmentRecord {
    pub assignment: Assignment,

    /// Whether the assignment was made by branching, rather than propagation.
    pub is_decision: bool,

    /// The index of the chosen value among the ordered candidates at the
    /// branch, `-1` for propagated assignments.
    pub discrepancy_count: i32,

    /// The number of candidates considered at the branch, `-1` for propagated
    /// assignments.
    pub choice_count: i32,
}

/// The ordered stack of assignments made so far.
#[derive(Debug, Default)]
pub struct Trail {
    records: Vec<AssignmentRecord>,
}

impl Trail {
    pub fn new() -> Self {
        Trail::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn push(&mut self, record: AssignmentRecord) {
        self.records.push(record);
    }

    pub fn pop(&mut self) {
        self.records.pop();
    }

    /// Cuts the trail back to `len` entries, undoing everything later.
    pub fn truncate(&mut self, len: usize) {
        self.records.truncate(len);
    }

    pub fn records(&self) -> &[AssignmentRecord] {
        &self.records
    }

    /// Whether `assignment` is on the trail.
    ///
    /// Required by the nogood store, which treats trail membership as a
    /// literal being assigned.
    pub fn contains(&self, assignment: &Assignment) -> bool {
        self.records
            .iter()
            .any(|record| record.assignment == *assignment)
    }

    /// The decisions on the trail, oldest first.
    pub fn decisions(&self) -> impl Iterator<Item = Assignment> + '_ {
        self.records
            .iter()
            .filter(|record| record.is_decision)
            .map(|record| record.assignment)
    }

    /// The decisions on the trail as plain vertex pairs, for proof logging.
    pub fn decision_pairs(&self) -> Vec<(Vertex, Vertex)> {
        self.decisions()
            .map(|a| (a.pattern_vertex, a.target_vertex))
            .collect()
    }

    /// The full mapping held on the trail.
    pub fn as_mapping(&self) -> Mapping {
        self.records
            .iter()
            .map(|record| {
                (
                    record.assignment.pattern_vertex,
                    record.assignment.target_vertex,
                )
            })
            .collect()
    }
}
