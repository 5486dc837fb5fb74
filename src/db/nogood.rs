//! Nogoods: learned forbidden conjunctions of assignments.

use crate::structures::Assignment;

/// A conjunction of assignments which must not all hold together.
///
/// Whenever every literal but one is on the trail, the remaining literal may
/// be removed from its domain.
///
/// For a nogood held by the [watch store](crate::db::Watches), the first two
/// literals are the watched ones; the store reorders literals to maintain
/// this.
#[derive(Clone, Debug)]
pub struct Nogood {
    pub literals: Vec<Assignment>,
}
