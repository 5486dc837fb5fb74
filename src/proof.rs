/*!
The proof-logging collaborator interface.

A searcher given a [Proof] narrates every decision and inference it makes, so
an external logger can emit a certificate for later checking.
The search itself never reads anything back: logging is strictly one-way, and
the format of whatever the logger writes is its own business.

Trails are reported as the decision pairs currently in force; vertices cross
the interface in [named](crate::types::NamedVertex) form so the logger can
speak about the caller's graphs rather than dense indices.
*/

use crate::types::{NamedVertex, Vertex};

/// A log of decisions and inferences, for external certification.
///
/// Levels follow the search depth: a frame at `depth` opens level
/// `depth + 2` for the subtree below each of its guesses.
pub trait Proof {
    /// A branching decision is about to be tried.
    fn guessing(&mut self, depth: u32, pattern: NamedVertex, target: NamedVertex);

    /// The guess of `target` for `pattern` failed in propagation under the
    /// given decisions.
    fn propagation_failure(
        &mut self,
        decisions: &[(Vertex, Vertex)],
        pattern: NamedVertex,
        target: NamedVertex,
    );

    /// An assignment forced by unit propagation.
    fn unit_propagating(&mut self, pattern: NamedVertex, target: NamedVertex);

    /// A new level is opened below a successful guess.
    fn start_level(&mut self, level: u32);

    /// The search returns to `level`.
    fn back_up_to_level(&mut self, level: u32);

    /// The subtree at `level` is finished with.
    fn forget_level(&mut self, level: u32);

    /// A guess was wrong: either its subtree was unsatisfiable
    /// (`was_failure`), or it was exhausted while enumerating.
    fn incorrect_guess(&mut self, decisions: &[(Vertex, Vertex)], was_failure: bool);

    /// A full solution, in named form.
    fn post_solution(&mut self, solution: &[(NamedVertex, NamedVertex)]);

    /// A frame ran out of candidate values under the given decisions.
    fn out_of_guesses(&mut self, decisions: &[(Vertex, Vertex)]);

    /// The decisions excluded by a restart nogood.
    fn post_restart_nogood(&mut self, decisions: &[(Vertex, Vertex)]);

    /// A restart unwinds the search to the top.
    fn back_up_to_top(&mut self);
}
