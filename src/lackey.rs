/*!
The lackey: an external consistency oracle.

A lackey sees mappings the searcher cannot fully judge by itself, and has two
powers: it may veto, and, when handed a [deletion sink](DeletionSink), it may
propagate, striking target vertices out of the domains of a partial mapping.

The searcher treats the lackey as sound but otherwise opaque.
A veto of a complete mapping turns it into a failure (and, in the
`RootAndBackjump` mode, switches the failing subtree over to lackey-driven
propagation); deletions feed straight into the domain kernel, with a wipeout
handled like any other empty domain.
*/

use crate::types::{Mapping, Vertex};

/// Removes a target vertex from the domain of a pattern vertex, returning
/// whether anything was actually removed.
pub type DeletionSink<'a> = &'a mut dyn FnMut(Vertex, Vertex) -> bool;

/// An external consistency oracle.
pub trait Lackey {
    /// Judges `mapping`, which is partial unless every pattern vertex is
    /// mapped.
    ///
    /// `count` tells the oracle the search is enumerating rather than
    /// deciding.
    /// When `deletion` is supplied the oracle may additionally prune domains
    /// through it; deletions must be sound for every extension of `mapping`.
    ///
    /// Returns false to veto.
    fn check_solution(
        &mut self,
        mapping: &Mapping,
        partial: bool,
        count: bool,
        deletion: Option<DeletionSink>,
    ) -> bool;
}
