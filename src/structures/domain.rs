/*!
Domains: the target vertices still possible for each pattern vertex.

# Overview

A [Domain] holds the candidate targets of one pattern vertex as a
[VertexSet], with the cardinality cached alongside.
The cache must be recomputed by whoever shrinks the set; an empty domain is
how propagation signals failure.

A [Domains] vector holds one domain per not-yet-pruned pattern vertex.
On a branch the vector is copied by
[copy_nonfixed_and_assign], which drops the fixed entries for good: their
assignments live on the trail, and a fixed domain is never mutated again
within the subtree.
Backtracking is then simply discarding the copy.
*/

use crate::structures::VertexSet;
use crate::types::Vertex;

/// The still-possible target vertices for one pattern vertex.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Domain {
    /// The pattern vertex the domain belongs to.
    pub v: Vertex,

    /// The candidate target vertices.
    pub values: VertexSet,

    /// Cached cardinality of `values`.
    pub count: u32,

    /// Whether the domain has been committed to its single value and its
    /// assignment appended to the trail.
    pub fixed: bool,
}

impl Domain {
    /// A fresh, unfixed domain over `values`.
    pub fn new(v: Vertex, values: VertexSet) -> Self {
        let count = values.count();
        Domain {
            v,
            values,
            count,
            fixed: false,
        }
    }
}

/// One domain per not-yet-pruned pattern vertex.
pub type Domains = Vec<Domain>;

/// Copies the non-fixed entries of `domains`, in order, restricting the entry
/// for `branch_v` to the singleton `{target}`.
///
/// The copy is the working set of the subtree below the branch.
pub fn copy_nonfixed_and_assign(domains: &Domains, branch_v: Vertex, target: Vertex) -> Domains {
    let mut new_domains = Vec::with_capacity(domains.len());
    for d in domains {
        if d.fixed {
            continue;
        }

        let mut copy = d.clone();
        if copy.v == branch_v {
            copy.values.set_single(target);
            copy.count = 1;
        }
        new_domains.push(copy);
    }
    new_domains
}
