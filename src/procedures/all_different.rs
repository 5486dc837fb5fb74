/*!
The cheap all-different propagator.

# Overview

Under injective matching the domains must admit a system of distinct
representatives.
Computing a maximum matching at every fixpoint would be sound and complete
and much too slow, so a cheap counting filter is used instead:

Take the domains smallest first, accumulating their union.
If at any point fewer values have been seen than domains, some domain has
been starved, by Hall's theorem, and the filter fails.
If exactly as many values have been seen as domains, those values form a
*hall set*: they are spoken for, and are deleted from every later domain.

The filter is sound (a value in some surviving solution is never deleted) and
detects emptiness, but is deliberately no stronger than the counting
argument.

Note, domains are reordered in place; position in the domain vector carries
no meaning.
*/

use crate::structures::{Domains, VertexSet};

/// Prunes `domains` by the counting argument above.
///
/// Returns false when the domains cannot admit distinct representatives.
pub(crate) fn cheap_all_different(target_size: usize, domains: &mut Domains) -> bool {
    // smallest domains first, ties by vertex for determinism
    domains.sort_unstable_by(|a, b| a.count.cmp(&b.count).then(a.v.cmp(&b.v)));

    let mut union_so_far = VertexSet::empty(target_size);
    let mut hall = VertexSet::empty(target_size);
    let mut domains_so_far: u32 = 0;

    for d in domains.iter_mut() {
        // values in the hall set are spoken for
        d.values.intersect_with_complement(&hall);
        d.count = d.values.count();
        if d.count == 0 {
            return false;
        }

        union_so_far.union_with(&d.values);
        domains_so_far += 1;

        let union_count = union_so_far.count();
        if union_count < domains_so_far {
            return false;
        } else if union_count == domains_so_far {
            hall.union_with(&union_so_far);
        }
    }

    true
}
