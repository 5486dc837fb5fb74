/*!
The constraint-propagation kernel.

# Overview

Propagation is a unit-propagation fixpoint: while any non-fixed domain holds
exactly one value, that assignment is committed, appended to the trail, and
filtered against every other domain.
Filters run in a fixed order for each committed assignment:

1. Watched nogoods, which may delete values elsewhere.
2. The simple constraints: injectivity and adjacency (and edge labels, when
   the model has them) against the new assignment.
3. The hyperedge constraints, a reserved extension point in bigraph mode.
4. The less-than ordering constraints, when the model has any.
5. Cheap all-different, under injective matching.

Any filter reducing a domain to empty fails the whole call, and the caller
backtracks.
After the fixpoint, the lackey is consulted on the partial mapping if
configured, and may prune further or veto outright.

# Adjacency specialisation

The inner adjacency filter branches on three booleans: directed, edge
labelled, and induced.
These are fixed for a whole solve, so the filter is monomorphised over them
as const parameters and the combination is chosen once per call of the simple
constraints; edge-labelled graphs are always directed, leaving six live
combinations.

# Failure reporting

In-band only: the kernel returns false and guarantees nothing about the
domain values it leaves behind, as the caller is about to discard them.
The trail, however, keeps every unit assignment made before the failure; the
caller truncates.
*/

use crate::{
    config::Injectivity,
    context::GenericSearcher,
    misc::log::targets,
    procedures::all_different::cheap_all_different,
    structures::{Assignment, AssignmentRecord, Domain, Domains, Trail},
    types::Vertex,
};

use rand::SeedableRng;

impl<R: rand::Rng + SeedableRng> GenericSearcher<'_, R> {
    /// Runs the propagation fixpoint over `new_domains`, appending unit
    /// assignments to `trail`.
    ///
    /// Returns false on failure; the trail is left for the caller to
    /// truncate.
    pub(crate) fn propagate(
        &mut self,
        new_domains: &mut Domains,
        trail: &mut Trail,
        use_lackey: bool,
    ) -> bool {
        while let Some(index) = new_domains.iter().position(|d| !d.fixed && d.count == 1) {
            let current = {
                let d = &mut new_domains[index];
                let target = match d.values.first_set() {
                    Some(target) => target,
                    None => return false,
                };
                d.fixed = true;
                Assignment {
                    pattern_vertex: d.v,
                    target_vertex: target,
                }
            };

            trail.push(AssignmentRecord {
                assignment: current,
                is_decision: false,
                discrepancy_count: -1,
                choice_count: -1,
            });

            if let Some(proof) = self.proof.as_mut() {
                proof.unit_propagating(
                    self.model.pattern_vertex_for_proof(current.pattern_vertex),
                    self.model.target_vertex_for_proof(current.target_vertex),
                );
            }

            // a nogood going unit deletes its remaining literal; counts are
            // refreshed by the simple constraints below
            self.watches.propagate(
                current,
                |literal| !trail.contains(literal),
                |literal| {
                    for d in new_domains.iter_mut() {
                        if d.fixed {
                            continue;
                        }
                        if d.v == literal.pattern_vertex {
                            d.values.unset(literal.target_vertex);
                            break;
                        }
                    }
                },
            );

            if !self.propagate_simple_constraints(new_domains, &current) {
                return false;
            }

            if self.config.bigraph && !self.propagate_hyperedge_constraints(new_domains, &current)
            {
                return false;
            }

            if self.model.has_less_thans() && !self.propagate_less_thans(new_domains) {
                return false;
            }

            if self.config.injectivity == Injectivity::Injective
                && !cheap_all_different(self.model.target_size(), new_domains)
            {
                return false;
            }
        }

        if self.lackey.is_some() && (use_lackey || self.config.send_partials_to_lackey) {
            if !self.consult_lackey_on_partial(new_domains, trail, use_lackey) {
                return false;
            }
        }

        true
    }

    /// Injectivity, adjacency, and edge labels against `current`, for every
    /// non-fixed domain.
    fn propagate_simple_constraints(
        &self,
        new_domains: &mut Domains,
        current: &Assignment,
    ) -> bool {
        for d in new_domains.iter_mut() {
            if d.fixed {
                continue;
            }

            match self.config.injectivity {
                Injectivity::Injective => d.values.unset(current.target_vertex),
                Injectivity::LocallyInjective => {
                    if self.share_a_neighbourhood(current.pattern_vertex, d.v) {
                        d.values.unset(current.target_vertex);
                    }
                }
                Injectivity::NonInjective => {}
            }

            if !self.model.has_edge_labels() {
                match (self.model.directed(), self.config.induced) {
                    (false, false) => self.propagate_adjacency::<false, false, false>(d, current),
                    (false, true) => self.propagate_adjacency::<false, false, true>(d, current),
                    (true, false) => self.propagate_adjacency::<true, false, false>(d, current),
                    (true, true) => self.propagate_adjacency::<true, false, true>(d, current),
                }
            } else {
                // edge labels are always directed
                match self.config.induced {
                    false => self.propagate_adjacency::<true, true, false>(d, current),
                    true => self.propagate_adjacency::<true, true, true>(d, current),
                }
            }

            d.count = d.values.count();
            if d.count == 0 {
                log::trace!(target: targets::PROPAGATION,
                    "Wipeout of {} against {} -> {}", d.v, current.pattern_vertex, current.target_vertex);
                return false;
            }
        }

        true
    }

    /// The adjacency filter, monomorphised over directedness, edge labels,
    /// and inducedness.
    fn propagate_adjacency<const DIRECTED: bool, const LABELLED: bool, const INDUCED: bool>(
        &self,
        d: &mut Domain,
        current: &Assignment,
    ) {
        let graph_pairs = self
            .model
            .pattern_adjacency_bits(current.pattern_vertex, d.v);

        if !DIRECTED {
            // adjacent pattern vertices may only go to adjacent targets
            if graph_pairs & (1 << 0) != 0 {
                d.values
                    .intersect_with(self.model.target_graph_row(0, current.target_vertex));
            } else if INDUCED {
                // and, induced, non-adjacent only to non-adjacent
                d.values
                    .intersect_with_complement(self.model.target_graph_row(0, current.target_vertex));
            }
        } else {
            // forward and reverse edges are filtered independently
            if graph_pairs & (1 << 0) != 0 {
                d.values
                    .intersect_with(self.model.forward_target_graph_row(current.target_vertex));
            } else if INDUCED {
                d.values.intersect_with_complement(
                    self.model.forward_target_graph_row(current.target_vertex),
                );
            }

            let reverse_pairs = self
                .model
                .pattern_adjacency_bits(d.v, current.pattern_vertex);

            if reverse_pairs & (1 << 0) != 0 {
                d.values
                    .intersect_with(self.model.reverse_target_graph_row(current.target_vertex));
            } else if INDUCED {
                d.values.intersect_with_complement(
                    self.model.reverse_target_graph_row(current.target_vertex),
                );
            }
        }

        // supplemental graph pairs are never complemented
        for g in 1..self.model.max_graphs() {
            if graph_pairs & (1 << g) != 0 {
                d.values
                    .intersect_with(self.model.target_graph_row(g, current.target_vertex));
            }
        }

        if LABELLED {
            if graph_pairs & (1 << 0) != 0 {
                let want = self
                    .model
                    .pattern_edge_label(current.pattern_vertex, d.v);
                let mismatched: Vec<_> = d
                    .values
                    .iter()
                    .filter(|c| self.model.target_edge_label(current.target_vertex, *c) != want)
                    .collect();
                for c in mismatched {
                    d.values.unset(c);
                }
            }

            let reverse_pairs = self
                .model
                .pattern_adjacency_bits(d.v, current.pattern_vertex);
            if reverse_pairs & (1 << 0) != 0 {
                let want = self
                    .model
                    .pattern_edge_label(d.v, current.pattern_vertex);
                let mismatched: Vec<_> = d
                    .values
                    .iter()
                    .filter(|c| self.model.target_edge_label(*c, current.target_vertex) != want)
                    .collect();
                for c in mismatched {
                    d.values.unset(c);
                }
            }
        }
    }

    /// Whether pattern vertices `v` and `w` have a common neighbour.
    fn share_a_neighbourhood(&self, v: Vertex, w: Vertex) -> bool {
        let mut common = self.model.pattern_graph_row(0, v).clone();
        common.intersect_with(self.model.pattern_graph_row(0, w));
        common.any()
    }

    /// Reserved extension point for bigraph hyperedge constraints.
    fn propagate_hyperedge_constraints(
        &self,
        _new_domains: &mut Domains,
        _current: &Assignment,
    ) -> bool {
        true
    }

    /// Bounds propagation of the model's less-than pairs.
    ///
    /// For a pair (a, b): b keeps only values strictly after a's first, then
    /// a keeps only values strictly before b's last.
    /// Pairs with an endpoint no longer in the domain vector are skipped,
    /// their assignments being already on the trail.
    fn propagate_less_thans(&self, new_domains: &mut Domains) -> bool {
        let mut find_domain = vec![usize::MAX; self.model.pattern_size()];
        for (index, d) in new_domains.iter().enumerate() {
            find_domain[d.v as usize] = index;
        }

        for &(a, b) in self.model.pattern_less_thans_in_convenient_order() {
            let (ia, ib) = (find_domain[a as usize], find_domain[b as usize]);
            if ia == usize::MAX || ib == usize::MAX {
                continue;
            }

            let first_a = match new_domains[ia].values.first_set() {
                Some(first_a) => first_a,
                None => return false,
            };
            let first_allowed_b = first_a + 1;
            if first_allowed_b as usize >= self.model.target_size() {
                return false;
            }

            let b_domain = &mut new_domains[ib];
            while let Some(v) = b_domain.values.first_set() {
                if v >= first_allowed_b {
                    break;
                }
                b_domain.values.unset(v);
            }

            b_domain.count = b_domain.values.count();
            if b_domain.count == 0 {
                return false;
            }
        }

        for &(a, b) in self.model.pattern_less_thans_in_convenient_order() {
            let (ia, ib) = (find_domain[a as usize], find_domain[b as usize]);
            if ia == usize::MAX || ib == usize::MAX {
                continue;
            }

            let last_b = match new_domains[ib].values.last_set() {
                Some(last_b) => last_b,
                None => return false,
            };
            if last_b == 0 {
                return false;
            }
            let last_allowed_a = last_b - 1;

            let a_domain = &mut new_domains[ia];
            while let Some(v) = a_domain.values.last_set() {
                if v <= last_allowed_a {
                    break;
                }
                a_domain.values.unset(v);
            }

            a_domain.count = a_domain.values.count();
            if a_domain.count == 0 {
                return false;
            }
        }

        true
    }

    /// Hands the partial mapping to the lackey, with a deletion sink when
    /// this subtree propagates through the lackey.
    fn consult_lackey_on_partial(
        &mut self,
        new_domains: &mut Domains,
        trail: &Trail,
        use_lackey: bool,
    ) -> bool {
        let mapping = trail.as_mapping();
        let mut wipeout = false;

        let mut deletion = |p: Vertex, t: Vertex| -> bool {
            if wipeout {
                return false;
            }
            for d in new_domains.iter_mut() {
                if d.v == p {
                    if d.values.test(t) {
                        d.values.unset(t);
                        d.count -= 1;
                        if d.count == 0 {
                            wipeout = true;
                        }
                        return true;
                    }
                    break;
                }
            }
            false
        };

        let lackey = match self.lackey.as_mut() {
            Some(lackey) => lackey,
            None => return true,
        };

        let accepted = match use_lackey {
            true => lackey.check_solution(&mapping, true, false, Some(&mut deletion)),
            false => lackey.check_solution(&mapping, true, false, None),
        };

        accepted && !wipeout
    }
}
