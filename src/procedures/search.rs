/*!
The recursive, restart-capable depth-first search.

# Overview

Each frame of [restarting_search](GenericSearcher::restarting_search) owns a
snapshot of the domains and a mark into the shared trail.
The frame picks the non-fixed domain with the fewest values (ties to the
branch vertex of larger pattern degree, then to the first found), orders its
candidates, and tries each in turn: push a decision, copy the non-fixed
domains with the candidate committed, propagate, and recurse.

Six things can come back from a recursion, and each is handled in place:

- `Satisfiable` and `Aborted` unwind unchanged, the former leaving the trail
  intact as the solution.
- `Restart` unwinds unchanged too, but each frame on the way out posts a
  nogood for every candidate it had already tried, so the next run does not
  repeat this subtree.
- `SatisfiableButKeepGoing` (enumeration continues) moves on to the next
  sibling; `Unsatisfiable` does too, noting the failure.
- `UnsatisfiableAndBackjumpUsingLackey` is `Unsatisfiable`, plus the frame
  switches its remaining candidates over to lackey propagation.

A frame which exhausted its candidates and saw a failure reports the
backtrack to the restart schedule; if the schedule then calls for a restart
the frame posts a nogood over the current decisions and begins the unwind.

Whatever happens, a frame returning anything but `Satisfiable` first puts the
trail back the way it found it.
*/

use crate::{
    config::PropagateUsingLackey,
    context::{GenericSearcher, SearchResult},
    db::Nogood,
    misc::log::targets,
    model::Model,
    schedule::RestartSchedule,
    structures::{copy_nonfixed_and_assign, Assignment, AssignmentRecord, Domain, Domains, Trail},
    types::Vertex,
};

use rand::SeedableRng;

impl<R: rand::Rng + SeedableRng> GenericSearcher<'_, R> {
    /// Searches below the given domains for an extension of the trail to a
    /// full mapping.
    ///
    /// `nodes` and `propagations` count work done; `solution_count` counts
    /// mappings found under count mode; `depth` is the recursion depth from
    /// the root.
    #[allow(clippy::too_many_arguments)]
    pub fn restarting_search(
        &mut self,
        trail: &mut Trail,
        domains: &Domains,
        nodes: &mut u64,
        propagations: &mut u64,
        solution_count: &mut u128,
        depth: u32,
        schedule: &mut dyn RestartSchedule,
    ) -> SearchResult {
        if self.should_abort() {
            return SearchResult::Aborted;
        }

        *nodes += 1;

        // find ourselves a branch domain, or succeed if all are fixed
        let Some(branch) = find_branch_domain(self.model, domains) else {
            return self.handle_solution(trail, solution_count);
        };
        let branch_v = branch.v;

        let mut candidates: Vec<Vertex> = branch.values.iter().collect();
        self.order_branch_values(&mut candidates);

        let choice_count = candidates.len() as i32;
        let mut discrepancy_count: i32 = 0;
        let mut actually_hit_a_failure = false;
        let mut use_lackey_for_propagation = false;

        for (position, &target) in candidates.iter().enumerate() {
            if let Some(proof) = self.proof.as_mut() {
                proof.guessing(
                    depth,
                    self.model.pattern_vertex_for_proof(branch_v),
                    self.model.target_vertex_for_proof(target),
                );
            }

            // appended now, shrunk back to this on anything but success
            let trail_size = trail.len();
            trail.push(AssignmentRecord {
                assignment: Assignment {
                    pattern_vertex: branch_v,
                    target_vertex: target,
                },
                is_decision: true,
                discrepancy_count,
                choice_count,
            });

            let mut new_domains = copy_nonfixed_and_assign(domains, branch_v, target);

            *propagations += 1;
            let with_lackey = use_lackey_for_propagation
                || self.config.propagate_using_lackey == PropagateUsingLackey::Always;
            if !self.propagate(&mut new_domains, trail, with_lackey) {
                if let Some(proof) = self.proof.as_mut() {
                    proof.propagation_failure(
                        &trail.decision_pairs(),
                        self.model.pattern_vertex_for_proof(branch_v),
                        self.model.target_vertex_for_proof(target),
                    );
                }

                trail.truncate(trail_size);
                actually_hit_a_failure = true;

                continue;
            }

            if let Some(proof) = self.proof.as_mut() {
                proof.start_level(depth + 2);
            }

            let search_result = self.restarting_search(
                trail,
                &new_domains,
                nodes,
                propagations,
                solution_count,
                depth + 1,
                schedule,
            );

            match search_result {
                SearchResult::Satisfiable => return SearchResult::Satisfiable,

                SearchResult::Aborted => return SearchResult::Aborted,

                SearchResult::Restart => {
                    // restore the trail before posting nogoods, it's easier
                    trail.truncate(trail_size);

                    // exclude everything tried at this branch so far
                    for &earlier in &candidates[..position] {
                        trail.push(AssignmentRecord {
                            assignment: Assignment {
                                pattern_vertex: branch_v,
                                target_vertex: earlier,
                            },
                            is_decision: true,
                            discrepancy_count: -2,
                            choice_count: -2,
                        });
                        self.post_nogood(trail);
                        trail.pop();
                    }

                    return SearchResult::Restart;
                }

                SearchResult::SatisfiableButKeepGoing => {
                    if let Some(proof) = self.proof.as_mut() {
                        proof.back_up_to_level(depth + 1);
                        proof.incorrect_guess(&trail.decision_pairs(), false);
                        proof.forget_level(depth + 2);
                    }

                    trail.truncate(trail_size);
                }

                SearchResult::UnsatisfiableAndBackjumpUsingLackey
                | SearchResult::Unsatisfiable => {
                    if search_result == SearchResult::UnsatisfiableAndBackjumpUsingLackey {
                        use_lackey_for_propagation = true;
                    }

                    if let Some(proof) = self.proof.as_mut() {
                        proof.back_up_to_level(depth + 1);
                        proof.incorrect_guess(&trail.decision_pairs(), true);
                        proof.forget_level(depth + 2);
                    }

                    trail.truncate(trail_size);
                    actually_hit_a_failure = true;
                }
            }

            discrepancy_count += 1;
        }

        // out of values: backtrack, or possibly kick off a restart
        if let Some(proof) = self.proof.as_mut() {
            proof.out_of_guesses(&trail.decision_pairs());
        }

        if actually_hit_a_failure {
            schedule.did_a_backtrack();
        }

        if schedule.should_restart() {
            log::trace!(target: targets::SEARCH, "Restarting at depth {depth}");
            if let Some(proof) = self.proof.as_mut() {
                proof.back_up_to_top();
            }
            self.post_nogood(trail);
            return SearchResult::Restart;
        }

        match use_lackey_for_propagation {
            true => SearchResult::UnsatisfiableAndBackjumpUsingLackey,
            false => SearchResult::Unsatisfiable,
        }
    }

    /// Every pattern vertex is fixed: validate the mapping on the trail and
    /// report it.
    fn handle_solution(&mut self, trail: &Trail, solution_count: &mut u128) -> SearchResult {
        if self.config.bigraph {
            let mapping = trail.as_mapping();
            if !self.model.check_extra_bigraph_constraints(&mapping) {
                // exclude the rejected solution, so the extra constraints are
                // not re-run on an isomorphic rediscovery
                self.post_solution_nogood(trail);
                return SearchResult::Unsatisfiable;
            }
        }

        if let Some(lackey) = self.lackey.as_mut() {
            let mapping = trail.as_mapping();
            if !lackey.check_solution(&mapping, false, self.config.count_solutions, None) {
                return match self.config.propagate_using_lackey {
                    PropagateUsingLackey::RootAndBackjump => {
                        SearchResult::UnsatisfiableAndBackjumpUsingLackey
                    }
                    _ => SearchResult::Unsatisfiable,
                };
            }
        }

        if let Some(proof) = self.proof.as_mut() {
            let solution: Vec<_> = trail
                .records()
                .iter()
                .map(|record| {
                    (
                        self.model
                            .pattern_vertex_for_proof(record.assignment.pattern_vertex),
                        self.model
                            .target_vertex_for_proof(record.assignment.target_vertex),
                    )
                })
                .collect();
            proof.post_solution(&solution);
        }

        if self.config.count_solutions {
            *solution_count += 1;
            log::trace!(target: targets::SEARCH, "Solution {solution_count} found");

            if self.config.bigraph {
                self.post_solution_nogood(trail);
            }

            if let Some(callback) = self.enumerate.as_mut() {
                callback(&trail.as_mapping());
            }

            SearchResult::SatisfiableButKeepGoing
        } else {
            SearchResult::Satisfiable
        }
    }

    /// Posts a nogood over the decisions currently on the trail.
    fn post_nogood(&mut self, trail: &Trail) {
        if !self.config.might_have_watches() {
            return;
        }

        let nogood = Nogood {
            literals: trail.decisions().collect(),
        };
        self.watches.post(nogood);

        if let Some(proof) = self.proof.as_mut() {
            proof.post_restart_nogood(&trail.decision_pairs());
        }
    }

    /// Posts a nogood over the non-link decisions on the trail.
    ///
    /// Link vertices are left out, which may slightly under-count in bigraph
    /// mode; deliberate, see the model's link handling.
    fn post_solution_nogood(&mut self, trail: &Trail) {
        let cutoff = (self.model.pattern_size() - self.model.pattern_link_count()) as Vertex;

        let nogood = Nogood {
            literals: trail
                .decisions()
                .filter(|a| a.pattern_vertex < cutoff)
                .collect(),
        };
        self.watches.post(nogood);
    }
}

/// The non-fixed domain to branch on: fewest values, ties to the larger
/// pattern degree, then to the first found.
fn find_branch_domain<'d>(model: &Model, domains: &'d Domains) -> Option<&'d Domain> {
    let mut result: Option<&Domain> = None;
    for d in domains {
        if d.fixed {
            continue;
        }

        let better = match result {
            None => true,
            Some(best) => {
                d.count < best.count
                    || (d.count == best.count
                        && model.pattern_degree(0, d.v) > model.pattern_degree(0, best.v))
            }
        };

        if better {
            result = Some(d);
        }
    }
    result
}
