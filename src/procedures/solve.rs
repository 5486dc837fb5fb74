/*!
The top-level driver: search, restart, repeat.

# Overview

A solve takes the initial domains from the model and runs
[restarting_search](GenericSearcher::restarting_search) until it comes back
with something other than `Restart`.
Between runs the pending nogoods are installed against the root domains:
an empty nogood, or a unit deletion emptying a domain, proves there is
nothing left to search, and the solve ends without re-entering.

Roughly:

```none
        +----------------------+
  +---->| restarting_search    |------> Satisfiable / Aborted
  |     +----------------------+
  |               |
  |               | Restart
  |               ⌄
  |     +----------------------+
  +-----| install nogoods      |------> Unsatisfiable, if exhausted
        +----------------------+
```

Two boundary cases never reach the recursion: an empty pattern is trivially
satisfiable with the empty mapping (handled by the first search frame finding
nothing to branch on), and a pattern vertex whose initial domain is already
empty makes the instance unsatisfiable outright.
*/

use crate::{
    context::{Counters, GenericSearcher, SearchResult},
    misc::log::targets,
    reports::{Report, SolveOutcome},
    schedule::RestartSchedule,
    structures::Trail,
};

use rand::SeedableRng;

impl<R: rand::Rng + SeedableRng> GenericSearcher<'_, R> {
    /// Determines whether the pattern maps into the target, restarting as the
    /// schedule directs.
    ///
    /// Under count mode every mapping is counted (and handed to the
    /// enumerate callback, when set) before the verdict comes back.
    pub fn solve(&mut self, schedule: &mut dyn RestartSchedule) -> SolveOutcome {
        self.reset_clock();

        let mut counters = Counters::default();
        let mut solution_count: u128 = 0;
        let mut trail = Trail::new();

        let mut domains = self.model.initial_domains();

        if domains.iter().any(|d| d.count == 0) {
            return SolveOutcome {
                report: Report::Unsatisfiable,
                mapping: None,
                solution_count: 0,
                counters,
            };
        }

        loop {
            let result = self.restarting_search(
                &mut trail,
                &domains,
                &mut counters.nodes,
                &mut counters.propagations,
                &mut solution_count,
                0,
                schedule,
            );

            match result {
                SearchResult::Satisfiable => {
                    return SolveOutcome {
                        report: Report::Satisfiable,
                        mapping: Some(trail.as_mapping()),
                        solution_count: 1,
                        counters,
                    };
                }

                SearchResult::Aborted => {
                    return SolveOutcome {
                        report: Report::Aborted,
                        mapping: None,
                        solution_count,
                        counters,
                    };
                }

                SearchResult::Restart => {
                    debug_assert!(trail.is_empty());

                    counters.restarts += 1;
                    schedule.did_a_restart();

                    if !self.watches.install_pending(&mut domains) {
                        log::trace!(target: targets::SEARCH, "Exhausted by nogoods after {} restarts", counters.restarts);
                        return self.exhausted_outcome(solution_count, counters);
                    }
                }

                SearchResult::SatisfiableButKeepGoing
                | SearchResult::Unsatisfiable
                | SearchResult::UnsatisfiableAndBackjumpUsingLackey => {
                    return self.exhausted_outcome(solution_count, counters);
                }
            }
        }
    }

    /// The outcome once the search space is exhausted: satisfiable exactly if
    /// the enumeration found anything.
    fn exhausted_outcome(&self, solution_count: u128, counters: Counters) -> SolveOutcome {
        let report = match solution_count {
            0 => Report::Unsatisfiable,
            _ => Report::Satisfiable,
        };
        SolveOutcome {
            report,
            mapping: None,
            solution_count,
            counters,
        }
    }
}
