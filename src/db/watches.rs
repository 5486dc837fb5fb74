/*!
The two-watched-literal store for nogoods.

# Overview

Each nogood watches two of its literals, kept as `literals[0]` and
`literals[1]`.
The store keeps a flat table, one cell per (pattern vertex, target vertex)
pair, listing the nogoods watching that literal.
While both watched literals are off the trail the nogood sleeps.
When a watched literal is assigned, the store visits the affected nogoods:
each either moves its watch to some other literal not on the trail, or, if
none exists, fires as unit, and the one remaining literal is deleted from its
domain by the caller.

# Posting

Posting does not install: nogoods are learned mid-unwind, deep in a subtree
that is about to be abandoned, where choosing watches would be meaningless.
Posted nogoods queue until [install_pending](Watches::install_pending) is
called at the root of the next restart iteration, where every literal is
unassigned:

  - an empty nogood means the whole search space has been excluded, and the
    search is over;
  - a one-literal nogood cannot be watched, and is applied directly to the
    root domains;
  - anything longer watches its first two literals.

# Sizing

When neither restarts nor solution nogoods are relevant the store is left
[unallocated](Watches::unallocated): posting and propagation are no-ops, and
a search behaves identically apart from the learning.
*/

use crate::db::Nogood;
use crate::misc::log::targets;
use crate::structures::{Assignment, Domains};

/// The watched-literal nogood store.
pub struct Watches {
    /// Whether the table has been allocated; a dead store ignores all calls.
    live: bool,

    target_size: usize,

    /// Every nogood learned so far.
    nogoods: Vec<Nogood>,

    /// For each (pattern, target) literal, the nogoods watching it.
    /// Row-major, `pattern_vertex * target_size + target_vertex`.
    table: Vec<Vec<usize>>,

    /// Posted nogoods awaiting installation at the next restart.
    pending: Vec<Nogood>,
}

impl Watches {
    /// An allocated store over a `pattern_size` by `target_size` literal
    /// space.
    pub fn new(pattern_size: usize, target_size: usize) -> Self {
        Watches {
            live: true,
            target_size,
            nogoods: Vec::new(),
            table: vec![Vec::new(); pattern_size * target_size],
            pending: Vec::new(),
        }
    }

    /// A store which ignores all calls.
    pub fn unallocated() -> Self {
        Watches {
            live: false,
            target_size: 0,
            nogoods: Vec::new(),
            table: Vec::new(),
            pending: Vec::new(),
        }
    }

    pub fn is_live(&self) -> bool {
        self.live
    }

    /// The number of nogoods installed so far.
    pub fn nogood_count(&self) -> usize {
        self.nogoods.len()
    }

    /// Queues `nogood` for installation at the next restart.
    pub fn post(&mut self, nogood: Nogood) {
        if !self.live {
            return;
        }
        log::trace!(target: targets::NOGOODS, "Posted a nogood of {} literals", nogood.literals.len());
        self.pending.push(nogood);
    }

    /// Installs every pending nogood against the root `domains`.
    ///
    /// Returns false when the pending nogoods prove there is nothing left to
    /// search: an empty nogood was posted, or a unit deletion emptied a
    /// domain.
    pub fn install_pending(&mut self, domains: &mut Domains) -> bool {
        let pending = std::mem::take(&mut self.pending);
        for nogood in pending {
            match nogood.literals.len() {
                0 => {
                    log::trace!(target: targets::NOGOODS, "Empty nogood: search space exhausted");
                    return false;
                }

                1 => {
                    let literal = nogood.literals[0];
                    if let Some(d) = domains
                        .iter_mut()
                        .find(|d| d.v == literal.pattern_vertex)
                    {
                        if d.values.test(literal.target_vertex) {
                            d.values.unset(literal.target_vertex);
                            d.count -= 1;
                            if d.count == 0 {
                                return false;
                            }
                        }
                    }
                }

                _ => {
                    let id = self.nogoods.len();
                    self.watch(nogood.literals[0], id);
                    self.watch(nogood.literals[1], id);
                    self.nogoods.push(nogood);
                }
            }
        }
        true
    }

    /// Visits the nogoods watching `current`, re-watching where possible and
    /// firing `on_unit` for each nogood left unit.
    ///
    /// `is_unassigned` reports whether a literal is off the trail; `on_unit`
    /// receives the one literal of a unit nogood which must not be assigned,
    /// for deletion from its domain.
    pub fn propagate(
        &mut self,
        current: Assignment,
        is_unassigned: impl Fn(&Assignment) -> bool,
        mut on_unit: impl FnMut(&Assignment),
    ) {
        if !self.live {
            return;
        }

        let cell = self.cell(current);
        let mut position = 0;
        while position < self.table[cell].len() {
            let id = self.table[cell][position];

            // make the watch being propagated the first literal
            let nogood = &mut self.nogoods[id];
            if nogood.literals[0] != current {
                nogood.literals.swap(0, 1);
            }

            let replacement = nogood.literals[2..]
                .iter()
                .position(|literal| is_unassigned(literal))
                .map(|offset| offset + 2);

            match replacement {
                Some(offset) => {
                    nogood.literals.swap(0, offset);
                    let moved_to = nogood.literals[0];
                    let new_cell = self.cell(moved_to);
                    self.table[new_cell].push(id);
                    self.table[cell].swap_remove(position);
                }

                None => {
                    // nothing left to watch; the other watch must not be
                    // assigned
                    let unit = self.nogoods[id].literals[1];
                    on_unit(&unit);
                    position += 1;
                }
            }
        }
    }

    fn watch(&mut self, literal: Assignment, id: usize) {
        let cell = self.cell(literal);
        self.table[cell].push(id);
    }

    fn cell(&self, literal: Assignment) -> usize {
        literal.pattern_vertex as usize * self.target_size + literal.target_vertex as usize
    }
}
