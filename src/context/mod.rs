/*!
The searcher --- the state shared by every frame of a search.

Strictly, a [GenericSearcher] and a [Searcher].

The generic searcher is generic over its source of randomness; the
[Searcher] alias fixes [Xoroshiro128Plus](rand_xoshiro::Xoroshiro128Plus),
which is all the library itself ever uses.
A searcher borrows its [Model] for its whole lifetime: the model is
immutable, and may be shared by any number of searchers in turn.

A fresh searcher is deterministic for a fixed seed; reseed via
[set_seed](GenericSearcher::set_seed) before
[restarting_search](GenericSearcher::restarting_search) for isolation
between solves.

# Example

```rust
# use homsearch::config::Config;
# use homsearch::context::Searcher;
# use homsearch::model::Model;
# use homsearch::reports::Report;
# use homsearch::schedule::NoRestarts;
# use homsearch::structures::Graph;
let mut triangle = Graph::undirected(3);
for (u, v) in [(0, 1), (1, 2), (0, 2)] {
    triangle.add_edge(u, v).unwrap();
}

let model = Model::build(&triangle, &triangle).unwrap();
let mut searcher = Searcher::new(&model, Config::default());

let outcome = searcher.solve(&mut NoRestarts);
assert_eq!(outcome.report, Report::Satisfiable);
assert_eq!(outcome.mapping.unwrap().len(), 3);
```
*/

mod counters;
pub use counters::Counters;

use crate::{
    config::Config,
    db::Watches,
    lackey::Lackey,
    model::Model,
    proof::Proof,
    types::Mapping,
};

use rand::SeedableRng;
use rand_xoshiro::Xoroshiro128Plus;
use std::time::Instant;

/// The result of one search frame.
///
/// `Restart` and `Aborted` propagate unchanged to the top; `Satisfiable`
/// short-circuits; the rest continue the sibling loop of the caller.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SearchResult {
    /// A mapping was found, and is held on the trail.
    Satisfiable,

    /// A mapping was found and recorded; the enumeration continues.
    SatisfiableButKeepGoing,

    /// No mapping exists below this frame.
    Unsatisfiable,

    /// No mapping exists below this frame, by the lackey's word; the caller
    /// should switch its remaining candidates to lackey propagation.
    UnsatisfiableAndBackjumpUsingLackey,

    /// The restart schedule asked for a restart.
    Restart,

    /// The time limit was hit.
    Aborted,
}

/// A callback receiving every mapping found under count mode.
pub type EnumerateCallback = Box<dyn FnMut(&Mapping)>;

/// A searcher, generic over its source of randomness.
pub struct GenericSearcher<'m, R: rand::Rng + SeedableRng> {
    /// The configuration of the searcher.
    pub config: Config,

    /// The compiled instance being searched.
    pub(crate) model: &'m Model,

    /// The nogood store; unallocated unless restarts or solution nogoods are
    /// possible.
    pub(crate) watches: Watches,

    /// The source of rng for value ordering.
    pub(crate) rng: R,

    /// The optional proof logger.
    pub(crate) proof: Option<Box<dyn Proof>>,

    /// The optional external consistency oracle.
    pub(crate) lackey: Option<Box<dyn Lackey>>,

    /// The optional per-solution callback for count mode.
    pub(crate) enumerate: Option<EnumerateCallback>,

    /// When the clock for the time limit started.
    pub(crate) started: Instant,
}

/// A searcher using [Xoroshiro128Plus] as its source of randomness.
pub type Searcher<'m> = GenericSearcher<'m, Xoroshiro128Plus>;

impl<'m, R: rand::Rng + SeedableRng> GenericSearcher<'m, R> {
    /// A searcher over `model`, configured by `config`, seeded with zero.
    pub fn new(model: &'m Model, config: Config) -> Self {
        let watches = match config.might_have_watches() {
            true => Watches::new(model.pattern_size(), model.target_size()),
            false => Watches::unallocated(),
        };

        GenericSearcher {
            config,
            model,
            watches,
            rng: R::seed_from_u64(0),
            proof: None,
            lackey: None,
            enumerate: None,
            started: Instant::now(),
        }
    }

    /// Reseeds the searcher's source of randomness.
    pub fn set_seed(&mut self, seed: u64) {
        self.rng = R::seed_from_u64(seed);
    }

    /// Installs a proof logger.
    pub fn set_proof(&mut self, proof: Box<dyn Proof>) {
        self.proof = Some(proof);
    }

    /// Installs an external consistency oracle.
    pub fn set_lackey(&mut self, lackey: Box<dyn Lackey>) {
        self.lackey = Some(lackey);
    }

    /// Installs a callback to receive every mapping found under count mode.
    pub fn set_enumerate_callback(&mut self, callback: EnumerateCallback) {
        self.enumerate = Some(callback);
    }

    /// The nogood store, for inspection.
    pub fn watches(&self) -> &Watches {
        &self.watches
    }

    /// Whether the time limit has been hit.
    ///
    /// Probed at the top of every search frame; a zero limit aborts on
    /// entry.
    pub fn should_abort(&self) -> bool {
        match self.config.time_limit {
            None => false,
            Some(limit) => self.started.elapsed() >= limit,
        }
    }

    /// Restarts the clock for the time limit.
    pub(crate) fn reset_clock(&mut self) {
        self.started = Instant::now();
    }
}
