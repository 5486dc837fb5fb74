/*!
Configuration of a searcher.

All configuration is fixed when a [searcher](crate::context) is built.
The searcher reads the configuration throughout a solve, and never writes it.

Note, the restart *schedule* is not part of the configuration: it is handed to
each solve, as schedules carry mutable state.
The [restarts](Config::restarts) switch only records whether restarts may
happen at all, which decides whether the nogood store is allocated.
*/

mod injectivity;
pub use injectivity::Injectivity;

mod value_ordering;
pub use value_ordering::ValueOrdering;

mod lackey;
pub use lackey::PropagateUsingLackey;

use std::time::Duration;

/// The primary configuration structure.
#[derive(Clone, Debug)]
pub struct Config {
    /// How far pattern vertices must be kept apart in the target.
    pub injectivity: Injectivity,

    /// Whether pattern non-edges must map to target non-edges.
    pub induced: bool,

    /// Whether bigraph mode is enabled: extra solution constraints are
    /// checked through the model, and accepted solutions are excluded with
    /// nogoods so isomorphic re-derivations are not revisited.
    pub bigraph: bool,

    /// Whether to count every mapping rather than stop at the first.
    pub count_solutions: bool,

    /// The order in which candidate targets are tried at a branch.
    pub value_ordering: ValueOrdering,

    /// When partial mappings are handed to the lackey for propagation.
    pub propagate_using_lackey: PropagateUsingLackey,

    /// Whether partial mappings are sent to the lackey for checking at every
    /// propagation fixpoint.
    pub send_partials_to_lackey: bool,

    /// Whether the solve may be asked to restart.
    ///
    /// Must be set when a restarting schedule is used: together with
    /// [bigraph](Config::bigraph) this decides whether the nogood store is
    /// allocated.
    pub restarts: bool,

    /// The time limit for a solve, if any.
    ///
    /// A zero limit aborts the solve on entry.
    pub time_limit: Option<Duration>,
}

impl Default for Config {
    /// An injective, non-induced, decision-mode search without restarts.
    fn default() -> Self {
        Config {
            injectivity: Injectivity::Injective,
            induced: false,
            bigraph: false,
            count_solutions: false,
            value_ordering: ValueOrdering::Degree,
            propagate_using_lackey: PropagateUsingLackey::Never,
            send_partials_to_lackey: false,
            restarts: false,
            time_limit: None,
        }
    }
}

impl Config {
    /// Whether the nogood store is needed: nogoods are posted on restarts and
    /// on bigraph solutions, and nowhere else.
    pub fn might_have_watches(&self) -> bool {
        self.restarts || self.bigraph
    }
}
