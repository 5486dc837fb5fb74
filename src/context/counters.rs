/// Counts for various things which count, kept per solve.
#[derive(Clone, Copy, Debug, Default)]
pub struct Counters {
    /// Search tree nodes visited.
    pub nodes: u64,

    /// Calls into the propagation kernel.
    pub propagations: u64,

    /// Restarts taken.
    pub restarts: u64,
}
