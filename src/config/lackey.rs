/// When partial mappings are handed to the lackey oracle for propagation.
///
/// Distinct from [Config::send_partials_to_lackey](crate::config::Config),
/// which sends partials for checking only, with no deletions fed back.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PropagateUsingLackey {
    /// Never propagate through the lackey.
    Never,

    /// Propagate through the lackey at every fixpoint.
    Always,

    /// Propagate through the lackey only below a frame whose subtree was
    /// rejected by the lackey's solution check.
    RootAndBackjump,
}
