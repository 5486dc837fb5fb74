/// The order in which the candidate targets of a branch are tried.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValueOrdering {
    /// Descending target degree.
    Degree,

    /// Ascending target degree.
    AntiDegree,

    /// A softmax-biased shuffle, favouring high target degree.
    ///
    /// Sampling is without replacement with weight 2^shift(degree), in
    /// integer arithmetic.
    Biased,

    /// A uniform shuffle.
    Random,
}
