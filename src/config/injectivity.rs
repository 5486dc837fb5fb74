/// How far the mapping is required to keep pattern vertices apart.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Injectivity {
    /// No two pattern vertices may share a target vertex.
    Injective,

    /// Pattern vertices with a common neighbour may not share a target
    /// vertex; others may.
    LocallyInjective,

    /// Any number of pattern vertices may share a target vertex.
    NonInjective,
}
