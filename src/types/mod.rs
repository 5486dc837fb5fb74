//! Assorted types used throughout the library.

pub mod err;

/// A vertex, as a dense non-negative index into the model.
///
/// Pattern vertices and target vertices are drawn from separate index spaces.
/// Which space a vertex belongs to is determined by use, and a mix-up is not
/// caught by the type system.
pub type Vertex = u32;

/// A total or partial map from pattern vertices to target vertices.
pub type Mapping = std::collections::BTreeMap<Vertex, Vertex>;

/// A vertex paired with its display name, for proof logging.
///
/// Names default to the decimal form of the index unless the graph supplied
/// something better.
pub type NamedVertex = (Vertex, String);
