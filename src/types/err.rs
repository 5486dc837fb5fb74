/*!
Error types used in the library.

These concern the description of an instance, prior to any search.
Failures *during* a search are in-band values (an empty domain, a
[SearchResult](crate::context::SearchResult) variant) rather than errors, as
the search procedures use them to control the flow of a solve.
*/

use crate::types::Vertex;

/// Errors from describing a graph.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GraphError {
    /// An edge endpoint at or beyond the size of the graph.
    VertexOutOfRange { vertex: Vertex, size: usize },

    /// A labelled edge was given to a graph built without labels.
    UnlabelledGraph,

    /// An unlabelled edge was given to a graph built with labels.
    MissingLabel,
}

/// Errors from compiling a pair of graphs to a model.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ModelError {
    /// A pattern and target which disagree on directedness.
    MixedDirectedness,

    /// A pattern and target which disagree on the use of edge labels.
    MixedLabelling,

    /// An ordering constraint over a vertex the pattern does not have.
    LessThanOutOfRange { vertex: Vertex },

    /// More link vertices than pattern vertices.
    TooManyLinkVertices,
}
