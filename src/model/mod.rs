/*!
The compiled form of an instance: everything the search queries, precomputed.

# Overview

A [Model] is built once from a pattern and a target [Graph] and then shared,
immutably, by every search over the pair.
It holds bitset adjacency rows for both graphs, per-vertex degrees, the
pattern adjacency bitmask consulted during propagation, edge-label matrices
when the graphs carry labels, and any ordering constraints between pattern
vertices.

Rows are kept per *graph pair*: index 0 is the given pair, and higher indices
are reserved for supplemental pairs a preprocessor may add.
Building supplemental pairs is not done here, and
[max_graphs](Model::max_graphs) is 1 throughout; propagation nevertheless
loops over the pairs it is told about.

For a directed pair, row 0 of either graph is the undirected closure (used
for degrees, tie-breaking, and common-neighbour tests), and the target
additionally carries forward (out-neighbour) and reverse (in-neighbour) rows
which propagation intersects against.
*/

use crate::structures::{Domain, Domains, Graph, VertexSet};
use crate::types::{err::ModelError, Mapping, NamedVertex, Vertex};

/// A checker for constraints beyond the graph pair, consulted on full
/// mappings in bigraph mode.
pub type BigraphChecker = Box<dyn Fn(&Mapping) -> bool>;

/// A pattern/target pair compiled for searching.
pub struct Model {
    pattern_size: usize,
    target_size: usize,
    max_graphs: usize,
    directed: bool,
    labelled: bool,

    /// Undirected-closure rows, `[graph_pair][vertex]`.
    pattern_rows: Vec<Vec<VertexSet>>,
    target_rows: Vec<Vec<VertexSet>>,

    /// Out-neighbour rows of the target, populated when directed.
    forward_target_rows: Vec<VertexSet>,

    /// In-neighbour rows of the target, populated when directed.
    reverse_target_rows: Vec<VertexSet>,

    /// Closure-row popcounts, `[graph_pair][vertex]`.
    pattern_degrees: Vec<Vec<u32>>,
    target_degrees: Vec<Vec<u32>>,
    largest_target_degree: u32,

    /// For pattern vertices `(u, v)`, a mask over graph pairs with bit `g`
    /// set when `u` and `v` are adjacent in pair `g` (for pair 0 of a
    /// directed pattern: when the pattern has the edge `u → v`).
    adjacency_bits: Vec<u32>,

    /// Edge-label matrices, row-major, populated when labelled.
    pattern_labels: Vec<u32>,
    target_labels: Vec<u32>,

    /// Ordering constraints: the target of `a` must be strictly less than
    /// the target of `b`.
    less_thans: Vec<(Vertex, Vertex)>,

    /// Trailing pattern vertices treated as bigraph link vertices.
    pattern_link_count: usize,

    pattern_names: Vec<String>,
    target_names: Vec<String>,

    bigraph_checker: Option<BigraphChecker>,
}

impl Model {
    /// Compiles `pattern` and `target` into a model.
    ///
    /// The two graphs must agree on directedness and on the use of edge
    /// labels.
    pub fn build(pattern: &Graph, target: &Graph) -> Result<Model, ModelError> {
        if pattern.is_directed() != target.is_directed() {
            return Err(ModelError::MixedDirectedness);
        }
        if pattern.is_labelled() != target.is_labelled() {
            return Err(ModelError::MixedLabelling);
        }

        let pattern_size = pattern.size();
        let target_size = target.size();
        let directed = pattern.is_directed();
        let labelled = pattern.is_labelled();

        let pattern_row = closure_rows(pattern);
        let target_row = closure_rows(target);

        let (forward_target_rows, reverse_target_rows) = if directed {
            directional_rows(target)
        } else {
            (Vec::new(), Vec::new())
        };

        let mut adjacency_bits = vec![0u32; pattern_size * pattern_size];
        for edge in pattern.edges() {
            adjacency_bits[edge.from as usize * pattern_size + edge.to as usize] |= 1 << 0;
            if !directed {
                adjacency_bits[edge.to as usize * pattern_size + edge.from as usize] |= 1 << 0;
            }
        }

        let (pattern_labels, target_labels) = if labelled {
            (label_matrix(pattern), label_matrix(target))
        } else {
            (Vec::new(), Vec::new())
        };

        let pattern_degrees = vec![pattern_row.iter().map(VertexSet::count).collect::<Vec<_>>()];
        let target_degrees = vec![target_row.iter().map(VertexSet::count).collect::<Vec<_>>()];
        let largest_target_degree = target_degrees[0].iter().copied().max().unwrap_or(0);

        log::trace!(target: crate::misc::log::targets::MODEL,
            "Compiled model: pattern {pattern_size}, target {target_size}, directed {directed}, labelled {labelled}");

        Ok(Model {
            pattern_size,
            target_size,
            max_graphs: 1,
            directed,
            labelled,
            pattern_rows: vec![pattern_row],
            target_rows: vec![target_row],
            forward_target_rows,
            reverse_target_rows,
            pattern_degrees,
            target_degrees,
            largest_target_degree,
            adjacency_bits,
            pattern_labels,
            target_labels,
            less_thans: Vec::new(),
            pattern_link_count: 0,
            pattern_names: (0..pattern_size).map(|v| pattern.name(v as Vertex)).collect(),
            target_names: (0..target_size).map(|v| target.name(v as Vertex)).collect(),
            bigraph_checker: None,
        })
    }

    /// Requires the target of `a` to be strictly less than the target of `b`.
    pub fn add_less_than(&mut self, a: Vertex, b: Vertex) -> Result<(), ModelError> {
        for v in [a, b] {
            if v as usize >= self.pattern_size {
                return Err(ModelError::LessThanOutOfRange { vertex: v });
            }
        }
        self.less_thans.push((a, b));
        Ok(())
    }

    /// Marks the trailing `count` pattern vertices as bigraph link vertices.
    ///
    /// Link vertices are left out of solution nogoods.
    pub fn set_pattern_link_count(&mut self, count: usize) -> Result<(), ModelError> {
        if count > self.pattern_size {
            return Err(ModelError::TooManyLinkVertices);
        }
        self.pattern_link_count = count;
        Ok(())
    }

    /// Installs a checker for constraints beyond the graph pair, consulted on
    /// full mappings in bigraph mode.
    pub fn set_bigraph_checker(&mut self, checker: BigraphChecker) {
        self.bigraph_checker = Some(checker);
    }

    pub fn pattern_size(&self) -> usize {
        self.pattern_size
    }

    pub fn target_size(&self) -> usize {
        self.target_size
    }

    /// The number of graph pairs rows are kept for.
    pub fn max_graphs(&self) -> usize {
        self.max_graphs
    }

    pub fn directed(&self) -> bool {
        self.directed
    }

    pub fn has_edge_labels(&self) -> bool {
        self.labelled
    }

    pub fn has_less_thans(&self) -> bool {
        !self.less_thans.is_empty()
    }

    /// Ordering constraints, in the order propagation should take them.
    pub fn pattern_less_thans_in_convenient_order(&self) -> &[(Vertex, Vertex)] {
        &self.less_thans
    }

    pub fn pattern_link_count(&self) -> usize {
        self.pattern_link_count
    }

    pub fn pattern_degree(&self, g: usize, v: Vertex) -> u32 {
        self.pattern_degrees[g][v as usize]
    }

    pub fn target_degree(&self, g: usize, v: Vertex) -> u32 {
        self.target_degrees[g][v as usize]
    }

    pub fn largest_target_degree(&self) -> u32 {
        self.largest_target_degree
    }

    /// The closure row of pattern vertex `v` in graph pair `g`.
    pub fn pattern_graph_row(&self, g: usize, v: Vertex) -> &VertexSet {
        &self.pattern_rows[g][v as usize]
    }

    /// The closure row of target vertex `v` in graph pair `g`.
    pub fn target_graph_row(&self, g: usize, v: Vertex) -> &VertexSet {
        &self.target_rows[g][v as usize]
    }

    /// The out-neighbours of target vertex `v`. Directed models only.
    pub fn forward_target_graph_row(&self, v: Vertex) -> &VertexSet {
        &self.forward_target_rows[v as usize]
    }

    /// The in-neighbours of target vertex `v`. Directed models only.
    pub fn reverse_target_graph_row(&self, v: Vertex) -> &VertexSet {
        &self.reverse_target_rows[v as usize]
    }

    /// The graph-pair mask for the ordered pattern pair `(u, v)`.
    pub fn pattern_adjacency_bits(&self, u: Vertex, v: Vertex) -> u32 {
        self.adjacency_bits[u as usize * self.pattern_size + v as usize]
    }

    /// The label on the pattern edge `u → v`. Labelled models only.
    pub fn pattern_edge_label(&self, u: Vertex, v: Vertex) -> u32 {
        self.pattern_labels[u as usize * self.pattern_size + v as usize]
    }

    /// The label on the target edge `u → v`. Labelled models only.
    pub fn target_edge_label(&self, u: Vertex, v: Vertex) -> u32 {
        self.target_labels[u as usize * self.target_size + v as usize]
    }

    /// Checks constraints beyond the graph pair on a full mapping.
    ///
    /// Accepts unless a checker was installed and rejects.
    pub fn check_extra_bigraph_constraints(&self, mapping: &Mapping) -> bool {
        match &self.bigraph_checker {
            Some(checker) => checker(mapping),
            None => true,
        }
    }

    pub fn pattern_vertex_for_proof(&self, v: Vertex) -> NamedVertex {
        (v, self.pattern_names[v as usize].clone())
    }

    pub fn target_vertex_for_proof(&self, v: Vertex) -> NamedVertex {
        (v, self.target_names[v as usize].clone())
    }

    /// One full-width domain per pattern vertex: the state before any
    /// propagation.
    pub fn initial_domains(&self) -> Domains {
        (0..self.pattern_size)
            .map(|v| Domain::new(v as Vertex, VertexSet::full(self.target_size)))
            .collect()
    }
}

/// Rows of the undirected closure of `graph`: `u` is in row `v` exactly if
/// the graph has an edge between them, in either direction.
fn closure_rows(graph: &Graph) -> Vec<VertexSet> {
    let mut rows = vec![VertexSet::empty(graph.size()); graph.size()];
    for edge in graph.edges() {
        rows[edge.from as usize].set(edge.to);
        rows[edge.to as usize].set(edge.from);
    }
    rows
}

/// Out-neighbour and in-neighbour rows of a directed `graph`.
fn directional_rows(graph: &Graph) -> (Vec<VertexSet>, Vec<VertexSet>) {
    let mut forward = vec![VertexSet::empty(graph.size()); graph.size()];
    let mut reverse = vec![VertexSet::empty(graph.size()); graph.size()];
    for edge in graph.edges() {
        forward[edge.from as usize].set(edge.to);
        reverse[edge.to as usize].set(edge.from);
    }
    (forward, reverse)
}

/// The row-major label matrix of a labelled `graph`.
///
/// Entries without an edge are zero; they are only read for pairs the
/// adjacency rows have already confirmed.
fn label_matrix(graph: &Graph) -> Vec<u32> {
    let mut labels = vec![0u32; graph.size() * graph.size()];
    for edge in graph.edges() {
        labels[edge.from as usize * graph.size() + edge.to as usize] = edge.label;
    }
    labels
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Graph {
        let mut k3 = Graph::undirected(3);
        k3.add_edge(0, 1).unwrap();
        k3.add_edge(1, 2).unwrap();
        k3.add_edge(0, 2).unwrap();
        k3
    }

    #[test]
    fn undirected_rows_and_degrees() {
        let model = Model::build(&triangle(), &triangle()).unwrap();

        assert_eq!(model.pattern_degree(0, 0), 2);
        assert_eq!(model.largest_target_degree(), 2);
        assert!(model.target_graph_row(0, 1).test(0));
        assert!(model.target_graph_row(0, 1).test(2));
        assert!(!model.target_graph_row(0, 1).test(1));

        assert_eq!(model.pattern_adjacency_bits(0, 1) & 1, 1);
        assert_eq!(model.pattern_adjacency_bits(1, 0) & 1, 1);
    }

    #[test]
    fn directed_rows_are_oriented() {
        let mut path = Graph::directed(2);
        path.add_edge(0, 1).unwrap();
        let model = Model::build(&path, &path).unwrap();

        assert_eq!(model.pattern_adjacency_bits(0, 1) & 1, 1);
        assert_eq!(model.pattern_adjacency_bits(1, 0) & 1, 0);

        assert!(model.forward_target_graph_row(0).test(1));
        assert!(!model.forward_target_graph_row(1).test(0));
        assert!(model.reverse_target_graph_row(1).test(0));

        // the closure row sees the edge from both ends
        assert!(model.target_graph_row(0, 1).test(0));
    }

    #[test]
    fn mismatched_graphs_are_rejected() {
        let undirected = triangle();
        let directed = Graph::directed(3);
        assert!(matches!(
            Model::build(&undirected, &directed),
            Err(ModelError::MixedDirectedness)
        ));
    }

    #[test]
    fn initial_domains_are_full() {
        let model = Model::build(&triangle(), &triangle()).unwrap();
        let domains = model.initial_domains();
        assert_eq!(domains.len(), 3);
        assert!(domains.iter().all(|d| d.count == 3 && !d.fixed));
    }
}
