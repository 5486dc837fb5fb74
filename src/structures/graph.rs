/*!
A plain description of a graph, as consumed by the [model](crate::model).

A graph is a number of vertices together with a list of edges, directed or
undirected, and optionally with a label on each edge.
Edge-labelled graphs are always directed; an undirected labelled edge is two
directed labelled edges.

Vertices may be given names, which surface in proof logging.
Unnamed vertices are named by their index.
*/

use crate::types::{err::GraphError, Vertex};

/// An edge of a [Graph], with label `0` when the graph is unlabelled.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Edge {
    pub from: Vertex,
    pub to: Vertex,
    pub label: u32,
}

/// A description of a pattern or target graph.
#[derive(Clone, Debug)]
pub struct Graph {
    size: usize,
    directed: bool,
    labelled: bool,
    edges: Vec<Edge>,
    names: Vec<Option<String>>,
}

impl Graph {
    /// An undirected, unlabelled graph on `size` vertices, without edges.
    pub fn undirected(size: usize) -> Self {
        Graph {
            size,
            directed: false,
            labelled: false,
            edges: Vec::new(),
            names: vec![None; size],
        }
    }

    /// A directed, unlabelled graph on `size` vertices, without edges.
    pub fn directed(size: usize) -> Self {
        Graph {
            directed: true,
            ..Self::undirected(size)
        }
    }

    /// A directed, edge-labelled graph on `size` vertices, without edges.
    pub fn labelled(size: usize) -> Self {
        Graph {
            directed: true,
            labelled: true,
            ..Self::undirected(size)
        }
    }

    /// Adds the edge `from → to`, or `{from, to}` if the graph is undirected.
    pub fn add_edge(&mut self, from: Vertex, to: Vertex) -> Result<(), GraphError> {
        if self.labelled {
            return Err(GraphError::MissingLabel);
        }
        self.push_edge(from, to, 0)
    }

    /// Adds the edge `from → to` carrying `label`.
    pub fn add_edge_labelled(
        &mut self,
        from: Vertex,
        to: Vertex,
        label: u32,
    ) -> Result<(), GraphError> {
        if !self.labelled {
            return Err(GraphError::UnlabelledGraph);
        }
        self.push_edge(from, to, label)
    }

    /// Names `v` for proof logging.
    pub fn set_name(&mut self, v: Vertex, name: impl Into<String>) -> Result<(), GraphError> {
        self.check_vertex(v)?;
        self.names[v as usize] = Some(name.into());
        Ok(())
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn is_labelled(&self) -> bool {
        self.labelled
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// The name of `v`, or its index in decimal if unnamed.
    pub fn name(&self, v: Vertex) -> String {
        match self.names.get(v as usize) {
            Some(Some(name)) => name.clone(),
            _ => v.to_string(),
        }
    }

    fn push_edge(&mut self, from: Vertex, to: Vertex, label: u32) -> Result<(), GraphError> {
        self.check_vertex(from)?;
        self.check_vertex(to)?;
        self.edges.push(Edge { from, to, label });
        Ok(())
    }

    fn check_vertex(&self, v: Vertex) -> Result<(), GraphError> {
        if (v as usize) < self.size {
            Ok(())
        } else {
            Err(GraphError::VertexOutOfRange {
                vertex: v,
                size: self.size,
            })
        }
    }
}
