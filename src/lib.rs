//! A library for deciding whether a pattern graph maps into a target graph.
//!
//! homsearch is a constraint-programming search engine for graph
//! homomorphism and subgraph isomorphism problems: given a pattern and a
//! target, it finds one mapping, enumerates every mapping through a
//! callback, or reports that none exists.
//! The notion of mapping is configurable: injective, locally injective, or
//! unrestricted; induced or not; directed or undirected; optionally
//! edge-labelled.
//!
//! # Orientation
//!
//! The library is designed around a [searcher](crate::context) borrowing a
//! compiled [model](crate::model).
//!
//! A [Model](crate::model::Model) is built once from two
//! [Graph](crate::structures::Graph) descriptions and precomputes everything
//! a search reads: bitset adjacency rows, degrees, edge labels, and any
//! ordering constraints between pattern vertices.
//! A [Searcher](crate::context::Searcher) is then configured by a
//! [Config](crate::config::Config) and driven by
//! [solve](crate::context::GenericSearcher::solve), which runs a recursive
//! constraint-propagation search under a [restart
//! schedule](crate::schedule), learning [nogoods](crate::db) across restarts
//! through a watched-literal store.
//!
//! Useful starting points:
//!
//! - The [search procedure](crate::procedures::search) for the shape of a
//!   solve.
//! - The [propagation kernel](crate::procedures::propagate) for the
//!   filtering done at every node.
//! - The [configuration](crate::config) for the supported notions of
//!   mapping.
//! - The collaborator interfaces --- [proof](crate::proof) logging and the
//!   [lackey](crate::lackey) oracle --- for hooking in external tooling.
//!
//! # Example
//!
//! Count the embeddings of a triangle in itself:
//!
//! ```rust
//! use homsearch::config::Config;
//! use homsearch::context::Searcher;
//! use homsearch::model::Model;
//! use homsearch::reports::Report;
//! use homsearch::schedule::NoRestarts;
//! use homsearch::structures::Graph;
//!
//! let mut triangle = Graph::undirected(3);
//! for (u, v) in [(0, 1), (1, 2), (0, 2)] {
//!     triangle.add_edge(u, v).unwrap();
//! }
//!
//! let model = Model::build(&triangle, &triangle).unwrap();
//!
//! let config = Config {
//!     count_solutions: true,
//!     ..Config::default()
//! };
//! let mut searcher = Searcher::new(&model, config);
//!
//! let outcome = searcher.solve(&mut NoRestarts);
//! assert_eq!(outcome.report, Report::Satisfiable);
//! assert_eq!(outcome.solution_count, 6);
//! ```
//!
//! # What the engine is not
//!
//! The search is single threaded and strictly sequential, solves are
//! independent of each other, and no optimality reasoning is done beyond
//! what a [proof](crate::proof) collaborator records.

pub mod config;
pub mod context;
pub mod db;
pub mod lackey;
pub mod misc;
pub mod model;
pub mod procedures;
pub mod proof;
pub mod reports;
pub mod schedule;
pub mod structures;
pub mod types;
