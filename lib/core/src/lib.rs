//! # tripgraph Core
//!
//! Core library for the tripgraph travel-planning backend.
//!
//! This crate provides the graph model and the route search:
//!
//! - [`Graph`] - Immutable weighted city graph, built once
//! - [`GraphDescription`] - The JSON node/edge document a graph is loaded from
//! - [`shortest_path`] - Dijkstra search returning a [`PathResult`]
//!
//! ## Example
//!
//! ```rust
//! use tripgraph_core::{Graph, LoadOptions};
//!
//! let graph = Graph::from_json_str(
//!     r#"{
//!         "nodes": ["A", "B", "C"],
//!         "edges": [
//!             {"source": "A", "target": "B", "weight": 2},
//!             {"source": "B", "target": "C", "weight": 3},
//!             {"source": "A", "target": "C", "weight": 10}
//!         ]
//!     }"#,
//!     LoadOptions::default(),
//! )
//! .unwrap();
//!
//! let route = graph.shortest_path("A", "C").unwrap();
//! assert_eq!(route.path, vec!["A", "B", "C"]);
//! assert_eq!(route.total_weight, 5.0);
//! ```

pub mod description;
pub mod error;
pub mod graph;
pub mod path;

pub use description::{EdgeEntry, GraphDescription, LoadOptions, NodeEntry};
pub use error::{EndpointRole, Error, LoadError, Result, UnknownEndpoint};
pub use graph::{Edge, Graph, Neighbor, Node, NodeIndex};
pub use path::{shortest_path, PathResult};
