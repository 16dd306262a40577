//! # tripgraph
//!
//! A travel-planning backend that answers shortest-route queries over a
//! city graph loaded once at startup.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! tripgraph --graph data/graph_data.json --port 8000
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use tripgraph::prelude::*;
//!
//! let graph = Graph::build(
//!     vec![Node::new("A"), Node::new("B"), Node::new("C")],
//!     vec![Edge::new("A", "B", 2.0), Edge::new("B", "C", 3.0), Edge::new("A", "C", 10.0)],
//!     false,
//! )
//! .unwrap();
//!
//! let route = shortest_path(&graph, "A", "C").unwrap();
//! assert_eq!(route.path, vec!["A", "B", "C"]);
//! ```
//!
//! ## Crate Structure
//!
//! - `tripgraph-core` - Graph model, description loading, Dijkstra search
//! - `tripgraph-storage` - Graph store, credential and session stores, insight catalog
//! - `tripgraph-api` - Query, insight and account services plus the REST API

// Re-export core types
pub use tripgraph_core::{
    shortest_path, Edge, EndpointRole, Error, Graph, GraphDescription, LoadError, LoadOptions,
    Node, PathResult, Result,
};

// Re-export storage
pub use tripgraph_storage::{
    CityInsight, CredentialStore, GraphStore, InMemoryCredentialStore, InMemorySessionStore,
    InsightSource, LoadStatus, SessionStore, StaticInsights,
};

// Re-export API
pub use tripgraph_api::{AccountService, AppState, InsightService, QueryService, RestApi, ServerConfig};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        shortest_path, Edge, Error, Graph, GraphStore, LoadOptions, Node, PathResult,
        QueryService, Result,
    };
}
