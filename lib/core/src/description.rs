//! Graph description documents.
//!
//! A description is a JSON object with two optional top-level lists:
//!
//! ```json
//! {
//!   "nodes": ["Pune", {"id": "Mumbai", "attributes": {"coastal": true}}],
//!   "edges": [{"source": "Pune", "target": "Mumbai", "weight": 3.5}]
//! }
//! ```
//!
//! Nodes are bare labels or `{id, attributes}` objects, mixed freely. Edge
//! `weight` defaults to `1` when absent or `null`. A description either
//! converts into a whole [`Graph`] or fails with a [`LoadError`]; there is no
//! partially loaded graph.

use crate::error::LoadError;
use crate::graph::{Edge, Graph, Node};
use serde::Deserialize;
use serde_json::Value;
use std::io::Read;

const DEFAULT_WEIGHT: f64 = 1.0;

/// Options controlling how a description becomes a graph.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    /// Treat each edge as one-way. Undirected by default.
    pub directed: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphDescription {
    #[serde(default)]
    pub nodes: Vec<NodeEntry>,
    #[serde(default)]
    pub edges: Vec<EdgeEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NodeEntry {
    Label(String),
    Object {
        id: String,
        #[serde(default)]
        attributes: serde_json::Map<String, Value>,
    },
}

/// Raw edge entry. Fields stay optional so a missing endpoint can be
/// reported with the edge's position instead of a generic parse error.
#[derive(Debug, Clone, Deserialize)]
pub struct EdgeEntry {
    pub source: Option<String>,
    pub target: Option<String>,
    pub weight: Option<Value>,
}

impl GraphDescription {
    pub fn from_json_str(s: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Validate the description and build the immutable graph.
    pub fn into_graph(self, options: LoadOptions) -> Result<Graph, LoadError> {
        let nodes = self
            .nodes
            .into_iter()
            .enumerate()
            .map(|(i, entry)| entry.into_node(i))
            .collect::<Result<Vec<_>, _>>()?;

        let edges = self
            .edges
            .into_iter()
            .enumerate()
            .map(|(i, entry)| entry.into_edge(i))
            .collect::<Result<Vec<_>, _>>()?;

        Graph::build(nodes, edges, options.directed)
    }
}

impl NodeEntry {
    fn into_node(self, position: usize) -> Result<Node, LoadError> {
        let (label, attributes) = match self {
            NodeEntry::Label(label) => (label, serde_json::Map::new()),
            NodeEntry::Object { id, attributes } => (id, attributes),
        };
        if label.is_empty() {
            return Err(LoadError::EmptyLabel { node: position });
        }

        let mut node = Node::new(label);
        for (key, value) in attributes {
            if value.is_array() || value.is_object() {
                return Err(LoadError::InvalidAttribute {
                    node: node.label,
                    key,
                });
            }
            node.attributes.insert(key, value);
        }
        Ok(node)
    }
}

impl EdgeEntry {
    fn into_edge(self, position: usize) -> Result<Edge, LoadError> {
        let source = required(self.source, position, "source")?;
        let target = required(self.target, position, "target")?;
        let weight = match self.weight {
            None => DEFAULT_WEIGHT,
            Some(value) => value.as_f64().ok_or_else(|| LoadError::InvalidWeight {
                edge: position,
                weight: value.to_string(),
            })?,
        };
        Ok(Edge::new(source, target, weight))
    }
}

fn required(field: Option<String>, edge: usize, name: &'static str) -> Result<String, LoadError> {
    match field {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(LoadError::MissingField { edge, field: name }),
    }
}

impl Graph {
    /// Parse and build a graph from a JSON description.
    pub fn from_json_str(s: &str, options: LoadOptions) -> Result<Graph, LoadError> {
        GraphDescription::from_json_str(s)?.into_graph(options)
    }
}
