// Immutable weighted city graph - nodes keyed by label, adjacency by index
use crate::error::LoadError;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::BTreeMap;

pub type NodeIndex = usize;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub label: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub weight: f64,
}

/// Outgoing half-edge in the adjacency list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub node: NodeIndex,
    pub weight: f64,
}

impl Node {
    #[inline]
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            attributes: BTreeMap::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }
}

impl Edge {
    #[inline]
    #[must_use]
    pub fn new(source: impl Into<String>, target: impl Into<String>, weight: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            weight,
        }
    }
}

/// Weighted graph built once from a description and never mutated afterwards.
///
/// Nodes are stored sorted by label, so a node's index order is its label
/// order. The path finder relies on this for deterministic tie-breaking.
/// Adjacency lists are sorted by `(neighbor, weight)` for the same reason.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    index: AHashMap<String, NodeIndex>,
    adjacency: Vec<SmallVec<[Neighbor; 4]>>,
    edges: Vec<Edge>,
    directed: bool,
}

impl Graph {
    /// An empty undirected graph, used as the degraded-mode fallback.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a graph from already-parsed nodes and edges.
    ///
    /// Fails if a label is empty or declared twice, if an edge references a
    /// node that is not declared, or if a weight is negative or not finite.
    /// The sum of all weights must also be finite, which bounds every route.
    /// Edge indices in errors refer to the position in `edges`.
    pub fn build(mut nodes: Vec<Node>, edges: Vec<Edge>, directed: bool) -> Result<Self, LoadError> {
        nodes.sort_by(|a, b| a.label.cmp(&b.label));

        let mut index = AHashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            if index.insert(node.label.clone(), i).is_some() {
                return Err(LoadError::DuplicateNode(node.label.clone()));
            }
        }

        let mut adjacency: Vec<SmallVec<[Neighbor; 4]>> = vec![SmallVec::new(); nodes.len()];
        let mut total_weight = 0.0_f64;
        for (i, edge) in edges.iter().enumerate() {
            if !edge.weight.is_finite() || edge.weight < 0.0 {
                return Err(LoadError::InvalidWeight {
                    edge: i,
                    weight: edge.weight.to_string(),
                });
            }
            total_weight += edge.weight;
            let from = *index.get(&edge.source).ok_or_else(|| LoadError::UnknownNode {
                edge: i,
                label: edge.source.clone(),
            })?;
            let to = *index.get(&edge.target).ok_or_else(|| LoadError::UnknownNode {
                edge: i,
                label: edge.target.clone(),
            })?;

            adjacency[from].push(Neighbor { node: to, weight: edge.weight });
            if !directed && from != to {
                adjacency[to].push(Neighbor { node: from, weight: edge.weight });
            }
        }

        if !total_weight.is_finite() {
            return Err(LoadError::WeightOverflow);
        }

        for list in &mut adjacency {
            list.sort_by(|a, b| a.node.cmp(&b.node).then(a.weight.total_cmp(&b.weight)));
        }

        Ok(Self {
            nodes,
            index,
            adjacency,
            edges,
            directed,
        })
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges as declared in the description (not half-edges).
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    #[inline]
    pub fn contains(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    #[inline]
    pub fn index_of(&self, label: &str) -> Option<NodeIndex> {
        self.index.get(label).copied()
    }

    #[inline]
    pub fn label(&self, node: NodeIndex) -> &str {
        &self.nodes[node].label
    }

    pub fn node(&self, label: &str) -> Option<&Node> {
        self.index_of(label).map(|i| &self.nodes[i])
    }

    /// All node labels in sorted order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.label.as_str())
    }

    #[inline]
    pub fn neighbors(&self, node: NodeIndex) -> &[Neighbor] {
        &self.adjacency[node]
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Lightest weight of a traversable edge from `from` to `to`, if any.
    pub fn edge_weight(&self, from: &str, to: &str) -> Option<f64> {
        let from = self.index_of(from)?;
        let to = self.index_of(to)?;
        self.adjacency[from]
            .iter()
            .filter(|n| n.node == to)
            .map(|n| n.weight)
            .reduce(f64::min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle(directed: bool) -> Graph {
        Graph::build(
            vec![Node::new("C"), Node::new("A"), Node::new("B")],
            vec![
                Edge::new("A", "B", 2.0),
                Edge::new("B", "C", 3.0),
                Edge::new("A", "C", 10.0),
            ],
            directed,
        )
        .unwrap()
    }

    #[test]
    fn test_labels_are_sorted() {
        let graph = triangle(false);
        assert_eq!(graph.labels().collect::<Vec<_>>(), vec!["A", "B", "C"]);
        assert_eq!(graph.index_of("A"), Some(0));
        assert_eq!(graph.label(2), "C");
    }

    #[test]
    fn test_undirected_edges_traverse_both_ways() {
        let graph = triangle(false);
        assert_eq!(graph.edge_weight("B", "A"), Some(2.0));
        assert_eq!(graph.edge_weight("C", "B"), Some(3.0));
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn test_directed_edges_traverse_one_way() {
        let graph = triangle(true);
        assert_eq!(graph.edge_weight("A", "B"), Some(2.0));
        assert_eq!(graph.edge_weight("B", "A"), None);
    }

    #[test]
    fn test_parallel_edges_are_kept() {
        let graph = Graph::build(
            vec![Node::new("A"), Node::new("B")],
            vec![Edge::new("A", "B", 4.0), Edge::new("A", "B", 1.5)],
            false,
        )
        .unwrap();
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.neighbors(0).len(), 2);
        assert_eq!(graph.edge_weight("A", "B"), Some(1.5));
    }

    #[test]
    fn test_unknown_endpoint_rejected() {
        let err = Graph::build(
            vec![Node::new("A")],
            vec![Edge::new("A", "Z", 1.0)],
            false,
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::UnknownNode { edge: 0, ref label } if label == "Z"));
    }

    #[test]
    fn test_negative_weight_rejected() {
        let err = Graph::build(
            vec![Node::new("A"), Node::new("B")],
            vec![Edge::new("A", "B", -1.0)],
            false,
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::InvalidWeight { edge: 0, .. }));
    }

    #[test]
    fn test_overflowing_total_weight_rejected() {
        let err = Graph::build(
            vec![Node::new("A"), Node::new("B"), Node::new("C")],
            vec![Edge::new("A", "B", 1e308), Edge::new("B", "C", 1e308)],
            false,
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::WeightOverflow));
    }

    #[test]
    fn test_large_finite_weights_still_route() {
        let graph = Graph::build(
            vec![Node::new("A"), Node::new("B"), Node::new("C")],
            vec![Edge::new("A", "B", 8e307), Edge::new("B", "C", 8e307)],
            false,
        )
        .unwrap();
        let route = graph.shortest_path("A", "C").unwrap();
        assert_eq!(route.path, vec!["A", "B", "C"]);
        assert!(route.total_weight.is_finite());
    }

    #[test]
    fn test_duplicate_node_rejected() {
        let err = Graph::build(vec![Node::new("A"), Node::new("A")], vec![], false).unwrap_err();
        assert!(matches!(err, LoadError::DuplicateNode(ref l) if l == "A"));
    }

    #[test]
    fn test_node_attributes() {
        let graph = Graph::build(
            vec![Node::new("Pune").with_attribute("state", serde_json::json!("Maharashtra"))],
            vec![],
            false,
        )
        .unwrap();
        let node = graph.node("Pune").unwrap();
        assert_eq!(node.attributes["state"], "Maharashtra");
        assert!(graph.node("Goa").is_none());
    }
}
