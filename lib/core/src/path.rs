use crate::error::{EndpointRole, Error, Result, UnknownEndpoint};
use crate::graph::{Graph, NodeIndex};
use ordered_float::OrderedFloat;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Ordered route from source to target (inclusive) and its summed weight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathResult {
    pub path: Vec<String>,
    pub total_weight: f64,
}

impl PathResult {
    /// Number of edges traversed.
    #[inline]
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Frontier entry for Dijkstra's search
#[derive(Clone, Copy, PartialEq, Eq)]
struct Candidate {
    cost: OrderedFloat<f64>,
    node: NodeIndex,
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap on cost; equal costs pop the lower index (label order) first
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Single-source, single-target shortest path over non-negative weights.
///
/// Both labels are checked before any search runs; every unknown one is
/// reported in [`Error::InvalidEndpoint`]. `source == target` yields the
/// one-node path with weight zero. An unreachable target yields
/// [`Error::NoPath`].
///
/// The result is deterministic for a given graph: ties in accumulated weight
/// are settled in label order and a node's predecessor only changes on a
/// strictly shorter distance.
pub fn shortest_path(graph: &Graph, source: &str, target: &str) -> Result<PathResult> {
    let start = graph.index_of(source);
    let goal = graph.index_of(target);

    let (start, goal) = match (start, goal) {
        (Some(s), Some(g)) => (s, g),
        _ => {
            let mut unknown = Vec::with_capacity(2);
            if start.is_none() {
                unknown.push(UnknownEndpoint {
                    role: EndpointRole::Source,
                    label: source.to_string(),
                });
            }
            if goal.is_none() {
                unknown.push(UnknownEndpoint {
                    role: EndpointRole::Destination,
                    label: target.to_string(),
                });
            }
            return Err(Error::InvalidEndpoint(unknown));
        }
    };

    if start == goal {
        return Ok(PathResult {
            path: vec![graph.label(start).to_string()],
            total_weight: 0.0,
        });
    }

    let n = graph.node_count();
    let mut dist = vec![f64::INFINITY; n];
    let mut prev: Vec<Option<NodeIndex>> = vec![None; n];
    let mut settled = vec![false; n];
    let mut frontier = BinaryHeap::new();

    dist[start] = 0.0;
    frontier.push(Candidate { cost: OrderedFloat(0.0), node: start });

    while let Some(Candidate { cost, node }) = frontier.pop() {
        if settled[node] {
            continue;
        }
        settled[node] = true;
        if node == goal {
            break;
        }

        for neighbor in graph.neighbors(node) {
            if settled[neighbor.node] {
                continue;
            }
            let next = cost.0 + neighbor.weight;
            if next < dist[neighbor.node] {
                dist[neighbor.node] = next;
                prev[neighbor.node] = Some(node);
                frontier.push(Candidate { cost: OrderedFloat(next), node: neighbor.node });
            }
        }
    }

    if !settled[goal] {
        return Err(Error::NoPath {
            from: source.to_string(),
            to: target.to_string(),
        });
    }

    let mut path = vec![graph.label(goal).to_string()];
    let mut current = goal;
    while let Some(p) = prev[current] {
        path.push(graph.label(p).to_string());
        current = p;
    }
    path.reverse();

    Ok(PathResult {
        path,
        total_weight: dist[goal],
    })
}

impl Graph {
    /// See [`shortest_path`].
    #[inline]
    pub fn shortest_path(&self, source: &str, target: &str) -> Result<PathResult> {
        shortest_path(self, source, target)
    }
}
