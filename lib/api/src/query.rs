use crate::error::{ApiError, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error};
use tripgraph_core::{Error as CoreError, Graph, Node};

pub const UNIT_HOURS: &str = "hours";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathRequest {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathResponse {
    pub status: &'static str,
    pub path: Vec<String>,
    pub total_time: f64,
    pub unit: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityDetail {
    pub id: String,
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

/// Stateless route queries over the shared immutable graph.
#[derive(Clone)]
pub struct QueryService {
    graph: Arc<Graph>,
}

impl QueryService {
    pub fn new(graph: Arc<Graph>) -> Self {
        Self { graph }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// All city labels, sorted.
    pub fn cities(&self) -> Vec<String> {
        self.graph.labels().map(str::to_string).collect()
    }

    pub fn city(&self, label: &str) -> Result<CityDetail> {
        let node: &Node = self
            .graph
            .node(label)
            .ok_or_else(|| ApiError::NotFound(format!("Unknown city '{}'", label)))?;
        Ok(CityDetail {
            id: node.label.clone(),
            attributes: node
                .attributes
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        })
    }

    /// Validate the request, run the path finder and map its outcome.
    pub fn shortest_path(&self, request: &PathRequest) -> Result<PathResponse> {
        let (source, destination) = match (non_empty(&request.source), non_empty(&request.destination)) {
            (Some(s), Some(d)) => (s, d),
            _ => return Err(ApiError::BadRequest("Missing source or destination".to_string())),
        };

        let result = self.graph.shortest_path(source, destination).map_err(|e| match e {
            CoreError::InvalidEndpoint(_) | CoreError::NoPath { .. } => {
                debug!("Route {} -> {} not found: {}", source, destination, e);
                ApiError::NotFound(e.to_string())
            }
            CoreError::Load(_) => {
                error!("Unexpected load error during query {} -> {}: {}", source, destination, e);
                ApiError::Internal
            }
        })?;

        debug!(
            "Route {} -> {}: {} hops, {} {}",
            source,
            destination,
            result.hops(),
            result.total_weight,
            UNIT_HOURS
        );
        Ok(PathResponse {
            status: "success",
            path: result.path,
            total_time: result.total_weight,
            unit: UNIT_HOURS,
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}
