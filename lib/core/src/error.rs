use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure to construct a graph from its description.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed graph description: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Edge #{edge} is missing required field `{field}`")]
    MissingField { edge: usize, field: &'static str },

    #[error("Edge #{edge} references undeclared node '{label}'")]
    UnknownNode { edge: usize, label: String },

    #[error("Edge #{edge} has invalid weight {weight}: expected a non-negative number")]
    InvalidWeight { edge: usize, weight: String },

    #[error("Total edge weight is not finite; route sums would overflow")]
    WeightOverflow,

    #[error("Node #{node} has an empty label")]
    EmptyLabel { node: usize },

    #[error("Node '{0}' is declared more than once")]
    DuplicateNode(String),

    #[error("Attribute '{key}' of node '{node}' is not a scalar value")]
    InvalidAttribute { node: String, key: String },
}

/// Which side of a route query an endpoint belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointRole {
    Source,
    Destination,
}

impl fmt::Display for EndpointRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndpointRole::Source => f.write_str("source"),
            EndpointRole::Destination => f.write_str("destination"),
        }
    }
}

/// A query endpoint whose label is not in the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEndpoint {
    pub role: EndpointRole,
    pub label: String,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Graph load error: {0}")]
    Load(#[from] LoadError),

    #[error("Invalid source or destination: {}", describe_unknown(.0))]
    InvalidEndpoint(Vec<UnknownEndpoint>),

    #[error("No path from {from} to {to}")]
    NoPath { from: String, to: String },
}

fn describe_unknown(endpoints: &[UnknownEndpoint]) -> String {
    endpoints
        .iter()
        .map(|e| format!("unknown {} '{}'", e.role, e.label))
        .collect::<Vec<_>>()
        .join(", ")
}
