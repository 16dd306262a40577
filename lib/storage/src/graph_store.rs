use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};
use tripgraph_core::{Graph, GraphDescription, LoadError, LoadOptions};

/// Outcome of loading the graph at startup.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadStatus {
    Loaded { nodes: usize, edges: usize },
    /// The description could not be loaded; the store serves an empty graph.
    Fallback { reason: String },
}

impl LoadStatus {
    #[inline]
    pub fn is_degraded(&self) -> bool {
        matches!(self, LoadStatus::Fallback { .. })
    }
}

/// Owns the process-lifetime graph.
///
/// The graph is shared as `Arc<Graph>` and never mutated, so request handlers
/// read it concurrently without locking. A reload would build a new graph and
/// swap the `Arc`.
pub struct GraphStore {
    graph: Arc<Graph>,
    status: LoadStatus,
    source: Option<PathBuf>,
}

impl GraphStore {
    /// Wrap an already-built graph.
    pub fn from_graph(graph: Graph) -> Self {
        let status = LoadStatus::Loaded {
            nodes: graph.node_count(),
            edges: graph.edge_count(),
        };
        Self {
            graph: Arc::new(graph),
            status,
            source: None,
        }
    }

    /// Load the description at `path`, failing on any [`LoadError`].
    pub fn open_strict<P: AsRef<Path>>(path: P, options: LoadOptions) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let graph = load_file(path, options)?;
        info!(
            "Graph loaded from {:?}: {} nodes, {} edges ({})",
            path,
            graph.node_count(),
            graph.edge_count(),
            if graph.is_directed() { "directed" } else { "undirected" }
        );

        let mut store = Self::from_graph(graph);
        store.source = Some(path.to_path_buf());
        Ok(store)
    }

    /// Load the description at `path`, falling back to an empty graph.
    ///
    /// The fallback is logged at error level and recorded in [`status`],
    /// so degraded mode stays visible to operators and to the API.
    ///
    /// [`status`]: GraphStore::status
    pub fn open<P: AsRef<Path>>(path: P, options: LoadOptions) -> Self {
        let path = path.as_ref();
        match Self::open_strict(path, options) {
            Ok(store) => store,
            Err(e) => {
                error!("Failed to load graph from {:?}: {}", path, e);
                warn!("Serving an empty graph; every route query will fail until restart");
                Self {
                    graph: Arc::new(Graph::empty()),
                    status: LoadStatus::Fallback { reason: e.to_string() },
                    source: Some(path.to_path_buf()),
                }
            }
        }
    }

    #[inline]
    pub fn graph(&self) -> Arc<Graph> {
        self.graph.clone()
    }

    #[inline]
    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    #[inline]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

fn load_file(path: &Path, options: LoadOptions) -> Result<Graph, LoadError> {
    let reader = BufReader::new(File::open(path)?);
    GraphDescription::from_reader(reader)?.into_graph(options)
}
