use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;
use tripgraph_api::{AccountService, AppState, InsightService, QueryService, RestApi, ServerConfig};
use tripgraph_core::LoadOptions;
use tripgraph_storage::{
    CredentialStore, GraphStore, InMemoryCredentialStore, InMemorySessionStore, StaticInsights,
};

/// Shortest-route travel planner backend
#[derive(Parser, Debug)]
#[command(name = "tripgraph")]
#[command(about = "Answers shortest-route queries over a city graph", long_about = None)]
struct Args {
    /// Path to the graph description (JSON)
    #[arg(long, env = "GRAPH_PATH", default_value = "data/graph_data.json")]
    graph: PathBuf,

    /// Bind address
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// HTTP API port
    #[arg(long, env = "PORT", default_value_t = 8000)]
    port: u16,

    /// Treat edges as one-way
    #[arg(long, env = "GRAPH_DIRECTED")]
    directed: bool,

    /// Exit if the graph fails to load instead of serving an empty graph
    #[arg(long, env = "GRAPH_STRICT")]
    strict: bool,

    /// Persist registered users to this JSON file
    #[arg(long, env = "USERS_FILE")]
    users_file: Option<PathBuf>,

    /// Replace the built-in city insight table
    #[arg(long, env = "INSIGHTS_PATH")]
    insights: Option<PathBuf>,

    /// CORS origins allowed to send credentials (default: any)
    #[arg(long = "allowed-origin", env = "ALLOWED_ORIGINS", value_delimiter = ',')]
    allowed_origins: Vec<String>,

    /// Minutes a login session stays valid
    #[arg(long, env = "SESSION_TTL_MINUTES", default_value_t = 24 * 60)]
    session_ttl_minutes: u64,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting tripgraph v{}", env!("CARGO_PKG_VERSION"));
    info!("Graph description: {:?}", args.graph);

    let options = LoadOptions { directed: args.directed };
    let store = if args.strict {
        GraphStore::open_strict(&args.graph, options)?
    } else {
        GraphStore::open(&args.graph, options)
    };
    if store.status().is_degraded() {
        warn!("Running in degraded mode with an empty graph");
    }

    let credentials: Arc<dyn CredentialStore> = match &args.users_file {
        Some(path) => Arc::new(InMemoryCredentialStore::open(path)?),
        None => Arc::new(InMemoryCredentialStore::new()),
    };

    let insights = match &args.insights {
        Some(path) => StaticInsights::from_path(path)?,
        None => StaticInsights::builtin()?,
    };
    info!("Insight catalog: {} cities", insights.len());

    let sessions = InMemorySessionStore::with_ttl(Duration::from_secs(args.session_ttl_minutes * 60));

    let state = AppState {
        query: QueryService::new(store.graph()),
        insights: InsightService::new(Arc::new(insights)),
        accounts: AccountService::new(credentials, Arc::new(sessions)),
        load_status: store.status().clone(),
    };
    let config = ServerConfig {
        host: args.host.clone(),
        port: args.port,
        allowed_origins: args.allowed_origins.clone(),
    };

    let http_handle = std::thread::spawn(move || -> std::io::Result<()> {
        let sys = actix_web::rt::System::new();
        sys.block_on(RestApi::start(state, config))
    });

    info!("HTTP API: http://{}:{}/", args.host, args.port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        joined = tokio::task::spawn_blocking(move || http_handle.join()) => {
            match joined {
                Ok(Ok(Ok(()))) => info!("HTTP server stopped"),
                Ok(Ok(Err(e))) => {
                    error!("HTTP server error: {}", e);
                    return Err(e.into());
                }
                _ => anyhow::bail!("HTTP server thread panicked"),
            }
        }
    }

    info!("Shutting down...");
    Ok(())
}
