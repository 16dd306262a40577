//! Storage layer for tripgraph: the process-lifetime graph, accounts,
//! sessions and the city-insight catalog.

pub mod error;
pub mod graph_store;
pub mod insight;
pub mod session;
pub mod users;

pub use error::{Result, StorageError};
pub use graph_store::{GraphStore, LoadStatus};
pub use insight::{CityInsight, InsightSource, StaticInsights};
pub use session::{InMemorySessionStore, SessionStore, DEFAULT_SESSION_TTL};
pub use users::{CredentialStore, InMemoryCredentialStore, User};
