//! HTTP surface for tripgraph.
//!
//! [`QueryService`] answers route queries against the shared graph,
//! [`InsightService`] annotates routes from the insight catalog, and
//! [`AccountService`] handles registration and session login. [`RestApi`]
//! exposes all three over actix-web.

pub mod accounts;
pub mod error;
pub mod insight;
pub mod query;
pub mod rest;

pub use accounts::{AccountService, LoginRequest, RegisterRequest, SessionStatus};
pub use error::ApiError;
pub use insight::{InsightRequest, InsightResponse, InsightService, RouteStop};
pub use query::{CityDetail, PathRequest, PathResponse, QueryService};
pub use rest::{configure, AppState, RestApi, ServerConfig};
