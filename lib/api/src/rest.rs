use crate::accounts::{AccountService, LoginRequest, RegisterRequest};
use crate::error::ApiError;
use crate::insight::{InsightRequest, InsightService};
use crate::query::{PathRequest, QueryService};
use actix_cors::Cors;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::http::StatusCode;
use actix_web::{error, web, App, HttpRequest, HttpResponse, HttpServer, ResponseError, Result as ActixResult};
use serde::Serialize;
use tracing::{info, warn};
use tripgraph_storage::LoadStatus;

pub const SESSION_COOKIE: &str = "session";

/// Everything a request handler may touch. Shared read-only across workers.
#[derive(Clone)]
pub struct AppState {
    pub query: QueryService,
    pub insights: InsightService,
    pub accounts: AccountService,
    pub load_status: LoadStatus,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Empty means any origin.
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            allowed_origins: Vec::new(),
        }
    }
}

#[derive(Serialize)]
struct GraphSummary {
    nodes: usize,
    edges: usize,
    directed: bool,
    degraded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "status": "error",
            "message": self.to_string(),
        }))
    }
}

pub struct RestApi;

impl RestApi {
    pub async fn start(state: AppState, config: ServerConfig) -> std::io::Result<()> {
        let state = web::Data::new(state);
        let origins = config.allowed_origins.clone();
        info!("Binding HTTP server to {}:{}", config.host, config.port);

        HttpServer::new(move || {
            App::new()
                .wrap(cors(&origins))
                .app_data(state.clone())
                .configure(configure)
        })
        .bind((config.host.as_str(), config.port))?
        .run()
        .await
    }
}

fn cors(origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allow_any_method()
        .allow_any_header()
        .supports_credentials()
        .max_age(3600);

    if origins.is_empty() {
        cors.allow_any_origin()
    } else {
        origins.iter().fold(cors, |cors, origin| cors.allowed_origin(origin))
    }
}

/// Register routes and extractor config. Expects `web::Data<AppState>`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/", web::get().to(home))
        .route("/register", web::post().to(register))
        .route("/api/login", web::post().to(login))
        .route("/api/status", web::get().to(session_status))
        .route("/api/logout", web::post().to(logout))
        .route("/api/graph", web::get().to(graph_summary))
        .route("/api/cities", web::get().to(list_cities))
        .route("/api/cities/{label}", web::get().to(get_city))
        .route("/api/path", web::post().to(shortest_path))
        .route("/api/ai_insight", web::post().to(ai_insight));
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req| {
        warn!("Rejected body for {}: {}", req.path(), err);
        let response = ApiError::BadRequest("Invalid JSON body".to_string()).error_response();
        error::InternalError::from_response(err, response).into()
    })
}

async fn home() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("Shortest Path Travel Planner Backend is Running")
}

async fn graph_summary(state: web::Data<AppState>) -> HttpResponse {
    let graph = state.query.graph();
    let reason = match &state.load_status {
        LoadStatus::Fallback { reason } => Some(reason.clone()),
        LoadStatus::Loaded { .. } => None,
    };
    HttpResponse::Ok().json(GraphSummary {
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        directed: graph.is_directed(),
        degraded: state.load_status.is_degraded(),
        reason,
    })
}

async fn list_cities(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "cities": state.query.cities()
    }))
}

async fn get_city(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let detail = state.query.city(&path.into_inner())?;
    Ok(HttpResponse::Ok().json(detail))
}

async fn shortest_path(
    state: web::Data<AppState>,
    req: web::Json<PathRequest>,
) -> ActixResult<HttpResponse> {
    let response = state.query.shortest_path(&req)?;
    Ok(HttpResponse::Ok().json(response))
}

async fn ai_insight(
    state: web::Data<AppState>,
    req: web::Json<InsightRequest>,
) -> ActixResult<HttpResponse> {
    let response = state.insights.route_insight(&req)?;
    Ok(HttpResponse::Ok().json(response))
}

async fn register(
    state: web::Data<AppState>,
    req: web::Json<RegisterRequest>,
) -> ActixResult<HttpResponse> {
    state.accounts.register(&req)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "success",
        "message": "Registration successful"
    })))
}

async fn login(
    state: web::Data<AppState>,
    req: web::Json<LoginRequest>,
) -> ActixResult<HttpResponse> {
    let (token, _user) = state.accounts.login(&req)?;
    let cookie = Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish();

    Ok(HttpResponse::Ok().cookie(cookie).json(serde_json::json!({
        "status": "success",
        "message": "Login successful"
    })))
}

async fn session_status(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    let token = req.cookie(SESSION_COOKIE);
    HttpResponse::Ok().json(state.accounts.status(token.as_ref().map(|c| c.value())))
}

async fn logout(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    let token = req.cookie(SESSION_COOKIE);
    state.accounts.logout(token.as_ref().map(|c| c.value()));

    let mut removal = Cookie::build(SESSION_COOKIE, "").path("/").finish();
    removal.make_removal();
    HttpResponse::Ok().cookie(removal).json(serde_json::json!({
        "status": "success",
        "message": "Logged out"
    }))
}
