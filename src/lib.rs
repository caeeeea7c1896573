use axum::{
    Router,
    extract::FromRef,
    http::HeaderName,
    routing::get,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

pub mod auth;
pub mod config;
pub mod guard;
pub mod handlers;
pub mod models;
pub mod navigator;
pub mod session;
pub mod store;

// Route table, declared in access-segregated sections (user, admin, auth).
pub mod routes;

// --- Public Re-exports ---

pub use config::AppConfig;
pub use guard::AccessGuard;
pub use navigator::{NavigationOutcome, Navigator, Resolution, resolve};
pub use routes::{RouteTable, RouteTableState};
pub use session::{HttpSessionProvider, MockSessionProvider, SessionProvider, SessionState};
pub use store::SearchStore;

/// ApiDoc
///
/// OpenAPI description of the gateway's JSON endpoints, served at `/api-docs/openapi.json`.
/// The guarded fallback is not listed: its paths are the route table itself.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::list_routes, handlers::navigate_report, handlers::get_search,
        handlers::set_search
    ),
    components(
        schemas(
            models::RouteDescriptor, models::AccessRequirement, models::RouteView,
            models::NavigationReport, models::SearchQuery, models::CheckAuthResponse,
            models::SessionUser, models::Role,
        )
    ),
    tags(
        (name = "parking-portal", description = "Parking portal navigation gateway")
    )
)]
struct ApiDoc;

/// AppState
///
/// Single container for everything the handlers need. Constructed by the application
/// root; nothing in the crate is a module-level singleton.
#[derive(Clone)]
pub struct AppState {
    /// Immutable route table.
    pub routes: RouteTableState,
    /// Session-check collaborator consulted by the guard.
    pub sessions: SessionState,
    /// Search text shared by all holders of this state.
    pub search: SearchStore,
    pub config: AppConfig,
}

impl AppState {
    /// Guard bound to this state's session provider and configured timeout.
    pub fn guard(&self) -> AccessGuard {
        AccessGuard::new(self.sessions.clone(), self.config.session_check_timeout)
    }
}

// --- Axum FromRef Extractor Implementations ---

impl FromRef<AppState> for RouteTableState {
    fn from_ref(app_state: &AppState) -> RouteTableState {
        app_state.routes.clone()
    }
}

impl FromRef<AppState> for SessionState {
    fn from_ref(app_state: &AppState) -> SessionState {
        app_state.sessions.clone()
    }
}

impl FromRef<AppState> for SearchStore {
    fn from_ref(app_state: &AppState) -> SearchStore {
        app_state.search.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// create_router
///
/// API endpoints under `/api`, health check, Swagger UI, and the guarded fallback that
/// serves every route of the table.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let x_request_id = HeaderName::from_static("x-request-id");

    let base_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(|| async { "ok" }))
        .route("/api/routes", get(handlers::list_routes))
        .route("/api/navigate", get(handlers::navigate_report))
        .route(
            "/api/search",
            get(handlers::get_search).put(handlers::set_search),
        )
        // Everything else is a portal route and goes through the access guard.
        .fallback(handlers::navigate)
        .with_state(state);

    base_router
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(
                    x_request_id.clone(),
                    MakeRequestUuid,
                ))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// trace_span_logger
///
/// Request span carrying method, URI and the `x-request-id` set above, so every log line
/// of one navigation (including its session check) can be correlated.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
