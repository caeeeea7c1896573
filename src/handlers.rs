use crate::{
    AppState,
    auth::ForwardedCookie,
    models::{Decision, NavigationReport, RouteDescriptor, RouteView, SearchQuery},
    navigator::{Resolution, resolve},
    routes::RouteTableState,
    store::SearchStore,
};
use axum::{
    Json,
    extract::{Query, State},
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

// --- Query Structs ---

/// NavigateParams
///
/// Query parameters for `GET /api/navigate`.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct NavigateParams {
    /// Target route path, e.g. `/admin/users`.
    pub path: String,
}

// --- Handlers ---

/// list_routes
///
/// [Public Route] The full route table in declaration order.
#[utoipa::path(
    get,
    path = "/api/routes",
    responses((status = 200, description = "Route table", body = [RouteDescriptor]))
)]
pub async fn list_routes(State(routes): State<RouteTableState>) -> Json<Vec<RouteDescriptor>> {
    Json(routes.routes().to_vec())
}

/// navigate_report
///
/// [Public Route] Resolves a navigation the way the browser would experience it, following
/// every guard redirect, and reports where it lands. The caller's cookie is forwarded to
/// each session check.
#[utoipa::path(
    get,
    path = "/api/navigate",
    params(NavigateParams),
    responses(
        (status = 200, description = "Final destination", body = NavigationReport),
        (status = 404, description = "Unknown route"),
        (status = 508, description = "Redirect chain did not settle")
    )
)]
pub async fn navigate_report(
    State(state): State<AppState>,
    cookie: ForwardedCookie,
    Query(params): Query<NavigateParams>,
) -> Result<Json<NavigationReport>, StatusCode> {
    let guard = state.guard();

    match resolve(&state.routes, &guard, &params.path, cookie.as_deref()).await {
        Resolution::Arrived { route, redirects } => Ok(Json(NavigationReport {
            requested: params.path,
            destination: route.path,
            name: route.name,
            redirects,
        })),
        Resolution::NotFound { .. } => Err(StatusCode::NOT_FOUND),
        Resolution::RedirectLoop { .. } => Err(StatusCode::LOOP_DETECTED),
    }
}

/// get_search
///
/// [Public Route] Current search text.
#[utoipa::path(
    get,
    path = "/api/search",
    responses((status = 200, description = "Current search text", body = SearchQuery))
)]
pub async fn get_search(State(search): State<SearchStore>) -> Json<SearchQuery> {
    Json(SearchQuery {
        search_query: search.search_query().await,
    })
}

/// set_search
///
/// [Public Route] Replaces the search text wholesale and echoes the stored value.
#[utoipa::path(
    put,
    path = "/api/search",
    request_body = SearchQuery,
    responses((status = 200, description = "Stored search text", body = SearchQuery))
)]
pub async fn set_search(
    State(search): State<SearchStore>,
    Json(payload): Json<SearchQuery>,
) -> Json<SearchQuery> {
    search.set_search_query(payload.search_query).await;
    Json(SearchQuery {
        search_query: search.search_query().await,
    })
}

/// navigate
///
/// [Guarded Fallback] Every path not claimed by the API lands here. This is the guard
/// applied to a browser navigation: one hop only, since the browser follows the
/// `303 See Other` itself and comes back for the next evaluation.
pub async fn navigate(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    cookie: ForwardedCookie,
) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    let Some(route) = state.routes.by_path(uri.path()) else {
        tracing::debug!(path = %uri.path(), "no route for path");
        return StatusCode::NOT_FOUND.into_response();
    };

    match state.guard().evaluate(route, cookie.as_deref()).await {
        Decision::Allow => Json(RouteView::from(route)).into_response(),
        Decision::RedirectTo(location) => Redirect::to(&location).into_response(),
    }
}
