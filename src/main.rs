use parking_portal::{
    AppState, HttpSessionProvider, RouteTable, SearchStore,
    config::{AppConfig, Env},
    create_router,
    session::SessionState,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// Loads configuration, sets up logging, builds the application state (route table,
/// session provider, search store) and serves the gateway.
#[tokio::main]
async fn main() {
    // 1. Configuration & Environment Loading (Fail-Fast)
    dotenv::dotenv().ok();
    let config = AppConfig::load();

    // 2. Logging Filter Setup
    // RUST_LOG wins; otherwise debug for this crate so guard decisions are visible locally.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "parking_portal=debug,tower_http=info".into());

    // 3. Initialize Logging based on Environment
    match config.env {
        Env::Local => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Application starting in {:?} mode", config.env);
    tracing::info!(
        session_api_url = %config.session_api_url,
        timeout_ms = config.session_check_timeout.as_millis() as u64,
        "session check configured"
    );

    // 4. Route Table (built once, immutable)
    let routes = Arc::new(RouteTable::standard());
    tracing::info!("Route table loaded with {} routes", routes.len());

    // 5. Session Provider (parking backend check-auth endpoint)
    let sessions = Arc::new(HttpSessionProvider::new(
        &config.session_api_url,
        config.session_check_timeout,
    )) as SessionState;

    // 6. Unified State Assembly
    let bind_addr = config.bind_addr.clone();
    let app_state = AppState {
        routes,
        sessions,
        search: SearchStore::new(),
        config,
    };

    // 7. Router and Server Startup
    let app = create_router(app_state);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("FATAL: Failed to bind {bind_addr}: {e}"));

    tracing::info!("Listening on {}", bind_addr);
    tracing::info!("API Documentation (Swagger UI) available at: http://{bind_addr}/swagger-ui");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server terminated");
    }
}
