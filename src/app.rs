use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::TokenService;
use crate::config::AppConfig;
use crate::database::Database;
use crate::handlers::{protected, public};
use crate::middleware::jwt_auth_middleware;
use crate::services::{ActivityLogService, CompanyService, PersonService, RelationshipService, UserService};

/// Shared per-process state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub tokens: TokenService,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(db: Database, config: AppConfig) -> Self {
        let tokens = TokenService::from_config(&config.security);
        Self {
            db,
            tokens,
            config: Arc::new(config),
        }
    }

    pub fn users(&self) -> UserService {
        UserService::new(self.db.clone(), self.tokens.clone())
    }

    pub fn companies(&self) -> CompanyService {
        CompanyService::new(self.db.clone())
    }

    pub fn people(&self) -> PersonService {
        PersonService::new(self.db.clone())
    }

    pub fn relationships(&self) -> RelationshipService {
        RelationshipService::new(self.db.clone())
    }

    pub fn activity_logs(&self) -> ActivityLogService {
        ActivityLogService::new(self.db.clone())
    }
}

pub fn app(state: AppState) -> Router {
    let api = &state.config.api;

    let mut router = Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        .merge(auth_public_routes())
        // Protected
        .merge(protected_routes(state.clone()))
        .layer(DefaultBodyLimit::max(api.max_request_size_bytes))
        .layer(cors_layer(&state.config));

    if api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}

fn auth_public_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/register", post(public::register))
        .route("/api/auth/login", post(public::login))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    use protected::{activity_logs, assignments, auth, companies, people};

    Router::new()
        .route("/api/auth/me", get(auth::me))
        .route("/api/companies", get(companies::list).post(companies::create))
        .route(
            "/api/companies/:id",
            get(companies::show).put(companies::update).delete(companies::delete),
        )
        .route(
            "/api/companies/:id/people",
            get(assignments::list).post(assignments::assign),
        )
        .route("/api/companies/:id/people/:person_id", delete(assignments::unassign))
        .route("/api/people", get(people::list).post(people::create))
        .route(
            "/api/people/:id",
            get(people::show).put(people::update).delete(people::delete),
        )
        .route("/api/activity-logs", get(activity_logs::list))
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

/// Connect, optionally migrate, and serve until Ctrl-C; the pool is closed
/// after the last connection drains.
pub async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let db = Database::connect(&config.database).await?;
    if config.database.run_migrations {
        db.migrate().await?;
    }

    let bind_addr = config.bind_addr();
    tracing::info!("Starting CRM API in {:?} mode", config.environment);

    let state = AppState::new(db.clone(), config);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Listening on http://{}", bind_addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
