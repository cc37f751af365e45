//! K-portal HTTP API.
//!
//! Read-only REST backend serving member profiles with tags and paginated
//! news to the K-portal frontend.

pub mod config;
pub mod error;
pub mod handlers;
pub mod services;
pub mod validation;

use std::any::Any;
use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use uuid::Uuid;

use kportal_core::{MemberRepository, NewsRepository, StoreHealth};
use kportal_db::Database;

pub use config::{LogConfig, ServerConfig};
pub use error::{ApiError, ErrorBody, INTERNAL_ERROR_DETAIL};
pub use services::{MemberService, NewsService};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub members: MemberService,
    pub news: NewsService,
    pub store: Arc<dyn StoreHealth>,
}

impl AppState {
    pub fn new(
        members: Arc<dyn MemberRepository>,
        news: Arc<dyn NewsRepository>,
        store: Arc<dyn StoreHealth>,
    ) -> Self {
        Self {
            members: MemberService::new(members),
            news: NewsService::new(news),
            store,
        }
    }

    /// Wire every service to the PostgreSQL repositories.
    pub fn from_database(db: Database) -> Self {
        let members = Arc::new(db.members.clone());
        let news = Arc::new(db.news.clone());
        Self::new(members, news, Arc::new(db))
    }
}

/// UUIDv7 request ids (time-ordered, sortable in logs).
#[derive(Clone, Copy, Default)]
pub struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "K-portal API",
        version = "2026.10.0",
        description = "Member profiles and news for the K-portal frontend"
    ),
    paths(
        handlers::health::health,
        handlers::health::health_db,
        handlers::members::list_members,
        handlers::news::list_news,
        handlers::news::get_news,
    ),
    components(schemas(
        kportal_core::MemberProfile,
        kportal_core::TagSummary,
        kportal_core::NewsSummary,
        kportal_core::NewsDetail,
        kportal_core::NewsPage,
        ErrorBody,
    )),
    tags(
        (name = "Members", description = "Member profiles and tags"),
        (name = "News", description = "News listing and detail"),
        (name = "System", description = "Health checks")
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Parse a comma-separated origin list.
///
/// Invalid entries are skipped with a warning; an empty result falls back
/// to the local frontend origin.
pub fn parse_allowed_origins(origins_str: &str) -> Vec<HeaderValue> {
    let origins: Vec<HeaderValue> = origins_str
        .split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::warn!("Invalid CORS origin '{}': {}", trimmed, e);
                    None
                }
            }
        })
        .collect();

    if origins.is_empty() {
        return vec![HeaderValue::from_static(config::DEFAULT_ALLOWED_ORIGINS)];
    }
    origins
}

/// CORS policy for the frontend: listed origins, credentials allowed.
pub fn cors_layer(allowed_origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

/// Render a handler panic as the generic 500 body.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let cause = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!(subsystem = "api", panic = %cause, "Handler panicked");
    ApiError::Internal(INTERNAL_ERROR_DETAIL.to_string()).into_response()
}

/// Build the application router with all middleware applied.
pub fn create_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/db", get(handlers::health::health_db))
        .route("/members", get(handlers::members::list_members))
        .route("/news", get(handlers::news::list_news))
        .route("/news/:id", get(handlers::news::get_news))
        .route("/openapi.json", get(openapi_json))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(cors)
        .with_state(state)
}
