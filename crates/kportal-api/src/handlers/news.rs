//! News HTTP handlers.

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};

use kportal_core::{NewsDetail, NewsPage};

use crate::validation::{NewsId, NewsListParams, ValidationErrors, ID_NOT_POSITIVE_INT};
use crate::{ApiError, AppState};

/// List news, newest first.
///
/// # Query Parameters
/// - `category`: Category code 1-4 (optional)
/// - `limit`: Page size 0-1000, default 15
/// - `offset`: Items to skip, default 0
///
/// # Returns
/// - 200 OK with the page and the total number of matching items
/// - 400 Bad Request listing every invalid parameter
/// - 500 Internal Server Error if the query fails
#[utoipa::path(
    get,
    path = "/news",
    tag = "News",
    params(
        ("category" = Option<i32>, Query, description = "Category code (1-4)"),
        ("limit" = Option<i32>, Query, description = "Page size (0-1000, default 15)"),
        ("offset" = Option<i32>, Query, description = "Items to skip (default 0)")
    ),
    responses(
        (status = 200, description = "Page of news", body = NewsPage),
        (status = 400, description = "Invalid query parameters", body = crate::error::ErrorBody),
        (status = 500, description = "Store failure", body = crate::error::ErrorBody)
    )
)]
pub async fn list_news(
    State(state): State<AppState>,
    query: Result<Query<NewsListParams>, QueryRejection>,
) -> Result<Json<NewsPage>, ApiError> {
    let Query(params) = query.map_err(|rejection| {
        ApiError::BadRequest(format!("Validation failed: {}", rejection.body_text()))
    })?;
    let filter = params.validate()?;

    let start = std::time::Instant::now();
    let page = state.news.list(filter).await?;
    tracing::debug!(
        subsystem = "api",
        component = "news",
        op = "list",
        category = ?filter.category.map(|c| c.code()),
        limit = filter.limit,
        offset = filter.offset,
        result_count = page.count,
        total_count = page.totalcount,
        duration_ms = start.elapsed().as_millis() as u64,
        "Listed news"
    );
    Ok(Json(page))
}

/// Get a single news item.
///
/// # Path Parameters
/// - `id`: Positive decimal integer without leading zeros
///
/// # Returns
/// - 200 OK with the full item including its body
/// - 400 Bad Request if the id is malformed
/// - 404 Not Found if no visible item has this id
/// - 500 Internal Server Error if the query fails
#[utoipa::path(
    get,
    path = "/news/{id}",
    tag = "News",
    params(("id" = String, Path, description = "News id")),
    responses(
        (status = 200, description = "News item", body = NewsDetail),
        (status = 400, description = "Malformed id", body = crate::error::ErrorBody),
        (status = 404, description = "No such news item", body = crate::error::ErrorBody),
        (status = 500, description = "Store failure", body = crate::error::ErrorBody)
    )
)]
pub async fn get_news(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<NewsDetail>, ApiError> {
    // Undecodable segments (e.g. `%FF`) cannot be a positive integer either.
    let Path(id) = id.map_err(|rejection| {
        tracing::debug!(subsystem = "api", error = %rejection, "News id rejected");
        ApiError::from(ValidationErrors::single(ID_NOT_POSITIVE_INT))
    })?;
    let id = NewsId::parse(Some(&id))?;
    let news = state.news.detail(&id).await?;
    Ok(Json(news))
}
