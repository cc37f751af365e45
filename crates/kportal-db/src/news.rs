//! News repository implementation.

use std::time::Instant;

use async_trait::async_trait;
use sqlx::{Pool, Postgres, Row};
use tracing::debug;

use kportal_core::{
    Error, NewsCategory, NewsDetail, NewsListFilter, NewsRepository, NewsSummary, Result,
};

use crate::visible;

/// PostgreSQL implementation of NewsRepository.
#[derive(Clone)]
pub struct PgNewsRepository {
    pool: Pool<Postgres>,
}

impl PgNewsRepository {
    /// Create a new PgNewsRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NewsRepository for PgNewsRepository {
    async fn list(&self, filter: &NewsListFilter) -> Result<Vec<NewsSummary>> {
        let start = Instant::now();
        // A NULL category parameter disables the filter.
        let sql = format!(
            r#"
            SELECT n.id, n.title, n.category, n.date, n.thumbnail_path
            FROM news n
            WHERE {}
              AND ($1::SMALLINT IS NULL OR n.category = $1)
            ORDER BY n.date DESC, n.id DESC
            LIMIT $2 OFFSET $3
            "#,
            visible("n")
        );

        let news = sqlx::query_as::<_, NewsSummary>(&sql)
            .bind(filter.category.map(NewsCategory::code))
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        debug!(
            subsystem = "database",
            component = "news",
            op = "list",
            category = ?filter.category,
            limit = filter.limit,
            offset = filter.offset,
            result_count = news.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Loaded news page"
        );
        Ok(news)
    }

    async fn count(&self, category: Option<NewsCategory>) -> Result<i64> {
        let start = Instant::now();
        let sql = format!(
            r#"
            SELECT COUNT(*) AS total_count
            FROM news n
            WHERE {}
              AND ($1::SMALLINT IS NULL OR n.category = $1)
            "#,
            visible("n")
        );

        let row = sqlx::query(&sql)
            .bind(category.map(NewsCategory::code))
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)?;

        let total: i64 = row.try_get("total_count").map_err(Error::Database)?;

        debug!(
            subsystem = "database",
            component = "news",
            op = "count",
            category = ?category,
            result_count = total,
            duration_ms = start.elapsed().as_millis() as u64,
            "Counted news"
        );
        Ok(total)
    }

    async fn fetch(&self, id: i32) -> Result<Option<NewsDetail>> {
        let start = Instant::now();
        let sql = format!(
            r#"
            SELECT n.id, n.title, n.category, n.date, n.thumbnail_path, n.detail
            FROM news n
            WHERE n.id = $1
              AND {}
            "#,
            visible("n")
        );

        let detail = sqlx::query_as::<_, NewsDetail>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;

        debug!(
            subsystem = "database",
            component = "news",
            op = "fetch",
            news_id = id,
            found = detail.is_some(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Looked up news item"
        );
        Ok(detail)
    }
}
