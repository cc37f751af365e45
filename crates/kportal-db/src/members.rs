//! Member repository implementation.

use std::time::Instant;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use tracing::debug;

use kportal_core::{Error, Member, MemberRepository, MemberTag, Result};

use crate::visible;

/// PostgreSQL implementation of MemberRepository.
#[derive(Clone)]
pub struct PgMemberRepository {
    pool: Pool<Postgres>,
}

impl PgMemberRepository {
    /// Create a new PgMemberRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberRepository for PgMemberRepository {
    async fn list_active(&self) -> Result<Vec<Member>> {
        let start = Instant::now();
        let sql = format!(
            r#"
            SELECT m.id, m.name, m.birthday, m.image_path, m.catch_copy,
                   m.description, m.color, m.accent_color
            FROM members m
            WHERE {}
            ORDER BY m.id
            "#,
            visible("m")
        );

        let members = sqlx::query_as::<_, Member>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        debug!(
            subsystem = "database",
            component = "members",
            op = "list_active",
            result_count = members.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Loaded members"
        );
        Ok(members)
    }

    async fn list_active_tags(&self) -> Result<Vec<MemberTag>> {
        let start = Instant::now();
        let sql = format!(
            r#"
            SELECT t.id, t.member_id, t.name
            FROM member_tags t
            WHERE {}
            ORDER BY t.id
            "#,
            visible("t")
        );

        let tags = sqlx::query_as::<_, MemberTag>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        debug!(
            subsystem = "database",
            component = "members",
            op = "list_active_tags",
            result_count = tags.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Loaded member tags"
        );
        Ok(tags)
    }
}
