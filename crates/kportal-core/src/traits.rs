//! Repository traits implemented by the storage layer.

use async_trait::async_trait;

use crate::{Member, MemberTag, NewsCategory, NewsDetail, NewsListFilter, NewsSummary, Result};

// =============================================================================
// MEMBER REPOSITORY TRAITS
// =============================================================================

/// Read access to members and their tags.
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// List all members that are not soft-deleted, ordered by id.
    async fn list_active(&self) -> Result<Vec<Member>>;

    /// List all tags that are not soft-deleted, ordered by id.
    async fn list_active_tags(&self) -> Result<Vec<MemberTag>>;
}

// =============================================================================
// NEWS REPOSITORY TRAITS
// =============================================================================

/// Read access to news items.
#[async_trait]
pub trait NewsRepository: Send + Sync {
    /// Fetch one page of visible news, newest first.
    async fn list(&self, filter: &NewsListFilter) -> Result<Vec<NewsSummary>>;

    /// Count visible news matching the category, ignoring pagination.
    async fn count(&self, category: Option<NewsCategory>) -> Result<i64>;

    /// Fetch a single visible news item by id.
    async fn fetch(&self, id: i32) -> Result<Option<NewsDetail>>;
}

// =============================================================================
// HEALTH
// =============================================================================

/// Connectivity probe for the backing store.
#[async_trait]
pub trait StoreHealth: Send + Sync {
    /// Run a trivial query against the store.
    async fn ping(&self) -> Result<()>;
}
