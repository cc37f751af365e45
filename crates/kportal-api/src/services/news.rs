//! News listing and detail.

use std::sync::Arc;

use kportal_core::{Error, NewsDetail, NewsListFilter, NewsPage, NewsRepository, Result};

use crate::validation::NewsId;

/// Detail returned when a news id matches no visible row.
pub const NEWS_NOT_FOUND_DETAIL: &str = "The news item with the specified id was not found";

/// Builds the `GET /news` and `GET /news/:id` payloads.
#[derive(Clone)]
pub struct NewsService {
    repo: Arc<dyn NewsRepository>,
}

impl NewsService {
    pub fn new(repo: Arc<dyn NewsRepository>) -> Self {
        Self { repo }
    }

    /// One page of news plus the total number of matching items.
    pub async fn list(&self, filter: NewsListFilter) -> Result<NewsPage> {
        let (news, total) =
            tokio::try_join!(self.repo.list(&filter), self.repo.count(filter.category))?;
        Ok(NewsPage::new(news, total))
    }

    /// A single news item; a miss is `Error::NotFound`.
    pub async fn detail(&self, id: &NewsId) -> Result<NewsDetail> {
        let Some(id) = id.as_i32() else {
            return Err(Error::NotFound(NEWS_NOT_FOUND_DETAIL.to_string()));
        };
        self.repo
            .fetch(id)
            .await?
            .ok_or_else(|| Error::NotFound(NEWS_NOT_FOUND_DETAIL.to_string()))
    }
}
