//! Shared helpers for in-process API tests.
//!
//! `FakeStore` is an in-memory stand-in for the PostgreSQL repositories so
//! the router can be driven with `oneshot` without a database.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use serde_json::Value;
use tower::ServiceExt;

use kportal_api::{cors_layer, create_router, parse_allowed_origins, AppState};
use kportal_core::{
    Error, Member, MemberRepository, MemberTag, NewsCategory, NewsDetail, NewsListFilter,
    NewsRepository, NewsSummary, Result, StoreHealth,
};

/// How the fake store behaves on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Healthy,
    /// Every query fails as if the connection dropped.
    Failing,
    /// Every query panics.
    Panicking,
}

#[derive(Default)]
pub struct FakeStore {
    pub members: Vec<Member>,
    pub tags: Vec<MemberTag>,
    pub news: Vec<NewsDetail>,
    pub mode: Mode,
}

impl FakeStore {
    fn check(&self) -> Result<()> {
        match self.mode {
            Mode::Healthy => Ok(()),
            Mode::Failing => Err(Error::Database(sqlx::Error::PoolTimedOut)),
            Mode::Panicking => panic!("fake store exploded"),
        }
    }

    /// Matching items, newest first, ties broken by id descending.
    fn matching(&self, category: Option<NewsCategory>) -> Vec<&NewsDetail> {
        let mut items: Vec<&NewsDetail> = self
            .news
            .iter()
            .filter(|n| category.map_or(true, |c| n.category == c.code()))
            .collect();
        items.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        items
    }
}

#[async_trait]
impl MemberRepository for FakeStore {
    async fn list_active(&self) -> Result<Vec<Member>> {
        self.check()?;
        let mut members = self.members.clone();
        members.sort_by_key(|m| m.id);
        Ok(members)
    }

    async fn list_active_tags(&self) -> Result<Vec<MemberTag>> {
        self.check()?;
        let mut tags = self.tags.clone();
        tags.sort_by_key(|t| t.id);
        Ok(tags)
    }
}

#[async_trait]
impl NewsRepository for FakeStore {
    async fn list(&self, filter: &NewsListFilter) -> Result<Vec<NewsSummary>> {
        self.check()?;
        Ok(self
            .matching(filter.category)
            .into_iter()
            .skip(filter.offset as usize)
            .take(filter.limit as usize)
            .map(|n| NewsSummary {
                id: n.id,
                title: n.title.clone(),
                category: n.category,
                date: n.date,
                thumbnail_path: n.thumbnail_path.clone(),
            })
            .collect())
    }

    async fn count(&self, category: Option<NewsCategory>) -> Result<i64> {
        self.check()?;
        Ok(self.matching(category).len() as i64)
    }

    async fn fetch(&self, id: i32) -> Result<Option<NewsDetail>> {
        self.check()?;
        Ok(self.news.iter().find(|n| n.id == id).cloned())
    }
}

#[async_trait]
impl StoreHealth for FakeStore {
    async fn ping(&self) -> Result<()> {
        self.check()
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn member(id: i32, name: &str) -> Member {
    Member {
        id,
        name: name.to_string(),
        birthday: date(2000, 1, 15),
        image_path: format!("../images/members/{}.jpg", name.to_lowercase()),
        catch_copy: format!("{name} catch copy"),
        description: format!("{name} description"),
        color: "#FF0000".to_string(),
        accent_color: "#00FF00".to_string(),
    }
}

pub fn tag(id: i32, member_id: i32, name: &str) -> MemberTag {
    MemberTag {
        id,
        member_id,
        name: name.to_string(),
    }
}

pub fn news(id: i32, category: i16, date: NaiveDate) -> NewsDetail {
    NewsDetail {
        id,
        title: format!("News {id}"),
        category,
        date,
        thumbnail_path: format!("../images/thumbnail/news{id}.png"),
        detail: format!("Body of news {id}"),
    }
}

/// Router over `store` with the default local CORS policy.
pub fn app(store: FakeStore) -> Router {
    let store = Arc::new(store);
    let state = AppState::new(store.clone(), store.clone(), store);
    create_router(state, cors_layer(parse_allowed_origins("http://localhost:3000")))
}

/// Send a GET and return status plus raw body text.
pub async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.expect("failed to make request");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

/// Send a GET and parse the body as JSON.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(app, uri).await;
    let json = serde_json::from_str(&body)
        .unwrap_or_else(|e| panic!("body of {uri} is not JSON ({e}): {body}"));
    (status, json)
}
