//! Core data models for the K-portal API.
//!
//! Row types map one-to-one onto the columns the repositories select.
//! Response types carry the JSON contract served to the frontend; field
//! names are camelCase on the wire except for the news page envelope.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// =============================================================================
// MEMBER TYPES
// =============================================================================

/// A member profile row (soft-deleted rows are never loaded).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: i32,
    pub name: String,
    pub birthday: NaiveDate,
    pub image_path: String,
    pub catch_copy: String,
    pub description: String,
    pub color: String,
    pub accent_color: String,
}

/// A tag row attached to exactly one member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MemberTag {
    pub id: i32,
    pub member_id: i32,
    pub name: String,
}

/// Tag projection embedded in a member response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TagSummary {
    pub id: i32,
    pub name: String,
}

impl From<MemberTag> for TagSummary {
    fn from(tag: MemberTag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
        }
    }
}

/// Member as returned by `GET /members`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberProfile {
    pub id: i32,
    pub name: String,
    /// Serialized as `YYYY-MM-DD`.
    pub birthday: NaiveDate,
    pub image_path: String,
    pub catch_copy: String,
    pub description: String,
    pub color: String,
    pub accent_color: String,
    pub tags: Vec<TagSummary>,
}

impl MemberProfile {
    /// Attach an already-grouped tag list to a member row.
    pub fn new(member: Member, tags: Vec<TagSummary>) -> Self {
        Self {
            id: member.id,
            name: member.name,
            birthday: member.birthday,
            image_path: member.image_path,
            catch_copy: member.catch_copy,
            description: member.description,
            color: member.color,
            accent_color: member.accent_color,
            tags,
        }
    }
}

// =============================================================================
// NEWS TYPES
// =============================================================================

/// Category code of a news item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i16)]
pub enum NewsCategory {
    Announcement = 1,
    Event = 2,
    News = 3,
    Other = 4,
}

impl NewsCategory {
    /// All categories in code order.
    pub const ALL: [NewsCategory; 4] = [
        NewsCategory::Announcement,
        NewsCategory::Event,
        NewsCategory::News,
        NewsCategory::Other,
    ];

    /// Numeric code stored in the `category` column.
    pub fn code(self) -> i16 {
        self as i16
    }

    /// Look up a category by its numeric code.
    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|c| i64::from(c.code()) == code)
    }
}

/// One row of the news listing.
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, utoipa::ToSchema,
)]
#[serde(rename_all = "camelCase")]
pub struct NewsSummary {
    pub id: i32,
    pub title: String,
    pub category: i16,
    /// Serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub thumbnail_path: String,
}

/// Full news item as returned by `GET /news/:id`.
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, utoipa::ToSchema,
)]
#[serde(rename_all = "camelCase")]
pub struct NewsDetail {
    pub id: i32,
    pub title: String,
    pub category: i16,
    /// Serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub thumbnail_path: String,
    pub detail: String,
}

/// Default page size when `limit` is not given.
pub const DEFAULT_NEWS_LIMIT: i64 = 15;

/// Largest accepted page size.
pub const MAX_NEWS_LIMIT: i64 = 1000;

/// Normalized filter for the news listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewsListFilter {
    pub category: Option<NewsCategory>,
    pub limit: i64,
    pub offset: i64,
}

impl Default for NewsListFilter {
    fn default() -> Self {
        Self {
            category: None,
            limit: DEFAULT_NEWS_LIMIT,
            offset: 0,
        }
    }
}

/// Paginated news listing envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct NewsPage {
    /// Number of items matching the filter, ignoring pagination.
    pub totalcount: i64,
    /// Number of items in `news`.
    pub count: usize,
    pub news: Vec<NewsSummary>,
}

impl NewsPage {
    pub fn new(news: Vec<NewsSummary>, totalcount: i64) -> Self {
        Self {
            totalcount,
            count: news.len(),
            news,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_category_from_code() {
        assert_eq!(NewsCategory::from_code(1), Some(NewsCategory::Announcement));
        assert_eq!(NewsCategory::from_code(4), Some(NewsCategory::Other));
        assert_eq!(NewsCategory::from_code(0), None);
        assert_eq!(NewsCategory::from_code(5), None);
        assert_eq!(NewsCategory::from_code(-1), None);
    }

    #[test]
    fn test_category_codes_are_stable() {
        let codes: Vec<i16> = NewsCategory::ALL.iter().map(|c| c.code()).collect();
        assert_eq!(codes, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_news_detail_wire_format() {
        let detail = NewsDetail {
            id: 1,
            title: "Local environment ready".to_string(),
            category: 1,
            date: date(2025, 11, 8),
            thumbnail_path: "../images/thumbnail/announcement1.png".to_string(),
            detail: "Everything is set up.".to_string(),
        };
        let value = serde_json::to_value(&detail).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 1,
                "title": "Local environment ready",
                "category": 1,
                "date": "2025-11-08",
                "thumbnailPath": "../images/thumbnail/announcement1.png",
                "detail": "Everything is set up.",
            })
        );
    }

    #[test]
    fn test_news_page_counts_items() {
        let item = NewsSummary {
            id: 3,
            title: "t".to_string(),
            category: 2,
            date: date(2026, 1, 1),
            thumbnail_path: "p".to_string(),
        };
        let page = NewsPage::new(vec![item.clone(), item], 10);
        assert_eq!(page.count, 2);

        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(value["totalcount"], 10);
        assert_eq!(value["count"], 2);
        assert_eq!(value["news"][0]["thumbnailPath"], "p");
    }

    #[test]
    fn test_member_profile_wire_format() {
        let member = Member {
            id: 7,
            name: "Mika".to_string(),
            birthday: date(2000, 1, 1),
            image_path: "/images/mika.png".to_string(),
            catch_copy: "catch".to_string(),
            description: "desc".to_string(),
            color: "#FFFFFF".to_string(),
            accent_color: "#000000".to_string(),
        };
        let profile = MemberProfile::new(
            member,
            vec![TagSummary {
                id: 1,
                name: "singer".to_string(),
            }],
        );
        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value["birthday"], "2000-01-01");
        assert_eq!(value["imagePath"], "/images/mika.png");
        assert_eq!(value["catchCopy"], "catch");
        assert_eq!(value["accentColor"], "#000000");
        assert_eq!(value["tags"], json!([{ "id": 1, "name": "singer" }]));
    }

    #[test]
    fn test_default_filter() {
        let filter = NewsListFilter::default();
        assert_eq!(filter.limit, DEFAULT_NEWS_LIMIT);
        assert_eq!(filter.offset, 0);
        assert!(filter.category.is_none());
    }
}
