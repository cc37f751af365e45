//! Request parameter validation.
//!
//! Raw query and path values arrive as optional strings. Each validator
//! either returns the normalized parameters or every field-level error it
//! found, in field order. Validation happens before any store access.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use kportal_core::{NewsCategory, NewsListFilter, DEFAULT_NEWS_LIMIT, MAX_NEWS_LIMIT};

pub const CATEGORY_NOT_INT: &str = "category must be an integer";
pub const CATEGORY_INVALID: &str = "category must be one of 1, 2, 3, 4";
pub const LIMIT_NOT_INT: &str = "limit must be an integer";
pub const LIMIT_OUT_OF_RANGE: &str = "limit must be between 0 and 1000";
pub const OFFSET_NOT_INT: &str = "offset must be an integer";
pub const OFFSET_NEGATIVE: &str = "offset must be greater than or equal to 0";
pub const ID_REQUIRED: &str = "id is required";
pub const ID_NOT_POSITIVE_INT: &str = "id must be a positive integer";

static NEWS_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[1-9][0-9]*$").expect("news id pattern is valid"));

/// Non-empty, ordered list of field-level validation messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<String>);

impl ValidationErrors {
    pub(crate) fn single(message: &str) -> Self {
        Self(vec![message.to_string()])
    }

    /// Messages in the order the fields were checked.
    pub fn messages(&self) -> &[String] {
        &self.0
    }

    /// Detail string used in the HTTP error body.
    pub fn detail(&self) -> String {
        format!("Validation failed: {}", self.0.join(", "))
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.detail())
    }
}

/// Raw query string of `GET /news`.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct NewsListParams {
    pub category: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl NewsListParams {
    /// Validate and normalize into a repository filter.
    ///
    /// Absent `limit` becomes 15 and absent `offset` becomes 0.
    pub fn validate(&self) -> Result<NewsListFilter, ValidationErrors> {
        let mut errors = Vec::new();

        let category = match self.category.as_deref() {
            None => None,
            Some(raw) => match parse_integer(raw) {
                None => {
                    errors.push(CATEGORY_NOT_INT.to_string());
                    None
                }
                Some(code) => {
                    let category = NewsCategory::from_code(code);
                    if category.is_none() {
                        errors.push(CATEGORY_INVALID.to_string());
                    }
                    category
                }
            },
        };

        let limit = match self.limit.as_deref() {
            None => DEFAULT_NEWS_LIMIT,
            Some(raw) => match parse_integer(raw) {
                None => {
                    errors.push(LIMIT_NOT_INT.to_string());
                    DEFAULT_NEWS_LIMIT
                }
                Some(n) if !(0..=MAX_NEWS_LIMIT).contains(&n) => {
                    errors.push(LIMIT_OUT_OF_RANGE.to_string());
                    DEFAULT_NEWS_LIMIT
                }
                Some(n) => n,
            },
        };

        let offset = match self.offset.as_deref() {
            None => 0,
            Some(raw) => match parse_integer(raw) {
                None => {
                    errors.push(OFFSET_NOT_INT.to_string());
                    0
                }
                Some(n) if n < 0 => {
                    errors.push(OFFSET_NEGATIVE.to_string());
                    0
                }
                Some(n) => n,
            },
        };

        if !errors.is_empty() {
            return Err(ValidationErrors(errors));
        }

        Ok(NewsListFilter {
            category,
            limit,
            offset,
        })
    }
}

/// A news id that passed validation.
///
/// Kept as text: ids too large for the id column are valid input
/// and simply match nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsId(String);

impl NewsId {
    /// Validate a raw path segment.
    pub fn parse(raw: Option<&str>) -> Result<Self, ValidationErrors> {
        let raw = raw.ok_or_else(|| ValidationErrors::single(ID_REQUIRED))?;
        if !NEWS_ID_PATTERN.is_match(raw) {
            return Err(ValidationErrors::single(ID_NOT_POSITIVE_INT));
        }
        Ok(Self(raw.to_string()))
    }

    /// Numeric value, or `None` when it cannot be stored.
    pub fn as_i32(&self) -> Option<i32> {
        self.0.parse().ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Strict integer parsing: optional sign and ASCII digits, surrounding
/// whitespace ignored. Empty strings, fractions and exponents are rejected.
fn parse_integer(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}
