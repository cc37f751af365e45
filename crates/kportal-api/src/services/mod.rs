//! Service layer for business logic.

pub mod members;
pub mod news;

pub use members::{group_tags_by_member, MemberService, MEMBERS_UNAVAILABLE_DETAIL};
pub use news::{NewsService, NEWS_NOT_FOUND_DETAIL};
