//! Member listing with tag aggregation.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use kportal_core::{
    Error, MemberProfile, MemberRepository, MemberTag, Result, TagSummary,
};

/// Detail returned when no member rows are visible.
pub const MEMBERS_UNAVAILABLE_DETAIL: &str =
    "No member data found in the database, or the database connection failed";

/// Builds the `GET /members` payload.
#[derive(Clone)]
pub struct MemberService {
    repo: Arc<dyn MemberRepository>,
}

impl MemberService {
    pub fn new(repo: Arc<dyn MemberRepository>) -> Self {
        Self { repo }
    }

    /// List every visible member with its visible tags attached.
    ///
    /// An empty member table is reported as an internal error; members
    /// without tags get an empty list.
    pub async fn list_with_tags(&self) -> Result<Vec<MemberProfile>> {
        let (members, tags) =
            tokio::try_join!(self.repo.list_active(), self.repo.list_active_tags())?;

        if members.is_empty() {
            return Err(Error::Internal(MEMBERS_UNAVAILABLE_DETAIL.to_string()));
        }

        let tag_count = tags.len();
        let mut grouped = group_tags_by_member(tags);
        let profiles: Vec<MemberProfile> = members
            .into_iter()
            .map(|member| {
                let tags = grouped.remove(&member.id).unwrap_or_default();
                MemberProfile::new(member, tags)
            })
            .collect();

        info!(
            subsystem = "api",
            component = "members",
            op = "list_with_tags",
            result_count = profiles.len(),
            tag_count,
            "Listed members"
        );
        Ok(profiles)
    }
}

/// Group tags by owning member id, keeping each member's tags in input order.
pub fn group_tags_by_member(tags: Vec<MemberTag>) -> HashMap<i32, Vec<TagSummary>> {
    let mut grouped: HashMap<i32, Vec<TagSummary>> = HashMap::new();
    for tag in tags {
        grouped
            .entry(tag.member_id)
            .or_default()
            .push(TagSummary::from(tag));
    }
    grouped
}
