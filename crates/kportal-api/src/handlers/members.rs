//! Member HTTP handlers.

use axum::{extract::State, Json};

use kportal_core::MemberProfile;

use crate::{ApiError, AppState};

/// List all members with their tags.
///
/// # Returns
/// - 200 OK with members in ascending id order
/// - 500 Internal Server Error if no member exists or the query fails
#[utoipa::path(
    get,
    path = "/members",
    tag = "Members",
    responses(
        (status = 200, description = "Members with tags", body = [MemberProfile]),
        (status = 500, description = "No members or store failure", body = crate::error::ErrorBody)
    )
)]
pub async fn list_members(
    State(state): State<AppState>,
) -> Result<Json<Vec<MemberProfile>>, ApiError> {
    let members = state.members.list_with_tags().await?;
    Ok(Json(members))
}
