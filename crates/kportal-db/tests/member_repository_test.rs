//! Integration tests for PgMemberRepository.
//!
//! Require a PostgreSQL instance at `DATABASE_URL`; skipped otherwise.

use kportal_core::MemberRepository;
use kportal_db::test_fixtures::{FixtureTable, SoftDelete, TestDatabase};

macro_rules! require_db {
    () => {{
        dotenvy::dotenv().ok();
        match TestDatabase::connect().await {
            Some(test_db) => test_db,
            None => {
                eprintln!("Skipping: DATABASE_URL not set");
                return;
            }
        }
    }};
}

#[tokio::test]
async fn test_list_active_returns_members_in_id_order() {
    let test_db = require_db!();
    let first = test_db.insert_member("first").await.unwrap();
    let second = test_db.insert_member("second").await.unwrap();

    let members = test_db.db.members.list_active().await.unwrap();

    let ids: Vec<i32> = members.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![first, second]);
    assert_eq!(members[0].name, "first");
    assert_eq!(members[0].color, "#FFFFFF");
    assert_eq!(members[0].accent_color, "#000000");
}

#[tokio::test]
async fn test_list_active_skips_soft_deleted_members() {
    let test_db = require_db!();
    let kept = test_db.insert_member("kept").await.unwrap();
    let flagged = test_db.insert_member("flagged").await.unwrap();
    let stamped = test_db.insert_member("stamped").await.unwrap();
    test_db
        .soft_delete(FixtureTable::Members, flagged, SoftDelete::Flag)
        .await
        .unwrap();
    test_db
        .soft_delete(FixtureTable::Members, stamped, SoftDelete::Timestamp)
        .await
        .unwrap();

    let members = test_db.db.members.list_active().await.unwrap();

    assert_eq!(members.len(), 1);
    assert_eq!(members[0].id, kept);
}

#[tokio::test]
async fn test_list_active_tags_skips_soft_deleted_tags() {
    let test_db = require_db!();
    let member = test_db.insert_member("tagged").await.unwrap();
    let visible = test_db.insert_tag(member, "visible").await.unwrap();
    let hidden = test_db.insert_tag(member, "hidden").await.unwrap();
    test_db
        .soft_delete(FixtureTable::MemberTags, hidden, SoftDelete::Flag)
        .await
        .unwrap();

    let tags = test_db.db.members.list_active_tags().await.unwrap();

    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].id, visible);
    assert_eq!(tags[0].member_id, member);
    assert_eq!(tags[0].name, "visible");
}

#[tokio::test]
async fn test_empty_tables_return_empty_lists() {
    let test_db = require_db!();

    assert!(test_db.db.members.list_active().await.unwrap().is_empty());
    assert!(test_db.db.members.list_active_tags().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_tag_requires_existing_member() {
    let test_db = require_db!();

    let result = test_db.insert_tag(9999, "orphan").await;

    assert!(result.is_err(), "foreign key should reject unknown member");
}
