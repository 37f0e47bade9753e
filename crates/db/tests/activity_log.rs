//! Integration tests for the activity log repository.

use crewdesk_db::models::project::CreateProject;
use crewdesk_db::repositories::{ActivityLogRepo, ProjectRepo};
use sqlx::PgPool;

fn new_project(name: &str) -> CreateProject {
    CreateProject {
        name: name.to_string(),
        description: None,
        start_date: None,
        end_date: None,
    }
}

#[sqlx::test]
async fn test_list_recent_orders_newest_first_and_honors_limit(pool: PgPool) {
    for i in 0..5 {
        ActivityLogRepo::insert(&pool, 1, "created", "task", i)
            .await
            .unwrap();
    }

    let entries = ActivityLogRepo::list_recent(&pool, 3).await.unwrap();
    assert_eq!(entries.len(), 3);
    // Newest first: ids were inserted in ascending object_id order.
    assert!(entries[0].object_id >= entries[1].object_id);
    assert!(entries[1].object_id >= entries[2].object_id);
}

#[sqlx::test]
async fn test_entries_survive_subject_deletion(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project("Ephemeral"))
        .await
        .unwrap();
    ActivityLogRepo::insert(&pool, 1, "created", "project", project.id)
        .await
        .unwrap();

    ProjectRepo::delete(&pool, project.id).await.unwrap();

    // The log row is still there; the current-state lookup just comes back
    // empty for its subject.
    let entries = ActivityLogRepo::list_recent(&pool, 10).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].object_id, project.id);

    let refs = ProjectRepo::lookup_refs(&pool, &[project.id]).await.unwrap();
    assert!(refs.is_empty());
}

#[sqlx::test]
async fn test_lookup_refs_return_current_state(pool: PgPool) {
    let mut input = new_project("Current");
    input.description = Some("live description".to_string());
    let project = ProjectRepo::create(&pool, &input).await.unwrap();

    let refs = ProjectRepo::lookup_refs(&pool, &[project.id]).await.unwrap();
    assert_eq!(refs.len(), 1);
    assert_eq!(refs[0].name, "Current");
    assert_eq!(refs[0].description.as_deref(), Some("live description"));
    assert_eq!(refs[0].status, "active");
}

#[sqlx::test]
async fn test_clear_returns_prior_count(pool: PgPool) {
    for i in 0..4 {
        ActivityLogRepo::insert(&pool, 1, "updated", "task", i)
            .await
            .unwrap();
    }

    assert_eq!(ActivityLogRepo::clear(&pool).await.unwrap(), 4);
    assert!(ActivityLogRepo::list_recent(&pool, 10).await.unwrap().is_empty());
    assert_eq!(ActivityLogRepo::clear(&pool).await.unwrap(), 0);
}
