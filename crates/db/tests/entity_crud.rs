//! Integration tests for project and task CRUD.
//!
//! Exercises the repository layer against a real database:
//! - Insert defaults (status, priority)
//! - Partial updates, including explicit-null clears
//! - Empty update sets performing no write
//! - NotFound paths for update and delete

use crewdesk_db::models::project::{CreateProject, UpdateProject};
use crewdesk_db::models::task::{CreateTask, UpdateTask};
use crewdesk_db::repositories::{ProjectRepo, TaskRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_project(name: &str) -> CreateProject {
    CreateProject {
        name: name.to_string(),
        description: None,
        start_date: None,
        end_date: None,
    }
}

fn new_task(project_id: i64, title: &str) -> CreateTask {
    CreateTask {
        project_id,
        title: title.to_string(),
        description: None,
        assigned_to: None,
        status: None,
        priority: None,
        due_date: None,
        parent_task_id: None,
        depends_on_task_id: None,
    }
}

// ---------------------------------------------------------------------------
// Test: Insert defaults
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_create_project_applies_defaults(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project("Website Redesign"))
        .await
        .unwrap();

    assert_eq!(project.name, "Website Redesign");
    assert_eq!(project.status, "active");
    assert!(project.description.is_none());
}

#[sqlx::test]
async fn test_create_task_applies_defaults(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project("P")).await.unwrap();
    let task = TaskRepo::create(&pool, &new_task(project.id, "Design homepage"))
        .await
        .unwrap();

    assert_eq!(task.project_id, project.id);
    assert_eq!(task.status, "todo");
    assert_eq!(task.priority, 3);
    assert!(task.parent_task_id.is_none());
}

#[sqlx::test]
async fn test_create_task_keeps_explicit_values(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project("P")).await.unwrap();
    let mut input = new_task(project.id, "Urgent fix");
    input.status = Some("in_progress".to_string());
    input.priority = Some(1);

    let task = TaskRepo::create(&pool, &input).await.unwrap();
    assert_eq!(task.status, "in_progress");
    assert_eq!(task.priority, 1);
}

// ---------------------------------------------------------------------------
// Test: Partial update semantics
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_update_project_applies_only_present_fields(pool: PgPool) {
    let mut input = new_project("Before");
    input.description = Some("keep me".to_string());
    let project = ProjectRepo::create(&pool, &input).await.unwrap();

    let updated = ProjectRepo::update(
        &pool,
        project.id,
        &UpdateProject {
            name: Some("After".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .expect("Update should return the row");

    assert_eq!(updated.name, "After");
    assert_eq!(updated.description.as_deref(), Some("keep me"));
}

#[sqlx::test]
async fn test_update_clears_nullable_field_with_explicit_null(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project("P")).await.unwrap();
    let mut input = new_task(project.id, "T");
    input.description = Some("obsolete".to_string());
    let task = TaskRepo::create(&pool, &input).await.unwrap();

    let updated = TaskRepo::update(
        &pool,
        task.id,
        &UpdateTask {
            description: Some(None),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .expect("Update should return the row");

    assert!(updated.description.is_none());
}

#[sqlx::test]
async fn test_empty_update_performs_no_write(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project("P")).await.unwrap();
    let task = TaskRepo::create(&pool, &new_task(project.id, "T"))
        .await
        .unwrap();

    let unchanged = TaskRepo::update(&pool, task.id, &UpdateTask::default())
        .await
        .unwrap()
        .expect("Row should still exist");

    assert_eq!(unchanged.updated_at, task.updated_at);
    assert_eq!(unchanged.title, task.title);
}

#[sqlx::test]
async fn test_update_rewires_parent_link(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project("P")).await.unwrap();
    let parent = TaskRepo::create(&pool, &new_task(project.id, "Parent"))
        .await
        .unwrap();
    let child = TaskRepo::create(&pool, &new_task(project.id, "Child"))
        .await
        .unwrap();

    let updated = TaskRepo::update(
        &pool,
        child.id,
        &UpdateTask {
            parent_task_id: Some(Some(parent.id)),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.parent_task_id, Some(parent.id));

    // Clearing the link with an explicit null detaches the subtask.
    let detached = TaskRepo::update(
        &pool,
        child.id,
        &UpdateTask {
            parent_task_id: Some(None),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert!(detached.parent_task_id.is_none());
}

// ---------------------------------------------------------------------------
// Test: NotFound paths
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_update_nonexistent_returns_none(pool: PgPool) {
    let result = ProjectRepo::update(
        &pool,
        999_999,
        &UpdateProject {
            name: Some("Ghost".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert!(result.is_none());
}

#[sqlx::test]
async fn test_delete_nonexistent_returns_none(pool: PgPool) {
    assert!(ProjectRepo::delete(&pool, 999_999).await.unwrap().is_none());
    assert!(TaskRepo::delete(&pool, 999_999).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Test: FK violation on insert
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_task_insert_requires_existing_project(pool: PgPool) {
    let result = TaskRepo::create(&pool, &new_task(999_999, "Ghost")).await;
    assert!(
        result.is_err(),
        "FK violation should fail for non-existent project_id"
    );
}

// ---------------------------------------------------------------------------
// Test: Listing scopes and order
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_list_tasks_scoped_to_project(pool: PgPool) {
    let p1 = ProjectRepo::create(&pool, &new_project("P1")).await.unwrap();
    let p2 = ProjectRepo::create(&pool, &new_project("P2")).await.unwrap();

    TaskRepo::create(&pool, &new_task(p1.id, "A")).await.unwrap();
    TaskRepo::create(&pool, &new_task(p1.id, "B")).await.unwrap();
    TaskRepo::create(&pool, &new_task(p2.id, "C")).await.unwrap();

    assert_eq!(TaskRepo::list_by_project(&pool, p1.id).await.unwrap().len(), 2);
    assert_eq!(TaskRepo::list_by_project(&pool, p2.id).await.unwrap().len(), 1);
}

#[sqlx::test]
async fn test_graph_listing_orders_by_priority_then_title(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project("P")).await.unwrap();

    let mut low = new_task(project.id, "zeta");
    low.priority = Some(5);
    let mut urgent_b = new_task(project.id, "beta");
    urgent_b.priority = Some(1);
    let mut urgent_a = new_task(project.id, "alpha");
    urgent_a.priority = Some(1);

    TaskRepo::create(&pool, &low).await.unwrap();
    TaskRepo::create(&pool, &urgent_b).await.unwrap();
    TaskRepo::create(&pool, &urgent_a).await.unwrap();

    let tasks = TaskRepo::list_by_priority(&pool).await.unwrap();
    let titles: Vec<&str> = tasks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["alpha", "beta", "zeta"]);
}

#[sqlx::test]
async fn test_subtasks_listed_in_creation_order(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project("P")).await.unwrap();
    let parent = TaskRepo::create(&pool, &new_task(project.id, "Parent"))
        .await
        .unwrap();

    for title in ["first", "second", "third"] {
        let mut input = new_task(project.id, title);
        input.parent_task_id = Some(parent.id);
        TaskRepo::create(&pool, &input).await.unwrap();
    }

    let subtasks = TaskRepo::list_subtasks(&pool, parent.id).await.unwrap();
    let titles: Vec<&str> = subtasks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["first", "second", "third"]);
}
