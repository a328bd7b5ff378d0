mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use taskboard::client::cache::{QueryCache, QueryKey, Tag};
use taskboard::client::{Api, Backend, HttpBackend, RequestError};
use taskboard::models::{ProjectUpdate, TaskStatus, TaskUpdate};

use common::{date, MemoryBackend};

fn api_over(backend: &Arc<MemoryBackend>) -> Api {
    Api::new(backend.clone())
}

fn rename(name: &str) -> ProjectUpdate {
    ProjectUpdate {
        name: name.to_string(),
        description: None,
        start_date: Some(date(2024, 3, 1)),
        end_date: Some(date(2024, 4, 1)),
        team_id: Some(4),
    }
}

// ── Query cache ─────────────────────────────────────────────────

#[tokio::test]
async fn repeated_query_is_served_from_cache() {
    let backend = MemoryBackend::seeded();
    let api = api_over(&backend);

    let first = api.get_tasks(1).await.unwrap();
    let second = api.get_tasks(1).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.len(), 4);
    assert_eq!(backend.fetch_count(), 1);
    assert!(api.cache().contains(&QueryKey::Tasks { project_id: 1 }));
}

#[tokio::test]
async fn distinct_keys_are_cached_separately() {
    let backend = MemoryBackend::seeded();
    let api = api_over(&backend);

    api.get_project(1).await.unwrap();
    api.get_projects().await.unwrap();
    api.get_teams().await.unwrap();
    api.get_project(1).await.unwrap();

    assert_eq!(backend.fetch_count(), 3);
}

#[tokio::test]
async fn failed_query_is_not_cached() {
    let backend = MemoryBackend::seeded();
    let api = api_over(&backend);

    let err = api.get_project(42).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert!(!api.cache().contains(&QueryKey::Project(42)));

    api.get_project(42).await.unwrap_err();
    assert_eq!(backend.fetch_count(), 2);
}

#[tokio::test]
async fn project_update_invalidates_project_queries() {
    let backend = MemoryBackend::seeded();
    let api = api_over(&backend);

    assert_eq!(api.get_project(1).await.unwrap().name, "Alpha");
    api.get_tasks(1).await.unwrap();

    let updated = api.update_project(1, &rename("Alpha v2")).await.unwrap();
    assert_eq!(updated.name, "Alpha v2");
    assert_eq!(backend.mutation_count(), 1);

    assert!(!api.cache().contains(&QueryKey::Project(1)));
    assert!(api.cache().contains(&QueryKey::Tasks { project_id: 1 }));

    let refetched = api.get_project(1).await.unwrap();
    assert_eq!(refetched.name, "Alpha v2");
    assert_eq!(refetched.team_id, Some(4));
    assert_eq!(refetched.description, None);
}

#[tokio::test]
async fn task_update_invalidates_task_lists() {
    let backend = MemoryBackend::seeded();
    let api = api_over(&backend);

    let before = api.get_tasks(1).await.unwrap();
    assert_eq!(before[0].status, TaskStatus::ToDo);

    let update = TaskUpdate {
        title: "Login page".to_string(),
        description: None,
        status: TaskStatus::Completed,
        priority: None,
        tags: None,
        points: Some(7),
        start_date: None,
        due_date: None,
    };
    api.update_task(1, &update).await.unwrap();

    let after = api.get_tasks(1).await.unwrap();
    assert_eq!(after[0].status, TaskStatus::Completed);
    assert_eq!(backend.fetch_count(), 2);
}

#[tokio::test]
async fn failed_mutation_is_sent_once_and_keeps_cache() {
    let backend = MemoryBackend::seeded();
    backend.fail_mutations.store(true, Ordering::SeqCst);
    let api = api_over(&backend);

    api.get_project(1).await.unwrap();
    let err = api.update_project(1, &rename("Alpha v2")).await.unwrap_err();

    assert_eq!(
        err,
        RequestError::Status {
            status: 500,
            message: "Internal server error".to_string(),
        }
    );
    assert_eq!(backend.mutation_count(), 1);
    assert!(api.cache().contains(&QueryKey::Project(1)));
    assert_eq!(api.get_project(1).await.unwrap().name, "Alpha");
    assert_eq!(backend.fetch_count(), 1);
}

#[test]
fn stale_insert_is_rejected_after_invalidation() {
    let cache = QueryCache::new();
    let generation = cache.generation(Tag::Projects);

    // A mutation lands while the fetch is still in flight.
    cache.invalidate(Tag::Projects);

    assert!(!cache.insert_if_current(QueryKey::Projects, vec![1, 2, 3], generation));
    assert!(!cache.contains(&QueryKey::Projects));

    let generation = cache.generation(Tag::Projects);
    assert!(cache.insert_if_current(QueryKey::Projects, vec![1, 2, 3], generation));
    assert_eq!(cache.get::<Vec<i32>>(&QueryKey::Projects), Some(vec![1, 2, 3]));
}

#[test]
fn invalidate_only_drops_matching_tag() {
    let cache = QueryCache::new();
    cache.insert_if_current(QueryKey::Task(1), "task".to_string(), 0);
    cache.insert_if_current(QueryKey::Tasks { project_id: 1 }, "tasks".to_string(), 0);
    cache.insert_if_current(QueryKey::Teams, "teams".to_string(), 0);

    assert_eq!(cache.invalidate(Tag::Tasks), 2);
    assert!(cache.contains(&QueryKey::Teams));
    assert_eq!(cache.invalidate(Tag::Tasks), 0);
    assert_eq!(cache.generation(Tag::Tasks), 2);
    assert_eq!(cache.generation(Tag::Teams), 0);
}

#[test]
fn get_with_wrong_type_misses() {
    let cache = QueryCache::new();
    cache.insert_if_current(QueryKey::Users, vec!["alice".to_string()], 0);
    assert_eq!(cache.get::<Vec<i32>>(&QueryKey::Users), None);
}

// ── HTTP backend ────────────────────────────────────────────────

#[tokio::test]
async fn http_backend_surfaces_server_errors() {
    let app = common::spawn_unreachable_app().await;
    let backend = HttpBackend::new(format!("{}/", app.base_url()));

    let err = backend.list_users().await.unwrap_err();
    assert_eq!(
        err,
        RequestError::Status {
            status: 500,
            message: "Internal server error".to_string(),
        }
    );

    common::cleanup(app).await;
}

#[tokio::test]
async fn http_backend_reports_transport_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let backend = HttpBackend::new(format!("http://{addr}"));
    let err = backend.list_projects().await.unwrap_err();
    assert!(matches!(err, RequestError::Transport(_)), "got {err:?}");
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn http_round_trip_through_cache() {
    let Some(app) = common::spawn_app().await else {
        return;
    };
    let team_id = app.insert_team("Platform").await;
    let project_id = app.insert_project("Alpha", Some(team_id)).await;
    app.insert_task(project_id, "Design schema", "To Do", Some(5))
        .await;

    let api = Api::http(app.base_url());

    let tasks = api.get_tasks(project_id).await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].status, TaskStatus::ToDo);

    let project = api.get_project(project_id).await.unwrap();
    assert_eq!(project.version, Some(1));

    let update = ProjectUpdate {
        name: "Alpha v2".to_string(),
        description: Some("Renamed".to_string()),
        start_date: project.start_date,
        end_date: project.end_date,
        team_id: Some(team_id),
    };
    api.update_project(project_id, &update).await.unwrap();

    let project = api.get_project(project_id).await.unwrap();
    assert_eq!(project.name, "Alpha v2");
    assert_eq!(project.description.as_deref(), Some("Renamed"));

    let teams = api.get_teams().await.unwrap();
    assert_eq!(teams[0].team_name, "Platform");

    common::cleanup(app).await;
}
