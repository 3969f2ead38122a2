//! Service orchestration tests over the in-memory repository.

use std::sync::Arc;

use super::support::{StepClock, utc};
use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{
        NewTaskData, TaskDescription, TaskId, TaskPatch, TaskPriority, TaskStatus, TaskTitle,
    },
    ports::{MockTaskRepository, TaskRepositoryError},
    query::{PageRequest, PerPage, TaskFilter},
    services::{TaskQueryError, TaskQueryService},
};
use rstest::{fixture, rstest};

type TestService = TaskQueryService<InMemoryTaskRepository, StepClock>;

#[fixture]
fn service() -> TestService {
    TaskQueryService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(StepClock::default()),
    )
}

fn new_data(title: &str, description: &str) -> NewTaskData {
    NewTaskData::new(
        TaskTitle::new(title).expect("valid title"),
        TaskDescription::new(description).expect("valid description"),
        utc(2025, 7, 1, 12, 0, 0),
    )
}

async fn seed(service: &TestService, count: usize) {
    for index in 1..=count {
        service
            .create(new_data(
                &format!("Task {index}"),
                &format!("Description for task {index}"),
            ))
            .await
            .expect("seeded task should persist");
    }
}

fn page(per_page: u32, number: u32) -> PageRequest {
    let size = PerPage::new(per_page).expect("valid page size");
    PageRequest::new(size, number).expect("valid page number")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_assigns_sequential_identifiers_and_defaults(service: TestService) {
    let first = service
        .create(new_data("Draft roadmap", "Outline the next quarter"))
        .await
        .expect("creation should succeed");
    let second = service
        .create(new_data("Review roadmap", "Collect feedback"))
        .await
        .expect("creation should succeed");

    assert_eq!(first.id(), TaskId::new(1));
    assert_eq!(second.id(), TaskId::new(2));
    assert_eq!(first.status(), TaskStatus::Pending);
    assert_eq!(first.priority(), TaskPriority::Medium);
    assert_eq!(first.created_at(), first.updated_at());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_task_is_retrievable(service: TestService) {
    let created = service
        .create(new_data("Draft roadmap", "Outline the next quarter"))
        .await
        .expect("creation should succeed");

    let fetched = service.find(created.id()).await.expect("lookup should succeed");
    assert_eq!(fetched, created);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn find_unknown_identifier_is_not_found(service: TestService) {
    let result = service.find(TaskId::new(404)).await;
    assert!(matches!(
        result,
        Err(TaskQueryError::NotFound(id)) if id == TaskId::new(404)
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_changes_only_patched_fields(service: TestService) {
    let created = service
        .create(new_data("Draft roadmap", "Outline the next quarter"))
        .await
        .expect("creation should succeed");

    let updated = service
        .update(
            created.id(),
            TaskPatch::new().with_status(TaskStatus::InProgress),
        )
        .await
        .expect("update should succeed");

    assert_eq!(updated.status(), TaskStatus::InProgress);
    assert_eq!(updated.title(), created.title());
    assert!(updated.updated_at() > created.updated_at());

    let fetched = service.find(created.id()).await.expect("lookup should succeed");
    assert_eq!(fetched, updated);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_unknown_identifier_is_not_found(service: TestService) {
    let result = service
        .update(TaskId::new(404), TaskPatch::new().with_status(TaskStatus::Completed))
        .await;
    assert!(matches!(result, Err(TaskQueryError::NotFound(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_task_disappears_from_reads_but_stays_auditable(service: TestService) {
    let created = service
        .create(new_data("Draft roadmap", "Outline the next quarter"))
        .await
        .expect("creation should succeed");

    service.delete(created.id()).await.expect("deletion should succeed");

    assert!(matches!(
        service.find(created.id()).await,
        Err(TaskQueryError::NotFound(_))
    ));
    let listing = service.list(None).await.expect("listing should succeed");
    assert!(listing.is_empty());
    let stats = service.statistics().await.expect("statistics should succeed");
    assert_eq!(stats.total_tasks(), 0);

    let audited = service
        .find_including_deleted(created.id())
        .await
        .expect("audit lookup should succeed");
    assert!(audited.is_deleted());
    assert_eq!(audited.id(), created.id());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_twice_reports_not_found(service: TestService) {
    let created = service
        .create(new_data("Draft roadmap", "Outline the next quarter"))
        .await
        .expect("creation should succeed");

    service.delete(created.id()).await.expect("first deletion should succeed");
    let second = service.delete(created.id()).await;
    assert!(matches!(second, Err(TaskQueryError::NotFound(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_orders_newest_first_by_default(service: TestService) {
    seed(&service, 3).await;

    let listing = service.list(None).await.expect("listing should succeed");
    let ids: Vec<i64> = listing.tasks().iter().map(|task| task.id().into_inner()).collect();
    assert_eq!(ids, vec![3, 2, 1]);
    assert!(listing.meta().is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_pages_carry_metadata(service: TestService) {
    seed(&service, 4).await;

    let listing = service
        .list(Some(page(2, 2)))
        .await
        .expect("listing should succeed");

    let ids: Vec<i64> = listing.tasks().iter().map(|task| task.id().into_inner()).collect();
    assert_eq!(ids, vec![2, 1]);
    let meta = listing.meta().expect("paged listing carries metadata");
    assert_eq!(meta.current_page(), 2);
    assert_eq!(meta.last_page(), 2);
    assert_eq!(meta.total(), 4);
    assert_eq!(meta.from(), Some(3));
    assert_eq!(meta.to(), Some(4));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_beyond_the_last_page_is_empty_but_well_formed(service: TestService) {
    seed(&service, 3).await;

    let listing = service
        .list(Some(page(2, 7)))
        .await
        .expect("listing should succeed");

    assert!(listing.is_empty());
    let meta = listing.meta().expect("paged listing carries metadata");
    assert_eq!(meta.current_page(), 2);
    assert_eq!(meta.from(), None);
    assert_eq!(meta.to(), None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn search_filters_and_sorts(service: TestService) {
    seed(&service, 3).await;
    service
        .update(TaskId::new(2), TaskPatch::new().with_status(TaskStatus::Completed))
        .await
        .expect("update should succeed");

    let completed = service
        .search(
            TaskFilter::new().with_status(TaskStatus::Completed),
            None,
            None,
            None,
        )
        .await
        .expect("search should succeed");
    assert_eq!(completed.tasks().len(), 1);
    assert_eq!(
        completed.tasks().first().map(|task| task.id()),
        Some(TaskId::new(2))
    );

    let ascending = service
        .search(TaskFilter::new(), Some("id"), Some("asc"), None)
        .await
        .expect("search should succeed");
    let ids: Vec<i64> = ascending.tasks().iter().map(|task| task.id().into_inner()).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn search_with_unknown_sort_falls_back_to_newest_first(service: TestService) {
    seed(&service, 3).await;

    let listing = service
        .search(TaskFilter::new(), Some("password"), Some("sideways"), None)
        .await
        .expect("search should succeed");

    let ids: Vec<i64> = listing.tasks().iter().map(|task| task.id().into_inner()).collect();
    assert_eq!(ids, vec![3, 2, 1]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn search_with_no_matches_is_empty_not_an_error(service: TestService) {
    seed(&service, 2).await;

    let listing = service
        .search(
            TaskFilter::new().with_title_contains("unrelated"),
            None,
            None,
            None,
        )
        .await
        .expect("search should succeed");
    assert!(listing.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn statistics_count_live_tasks_by_category(service: TestService) {
    seed(&service, 3).await;
    service
        .update(
            TaskId::new(1),
            TaskPatch::new()
                .with_status(TaskStatus::Completed)
                .with_priority(TaskPriority::High),
        )
        .await
        .expect("update should succeed");

    let stats = service.statistics().await.expect("statistics should succeed");

    assert_eq!(stats.total_tasks(), 3);
    assert_eq!(stats.by_status().get(&TaskStatus::Pending), Some(&2));
    assert_eq!(stats.by_status().get(&TaskStatus::InProgress), Some(&0));
    assert_eq!(stats.by_status().get(&TaskStatus::Completed), Some(&1));
    assert_eq!(stats.by_priority().get(&TaskPriority::Medium), Some(&2));
    assert_eq!(stats.by_priority().get(&TaskPriority::High), Some(&1));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn storage_failures_surface_as_repository_errors() {
    let mut repository = MockTaskRepository::new();
    repository.expect_raw_statistics().returning(|| {
        Err(TaskRepositoryError::storage(std::io::Error::other(
            "connection reset",
        )))
    });

    let service = TaskQueryService::new(Arc::new(repository), Arc::new(StepClock::default()));
    let result = service.statistics().await;

    assert!(matches!(
        result,
        Err(TaskQueryError::Repository(TaskRepositoryError::Storage(_)))
    ));
}
