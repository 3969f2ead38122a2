//! Task query orchestration: listing, search, CRUD, and statistics.

use super::TaskStatistics;
use crate::task::{
    domain::{NewTaskData, Task, TaskDraft, TaskId, TaskPatch},
    ports::{TaskRepository, TaskRepositoryError},
    query::{PageRequest, TaskFilter, TaskListing, TaskOrdering, TaskQuery},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for task query operations.
#[derive(Debug, Error)]
pub enum TaskQueryError {
    /// The referenced task does not exist or has been soft-deleted.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for task query service operations.
pub type TaskQueryResult<T> = Result<T, TaskQueryError>;

/// Stateless orchestration service over the task repository.
///
/// Owns no state of its own: the repository handle is the single shared
/// collaborator, and each operation is an independent request-scoped
/// transformation. No locking is provided; concurrent updates to the same
/// task resolve to last-write-wins.
#[derive(Clone)]
pub struct TaskQueryService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskQueryService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task query service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Lists non-deleted tasks, newest first.
    ///
    /// Returns the full collection when no page is requested.
    ///
    /// # Errors
    ///
    /// Returns [`TaskQueryError::Repository`] when storage fails.
    pub async fn list(&self, page: Option<PageRequest>) -> TaskQueryResult<TaskListing> {
        let query = TaskQuery {
            filter: TaskFilter::new(),
            ordering: TaskOrdering::default(),
            page,
        };
        Ok(self.repository.search(&query).await?)
    }

    /// Searches non-deleted tasks with filter criteria, a requested
    /// ordering, and optional pagination.
    ///
    /// The sort key and direction are resolved against the allow-list; an
    /// empty result set is a valid outcome.
    ///
    /// # Errors
    ///
    /// Returns [`TaskQueryError::Repository`] when storage fails.
    pub async fn search(
        &self,
        filter: TaskFilter,
        sort_by: Option<&str>,
        sort_dir: Option<&str>,
        page: Option<PageRequest>,
    ) -> TaskQueryResult<TaskListing> {
        let query = TaskQuery {
            filter,
            ordering: TaskOrdering::resolve(sort_by, sort_dir),
            page,
        };
        Ok(self.repository.search(&query).await?)
    }

    /// Creates a new task, stamping creation timestamps from the clock.
    ///
    /// # Errors
    ///
    /// Returns [`TaskQueryError::Repository`] when persistence fails.
    pub async fn create(&self, data: NewTaskData) -> TaskQueryResult<Task> {
        let draft = TaskDraft::new(data, &*self.clock);
        Ok(self.repository.insert(&draft).await?)
    }

    /// Retrieves a non-deleted task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskQueryError::NotFound`] when the task does not exist or
    /// has been soft-deleted.
    pub async fn find(&self, id: TaskId) -> TaskQueryResult<Task> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskQueryError::NotFound(id))
    }

    /// Retrieves a task by identifier for audit, including soft-deleted
    /// rows.
    ///
    /// # Errors
    ///
    /// Returns [`TaskQueryError::NotFound`] when no row exists at all.
    pub async fn find_including_deleted(&self, id: TaskId) -> TaskQueryResult<Task> {
        self.repository
            .find_by_id_any(id)
            .await?
            .ok_or(TaskQueryError::NotFound(id))
    }

    /// Applies a partial patch to a task and persists the result.
    ///
    /// Only supplied fields change; `updated_at` is touched.
    ///
    /// # Errors
    ///
    /// Returns [`TaskQueryError::NotFound`] when the task does not exist or
    /// has been soft-deleted.
    pub async fn update(&self, id: TaskId, patch: TaskPatch) -> TaskQueryResult<Task> {
        let mut task = self.find(id).await?;
        task.apply_patch(patch, &*self.clock);
        self.repository.update(&task).await?;
        Ok(task)
    }

    /// Soft-deletes a task: the row persists but disappears from listing,
    /// search, and statistics.
    ///
    /// # Errors
    ///
    /// Returns [`TaskQueryError::NotFound`] when the task does not exist or
    /// has already been soft-deleted.
    pub async fn delete(&self, id: TaskId) -> TaskQueryResult<()> {
        let mut task = self.find(id).await?;
        task.mark_deleted(&*self.clock);
        self.repository.update(&task).await?;
        Ok(())
    }

    /// Aggregates counts over all non-deleted tasks.
    ///
    /// Every status and priority value appears in the breakdowns, zero
    /// filled where storage observed no rows.
    ///
    /// # Errors
    ///
    /// Returns [`TaskQueryError::Repository`] when storage fails.
    pub async fn statistics(&self) -> TaskQueryResult<TaskStatistics> {
        let raw = self.repository.raw_statistics().await?;
        Ok(TaskStatistics::from_raw(&raw))
    }
}
