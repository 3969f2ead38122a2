//! Repository port for task persistence, search, and aggregation.

use crate::task::domain::{Task, TaskDraft, TaskId, TaskPriority, TaskStatus};
use crate::task::query::{TaskListing, TaskQuery};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Implementations own identifier assignment and are the only holders of
/// mutable state; everything above this port is a stateless transformation.
/// Soft-deleted rows are invisible to [`search`](TaskRepository::search),
/// [`find_by_id`](TaskRepository::find_by_id), and
/// [`raw_statistics`](TaskRepository::raw_statistics), but their rows
/// persist and remain reachable through
/// [`find_by_id_any`](TaskRepository::find_by_id_any).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task, assigning its identifier.
    async fn insert(&self, draft: &TaskDraft) -> TaskRepositoryResult<Task>;

    /// Persists changes to an existing task (field patches, soft deletion).
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when no row exists for the
    /// task identifier.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a non-deleted task by identifier.
    ///
    /// Returns `None` when the task does not exist or has been soft-deleted.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Finds a task by identifier, including soft-deleted rows.
    ///
    /// Audit lookup; returns `None` only when no row exists at all.
    async fn find_by_id_any(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Executes a composed filter/sort/pagination query over non-deleted
    /// tasks.
    ///
    /// An empty result set is a valid outcome, never an error.
    async fn search(&self, query: &TaskQuery) -> TaskRepositoryResult<TaskListing>;

    /// Returns observed per-status and per-priority counts over non-deleted
    /// tasks.
    ///
    /// Group-by semantics: categories with zero occurrences are absent from
    /// the maps. The statistics service reconciles them against the full
    /// enum domains.
    async fn raw_statistics(&self) -> TaskRepositoryResult<RawTaskCounts>;
}

/// Observed task counts as reported by storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTaskCounts {
    /// Count of all non-deleted tasks.
    pub total: u64,
    /// Counts keyed by observed status values only.
    pub by_status: BTreeMap<TaskStatus, u64>,
    /// Counts keyed by observed priority values only.
    pub by_priority: BTreeMap<TaskPriority, u64>,
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// No row exists for the task identifier.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("storage error: {0}")]
    Storage(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a storage-layer error.
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Storage(Arc::new(err))
    }
}
