//! In-memory repository for tests and database-free embedding.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{Task, TaskDraft, TaskId},
    ports::{RawTaskCounts, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
    query::{TaskListing, TaskPage, TaskQuery},
};

/// Thread-safe in-memory task repository.
///
/// Identifiers are assigned from a monotonically increasing counter,
/// mirroring a database sequence. Rows are kept in identifier order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug)]
struct InMemoryTaskState {
    tasks: BTreeMap<TaskId, Task>,
    next_id: i64,
}

impl Default for InMemoryTaskState {
    fn default() -> Self {
        Self {
            tasks: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_poisoned(err: impl std::fmt::Display) -> TaskRepositoryError {
    TaskRepositoryError::storage(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert(&self, draft: &TaskDraft) -> TaskRepositoryResult<Task> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        let id = TaskId::new(state.next_id);
        state.next_id += 1;
        let task = Task::from_draft(id, draft);
        state.tasks.insert(id, task.clone());
        Ok(task)
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if !state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::NotFound(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state
            .tasks
            .get(&id)
            .filter(|task| !task.is_deleted())
            .cloned())
    }

    async fn find_by_id_any(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn search(&self, query: &TaskQuery) -> TaskRepositoryResult<TaskListing> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let mut matching: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| !task.is_deleted() && query.filter.matches(task))
            .cloned()
            .collect();
        matching.sort_by(|a, b| query.ordering.compare(a, b));

        Ok(match query.page {
            Some(request) => TaskListing::Paged(TaskPage::from_ordered(matching, request)),
            None => TaskListing::Complete(matching),
        })
    }

    async fn raw_statistics(&self) -> TaskRepositoryResult<RawTaskCounts> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let mut counts = RawTaskCounts::default();
        for task in state.tasks.values().filter(|task| !task.is_deleted()) {
            counts.total += 1;
            *counts.by_status.entry(task.status()).or_insert(0) += 1;
            *counts.by_priority.entry(task.priority()).or_insert(0) += 1;
        }
        Ok(counts)
    }
}
