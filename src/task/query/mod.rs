//! Query composition for task search: filtering, sorting, and pagination.
//!
//! These types are pure descriptions of a search. Adapters execute them:
//! the in-memory repository applies [`TaskFilter::matches`] and
//! [`TaskOrdering::compare`] directly, while the `PostgreSQL` repository
//! translates the same criteria into SQL.

mod filter;
mod page;
mod sort;

pub use filter::TaskFilter;
pub use page::{PageBoundsError, PageMeta, PageRequest, PageWindow, PerPage, TaskPage};
pub use sort::{SortDirection, SortKey, TaskOrdering};

use crate::task::domain::Task;
use serde::Serialize;

/// Composed search description handed to repository adapters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    /// Conjunction of field predicates; an empty filter matches everything.
    pub filter: TaskFilter,
    /// Resolved ordering instruction.
    pub ordering: TaskOrdering,
    /// Pagination request; `None` returns the full ordered collection.
    pub page: Option<PageRequest>,
}

/// Result of a listing or search operation: the full ordered collection, or
/// one page of it with pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TaskListing {
    /// Every matching task, in query order.
    Complete(Vec<Task>),
    /// One page of matching tasks.
    Paged(TaskPage),
}

impl TaskListing {
    /// Returns the tasks in this listing, in query order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        match self {
            Self::Complete(tasks) => tasks,
            Self::Paged(page) => page.data(),
        }
    }

    /// Consumes the listing, returning its tasks.
    #[must_use]
    pub fn into_tasks(self) -> Vec<Task> {
        match self {
            Self::Complete(tasks) => tasks,
            Self::Paged(page) => page.into_data(),
        }
    }

    /// Returns pagination metadata when the listing is paged.
    #[must_use]
    pub const fn meta(&self) -> Option<&PageMeta> {
        match self {
            Self::Complete(_) => None,
            Self::Paged(page) => Some(page.meta()),
        }
    }

    /// Returns `true` when the listing holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks().is_empty()
    }
}
