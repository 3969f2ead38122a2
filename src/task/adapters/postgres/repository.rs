//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{
        PersistedTaskData, Task, TaskDescription, TaskDraft, TaskId, TaskPriority, TaskStatus,
        TaskTitle,
    },
    ports::{RawTaskCounts, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
    query::{PageMeta, SortDirection, SortKey, TaskListing, TaskOrdering, TaskPage, TaskQuery},
};
use async_trait::async_trait;
use diesel::dsl::count_star;
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use std::collections::BTreeMap;

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// Boxed dynamically-composed query over the tasks table.
type BoxedTaskQuery<'a> = tasks::BoxedQuery<'a, Pg>;

/// Applies the filter criteria to a boxed tasks query.
///
/// A macro rather than a function so the same criteria can be applied to
/// both the row query and the count query, whose boxed types differ.
macro_rules! apply_task_filter {
    ($query:ident, $filter:expr) => {
        $query = $query.filter(tasks::deleted_at.is_null());
        if let Some(id) = $filter.id() {
            $query = $query.filter(tasks::id.eq(id.into_inner()));
        }
        if let Some(needle) = $filter.title_contains() {
            $query = $query.filter(tasks::title.ilike(contains_pattern(needle)));
        }
        if let Some(needle) = $filter.description_contains() {
            $query = $query.filter(tasks::description.ilike(contains_pattern(needle)));
        }
        if let Some(status) = $filter.status() {
            $query = $query.filter(tasks::status.eq(status.as_str()));
        }
        if let Some(priority) = $filter.priority() {
            $query = $query.filter(tasks::priority.eq(priority.as_str()));
        }
        if let Some(bound) = $filter.due_date_from() {
            $query = $query.filter(tasks::due_date.ge(bound));
        }
        if let Some(bound) = $filter.due_date_to() {
            $query = $query.filter(tasks::due_date.le(bound));
        }
        if let Some(bound) = $filter.created_from() {
            $query = $query.filter(tasks::created_at.ge(bound));
        }
        if let Some(bound) = $filter.created_to() {
            $query = $query.filter(tasks::created_at.le(bound));
        }
        if let Some(bound) = $filter.updated_from() {
            $query = $query.filter(tasks::updated_at.ge(bound));
        }
        if let Some(bound) = $filter.updated_to() {
            $query = $query.filter(tasks::updated_at.le(bound));
        }
    };
}

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::storage)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::storage)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn insert(&self, draft: &TaskDraft) -> TaskRepositoryResult<Task> {
        let new_row = to_new_row(draft);
        self.run_blocking(move |connection| {
            let row = diesel::insert_into(tasks::table)
                .values(&new_row)
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .map_err(TaskRepositoryError::storage)?;
            row_to_task(row)
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let id = task.id();
        let changeset = to_changeset(task);
        self.run_blocking(move |connection| {
            let affected = diesel::update(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .set(&changeset)
                .execute(connection)
                .map_err(TaskRepositoryError::storage)?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .filter(tasks::deleted_at.is_null())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::storage)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn find_by_id_any(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::storage)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn search(&self, query: &TaskQuery) -> TaskRepositoryResult<TaskListing> {
        let search = query.clone();
        self.run_blocking(move |connection| match search.page {
            Some(request) => {
                let mut count_query = tasks::table.count().into_boxed();
                apply_task_filter!(count_query, search.filter);
                let total_rows: i64 = count_query
                    .get_result(connection)
                    .map_err(TaskRepositoryError::storage)?;
                let total = u64::try_from(total_rows).map_err(TaskRepositoryError::storage)?;

                let meta = PageMeta::compute(total, request);
                let data = match request.window(total) {
                    Some(window) => {
                        let mut rows_query = tasks::table.into_boxed();
                        apply_task_filter!(rows_query, search.filter);
                        rows_query = apply_ordering(rows_query, search.ordering);
                        let offset =
                            i64::try_from(window.offset).map_err(TaskRepositoryError::storage)?;
                        let rows = rows_query
                            .limit(i64::from(window.limit))
                            .offset(offset)
                            .load::<TaskRow>(connection)
                            .map_err(TaskRepositoryError::storage)?;
                        rows_to_tasks(rows)?
                    }
                    None => Vec::new(),
                };
                Ok(TaskListing::Paged(TaskPage::new(data, meta)))
            }
            None => {
                let mut rows_query = tasks::table.into_boxed();
                apply_task_filter!(rows_query, search.filter);
                rows_query = apply_ordering(rows_query, search.ordering);
                let rows = rows_query
                    .load::<TaskRow>(connection)
                    .map_err(TaskRepositoryError::storage)?;
                Ok(TaskListing::Complete(rows_to_tasks(rows)?))
            }
        })
        .await
    }

    async fn raw_statistics(&self) -> TaskRepositoryResult<RawTaskCounts> {
        self.run_blocking(move |connection| {
            let total_rows: i64 = tasks::table
                .filter(tasks::deleted_at.is_null())
                .count()
                .get_result(connection)
                .map_err(TaskRepositoryError::storage)?;

            let status_rows: Vec<(String, i64)> = tasks::table
                .filter(tasks::deleted_at.is_null())
                .group_by(tasks::status)
                .select((tasks::status, count_star()))
                .load(connection)
                .map_err(TaskRepositoryError::storage)?;

            let priority_rows: Vec<(String, i64)> = tasks::table
                .filter(tasks::deleted_at.is_null())
                .group_by(tasks::priority)
                .select((tasks::priority, count_star()))
                .load(connection)
                .map_err(TaskRepositoryError::storage)?;

            let mut by_status = BTreeMap::new();
            for (name, count) in status_rows {
                let status =
                    TaskStatus::try_from(name.as_str()).map_err(TaskRepositoryError::storage)?;
                by_status
                    .insert(status, u64::try_from(count).map_err(TaskRepositoryError::storage)?);
            }

            let mut by_priority = BTreeMap::new();
            for (name, count) in priority_rows {
                let priority =
                    TaskPriority::try_from(name.as_str()).map_err(TaskRepositoryError::storage)?;
                by_priority
                    .insert(priority, u64::try_from(count).map_err(TaskRepositoryError::storage)?);
            }

            Ok(RawTaskCounts {
                total: u64::try_from(total_rows).map_err(TaskRepositoryError::storage)?,
                by_status,
                by_priority,
            })
        })
        .await
    }
}

/// Applies the resolved ordering plus the identifier tiebreaker.
fn apply_ordering(query: BoxedTaskQuery<'static>, ordering: TaskOrdering) -> BoxedTaskQuery<'static> {
    match (ordering.key(), ordering.direction()) {
        (SortKey::Id, SortDirection::Asc) => query.order(tasks::id.asc()),
        (SortKey::Id, SortDirection::Desc) => query.order(tasks::id.desc()),
        (SortKey::Title, SortDirection::Asc) => {
            query.order(tasks::title.asc()).then_order_by(tasks::id.asc())
        }
        (SortKey::Title, SortDirection::Desc) => {
            query.order(tasks::title.desc()).then_order_by(tasks::id.desc())
        }
        (SortKey::CreatedAt, SortDirection::Asc) => query
            .order(tasks::created_at.asc())
            .then_order_by(tasks::id.asc()),
        (SortKey::CreatedAt, SortDirection::Desc) => query
            .order(tasks::created_at.desc())
            .then_order_by(tasks::id.desc()),
        (SortKey::UpdatedAt, SortDirection::Asc) => query
            .order(tasks::updated_at.asc())
            .then_order_by(tasks::id.asc()),
        (SortKey::UpdatedAt, SortDirection::Desc) => query
            .order(tasks::updated_at.desc())
            .then_order_by(tasks::id.desc()),
        (SortKey::DueDate, SortDirection::Asc) => query
            .order(tasks::due_date.asc())
            .then_order_by(tasks::id.asc()),
        (SortKey::DueDate, SortDirection::Desc) => query
            .order(tasks::due_date.desc())
            .then_order_by(tasks::id.desc()),
    }
}

/// Builds an `ILIKE` pattern matching the needle anywhere, escaping the
/// pattern metacharacters.
fn contains_pattern(needle: &str) -> String {
    let escaped = needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

fn to_new_row(draft: &TaskDraft) -> NewTaskRow {
    NewTaskRow {
        title: draft.title().as_str().to_owned(),
        description: draft.description().as_str().to_owned(),
        status: draft.status().as_str().to_owned(),
        priority: draft.priority().as_str().to_owned(),
        due_date: draft.due_date(),
        created_at: draft.created_at(),
        updated_at: draft.updated_at(),
    }
}

fn to_changeset(task: &Task) -> TaskChangeset {
    TaskChangeset {
        title: task.title().as_str().to_owned(),
        description: task.description().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        priority: task.priority().as_str().to_owned(),
        due_date: task.due_date(),
        updated_at: task.updated_at(),
        deleted_at: task.deleted_at(),
    }
}

fn rows_to_tasks(rows: Vec<TaskRow>) -> TaskRepositoryResult<Vec<Task>> {
    rows.into_iter().map(row_to_task).collect()
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let status = TaskStatus::try_from(row.status.as_str()).map_err(TaskRepositoryError::storage)?;
    let priority =
        TaskPriority::try_from(row.priority.as_str()).map_err(TaskRepositoryError::storage)?;
    let title = TaskTitle::new(row.title).map_err(TaskRepositoryError::storage)?;
    let description =
        TaskDescription::new(row.description).map_err(TaskRepositoryError::storage)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::new(row.id),
        title,
        description,
        status,
        priority,
        due_date: row.due_date,
        created_at: row.created_at,
        updated_at: row.updated_at,
        deleted_at: row.deleted_at,
    }))
}
