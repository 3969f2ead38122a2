//! Application services for task querying and lifecycle.

mod query;
mod statistics;

pub use query::{TaskQueryError, TaskQueryResult, TaskQueryService};
pub use statistics::TaskStatistics;
