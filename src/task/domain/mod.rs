//! Domain model for task records.
//!
//! The task domain models the persisted task record and its invariants:
//! bounded title and description text, closed status and priority
//! enumerations, system-managed timestamps, and soft deletion. All
//! infrastructure concerns stay outside of the domain boundary.

mod error;
mod ids;
mod priority;
mod status;
mod task;
mod text;

pub use error::{ParseTaskPriorityError, ParseTaskStatusError, TaskDomainError};
pub use ids::TaskId;
pub use priority::TaskPriority;
pub use status::TaskStatus;
pub use task::{NewTaskData, PersistedTaskData, Task, TaskDraft, TaskPatch};
pub use text::{TaskDescription, TaskTitle};
