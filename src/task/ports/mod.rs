//! Port contracts for task persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod repository;

pub use repository::{
    RawTaskCounts, TaskRepository, TaskRepositoryError, TaskRepositoryResult,
};

#[cfg(test)]
pub(crate) use repository::MockTaskRepository;
