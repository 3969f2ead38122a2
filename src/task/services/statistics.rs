//! Statistics aggregation over the task collection.

use crate::task::domain::{TaskPriority, TaskStatus};
use crate::task::ports::RawTaskCounts;
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregated task counts: the total plus per-status and per-priority
/// breakdowns.
///
/// Both breakdowns always carry every enumeration value as a key. Storage
/// reports observed categories only (group-by semantics), so the aggregator
/// reconciles the raw counts against the full enum domains, filling absent
/// categories with zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatistics {
    total_tasks: u64,
    by_status: BTreeMap<TaskStatus, u64>,
    by_priority: BTreeMap<TaskPriority, u64>,
}

impl TaskStatistics {
    /// Reconciles raw storage counts against the full enum domains.
    #[must_use]
    pub fn from_raw(raw: &RawTaskCounts) -> Self {
        let by_status = TaskStatus::ALL
            .into_iter()
            .map(|status| (status, raw.by_status.get(&status).copied().unwrap_or(0)))
            .collect();
        let by_priority = TaskPriority::ALL
            .into_iter()
            .map(|priority| (priority, raw.by_priority.get(&priority).copied().unwrap_or(0)))
            .collect();
        Self {
            total_tasks: raw.total,
            by_status,
            by_priority,
        }
    }

    /// Returns the count of all non-deleted tasks.
    #[must_use]
    pub const fn total_tasks(&self) -> u64 {
        self.total_tasks
    }

    /// Returns counts keyed by every status value.
    #[must_use]
    pub const fn by_status(&self) -> &BTreeMap<TaskStatus, u64> {
        &self.by_status
    }

    /// Returns counts keyed by every priority value.
    #[must_use]
    pub const fn by_priority(&self) -> &BTreeMap<TaskPriority, u64> {
        &self.by_priority
    }
}
