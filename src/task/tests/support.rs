//! Shared fixtures for task tests.

use crate::task::domain::{
    PersistedTaskData, Task, TaskDescription, TaskId, TaskPriority, TaskStatus, TaskTitle,
};
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use std::sync::atomic::{AtomicI64, Ordering};

/// Deterministic clock advancing one second per reading.
///
/// Gives consecutive operations strictly increasing timestamps, so
/// creation-order assertions do not depend on wall-clock resolution.
#[derive(Debug)]
pub(crate) struct StepClock {
    base: DateTime<Utc>,
    ticks: AtomicI64,
}

impl StepClock {
    pub(crate) fn starting_at(base: DateTime<Utc>) -> Self {
        Self {
            base,
            ticks: AtomicI64::new(0),
        }
    }
}

impl Default for StepClock {
    fn default() -> Self {
        Self::starting_at(utc(2025, 6, 1, 8, 0, 0))
    }
}

impl Clock for StepClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let step = self.ticks.fetch_add(1, Ordering::SeqCst);
        self.base + Duration::seconds(step)
    }
}

/// Builds a UTC timestamp from calendar parts.
pub(crate) fn utc(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
        .single()
        .expect("valid timestamp")
}

/// Seed values for constructing a persisted task directly in tests.
pub(crate) struct TaskSeed {
    pub id: i64,
    pub title: &'static str,
    pub description: &'static str,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for TaskSeed {
    fn default() -> Self {
        Self {
            id: 1,
            title: "Write quarterly report",
            description: "Summarise revenue and churn for Q2",
            status: TaskStatus::Pending,
            priority: TaskPriority::Medium,
            due_date: utc(2025, 7, 1, 12, 0, 0),
            created_at: utc(2025, 6, 1, 9, 0, 0),
            updated_at: utc(2025, 6, 1, 9, 0, 0),
        }
    }
}

/// Reconstructs a task from seed values, bypassing the service layer.
pub(crate) fn seeded_task(seed: TaskSeed) -> Task {
    Task::from_persisted(PersistedTaskData {
        id: TaskId::new(seed.id),
        title: TaskTitle::new(seed.title).expect("valid seed title"),
        description: TaskDescription::new(seed.description).expect("valid seed description"),
        status: seed.status,
        priority: seed.priority,
        due_date: seed.due_date,
        created_at: seed.created_at,
        updated_at: seed.updated_at,
        deleted_at: None,
    })
}
