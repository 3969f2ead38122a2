//! Domain-focused tests for task record invariants.

use super::support::{StepClock, TaskSeed, seeded_task, utc};
use crate::task::domain::{
    NewTaskData, Task, TaskDescription, TaskDomainError, TaskDraft, TaskId, TaskPatch,
    TaskPriority, TaskStatus, TaskTitle,
};
use mockable::Clock;
use rstest::rstest;

#[rstest]
fn title_trims_surrounding_whitespace() {
    let title = TaskTitle::new("  Ship the release  ").expect("valid title");
    assert_eq!(title.as_str(), "Ship the release");
}

#[rstest]
fn title_rejects_blank_values() {
    assert_eq!(TaskTitle::new("   "), Err(TaskDomainError::EmptyTitle));
}

#[rstest]
fn title_rejects_values_over_the_limit() {
    let result = TaskTitle::new("x".repeat(101));
    assert_eq!(
        result,
        Err(TaskDomainError::TitleTooLong {
            max: 100,
            actual: 101
        })
    );
}

#[rstest]
fn title_accepts_exactly_the_limit() {
    let title = TaskTitle::new("x".repeat(100)).expect("valid title");
    assert_eq!(title.as_str().len(), 100);
}

#[rstest]
fn description_rejects_blank_values() {
    assert_eq!(
        TaskDescription::new(" \t "),
        Err(TaskDomainError::EmptyDescription)
    );
}

#[rstest]
fn description_rejects_values_over_the_limit() {
    let result = TaskDescription::new("d".repeat(501));
    assert_eq!(
        result,
        Err(TaskDomainError::DescriptionTooLong {
            max: 500,
            actual: 501
        })
    );
}

#[rstest]
#[case("pending", TaskStatus::Pending)]
#[case("in_progress", TaskStatus::InProgress)]
#[case("completed", TaskStatus::Completed)]
#[case(" COMPLETED ", TaskStatus::Completed)]
fn status_parses_canonical_and_padded_values(#[case] raw: &str, #[case] expected: TaskStatus) {
    assert_eq!(TaskStatus::try_from(raw), Ok(expected));
}

#[rstest]
fn status_rejects_unknown_values() {
    assert!(TaskStatus::try_from("archived").is_err());
}

#[rstest]
fn status_round_trips_through_storage_representation() {
    for status in TaskStatus::ALL {
        assert_eq!(TaskStatus::try_from(status.as_str()), Ok(status));
    }
}

#[rstest]
fn priority_round_trips_through_storage_representation() {
    for priority in TaskPriority::ALL {
        assert_eq!(TaskPriority::try_from(priority.as_str()), Ok(priority));
    }
}

#[rstest]
fn creation_defaults_are_pending_and_medium() {
    assert_eq!(TaskStatus::default(), TaskStatus::Pending);
    assert_eq!(TaskPriority::default(), TaskPriority::Medium);
}

#[rstest]
fn new_task_data_applies_defaults_and_overrides() {
    let title = TaskTitle::new("Review backlog").expect("valid title");
    let description = TaskDescription::new("Groom the sprint backlog").expect("valid description");
    let due = utc(2025, 7, 15, 17, 0, 0);

    let clock = StepClock::default();
    let defaulted = TaskDraft::new(NewTaskData::new(title.clone(), description.clone(), due), &clock);
    assert_eq!(defaulted.status(), TaskStatus::Pending);
    assert_eq!(defaulted.priority(), TaskPriority::Medium);

    let overridden = TaskDraft::new(
        NewTaskData::new(title, description, due)
            .with_status(TaskStatus::InProgress)
            .with_priority(TaskPriority::High),
        &clock,
    );
    assert_eq!(overridden.status(), TaskStatus::InProgress);
    assert_eq!(overridden.priority(), TaskPriority::High);
}

#[rstest]
fn draft_stamps_equal_creation_and_update_timestamps() {
    let clock = StepClock::default();
    let draft = TaskDraft::new(
        NewTaskData::new(
            TaskTitle::new("Prepare demo").expect("valid title"),
            TaskDescription::new("Walk through the new search flow").expect("valid description"),
            utc(2025, 7, 2, 9, 0, 0),
        ),
        &clock,
    );
    assert_eq!(draft.created_at(), draft.updated_at());
}

#[rstest]
fn from_draft_assigns_identifier_and_live_state() {
    let clock = StepClock::default();
    let draft = TaskDraft::new(
        NewTaskData::new(
            TaskTitle::new("Prepare demo").expect("valid title"),
            TaskDescription::new("Walk through the new search flow").expect("valid description"),
            utc(2025, 7, 2, 9, 0, 0),
        ),
        &clock,
    );
    let task = Task::from_draft(TaskId::new(7), &draft);

    assert_eq!(task.id(), TaskId::new(7));
    assert!(!task.is_deleted());
    assert_eq!(task.created_at(), draft.created_at());
}

#[rstest]
fn patch_changes_only_supplied_fields_and_touches_updated_at() {
    let mut task = seeded_task(TaskSeed::default());
    let clock = StepClock::starting_at(utc(2025, 6, 2, 9, 0, 0));
    let original_title = task.title().clone();
    let original_due = task.due_date();

    task.apply_patch(
        TaskPatch::new()
            .with_status(TaskStatus::Completed)
            .with_priority(TaskPriority::Low),
        &clock,
    );

    assert_eq!(task.status(), TaskStatus::Completed);
    assert_eq!(task.priority(), TaskPriority::Low);
    assert_eq!(task.title(), &original_title);
    assert_eq!(task.due_date(), original_due);
    assert!(task.updated_at() > task.created_at());
}

#[rstest]
fn patch_permits_reverting_completed_to_pending() {
    let mut task = seeded_task(TaskSeed {
        status: TaskStatus::Completed,
        ..TaskSeed::default()
    });
    let clock = StepClock::starting_at(utc(2025, 6, 2, 9, 0, 0));

    task.apply_patch(TaskPatch::new().with_status(TaskStatus::Pending), &clock);

    assert_eq!(task.status(), TaskStatus::Pending);
}

#[rstest]
fn empty_patch_reports_empty() {
    assert!(TaskPatch::new().is_empty());
    assert!(!TaskPatch::new().with_status(TaskStatus::Completed).is_empty());
}

#[rstest]
fn mark_deleted_sets_marker_and_touches_updated_at() {
    let mut task = seeded_task(TaskSeed::default());
    let clock = StepClock::starting_at(utc(2025, 6, 3, 9, 0, 0));

    task.mark_deleted(&clock);

    assert!(task.is_deleted());
    assert_eq!(task.deleted_at(), Some(clock.utc() - chrono::Duration::seconds(1)));
    assert_eq!(task.updated_at(), task.deleted_at().expect("deleted marker"));
}

#[rstest]
fn task_serialises_to_camel_case_without_deletion_marker() {
    let task = seeded_task(TaskSeed {
        status: TaskStatus::InProgress,
        ..TaskSeed::default()
    });
    let value = serde_json::to_value(&task).expect("serialisable task");
    let object = value.as_object().expect("JSON object");

    for key in [
        "id",
        "title",
        "description",
        "status",
        "priority",
        "dueDate",
        "createdAt",
        "updatedAt",
    ] {
        assert!(object.contains_key(key), "missing key {key}");
    }
    assert!(!object.contains_key("deletedAt"));
    assert!(!object.contains_key("deleted_at"));
    assert_eq!(object.get("status"), Some(&serde_json::json!("in_progress")));
}
