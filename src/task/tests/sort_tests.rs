//! Resolution and comparison tests for the sort resolver.

use super::support::{TaskSeed, seeded_task, utc};
use crate::task::query::{SortDirection, SortKey, TaskOrdering};
use rstest::rstest;
use std::cmp::Ordering;

#[rstest]
#[case(Some("id"), SortKey::Id)]
#[case(Some("title"), SortKey::Title)]
#[case(Some("created_at"), SortKey::CreatedAt)]
#[case(Some("updated_at"), SortKey::UpdatedAt)]
#[case(Some("due_date"), SortKey::DueDate)]
fn sort_key_resolves_allow_listed_fields(#[case] raw: Option<&str>, #[case] expected: SortKey) {
    assert_eq!(SortKey::resolve(raw), expected);
}

#[rstest]
#[case(None)]
#[case(Some("priority"))]
#[case(Some("password"))]
#[case(Some("created_at; DROP TABLE tasks"))]
fn sort_key_falls_back_to_created_at(#[case] raw: Option<&str>) {
    assert_eq!(SortKey::resolve(raw), SortKey::CreatedAt);
}

#[rstest]
#[case(Some("asc"))]
#[case(Some("ASC"))]
#[case(Some(" Asc "))]
fn sort_direction_accepts_asc_case_insensitively(#[case] raw: Option<&str>) {
    assert_eq!(SortDirection::resolve(raw), SortDirection::Asc);
}

#[rstest]
#[case(None)]
#[case(Some("desc"))]
#[case(Some("descending"))]
#[case(Some("sideways"))]
fn sort_direction_defaults_to_desc(#[case] raw: Option<&str>) {
    assert_eq!(SortDirection::resolve(raw), SortDirection::Desc);
}

#[rstest]
fn default_ordering_is_newest_first() {
    let ordering = TaskOrdering::default();
    assert_eq!(ordering.key(), SortKey::CreatedAt);
    assert_eq!(ordering.direction(), SortDirection::Desc);
    assert_eq!(ordering, TaskOrdering::resolve(None, None));
}

#[rstest]
fn compare_orders_by_created_at_ascending() {
    let older = seeded_task(TaskSeed {
        id: 1,
        created_at: utc(2025, 6, 1, 9, 0, 0),
        ..TaskSeed::default()
    });
    let newer = seeded_task(TaskSeed {
        id: 2,
        created_at: utc(2025, 6, 2, 9, 0, 0),
        ..TaskSeed::default()
    });

    let ascending = TaskOrdering::new(SortKey::CreatedAt, SortDirection::Asc);
    assert_eq!(ascending.compare(&older, &newer), Ordering::Less);

    let descending = TaskOrdering::new(SortKey::CreatedAt, SortDirection::Desc);
    assert_eq!(descending.compare(&older, &newer), Ordering::Greater);
}

#[rstest]
fn compare_breaks_ties_by_identifier_in_the_same_direction() {
    let shared = utc(2025, 6, 1, 9, 0, 0);
    let first = seeded_task(TaskSeed {
        id: 1,
        created_at: shared,
        ..TaskSeed::default()
    });
    let second = seeded_task(TaskSeed {
        id: 2,
        created_at: shared,
        ..TaskSeed::default()
    });

    let ascending = TaskOrdering::new(SortKey::CreatedAt, SortDirection::Asc);
    assert_eq!(ascending.compare(&first, &second), Ordering::Less);

    let descending = TaskOrdering::new(SortKey::CreatedAt, SortDirection::Desc);
    assert_eq!(descending.compare(&first, &second), Ordering::Greater);
}

#[rstest]
fn compare_orders_titles_lexicographically() {
    let alpha = seeded_task(TaskSeed {
        id: 1,
        title: "Archive old boards",
        ..TaskSeed::default()
    });
    let zulu = seeded_task(TaskSeed {
        id: 2,
        title: "Zip the exports",
        ..TaskSeed::default()
    });

    let ascending = TaskOrdering::new(SortKey::Title, SortDirection::Asc);
    assert_eq!(ascending.compare(&alpha, &zulu), Ordering::Less);
}

#[rstest]
fn compare_orders_by_due_date() {
    let sooner = seeded_task(TaskSeed {
        id: 1,
        due_date: utc(2025, 7, 1, 9, 0, 0),
        ..TaskSeed::default()
    });
    let later = seeded_task(TaskSeed {
        id: 2,
        due_date: utc(2025, 8, 1, 9, 0, 0),
        ..TaskSeed::default()
    });

    let descending = TaskOrdering::new(SortKey::DueDate, SortDirection::Desc);
    assert_eq!(descending.compare(&sooner, &later), Ordering::Greater);
}
