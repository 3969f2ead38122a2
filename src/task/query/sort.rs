//! Sort resolution against a fixed allow-list of orderable fields.

use crate::task::domain::Task;
use std::cmp::Ordering;

/// Field a search may be ordered by.
///
/// The allow-list is a hard boundary: requests naming any other field fall
/// back to [`SortKey::CreatedAt`] instead of ordering by an arbitrary
/// column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Order by identifier.
    Id,
    /// Order by title.
    Title,
    /// Order by creation timestamp.
    CreatedAt,
    /// Order by last-update timestamp.
    UpdatedAt,
    /// Order by due date.
    DueDate,
}

impl SortKey {
    /// Key used when the request names no key, or an unknown one.
    pub const DEFAULT: Self = Self::CreatedAt;

    /// Resolves a requested key against the allow-list.
    ///
    /// Unknown or absent keys resolve to [`Self::DEFAULT`]; resolution never
    /// fails.
    #[must_use]
    pub fn resolve(requested: Option<&str>) -> Self {
        match requested.map(str::trim) {
            Some("id") => Self::Id,
            Some("title") => Self::Title,
            Some("created_at") => Self::CreatedAt,
            Some("updated_at") => Self::UpdatedAt,
            Some("due_date") => Self::DueDate,
            _ => Self::DEFAULT,
        }
    }

    /// Returns the canonical field name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
            Self::DueDate => "due_date",
        }
    }
}

/// Direction of an ordering instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    /// Smallest first.
    Asc,
    /// Largest first.
    Desc,
}

impl SortDirection {
    /// Resolves a requested direction.
    ///
    /// Only a case-insensitive `asc` yields [`Self::Asc`]; anything else,
    /// including an absent value, yields [`Self::Desc`].
    #[must_use]
    pub fn resolve(requested: Option<&str>) -> Self {
        match requested {
            Some(value) if value.trim().eq_ignore_ascii_case("asc") => Self::Asc,
            _ => Self::Desc,
        }
    }

    /// Returns the canonical direction name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Resolved `(field, direction)` ordering instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskOrdering {
    key: SortKey,
    direction: SortDirection,
}

impl TaskOrdering {
    /// Creates an ordering from already-resolved parts.
    #[must_use]
    pub const fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Resolves raw requested key and direction values.
    #[must_use]
    pub fn resolve(sort_by: Option<&str>, sort_dir: Option<&str>) -> Self {
        Self::new(SortKey::resolve(sort_by), SortDirection::resolve(sort_dir))
    }

    /// Returns the resolved sort key.
    #[must_use]
    pub const fn key(self) -> SortKey {
        self.key
    }

    /// Returns the resolved direction.
    #[must_use]
    pub const fn direction(self) -> SortDirection {
        self.direction
    }

    /// Compares two tasks under this ordering.
    ///
    /// Ties on the sort key are broken by identifier (in the same direction)
    /// so result order is deterministic rather than storage-dependent.
    #[must_use]
    pub fn compare(self, a: &Task, b: &Task) -> Ordering {
        let primary = match self.key {
            SortKey::Id => a.id().cmp(&b.id()),
            SortKey::Title => a.title().cmp(b.title()),
            SortKey::CreatedAt => a.created_at().cmp(&b.created_at()),
            SortKey::UpdatedAt => a.updated_at().cmp(&b.updated_at()),
            SortKey::DueDate => a.due_date().cmp(&b.due_date()),
        };
        let tied = primary.then_with(|| a.id().cmp(&b.id()));
        match self.direction {
            SortDirection::Asc => tied,
            SortDirection::Desc => tied.reverse(),
        }
    }
}

impl Default for TaskOrdering {
    /// Newest-first by creation timestamp, the listing default.
    fn default() -> Self {
        Self::new(SortKey::CreatedAt, SortDirection::Desc)
    }
}
