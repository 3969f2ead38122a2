//! Pagination: validated page sizes, page metadata, and result slicing.

use crate::task::domain::Task;
use serde::Serialize;
use thiserror::Error;

/// Errors returned while constructing pagination values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PageBoundsError {
    /// The page size falls outside the permitted range.
    #[error("per_page must be between {min} and {max}, got {actual}", min = PerPage::MIN, max = PerPage::MAX)]
    PerPageOutOfRange {
        /// Requested page size.
        actual: u32,
    },

    /// The page number is not positive.
    #[error("page must be at least 1, got {actual}")]
    PageNumberOutOfRange {
        /// Requested page number.
        actual: u32,
    },
}

/// Validated page size, between 1 and 100 items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PerPage(u32);

impl PerPage {
    /// Smallest permitted page size.
    pub const MIN: u32 = 1;
    /// Largest permitted page size.
    pub const MAX: u32 = 100;
    /// Page size used when a listing request names none.
    pub const DEFAULT: Self = Self(10);

    /// Creates a validated page size.
    ///
    /// # Errors
    ///
    /// Returns [`PageBoundsError::PerPageOutOfRange`] when the value falls
    /// outside `1..=100`.
    pub const fn new(value: u32) -> Result<Self, PageBoundsError> {
        if value < Self::MIN || value > Self::MAX {
            return Err(PageBoundsError::PerPageOutOfRange { actual: value });
        }
        Ok(Self(value))
    }

    /// Returns the page size value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// Request for one page of an ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    per_page: PerPage,
    page: u32,
}

impl PageRequest {
    /// Creates a request for the given 1-indexed page.
    ///
    /// # Errors
    ///
    /// Returns [`PageBoundsError::PageNumberOutOfRange`] when the page
    /// number is zero.
    pub const fn new(per_page: PerPage, page: u32) -> Result<Self, PageBoundsError> {
        if page == 0 {
            return Err(PageBoundsError::PageNumberOutOfRange { actual: page });
        }
        Ok(Self { per_page, page })
    }

    /// Creates a request for the first page.
    #[must_use]
    pub const fn first(per_page: PerPage) -> Self {
        Self { per_page, page: 1 }
    }

    /// Returns the page size.
    #[must_use]
    pub const fn per_page(self) -> PerPage {
        self.per_page
    }

    /// Returns the 1-indexed page number.
    #[must_use]
    pub const fn page(self) -> u32 {
        self.page
    }

    /// Returns the slice window for this request over `total` rows.
    ///
    /// Returns `None` when the result set is empty or the requested page
    /// lies beyond the last page; such requests yield an empty slice.
    #[must_use]
    pub fn window(self, total: u64) -> Option<PageWindow> {
        let per_page = u64::from(self.per_page.get());
        let last_page = last_page(total, per_page);
        let requested = u64::from(self.page);
        if total == 0 || requested > last_page {
            return None;
        }
        Some(PageWindow {
            offset: (requested - 1) * per_page,
            limit: self.per_page.get(),
        })
    }
}

/// Offset/limit window into an ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Number of rows to skip.
    pub offset: u64,
    /// Maximum number of rows to take.
    pub limit: u32,
}

/// Pagination metadata accompanying one page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    current_page: u32,
    last_page: u32,
    per_page: u32,
    total: u64,
    from: Option<u64>,
    to: Option<u64>,
}

impl PageMeta {
    /// Computes metadata for a page request over `total` matching rows.
    ///
    /// `last_page` is `ceil(total / per_page)`, never below 1. A request
    /// beyond the last page is clamped: `current_page` reports the last
    /// page while `from`/`to` are `None` for the empty slice.
    #[must_use]
    pub fn compute(total: u64, request: PageRequest) -> Self {
        let per_page = u64::from(request.per_page().get());
        let last = last_page(total, per_page);
        let bounds = request.window(total).map(|window| {
            let from = window.offset + 1;
            let to = (window.offset + per_page).min(total);
            (from, to)
        });
        Self {
            current_page: u64::from(request.page()).min(last).try_into().unwrap_or(u32::MAX),
            last_page: last.try_into().unwrap_or(u32::MAX),
            per_page: request.per_page().get(),
            total,
            from: bounds.map(|(from, _)| from),
            to: bounds.map(|(_, to)| to),
        }
    }

    /// Returns the 1-indexed page this metadata describes.
    #[must_use]
    pub const fn current_page(self) -> u32 {
        self.current_page
    }

    /// Returns the index of the final page (at least 1).
    #[must_use]
    pub const fn last_page(self) -> u32 {
        self.last_page
    }

    /// Returns the page size.
    #[must_use]
    pub const fn per_page(self) -> u32 {
        self.per_page
    }

    /// Returns the count of all matching rows before slicing.
    #[must_use]
    pub const fn total(self) -> u64 {
        self.total
    }

    /// Returns the 1-indexed position of the first returned row, or `None`
    /// for an empty slice.
    #[must_use]
    pub const fn from(self) -> Option<u64> {
        self.from
    }

    /// Returns the 1-indexed position of the last returned row, or `None`
    /// for an empty slice.
    #[must_use]
    pub const fn to(self) -> Option<u64> {
        self.to
    }
}

/// One page of tasks plus its pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskPage {
    data: Vec<Task>,
    meta: PageMeta,
}

impl TaskPage {
    /// Assembles a page from already-sliced rows and their metadata.
    #[must_use]
    pub const fn new(data: Vec<Task>, meta: PageMeta) -> Self {
        Self { data, meta }
    }

    /// Slices an already-ordered, fully-materialised result set.
    #[must_use]
    pub fn from_ordered(tasks: Vec<Task>, request: PageRequest) -> Self {
        let total = u64::try_from(tasks.len()).unwrap_or(u64::MAX);
        let meta = PageMeta::compute(total, request);
        let data = request.window(total).map_or_else(Vec::new, |window| {
            let offset = usize::try_from(window.offset).unwrap_or(usize::MAX);
            tasks
                .into_iter()
                .skip(offset)
                .take(usize::try_from(window.limit).unwrap_or(usize::MAX))
                .collect()
        });
        Self { data, meta }
    }

    /// Returns the tasks on this page.
    #[must_use]
    pub fn data(&self) -> &[Task] {
        &self.data
    }

    /// Consumes the page, returning its tasks.
    #[must_use]
    pub fn into_data(self) -> Vec<Task> {
        self.data
    }

    /// Returns the pagination metadata.
    #[must_use]
    pub const fn meta(&self) -> &PageMeta {
        &self.meta
    }
}

/// Final page index for `total` rows at `per_page` rows each, at least 1.
const fn last_page(total: u64, per_page: u64) -> u64 {
    let pages = total.div_ceil(per_page);
    if pages == 0 { 1 } else { pages }
}
