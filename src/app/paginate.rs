//! Client-side pagination over a fetched result list

/// One page of a result list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageView<'a, T> {
    /// 1-based page number that was requested
    pub page_number: usize,
    /// Items per page
    pub page_size: usize,
    /// `ceil(len / page_size)`, 0 for an empty list
    pub total_pages: usize,
    /// Items on this page, in list order
    pub items: &'a [T],
}

impl<T> PageView<'_, T> {
    /// Whether a previous page exists
    pub fn has_previous(&self) -> bool {
        self.page_number > 1 && self.page_number <= self.total_pages
    }

    /// Whether a following page exists
    pub fn has_next(&self) -> bool {
        self.page_number < self.total_pages
    }

    /// 1-based position of the first item on this page within the full list
    pub fn first_position(&self) -> usize {
        (self.page_number.saturating_sub(1)) * self.page_size + 1
    }
}

/// Slice `items` into page `page_number` (1-based) of `page_size` items
///
/// Out-of-range pages, page 0 and page size 0 give an empty slice; they are
/// never an error.
pub fn paginate<T>(items: &[T], page_size: usize, page_number: usize) -> PageView<'_, T> {
    let total_pages = if page_size == 0 {
        0
    } else {
        items.len().div_ceil(page_size)
    };

    let slice = if page_number == 0 || page_number > total_pages {
        &items[..0]
    } else {
        let start = (page_number - 1) * page_size;
        let end = (start + page_size).min(items.len());
        &items[start..end]
    };

    PageView {
        page_number,
        page_size,
        total_pages,
        items: slice,
    }
}

/// Bring `page_number` into `1..=total_pages` (1 when there are no pages)
pub fn clamp_page(page_number: usize, total_pages: usize) -> usize {
    page_number.clamp(1, total_pages.max(1))
}
