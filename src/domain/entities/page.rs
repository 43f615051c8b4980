//! One page of an ordered listing.

/// A page of items plus the numbers needed to render pagination links.
///
/// Pages are 1-indexed. An empty listing still has one (empty) page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: u32,
    pub page_size: u32,
    pub total: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, number: u32, page_size: u32, total: i64) -> Self {
        Self {
            items,
            number,
            page_size,
            total,
        }
    }

    /// Number of pages needed for `total` items, never less than one.
    pub fn num_pages(&self) -> u32 {
        num_pages(self.total, self.page_size)
    }

    pub fn previous(&self) -> Option<u32> {
        (self.number > 1).then(|| self.number - 1)
    }

    pub fn next(&self) -> Option<u32> {
        (self.number < self.num_pages()).then(|| self.number + 1)
    }
}

/// Number of pages for `total` items of `page_size` each (at least 1).
pub fn num_pages(total: i64, page_size: u32) -> u32 {
    if total <= 0 || page_size == 0 {
        return 1;
    }
    let size = i64::from(page_size);
    u32::try_from((total + size - 1) / size).unwrap_or(u32::MAX)
}
