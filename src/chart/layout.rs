//! Pagination of panels.

/// Split `items` into pages of up to `per_page`; the last page may be partial.
pub fn pages<T>(items: &[T], per_page: usize) -> Vec<&[T]> {
    items.chunks(per_page.max(1)).collect()
}

/// Number of pages needed for `items` panels.
#[inline]
pub fn page_count(items: usize, per_page: usize) -> usize {
    items.div_ceil(per_page.max(1))
}
