//! Pagination stage and page-number window

/// Number of pages for `len` items, 0 when there are none
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if len == 0 { 0 } else { len.div_ceil(page_size.max(1)) }
}

/// One 1-based page of `items`
///
/// Pages past the end yield an empty slice; page 0 reads as page 1.
pub fn page_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let page_size = page_size.max(1);
    let start = (page.max(1) - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Page numbers to show as buttons
///
/// At most `width` consecutive pages centered on `current`, shifted to stay
/// inside `[1, total_pages]`.
pub fn page_window(current: usize, total_pages: usize, width: usize) -> Vec<usize> {
    if total_pages == 0 || width == 0 {
        return Vec::new();
    }

    let current = current.clamp(1, total_pages);
    let width = width.min(total_pages);
    let start = current.saturating_sub(width / 2).max(1);
    let end = (start + width - 1).min(total_pages);
    let start = end + 1 - width;

    (start..=end).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 7), 0);
        assert_eq!(total_pages(7, 7), 1);
        assert_eq!(total_pages(12, 7), 2);
        assert_eq!(total_pages(3, 0), 3);
    }

    #[test]
    fn test_page_slice_bounds() {
        let items: Vec<u32> = (1..=12).collect();
        assert_eq!(page_slice(&items, 1, 7), &[1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(page_slice(&items, 2, 7), &[8, 9, 10, 11, 12]);
        assert!(page_slice(&items, 3, 7).is_empty());
        assert_eq!(page_slice(&items, 0, 7), page_slice(&items, 1, 7));
    }

    #[test]
    fn test_page_window_centered() {
        assert_eq!(page_window(5, 10, 5), vec![3, 4, 5, 6, 7]);
        assert_eq!(page_window(1, 10, 5), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(10, 10, 5), vec![6, 7, 8, 9, 10]);
        assert_eq!(page_window(9, 10, 5), vec![6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_page_window_small_and_empty() {
        assert_eq!(page_window(2, 3, 5), vec![1, 2, 3]);
        assert_eq!(page_window(1, 0, 5), Vec::<usize>::new());
        assert_eq!(page_window(40, 3, 5), vec![1, 2, 3]);
    }
}
