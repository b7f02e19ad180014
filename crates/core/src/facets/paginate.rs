//! Fixed-size page slicing.

use serde::Serialize;

/// Default number of products per collection page.
pub const DEFAULT_PAGE_SIZE: usize = 48;

/// One page of a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// 1-based page number that was requested.
    pub page_number: usize,
    /// Whether a later page has items.
    pub has_next_page: bool,
    /// Whether an earlier page exists.
    pub has_previous_page: bool,
}

/// Slice page `page_number` (1-based) of `page_size` items out of `items`.
///
/// Page numbers past the end give an empty page; they are not clamped.
/// A `page_number` of 0 is treated as 1 and a `page_size` of 0 as 1.
#[must_use]
pub fn paginate<T: Clone>(items: &[T], page_number: usize, page_size: usize) -> Page<T> {
    let page_number = page_number.max(1);
    let page_size = page_size.max(1);

    let start = (page_number - 1).saturating_mul(page_size);
    let end = start.saturating_add(page_size);

    let page_items = items
        .get(start..end.min(items.len()))
        .map(<[T]>::to_vec)
        .unwrap_or_default();

    Page {
        items: page_items,
        page_number,
        has_next_page: end < items.len(),
        has_previous_page: page_number > 1,
    }
}

/// Number of pages needed for `total` items (0 when empty).
#[must_use]
pub const fn total_pages(total: usize, page_size: usize) -> usize {
    let page_size = if page_size == 0 { 1 } else { page_size };
    total.div_ceil(page_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn test_first_page() {
        let page = paginate(&numbers(125), 1, 48);
        assert_eq!(page.items.len(), 48);
        assert_eq!(page.items.first(), Some(&0));
        assert!(page.has_next_page);
        assert!(!page.has_previous_page);
    }

    #[test]
    fn test_last_partial_page() {
        let page = paginate(&numbers(125), 3, 48);
        assert_eq!(page.items.len(), 29);
        assert_eq!(page.items.first(), Some(&96));
        assert!(!page.has_next_page);
        assert!(page.has_previous_page);
    }

    #[test]
    fn test_exact_multiple_has_no_next_page() {
        let page = paginate(&numbers(96), 2, 48);
        assert_eq!(page.items.len(), 48);
        assert!(!page.has_next_page);
    }

    #[test]
    fn test_out_of_range_page_is_empty_and_not_clamped() {
        let page = paginate(&numbers(10), 5, 48);
        assert!(page.items.is_empty());
        assert_eq!(page.page_number, 5);
        assert!(!page.has_next_page);
        assert!(page.has_previous_page);
    }

    #[test]
    fn test_empty_list() {
        let page = paginate::<usize>(&[], 1, 48);
        assert!(page.items.is_empty());
        assert!(!page.has_next_page);
        assert!(!page.has_previous_page);
    }

    #[test]
    fn test_page_zero_is_first_page() {
        let page = paginate(&numbers(5), 0, 2);
        assert_eq!(page.page_number, 1);
        assert_eq!(page.items, vec![0, 1]);
    }

    #[test]
    fn test_huge_page_number_does_not_overflow() {
        let page = paginate(&numbers(5), usize::MAX, 48);
        assert!(page.items.is_empty());
        assert!(!page.has_next_page);
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(125, 48), 3);
        assert_eq!(total_pages(96, 48), 2);
        assert_eq!(total_pages(0, 48), 0);
        assert_eq!(total_pages(5, 0), 5);
    }
}
