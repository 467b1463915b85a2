//! Offset pagination over an already filtered and sorted sequence.

use serde::Serialize;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: i64 = 100;

/// A normalized, 1-based page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    limit: i64,
}

impl PageRequest {
    /// Normalize user input: pages below 1 become 1, the limit falls back to
    /// [`DEFAULT_PAGE_SIZE`] and is clamped to `1..=MAX_PAGE_SIZE`.
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: clamp_limit(limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE),
        }
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    /// Index of the first element on this page.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Page metadata returned next to the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_items: i64,
    pub items_per_page: i64,
}

impl Pagination {
    pub fn new(request: PageRequest, total_items: i64) -> Self {
        let total_items = total_items.max(0);
        Self {
            current_page: request.page,
            total_pages: total_pages(total_items, request.limit),
            total_items,
            items_per_page: request.limit,
        }
    }
}

/// `{ "data": [...], "pagination": {...} }` envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

/// `ceil(total / limit)`, zero for an empty set.
pub fn total_pages(total_items: i64, limit: i64) -> i64 {
    if total_items <= 0 {
        return 0;
    }
    let limit = limit.max(1);
    (total_items + limit - 1) / limit
}

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Slice `items` to the requested window. Pages past the end come back empty.
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> Paginated<T> {
    let total = items.len();
    let start = usize::try_from(request.offset()).unwrap_or(usize::MAX).min(total);
    let take = usize::try_from(request.limit()).unwrap_or(usize::MAX);

    let data: Vec<T> = items.into_iter().skip(start).take(take).collect();

    Paginated {
        data,
        pagination: Pagination::new(request, i64::try_from(total).unwrap_or(i64::MAX)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- PageRequest ---------------------------------------------------------

    #[test]
    fn defaults_to_first_page_of_ten() {
        let req = PageRequest::default();
        assert_eq!((req.page(), req.limit(), req.offset()), (1, 10, 0));
    }

    #[test]
    fn page_below_one_is_normalized() {
        assert_eq!(PageRequest::new(Some(0), None).page(), 1);
        assert_eq!(PageRequest::new(Some(-3), None).page(), 1);
    }

    #[test]
    fn limit_is_clamped() {
        assert_eq!(PageRequest::new(None, Some(0)).limit(), 1);
        assert_eq!(PageRequest::new(None, Some(5000)).limit(), MAX_PAGE_SIZE);
        assert_eq!(PageRequest::new(None, Some(25)).limit(), 25);
    }

    #[test]
    fn offset_is_zero_based() {
        assert_eq!(PageRequest::new(Some(3), Some(10)).offset(), 20);
    }

    // -- total_pages ---------------------------------------------------------

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
    }

    // -- paginate ------------------------------------------------------------

    #[test]
    fn middle_and_last_pages() {
        let items: Vec<i32> = (0..23).collect();

        let page2 = paginate(items.clone(), PageRequest::new(Some(2), Some(10)));
        assert_eq!(page2.data, (10..20).collect::<Vec<_>>());

        let page3 = paginate(items, PageRequest::new(Some(3), Some(10)));
        assert_eq!(page3.data, vec![20, 21, 22]);
        assert_eq!(
            page3.pagination,
            Pagination {
                current_page: 3,
                total_pages: 3,
                total_items: 23,
                items_per_page: 10,
            }
        );
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let page = paginate(vec![1, 2, 3], PageRequest::new(Some(9), Some(2)));
        assert!(page.data.is_empty());
        assert_eq!(page.pagination.total_pages, 2);
        assert_eq!(page.pagination.current_page, 9);
    }

    #[test]
    fn empty_input_has_zero_pages() {
        let page = paginate(Vec::<i32>::new(), PageRequest::default());
        assert!(page.data.is_empty());
        assert_eq!(page.pagination.total_pages, 0);
        assert_eq!(page.pagination.total_items, 0);
    }

    #[test]
    fn pages_concatenate_back_to_the_input() {
        for limit in 1..=7 {
            let items: Vec<i32> = (0..20).collect();
            let first = paginate(items.clone(), PageRequest::new(Some(1), Some(limit)));
            let mut rebuilt = Vec::new();
            for page in 1..=first.pagination.total_pages {
                rebuilt.extend(paginate(items.clone(), PageRequest::new(Some(page), Some(limit))).data);
            }
            assert_eq!(rebuilt, items, "limit {limit}");
        }
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(Pagination::new(PageRequest::default(), 42)).unwrap();
        assert_eq!(json["currentPage"], 1);
        assert_eq!(json["totalPages"], 5);
        assert_eq!(json["totalItems"], 42);
        assert_eq!(json["itemsPerPage"], 10);
    }
}
