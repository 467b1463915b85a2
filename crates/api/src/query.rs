//! Query parameter types for the tender endpoints.

use bancadati_core::filter::{RawTenderFilter, TenderFilter};
use bancadati_core::pagination::PageRequest;
use serde::Deserialize;

/// `GET /api/tenders` query string.
///
/// Every value is taken as a string so malformed numbers fall back to
/// defaults instead of rejecting the request. Unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct TenderListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    #[serde(flatten)]
    pub filter: RawTenderFilter,
}

impl TenderListParams {
    /// Split into a normalized page window and filter.
    pub fn into_parts(self) -> (PageRequest, TenderFilter) {
        let page = PageRequest::new(parse_int(self.page), parse_int(self.limit));
        (page, TenderFilter::from_raw(self.filter))
    }
}

fn parse_int(raw: Option<String>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_page_and_limit_use_defaults() {
        let params = TenderListParams {
            page: Some("two".into()),
            limit: Some("".into()),
            ..Default::default()
        };
        let (page, filter) = params.into_parts();
        assert_eq!(page, PageRequest::default());
        assert!(filter.is_empty());
    }

    #[test]
    fn numeric_values_are_normalized() {
        let params = TenderListParams {
            page: Some(" 3 ".into()),
            limit: Some("500".into()),
            filter: RawTenderFilter {
                min_value: Some("0".into()),
                ..Default::default()
            },
        };
        let (page, filter) = params.into_parts();
        assert_eq!((page.page(), page.limit()), (3, 100));
        assert_eq!(filter.min_value, Some(0.0));
    }
}
