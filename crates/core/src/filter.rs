//! Tender filter and the in-memory predicate engine.
//!
//! A [`TenderFilter`] is a sparse set of predicates combined with logical AND.
//! Absent fields impose no constraint. The same filter drives the in-memory
//! store (through [`TenderFilter::matches`]) and the SQL builder in the db
//! crate, so both stores agree on semantics.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::Deserialize;

use crate::tender::Tender;
use crate::types::Timestamp;

/// Filter values exactly as they arrive on the query string.
///
/// Every field is a string so a malformed number or date never rejects the
/// whole request; [`TenderFilter::from_raw`] drops what it cannot parse.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTenderFilter {
    pub search: Option<String>,
    pub contracting_authority: Option<String>,
    pub contractor: Option<String>,
    pub cpv_code: Option<String>,
    pub status: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub min_value: Option<String>,
    pub max_value: Option<String>,
    pub procurement_method: Option<String>,
    pub category: Option<String>,
}

/// Normalized tender filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TenderFilter {
    /// Substring of title, description, CIG or buyer name.
    pub search: Option<String>,
    /// Substring of the buyer name.
    pub contracting_authority: Option<String>,
    /// Substring of any supplier name.
    pub contractor: Option<String>,
    /// Substring of the CPV code or its description.
    pub cpv_code: Option<String>,
    pub status: Option<String>,
    /// Inclusive lower bound on the published date.
    pub date_from: Option<Timestamp>,
    /// Inclusive upper bound on the published date.
    pub date_to: Option<Timestamp>,
    /// Inclusive lower bound on the tender amount. `Some(0.0)` is a real bound.
    pub min_value: Option<f64>,
    /// Inclusive upper bound on the tender amount.
    pub max_value: Option<f64>,
    pub procurement_method: Option<String>,
    pub category: Option<String>,
}

impl TenderFilter {
    /// Normalize raw query values. Empty strings become `None`; numbers and
    /// dates that fail to parse are dropped.
    pub fn from_raw(raw: RawTenderFilter) -> Self {
        Self {
            search: non_empty(raw.search),
            contracting_authority: non_empty(raw.contracting_authority),
            contractor: non_empty(raw.contractor),
            cpv_code: non_empty(raw.cpv_code),
            status: non_empty(raw.status),
            date_from: non_empty(raw.date_from).and_then(|s| parse_date_bound(&s, Bound::Start)),
            date_to: non_empty(raw.date_to).and_then(|s| parse_date_bound(&s, Bound::End)),
            min_value: non_empty(raw.min_value).and_then(|s| parse_amount(&s)),
            max_value: non_empty(raw.max_value).and_then(|s| parse_amount(&s)),
            procurement_method: non_empty(raw.procurement_method),
            category: non_empty(raw.category),
        }
    }

    /// True when no predicate is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Whether `tender` satisfies every predicate in this filter.
    ///
    /// Cheap equality and range checks run before the substring scans.
    pub fn matches(&self, tender: &Tender) -> bool {
        self.matches_exact(tender) && self.matches_ranges(tender) && self.matches_text(tender)
    }

    fn matches_exact(&self, tender: &Tender) -> bool {
        equals(self.status.as_deref(), tender.status.as_str())
            && equals(
                self.procurement_method.as_deref(),
                tender.procurement_method.as_str(),
            )
            && equals(
                self.category.as_deref(),
                tender.main_procurement_category.as_str(),
            )
    }

    fn matches_ranges(&self, tender: &Tender) -> bool {
        let published = tender.dates.published;
        let amount = tender.value.amount;

        self.date_from.is_none_or(|from| published >= from)
            && self.date_to.is_none_or(|to| published <= to)
            && self.min_value.is_none_or(|min| amount >= min)
            && self.max_value.is_none_or(|max| amount <= max)
    }

    fn matches_text(&self, tender: &Tender) -> bool {
        if let Some(term) = &self.search {
            let term = term.to_lowercase();
            let hit = contains_ci(&tender.title, &term)
                || contains_ci(&tender.description, &term)
                || contains_ci(&tender.cig, &term)
                || contains_ci(&tender.buyer.name, &term);
            if !hit {
                return false;
            }
        }

        if let Some(authority) = &self.contracting_authority {
            if !contains_ci(&tender.buyer.name, &authority.to_lowercase()) {
                return false;
            }
        }

        if let Some(contractor) = &self.contractor {
            let contractor = contractor.to_lowercase();
            if !tender
                .suppliers
                .iter()
                .any(|s| contains_ci(&s.name, &contractor))
            {
                return false;
            }
        }

        if let Some(cpv) = &self.cpv_code {
            let cpv = cpv.to_lowercase();
            if !(contains_ci(&tender.cpv.code, &cpv) || contains_ci(&tender.cpv.description, &cpv))
            {
                return false;
            }
        }

        true
    }
}

/// Keep the tenders matching `filter`, newest publication first.
///
/// Ties on the published date keep their input order.
pub fn apply_filter(tenders: &[Tender], filter: &TenderFilter) -> Vec<Tender> {
    let mut matched: Vec<Tender> = tenders
        .iter()
        .filter(|t| filter.matches(t))
        .cloned()
        .collect();
    sort_by_published_desc(&mut matched);
    matched
}

/// Stable sort by published date, descending.
pub fn sort_by_published_desc(tenders: &mut [Tender]) {
    tenders.sort_by(|a, b| b.dates.published.cmp(&a.dates.published));
}

// ---------------------------------------------------------------------------
// Parsing helpers
// ---------------------------------------------------------------------------

#[derive(Clone, Copy)]
enum Bound {
    Start,
    End,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_amount(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse an RFC 3339 timestamp, a naive `YYYY-MM-DDTHH:MM:SS` (read as UTC)
/// or a bare `YYYY-MM-DD`. A bare date expands to the first or last instant
/// of that day depending on `bound`.
fn parse_date_bound(value: &str, bound: Bound) -> Option<Timestamp> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()?;
    let time = match bound {
        Bound::Start => NaiveTime::MIN,
        Bound::End => NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999)?,
    };
    Some(date.and_time(time).and_utc())
}

fn equals(expected: Option<&str>, actual: &str) -> bool {
    expected.is_none_or(|e| e == actual)
}

/// `needle` must already be lowercase.
fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
