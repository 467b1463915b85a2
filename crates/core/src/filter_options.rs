//! Distinct values per filterable dimension, used to populate filter UIs.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::tender::Tender;

/// Distinct values for each filter dimension, sorted by byte-ordinal order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub authorities: Vec<String>,
    pub contractors: Vec<String>,
    /// `"{code} - {description}"` labels.
    pub cpv_codes: Vec<String>,
    pub statuses: Vec<String>,
    pub methods: Vec<String>,
    pub categories: Vec<String>,
}

impl FilterOptions {
    /// Collect options from a tender snapshot.
    pub fn from_tenders(tenders: &[Tender]) -> Self {
        Self {
            authorities: distinct(tenders.iter().map(|t| t.buyer.name.clone())),
            contractors: distinct(
                tenders
                    .iter()
                    .flat_map(|t| t.suppliers.iter().map(|s| s.name.clone())),
            ),
            cpv_codes: distinct(tenders.iter().map(|t| t.cpv.label())),
            statuses: distinct(tenders.iter().map(|t| t.status.as_str().to_string())),
            methods: distinct(
                tenders
                    .iter()
                    .map(|t| t.procurement_method.as_str().to_string()),
            ),
            categories: distinct(
                tenders
                    .iter()
                    .map(|t| t.main_procurement_category.as_str().to_string()),
            ),
        }
    }
}

/// Deduplicate and sort ascending (case-sensitive, ordinal).
pub fn distinct<I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    values
        .into_iter()
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}
