//! Translate a [`TenderFilter`] into a parameterized SQL `WHERE` clause.
//!
//! Conditions only ever contain `$n` placeholders; the filter values travel
//! separately in [`WhereClause::binds`] and are attached with
//! [`bind_values`]. Lot predicates look only at the tender's first lot,
//! which is the one a mapped [`Tender`](bancadati_core::tender::Tender)
//! shows; participant predicates use `EXISTS` so one tender never matches
//! more than once.

use bancadati_core::filter::TenderFilter;
use bancadati_core::tender::ProcurementCategory;
use bancadati_core::types::Timestamp;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::Postgres;

/// Tables every filter condition may reference, all to-one joins.
///
/// Aliases: `t` tenders, `a` contracting authorities, `st` statuses,
/// `cat` categories, `fl` the first lot (lowest `id`) with its CPV code.
pub const FILTER_FROM: &str = "\
    FROM tenders t \
    JOIN contracting_authorities a ON a.id = t.authority_id \
    JOIN tender_statuses st ON st.id = t.status_id \
    LEFT JOIN procurement_categories cat ON cat.id = t.category_id \
    LEFT JOIN LATERAL ( \
        SELECT l.cig, c.code AS cpv_code, c.description AS cpv_description \
        FROM lots l LEFT JOIN cpv_codes c ON c.id = l.cpv_code_id \
        WHERE l.tender_id = t.id \
        ORDER BY l.id ASC LIMIT 1 \
    ) fl ON TRUE";

/// Category shown for tenders whose `category_id` is NULL.
pub const DEFAULT_CATEGORY: ProcurementCategory = ProcurementCategory::Services;

/// SQL expression for the category a mapped tender shows.
pub fn category_expr() -> String {
    format!("COALESCE(cat.code, '{}')", DEFAULT_CATEGORY.as_str())
}

/// Newest first; `t.id` follows insertion order and breaks ties.
pub const TENDER_ORDER: &str = "t.published_at DESC, t.id ASC";

/// A single bound parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Text(String),
    Float(f64),
    Timestamp(Timestamp),
}

/// Conditions joined with `AND`, plus their parameters in placeholder order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WhereClause {
    conditions: Vec<String>,
    binds: Vec<BindValue>,
}

impl WhereClause {
    /// Register a parameter and return its 1-based placeholder index.
    fn bind(&mut self, value: BindValue) -> usize {
        self.binds.push(value);
        self.binds.len()
    }

    fn push(&mut self, condition: String) {
        self.conditions.push(condition);
    }

    /// `WHERE ...`, or an empty string when there is nothing to filter.
    pub fn sql(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.conditions.join(" AND "))
        }
    }

    pub fn binds(&self) -> &[BindValue] {
        &self.binds
    }

    /// Placeholder index for the next parameter appended after the filter.
    pub fn next_index(&self) -> usize {
        self.binds.len() + 1
    }
}

/// Build the `WHERE` clause for `filter`.
pub fn build_where(filter: &TenderFilter) -> WhereClause {
    let mut clause = WhereClause::default();

    // Exact matches first; they are the most selective.
    if let Some(status) = &filter.status {
        let i = clause.bind(BindValue::Text(status.clone()));
        clause.push(format!("st.code = ${i}"));
    }
    if let Some(method) = &filter.procurement_method {
        let i = clause.bind(BindValue::Text(method.clone()));
        clause.push(format!("t.procurement_method = ${i}"));
    }
    if let Some(category) = &filter.category {
        let i = clause.bind(BindValue::Text(category.clone()));
        clause.push(format!("{} = ${i}", category_expr()));
    }

    if let Some(from) = filter.date_from {
        let i = clause.bind(BindValue::Timestamp(from));
        clause.push(format!("t.published_at >= ${i}"));
    }
    if let Some(to) = filter.date_to {
        let i = clause.bind(BindValue::Timestamp(to));
        clause.push(format!("t.published_at <= ${i}"));
    }
    if let Some(min) = filter.min_value {
        let i = clause.bind(BindValue::Float(min));
        clause.push(format!("COALESCE(t.value_amount, 0) >= ${i}"));
    }
    if let Some(max) = filter.max_value {
        let i = clause.bind(BindValue::Float(max));
        clause.push(format!("COALESCE(t.value_amount, 0) <= ${i}"));
    }

    if let Some(search) = &filter.search {
        let i = clause.bind(BindValue::Text(like_pattern(search)));
        clause.push(format!(
            "(t.title ILIKE ${i} \
              OR COALESCE(t.description, '') ILIKE ${i} \
              OR a.name ILIKE ${i} \
              OR COALESCE(fl.cig, '') ILIKE ${i})"
        ));
    }
    if let Some(authority) = &filter.contracting_authority {
        let i = clause.bind(BindValue::Text(like_pattern(authority)));
        clause.push(format!("a.name ILIKE ${i}"));
    }
    if let Some(contractor) = &filter.contractor {
        let i = clause.bind(BindValue::Text(like_pattern(contractor)));
        clause.push(format!(
            "EXISTS (SELECT 1 FROM participants fp \
                     WHERE fp.tender_id = t.id AND fp.is_awarded AND fp.name ILIKE ${i})"
        ));
    }
    if let Some(cpv) = &filter.cpv_code {
        let i = clause.bind(BindValue::Text(like_pattern(cpv)));
        clause.push(format!(
            "(COALESCE(fl.cpv_code, '') ILIKE ${i} \
              OR COALESCE(fl.cpv_description, '') ILIKE ${i})"
        ));
    }

    clause
}

/// Wrap `term` in `%...%` for `ILIKE`, escaping the pattern metacharacters.
pub fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Attach `binds` to `query` in placeholder order.
pub fn bind_values<'q, O>(
    mut query: QueryAs<'q, Postgres, O, PgArguments>,
    binds: &'q [BindValue],
) -> QueryAs<'q, Postgres, O, PgArguments> {
    for value in binds {
        query = match value {
            BindValue::Text(v) => query.bind(v.as_str()),
            BindValue::Float(v) => query.bind(*v),
            BindValue::Timestamp(v) => query.bind(*v),
        };
    }
    query
}
