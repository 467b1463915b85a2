//! Repository for the relational tender tables.
//!
//! Read-only queries: filtered counts, paged join rows, detail rows,
//! documents and distinct filter values. Row folding lives in
//! [`crate::mapper`].

use bancadati_core::pagination::PageRequest;
use bancadati_core::types::DbId;
use sqlx::PgPool;

use crate::models::tender_row::{DocumentRow, TenderRow};
use crate::query::{bind_values, category_expr, WhereClause, FILTER_FROM, TENDER_ORDER};

/// Column list for [`TenderRow`] queries.
///
/// Expects aliases `t`, `a`, `st`, `cat`, `ac`, `l`, `c`, `p`.
const TENDER_ROW_COLUMNS: &str = "\
    t.id AS tender_pk, t.ocid, t.title, t.description, \
    st.code AS status_code, cat.code AS category_code, ac.description AS award_criterion, \
    t.procurement_method, t.value_amount, t.currency, \
    t.published_at, t.tender_start_at, t.tender_end_at, t.award_at, t.contract_at, \
    t.enquiry_start_at, t.enquiry_end_at, \
    t.eligibility_criteria, t.submission_methods, t.submission_method_details, t.has_enquiries, \
    (SELECT COUNT(*) FROM participants pc WHERE pc.tender_id = t.id) AS number_of_tenderers, \
    a.code AS authority_code, a.fiscal_code AS authority_fiscal_code, a.name AS authority_name, \
    a.contact_name AS authority_contact_name, a.contact_email AS authority_contact_email, \
    a.contact_phone AS authority_contact_phone, \
    a.street_address AS authority_street_address, a.locality AS authority_locality, \
    a.region AS authority_region, a.postal_code AS authority_postal_code, \
    a.country_name AS authority_country_name, \
    l.cig AS lot_cig, c.code AS cpv_code, c.description AS cpv_description, \
    p.id AS supplier_pk, p.code AS supplier_code, p.fiscal_code AS supplier_fiscal_code, \
    p.name AS supplier_name, p.street_address AS supplier_street_address, \
    p.locality AS supplier_locality, p.region AS supplier_region, \
    p.postal_code AS supplier_postal_code, p.country_name AS supplier_country_name";

/// Joins producing one row per tender × lot × awarded participant.
const TENDER_ROW_JOINS: &str = "\
    JOIN contracting_authorities a ON a.id = t.authority_id \
    JOIN tender_statuses st ON st.id = t.status_id \
    LEFT JOIN procurement_categories cat ON cat.id = t.category_id \
    LEFT JOIN award_criteria ac ON ac.id = t.award_criterion_id \
    LEFT JOIN lots l ON l.tender_id = t.id \
    LEFT JOIN cpv_codes c ON c.id = l.cpv_code_id \
    LEFT JOIN participants p ON p.tender_id = t.id AND p.is_awarded";

/// Column list for `tender_documents` queries.
const DOCUMENT_COLUMNS: &str = "\
    tender_id, code, document_type, title, description, url, published_at, language";

/// Provides read access to tenders and their related tables.
pub struct TenderRepo;

impl TenderRepo {
    // -----------------------------------------------------------------------
    // Listing
    // -----------------------------------------------------------------------

    /// Count tenders matching `clause`.
    pub async fn count(pool: &PgPool, clause: &WhereClause) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) {FILTER_FROM} {}", clause.sql());
        let row: (i64,) = bind_values(sqlx::query_as(&query), clause.binds())
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// Join rows for one page of tenders matching `clause`.
    ///
    /// The page is cut over distinct tenders in a CTE before fanning out to
    /// lots and participants, so `LIMIT` counts tenders rather than rows.
    pub async fn find_page_rows(
        pool: &PgPool,
        clause: &WhereClause,
        page: PageRequest,
    ) -> Result<Vec<TenderRow>, sqlx::Error> {
        let limit_idx = clause.next_index();
        let offset_idx = limit_idx + 1;

        let query = format!(
            "WITH page AS ( \
                SELECT t.id {FILTER_FROM} {where_clause} \
                ORDER BY {TENDER_ORDER} \
                LIMIT ${limit_idx} OFFSET ${offset_idx} \
             ) \
             SELECT {TENDER_ROW_COLUMNS} \
             FROM page \
             JOIN tenders t ON t.id = page.id \
             {TENDER_ROW_JOINS} \
             ORDER BY {TENDER_ORDER}, l.id ASC, p.id ASC",
            where_clause = clause.sql(),
        );

        bind_values(sqlx::query_as::<_, TenderRow>(&query), clause.binds())
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Detail
    // -----------------------------------------------------------------------

    /// Join rows for the tender with the given public identifier.
    pub async fn find_rows_by_ocid(
        pool: &PgPool,
        ocid: &str,
    ) -> Result<Vec<TenderRow>, sqlx::Error> {
        let query = format!(
            "SELECT {TENDER_ROW_COLUMNS} \
             FROM tenders t \
             {TENDER_ROW_JOINS} \
             WHERE t.ocid = $1 \
             ORDER BY l.id ASC, p.id ASC"
        );
        sqlx::query_as::<_, TenderRow>(&query)
            .bind(ocid)
            .fetch_all(pool)
            .await
    }

    /// Documents for the given tenders, in insertion order.
    pub async fn find_documents(
        pool: &PgPool,
        tender_ids: &[DbId],
    ) -> Result<Vec<DocumentRow>, sqlx::Error> {
        if tender_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {DOCUMENT_COLUMNS} FROM tender_documents \
             WHERE tender_id = ANY($1) \
             ORDER BY tender_id, id"
        );
        sqlx::query_as::<_, DocumentRow>(&query)
            .bind(tender_ids)
            .fetch_all(pool)
            .await
    }

    /// Total number of tenders, ignoring filters.
    pub async fn count_all(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tenders")
            .fetch_one(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Filter option sources
    // -----------------------------------------------------------------------

    /// Names of authorities that issued at least one tender.
    pub async fn distinct_authorities(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT a.name FROM contracting_authorities a \
             JOIN tenders t ON t.authority_id = a.id",
        )
        .fetch_all(pool)
        .await
    }

    /// Names of awarded participants.
    pub async fn distinct_contractors(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT name FROM participants WHERE is_awarded",
        )
        .fetch_all(pool)
        .await
    }

    /// `"{code} - {description}"` for the CPV code of each tender's first lot.
    pub async fn distinct_cpv_labels(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        let query = format!(
            "SELECT DISTINCT fl.cpv_code || ' - ' || COALESCE(fl.cpv_description, '') \
             {FILTER_FROM} WHERE fl.cpv_code IS NOT NULL"
        );
        sqlx::query_scalar::<_, String>(&query).fetch_all(pool).await
    }

    pub async fn distinct_statuses(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT st.code FROM tenders t \
             JOIN tender_statuses st ON st.id = t.status_id",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn distinct_methods(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>("SELECT DISTINCT procurement_method FROM tenders")
            .fetch_all(pool)
            .await
    }

    /// Category codes as tenders show them, NULL reading as the default.
    pub async fn distinct_categories(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        let query = format!("SELECT DISTINCT {} {FILTER_FROM}", category_expr());
        sqlx::query_scalar::<_, String>(&query).fetch_all(pool).await
    }
}
