//! PostgreSQL-backed [`TenderStore`].

use async_trait::async_trait;
use bancadati_core::filter::TenderFilter;
use bancadati_core::filter_options::{distinct, FilterOptions};
use bancadati_core::pagination::{PageRequest, Paginated, Pagination};
use bancadati_core::tender::Tender;
use bancadati_core::types::DbId;
use chrono::Utc;
use indexmap::IndexSet;

use crate::error::StoreError;
use crate::mapper::{fold_rows, RowDefaults};
use crate::models::tender_row::TenderRow;
use crate::query::build_where;
use crate::repositories::TenderRepo;
use crate::store::TenderStore;
use crate::DbPool;

/// Queries the relational tender schema in `db/migrations`.
#[derive(Debug, Clone)]
pub struct PgTenderStore {
    pool: DbPool,
}

impl PgTenderStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Distinct primary keys in first-seen order.
fn tender_keys(rows: &[TenderRow]) -> Vec<DbId> {
    rows.iter()
        .map(|row| row.tender_pk)
        .collect::<IndexSet<DbId>>()
        .into_iter()
        .collect()
}

#[async_trait]
impl TenderStore for PgTenderStore {
    async fn list_tenders(
        &self,
        filter: &TenderFilter,
        page: PageRequest,
    ) -> Result<Paginated<Tender>, StoreError> {
        let clause = build_where(filter);

        let (total, rows) = tokio::try_join!(
            TenderRepo::count(&self.pool, &clause),
            TenderRepo::find_page_rows(&self.pool, &clause, page),
        )?;
        let documents = TenderRepo::find_documents(&self.pool, &tender_keys(&rows)).await?;

        let data = fold_rows(&rows, &documents, &RowDefaults::at(Utc::now()));
        tracing::debug!(
            total,
            returned = data.len(),
            page = page.page(),
            "Listed tenders"
        );

        Ok(Paginated {
            data,
            pagination: Pagination::new(page, total),
        })
    }

    async fn get_tender(&self, id: &str) -> Result<Option<Tender>, StoreError> {
        let rows = TenderRepo::find_rows_by_ocid(&self.pool, id).await?;
        if rows.is_empty() {
            return Ok(None);
        }
        let documents = TenderRepo::find_documents(&self.pool, &tender_keys(&rows)).await?;
        Ok(fold_rows(&rows, &documents, &RowDefaults::at(Utc::now()))
            .into_iter()
            .next())
    }

    async fn filter_options(&self) -> Result<FilterOptions, StoreError> {
        let pool = &self.pool;
        let (authorities, contractors, cpv_codes, statuses, methods, categories) = tokio::try_join!(
            TenderRepo::distinct_authorities(pool),
            TenderRepo::distinct_contractors(pool),
            TenderRepo::distinct_cpv_labels(pool),
            TenderRepo::distinct_statuses(pool),
            TenderRepo::distinct_methods(pool),
            TenderRepo::distinct_categories(pool),
        )?;

        // Postgres collation differs from byte order; sort here.
        Ok(FilterOptions {
            authorities: distinct(authorities),
            contractors: distinct(contractors),
            cpv_codes: distinct(cpv_codes),
            statuses: distinct(statuses),
            methods: distinct(methods),
            categories: distinct(categories),
        })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
