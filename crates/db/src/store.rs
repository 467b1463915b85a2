//! The [`TenderStore`] seam between the HTTP layer and tender persistence.

use std::sync::Arc;

use async_trait::async_trait;
use bancadati_core::filter::TenderFilter;
use bancadati_core::filter_options::FilterOptions;
use bancadati_core::pagination::{PageRequest, Paginated};
use bancadati_core::tender::Tender;

use crate::error::StoreError;

/// Read-only access to the tender dataset.
///
/// Implementations must return pages ordered by publication date descending
/// and must produce identical results for identical filters.
#[async_trait]
pub trait TenderStore: Send + Sync + 'static {
    /// Tenders matching `filter`, cut to the requested page.
    ///
    /// An out-of-range page yields empty `data` with the pagination totals
    /// still describing the full match set.
    async fn list_tenders(
        &self,
        filter: &TenderFilter,
        page: PageRequest,
    ) -> Result<Paginated<Tender>, StoreError>;

    /// The tender whose public identifier equals `id`, if any.
    async fn get_tender(&self, id: &str) -> Result<Option<Tender>, StoreError>;

    /// Distinct values for each filter dimension.
    async fn filter_options(&self) -> Result<FilterOptions, StoreError>;

    /// Verify the backing storage is reachable.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Short name of the backend, reported by the health endpoint.
    fn backend(&self) -> &'static str;
}

/// Forwarding implementation so stores can be shared behind an `Arc`.
#[async_trait]
impl<T: TenderStore + ?Sized> TenderStore for Arc<T> {
    async fn list_tenders(
        &self,
        filter: &TenderFilter,
        page: PageRequest,
    ) -> Result<Paginated<Tender>, StoreError> {
        (**self).list_tenders(filter, page).await
    }

    async fn get_tender(&self, id: &str) -> Result<Option<Tender>, StoreError> {
        (**self).get_tender(id).await
    }

    async fn filter_options(&self) -> Result<FilterOptions, StoreError> {
        (**self).filter_options().await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        (**self).ping().await
    }

    fn backend(&self) -> &'static str {
        (**self).backend()
    }
}
