//! In-memory [`TenderStore`] over a fixed snapshot.

use async_trait::async_trait;
use bancadati_core::filter::{apply_filter, TenderFilter};
use bancadati_core::filter_options::FilterOptions;
use bancadati_core::mock::{generate_mock_tenders, generate_seeded};
use bancadati_core::pagination::{paginate, PageRequest, Paginated};
use bancadati_core::tender::Tender;

use crate::error::StoreError;
use crate::store::TenderStore;

/// Serves tenders from a snapshot taken at construction.
///
/// Filter options are computed once since the snapshot never changes.
#[derive(Debug, Clone)]
pub struct MemoryTenderStore {
    tenders: Vec<Tender>,
    options: FilterOptions,
}

impl MemoryTenderStore {
    pub fn new(tenders: Vec<Tender>) -> Self {
        let options = FilterOptions::from_tenders(&tenders);
        Self { tenders, options }
    }

    /// A store filled with `count` mock tenders, reproducible when `seed` is set.
    pub fn from_mock(count: usize, seed: Option<u64>) -> Self {
        let tenders = match seed {
            Some(seed) => generate_seeded(seed, count),
            None => generate_mock_tenders(count),
        };
        Self::new(tenders)
    }

    pub fn len(&self) -> usize {
        self.tenders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tenders.is_empty()
    }

    pub fn tenders(&self) -> &[Tender] {
        &self.tenders
    }
}

#[async_trait]
impl TenderStore for MemoryTenderStore {
    async fn list_tenders(
        &self,
        filter: &TenderFilter,
        page: PageRequest,
    ) -> Result<Paginated<Tender>, StoreError> {
        Ok(paginate(apply_filter(&self.tenders, filter), page))
    }

    async fn get_tender(&self, id: &str) -> Result<Option<Tender>, StoreError> {
        Ok(self.tenders.iter().find(|t| t.id == id).cloned())
    }

    async fn filter_options(&self) -> Result<FilterOptions, StoreError> {
        Ok(self.options.clone())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
