//! Denormalized rows produced by the tender queries.

use bancadati_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// One tender × lot × awarded-participant combination.
///
/// Lot and participant columns are `None` when the tender has no lot or no
/// awarded participant (outer joins).
#[derive(Debug, Clone, FromRow)]
pub struct TenderRow {
    pub tender_pk: DbId,
    pub ocid: String,
    pub title: String,
    pub description: Option<String>,
    pub status_code: String,
    pub category_code: Option<String>,
    pub award_criterion: Option<String>,
    pub procurement_method: String,
    pub value_amount: Option<f64>,
    pub currency: Option<String>,
    pub published_at: Timestamp,
    pub tender_start_at: Option<Timestamp>,
    pub tender_end_at: Option<Timestamp>,
    pub award_at: Option<Timestamp>,
    pub contract_at: Option<Timestamp>,
    pub enquiry_start_at: Option<Timestamp>,
    pub enquiry_end_at: Option<Timestamp>,
    pub eligibility_criteria: Option<String>,
    pub submission_methods: Vec<String>,
    pub submission_method_details: Option<String>,
    pub has_enquiries: bool,
    pub number_of_tenderers: i64,

    pub authority_code: String,
    pub authority_fiscal_code: Option<String>,
    pub authority_name: String,
    pub authority_contact_name: Option<String>,
    pub authority_contact_email: Option<String>,
    pub authority_contact_phone: Option<String>,
    pub authority_street_address: Option<String>,
    pub authority_locality: Option<String>,
    pub authority_region: Option<String>,
    pub authority_postal_code: Option<String>,
    pub authority_country_name: Option<String>,

    pub lot_cig: Option<String>,
    pub cpv_code: Option<String>,
    pub cpv_description: Option<String>,

    pub supplier_pk: Option<DbId>,
    pub supplier_code: Option<String>,
    pub supplier_fiscal_code: Option<String>,
    pub supplier_name: Option<String>,
    pub supplier_street_address: Option<String>,
    pub supplier_locality: Option<String>,
    pub supplier_region: Option<String>,
    pub supplier_postal_code: Option<String>,
    pub supplier_country_name: Option<String>,
}

/// A row from the `tender_documents` table.
#[derive(Debug, Clone, FromRow)]
pub struct DocumentRow {
    pub tender_id: DbId,
    pub code: String,
    pub document_type: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub published_at: Option<Timestamp>,
    pub language: Option<String>,
}
