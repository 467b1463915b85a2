//! Fold denormalized join rows back into nested [`Tender`] records.
//!
//! A tender with several lots or awarded participants arrives as several
//! rows sharing `tender_pk`. The first row for a tender supplies every
//! scalar field; later rows only contribute suppliers not yet seen. Output
//! order is the order in which tenders first appear in the input.

use std::collections::HashSet;

use bancadati_core::tender::{
    Address, Buyer, Classification, ContactPoint, Cpv, Document, Period, ProcurementCategory,
    ProcurementMethod, Supplier, Tender, TenderDates, TenderStatus, Value,
};
use bancadati_core::types::{DbId, Timestamp};
use indexmap::map::Entry;
use indexmap::IndexMap;

use crate::models::tender_row::{DocumentRow, TenderRow};
use crate::query::DEFAULT_CATEGORY;

/// Identifier of the placeholder supplier attached to unawarded tenders.
pub const UNASSIGNED_SUPPLIER_ID: &str = "unassigned";

/// Display name of the placeholder supplier.
pub const UNASSIGNED_SUPPLIER_NAME: &str = "Unassigned";

/// Values substituted for NULL or unparseable columns.
///
/// | Field                         | Default                  |
/// |-------------------------------|--------------------------|
/// | any text column               | `""`                     |
/// | `currency`                    | `"EUR"`                  |
/// | `value_amount`                | `0.0`                    |
/// | any required date             | `date` (time of the fold)|
/// | classification scheme         | `"CPV"`                  |
/// | unknown status code           | `planning`               |
/// | unknown procurement method    | `open`                   |
/// | unknown or NULL category      | `services`               |
#[derive(Debug, Clone, PartialEq)]
pub struct RowDefaults {
    pub text: &'static str,
    pub currency: &'static str,
    pub amount: f64,
    pub date: Timestamp,
    pub classification_scheme: &'static str,
    pub status: TenderStatus,
    pub method: ProcurementMethod,
    pub category: ProcurementCategory,
}

impl RowDefaults {
    /// Defaults with `now` standing in for missing dates.
    pub fn at(now: Timestamp) -> Self {
        Self {
            text: "",
            currency: "EUR",
            amount: 0.0,
            date: now,
            classification_scheme: "CPV",
            status: TenderStatus::Planning,
            method: ProcurementMethod::Open,
            category: DEFAULT_CATEGORY,
        }
    }

    fn text(&self, value: &Option<String>) -> String {
        value.clone().unwrap_or_else(|| self.text.to_string())
    }
}

struct Folded {
    tender: Tender,
    seen_suppliers: HashSet<DbId>,
}

impl Folded {
    fn from_first_row(row: &TenderRow, defaults: &RowDefaults) -> Self {
        let mut folded = Self {
            tender: map_tender(row, defaults),
            seen_suppliers: HashSet::new(),
        };
        folded.absorb_supplier(row, defaults);
        folded
    }

    fn absorb_supplier(&mut self, row: &TenderRow, defaults: &RowDefaults) {
        let Some(pk) = row.supplier_pk else {
            return;
        };
        if self.seen_suppliers.insert(pk) {
            self.tender.suppliers.push(Supplier {
                id: defaults.text(&row.supplier_code),
                name: defaults.text(&row.supplier_name),
                identifier: defaults.text(&row.supplier_fiscal_code),
                address: Address {
                    street_address: defaults.text(&row.supplier_street_address),
                    locality: defaults.text(&row.supplier_locality),
                    region: defaults.text(&row.supplier_region),
                    postal_code: defaults.text(&row.supplier_postal_code),
                    country_name: defaults.text(&row.supplier_country_name),
                },
            });
        }
    }

    fn finish(mut self, defaults: &RowDefaults) -> Tender {
        if self.tender.suppliers.is_empty() {
            self.tender.suppliers.push(unassigned_supplier(defaults));
        }
        self.tender
    }
}

/// Fold `rows` into tenders and attach `documents` by tender primary key.
pub fn fold_rows(
    rows: &[TenderRow],
    documents: &[DocumentRow],
    defaults: &RowDefaults,
) -> Vec<Tender> {
    let mut folded: IndexMap<DbId, Folded> = IndexMap::new();

    for row in rows {
        match folded.entry(row.tender_pk) {
            Entry::Occupied(mut entry) => entry.get_mut().absorb_supplier(row, defaults),
            Entry::Vacant(entry) => {
                entry.insert(Folded::from_first_row(row, defaults));
            }
        }
    }

    for doc in documents {
        if let Some(entry) = folded.get_mut(&doc.tender_id) {
            entry.tender.documents.push(map_document(doc, defaults));
        }
    }

    folded
        .into_values()
        .map(|f| f.finish(defaults))
        .collect()
}

/// The placeholder used when no participant has been awarded.
pub fn unassigned_supplier(defaults: &RowDefaults) -> Supplier {
    let blank = || defaults.text.to_string();
    Supplier {
        id: UNASSIGNED_SUPPLIER_ID.to_string(),
        name: UNASSIGNED_SUPPLIER_NAME.to_string(),
        identifier: blank(),
        address: Address {
            street_address: blank(),
            locality: blank(),
            region: blank(),
            postal_code: blank(),
            country_name: blank(),
        },
    }
}

fn parse_code<T>(kind: &str, code: Option<&str>, ocid: &str, fallback: T) -> T
where
    T: std::str::FromStr,
{
    match code.map(str::parse::<T>) {
        Some(Ok(value)) => value,
        Some(Err(_)) => {
            tracing::warn!(ocid, kind, code, "Unknown code in tender row, using default");
            fallback
        }
        None => fallback,
    }
}

fn map_tender(row: &TenderRow, d: &RowDefaults) -> Tender {
    let cpv = Cpv {
        code: d.text(&row.cpv_code),
        description: d.text(&row.cpv_description),
    };
    let classification = Classification {
        scheme: d.classification_scheme.to_string(),
        id: cpv.code.clone(),
        description: cpv.description.clone(),
    };
    let enquiry_period = match (row.enquiry_start_at, row.enquiry_end_at) {
        (Some(start_date), Some(end_date)) => Some(Period {
            start_date,
            end_date,
        }),
        _ => None,
    };

    Tender {
        id: row.ocid.clone(),
        cig: d.text(&row.lot_cig),
        title: row.title.clone(),
        description: d.text(&row.description),
        status: parse_code("status", Some(row.status_code.as_str()), &row.ocid, d.status),
        buyer: Buyer {
            id: row.authority_code.clone(),
            name: row.authority_name.clone(),
            identifier: d.text(&row.authority_fiscal_code),
            contact_point: ContactPoint {
                name: d.text(&row.authority_contact_name),
                email: d.text(&row.authority_contact_email),
                telephone: row.authority_contact_phone.clone(),
            },
            address: Address {
                street_address: d.text(&row.authority_street_address),
                locality: d.text(&row.authority_locality),
                region: d.text(&row.authority_region),
                postal_code: d.text(&row.authority_postal_code),
                country_name: d.text(&row.authority_country_name),
            },
        },
        suppliers: Vec::new(),
        value: Value {
            amount: row.value_amount.unwrap_or(d.amount),
            currency: row
                .currency
                .clone()
                .unwrap_or_else(|| d.currency.to_string()),
        },
        dates: TenderDates {
            published: row.published_at,
            tender_period: Period {
                start_date: row.tender_start_at.unwrap_or(d.date),
                end_date: row.tender_end_at.unwrap_or(d.date),
            },
            award_date: row.award_at,
            contract_date: row.contract_at,
        },
        cpv,
        classification,
        documents: Vec::new(),
        procurement_method: parse_code(
            "procurement_method",
            Some(row.procurement_method.as_str()),
            &row.ocid,
            d.method,
        ),
        main_procurement_category: parse_code(
            "category",
            row.category_code.as_deref(),
            &row.ocid,
            d.category,
        ),
        eligibility_criteria: d.text(&row.eligibility_criteria),
        award_criteria: d.text(&row.award_criterion),
        submission_method: row.submission_methods.clone(),
        submission_method_details: d.text(&row.submission_method_details),
        enquiry_period,
        has_enquiries: row.has_enquiries,
        number_of_tenderers: row.number_of_tenderers,
    }
}

fn map_document(row: &DocumentRow, d: &RowDefaults) -> Document {
    Document {
        id: row.code.clone(),
        document_type: row.document_type.clone(),
        title: d.text(&row.title),
        description: d.text(&row.description),
        url: d.text(&row.url),
        date_published: row.published_at.unwrap_or(d.date),
        language: d.text(&row.language),
    }
}
