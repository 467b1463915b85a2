//! Load [`Tender`] records into the relational schema.
//!
//! Used to seed a fresh database with mock data and by the integration
//! tests. Each tender becomes one authority (shared by code), one lot
//! carrying its CIG and CPV code, one awarded participant per supplier,
//! unawarded participants up to `number_of_tenderers`, and its documents.

use bancadati_core::tender::{Supplier, Tender};
use bancadati_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::error::StoreError;

/// Insert `tenders` in one transaction and return how many were new.
///
/// Tenders whose identifier already exists are skipped, so seeding twice
/// is harmless.
pub async fn seed_tenders(pool: &PgPool, tenders: &[Tender]) -> Result<u64, StoreError> {
    let mut tx = pool.begin().await?;
    let mut inserted = 0;

    for tender in tenders {
        if insert_tender(&mut *tx, tender).await?.is_some() {
            inserted += 1;
        }
    }

    tx.commit().await?;
    tracing::info!(inserted, offered = tenders.len(), "Seeded tenders");
    Ok(inserted)
}

/// `None` for blank text so the read path can apply its own defaults.
fn non_blank(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}

async fn insert_tender(conn: &mut PgConnection, t: &Tender) -> Result<Option<DbId>, sqlx::Error> {
    let authority_id = upsert_authority(conn, t).await?;

    let tender_id: Option<DbId> = sqlx::query_scalar(
        "INSERT INTO tenders ( \
            ocid, authority_id, status_id, category_id, award_criterion_id, \
            procurement_method, title, description, value_amount, currency, \
            published_at, tender_start_at, tender_end_at, award_at, contract_at, \
            enquiry_start_at, enquiry_end_at, eligibility_criteria, \
            submission_methods, submission_method_details, has_enquiries) \
         VALUES ( \
            $1, $2, \
            (SELECT id FROM tender_statuses WHERE code = $3), \
            (SELECT id FROM procurement_categories WHERE code = $4), \
            (SELECT id FROM award_criteria WHERE description = $5), \
            $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, $20, $21) \
         ON CONFLICT (ocid) DO NOTHING \
         RETURNING id",
    )
    .bind(&t.id)
    .bind(authority_id)
    .bind(t.status.as_str())
    .bind(t.main_procurement_category.as_str())
    .bind(&t.award_criteria)
    .bind(t.procurement_method.as_str())
    .bind(&t.title)
    .bind(non_blank(&t.description))
    .bind(t.value.amount)
    .bind(&t.value.currency)
    .bind(t.dates.published)
    .bind(t.dates.tender_period.start_date)
    .bind(t.dates.tender_period.end_date)
    .bind(t.dates.award_date)
    .bind(t.dates.contract_date)
    .bind(t.enquiry_period.as_ref().map(|p| p.start_date))
    .bind(t.enquiry_period.as_ref().map(|p| p.end_date))
    .bind(non_blank(&t.eligibility_criteria))
    .bind(&t.submission_method)
    .bind(non_blank(&t.submission_method_details))
    .bind(t.has_enquiries)
    .fetch_optional(&mut *conn)
    .await?;

    let Some(tender_id) = tender_id else {
        tracing::debug!(ocid = %t.id, "Tender already present, skipping");
        return Ok(None);
    };

    insert_lot(conn, tender_id, t).await?;

    for supplier in &t.suppliers {
        insert_awarded(conn, tender_id, supplier).await?;
    }
    let awarded = i64::try_from(t.suppliers.len()).unwrap_or(i64::MAX);
    for n in 1..=(t.number_of_tenderers - awarded) {
        sqlx::query(
            "INSERT INTO participants (tender_id, code, name, is_awarded) \
             VALUES ($1, $2, $3, FALSE)",
        )
        .bind(tender_id)
        .bind(format!("{}-P{n:02}", t.id))
        .bind(format!("Partecipante {n}"))
        .execute(&mut *conn)
        .await?;
    }

    for doc in &t.documents {
        sqlx::query(
            "INSERT INTO tender_documents \
                (tender_id, code, document_type, title, description, url, published_at, language) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(tender_id)
        .bind(&doc.id)
        .bind(&doc.document_type)
        .bind(non_blank(&doc.title))
        .bind(non_blank(&doc.description))
        .bind(non_blank(&doc.url))
        .bind(doc.date_published)
        .bind(non_blank(&doc.language))
        .execute(&mut *conn)
        .await?;
    }

    Ok(Some(tender_id))
}

async fn upsert_authority(conn: &mut PgConnection, t: &Tender) -> Result<DbId, sqlx::Error> {
    let buyer = &t.buyer;
    sqlx::query_scalar(
        "INSERT INTO contracting_authorities \
            (code, fiscal_code, name, contact_name, contact_email, contact_phone, \
             street_address, locality, region, postal_code, country_name) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
         ON CONFLICT (code) DO UPDATE SET name = EXCLUDED.name \
         RETURNING id",
    )
    .bind(&buyer.id)
    .bind(non_blank(&buyer.identifier))
    .bind(&buyer.name)
    .bind(non_blank(&buyer.contact_point.name))
    .bind(non_blank(&buyer.contact_point.email))
    .bind(buyer.contact_point.telephone.as_deref())
    .bind(non_blank(&buyer.address.street_address))
    .bind(non_blank(&buyer.address.locality))
    .bind(non_blank(&buyer.address.region))
    .bind(non_blank(&buyer.address.postal_code))
    .bind(non_blank(&buyer.address.country_name))
    .fetch_one(&mut *conn)
    .await
}

async fn insert_lot(conn: &mut PgConnection, tender_id: DbId, t: &Tender) -> Result<(), sqlx::Error> {
    let cpv_id: Option<DbId> = match non_blank(&t.cpv.code) {
        Some(code) => Some(
            sqlx::query_scalar(
                "INSERT INTO cpv_codes (code, description) VALUES ($1, $2) \
                 ON CONFLICT (code) DO UPDATE SET description = EXCLUDED.description \
                 RETURNING id",
            )
            .bind(code)
            .bind(&t.cpv.description)
            .fetch_one(&mut *conn)
            .await?,
        ),
        None => None,
    };

    sqlx::query(
        "INSERT INTO lots (tender_id, cig, description, cpv_code_id, value_amount) \
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(tender_id)
    .bind(non_blank(&t.cig))
    .bind(&t.title)
    .bind(cpv_id)
    .bind(t.value.amount)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

async fn insert_awarded(
    conn: &mut PgConnection,
    tender_id: DbId,
    supplier: &Supplier,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO participants \
            (tender_id, code, fiscal_code, name, street_address, locality, region, \
             postal_code, country_name, is_awarded) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, TRUE)",
    )
    .bind(tender_id)
    .bind(&supplier.id)
    .bind(non_blank(&supplier.identifier))
    .bind(&supplier.name)
    .bind(non_blank(&supplier.address.street_address))
    .bind(non_blank(&supplier.address.locality))
    .bind(non_blank(&supplier.address.region))
    .bind(non_blank(&supplier.address.postal_code))
    .bind(non_blank(&supplier.address.country_name))
    .execute(&mut *conn)
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_becomes_null() {
        assert_eq!(non_blank(""), None);
        assert_eq!(non_blank("x"), Some("x"));
    }
}
