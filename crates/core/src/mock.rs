//! Mock tender dataset for the in-memory store and database seeding.
//!
//! Reference data (authorities, suppliers, CPV codes) is fixed; everything
//! else is drawn from the supplied RNG, so a seeded [`StdRng`] reproduces the
//! same dataset.

use chrono::{TimeDelta, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::tender::{
    Address, Buyer, Classification, ContactPoint, Cpv, Document, Period, ProcurementCategory,
    ProcurementMethod, Supplier, Tender, TenderDates, TenderStatus, Value,
};
use crate::types::Timestamp;

/// Number of tenders generated by default.
pub const DEFAULT_MOCK_COUNT: usize = 50;

/// Smallest generated tender amount.
pub const MIN_MOCK_AMOUNT: f64 = 50_000.0;

/// Largest generated tender amount (exclusive).
pub const MAX_MOCK_AMOUNT: f64 = 2_050_000.0;

struct Party {
    name: &'static str,
    id: &'static str,
    identifier: &'static str,
}

const AUTHORITIES: &[Party] = &[
    Party { name: "Ministero della Salute", id: "MS001", identifier: "IT-MS-001" },
    Party { name: "Regione Lombardia", id: "RL001", identifier: "IT-RL-001" },
    Party { name: "Comune di Milano", id: "CM001", identifier: "IT-CM-001" },
    Party { name: "ANAS S.p.A.", id: "AN001", identifier: "IT-AN-001" },
    Party { name: "Università di Roma", id: "UR001", identifier: "IT-UR-001" },
    Party { name: "ASL Napoli", id: "ASL001", identifier: "IT-ASL-001" },
    Party { name: "Ferrovie dello Stato", id: "FS001", identifier: "IT-FS-001" },
    Party { name: "Ministero dell'Istruzione", id: "MI001", identifier: "IT-MI-001" },
];

const SUPPLIERS: &[Party] = &[
    Party { name: "TechSolutions S.r.l.", id: "TECH001", identifier: "IT-TECH-001" },
    Party { name: "Costruzioni Italia S.p.A.", id: "COST001", identifier: "IT-COST-001" },
    Party { name: "Medical Supplies Group", id: "MED001", identifier: "IT-MED-001" },
    Party { name: "Informatica Avanzata", id: "INFO001", identifier: "IT-INFO-001" },
    Party { name: "Servizi Integrati S.r.l.", id: "SERV001", identifier: "IT-SERV-001" },
    Party { name: "Green Energy Solutions", id: "GREEN001", identifier: "IT-GREEN-001" },
    Party { name: "Logistica Express", id: "LOG001", identifier: "IT-LOG-001" },
    Party { name: "Consulting Partners", id: "CONS001", identifier: "IT-CONS-001" },
];

const CPV_CODES: &[(&str, &str)] = &[
    ("45000000-7", "Construction work"),
    ("33000000-0", "Medical equipments, pharmaceuticals and personal care products"),
    ("48000000-8", "Software package and information systems"),
    ("79000000-4", "Business services: law, marketing, consulting, recruitment, printing and security"),
    ("50000000-5", "Repair and maintenance services"),
    ("72000000-5", "IT services: consulting, software development, Internet and support"),
    ("71000000-8", "Architectural, construction, engineering and inspection services"),
    ("60000000-8", "Transport services (excl. Waste transport)"),
];

const LOCALITIES: &[&str] = &["Roma", "Milano", "Napoli", "Torino", "Bologna"];
const REGIONS: &[&str] = &["Lazio", "Lombardia", "Campania", "Piemonte", "Emilia-Romagna"];

/// Generate `count` tenders from an OS-seeded RNG.
pub fn generate_mock_tenders(count: usize) -> Vec<Tender> {
    generate_with(&mut StdRng::from_os_rng(), count)
}

/// Generate `count` tenders reproducibly from `seed`.
pub fn generate_seeded(seed: u64, count: usize) -> Vec<Tender> {
    generate_with(&mut StdRng::seed_from_u64(seed), count)
}

/// Generate `count` tenders with ids `tender-001`, `tender-002`, ...
pub fn generate_with<R: Rng>(rng: &mut R, count: usize) -> Vec<Tender> {
    (1..=count).map(|i| mock_tender(rng, i)).collect()
}

fn pick<'a, T, R: Rng>(rng: &mut R, items: &'a [T]) -> &'a T {
    &items[rng.random_range(0..items.len())]
}

/// Random offset of up to `days` days.
fn within_days<R: Rng>(rng: &mut R, days: i64) -> TimeDelta {
    let millis = (rng.random::<f64>() * (days * 86_400_000) as f64) as i64;
    TimeDelta::milliseconds(millis)
}

fn mock_address<R: Rng>(rng: &mut R, street: &str, max_number: u32) -> Address {
    Address {
        street_address: format!("Via {street} {}", rng.random_range(1..=max_number)),
        locality: pick(rng, LOCALITIES).to_string(),
        region: pick(rng, REGIONS).to_string(),
        postal_code: rng.random_range(10_000..100_000).to_string(),
        country_name: "Italy".to_string(),
    }
}

fn email_domain(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

fn mock_tender<R: Rng>(rng: &mut R, index: usize) -> Tender {
    let authority = pick(rng, AUTHORITIES);
    let supplier = pick(rng, SUPPLIERS);
    let &(cpv_code, cpv_description) = pick(rng, CPV_CODES);
    let status = *pick(rng, TenderStatus::ALL);
    let method = *pick(rng, ProcurementMethod::ALL);
    let category = *pick(rng, ProcurementCategory::ALL);

    let published: Timestamp = Utc
        .with_ymd_and_hms(2024, rng.random_range(1..=12), rng.random_range(1..=28), 0, 0, 0)
        .single()
        .unwrap_or_else(Utc::now);
    let tender_start = published + within_days(rng, 30);
    let tender_end = tender_start + within_days(rng, 60);
    let award_date = status
        .is_awarded()
        .then(|| tender_end + within_days(rng, 30));
    let contract_date = status
        .is_contracted()
        .then(|| tender_end + within_days(rng, 60));

    let lowered = cpv_description.to_lowercase();
    let title_prefix = match category {
        ProcurementCategory::Works => "Lavori di",
        ProcurementCategory::Goods => "Fornitura di",
        ProcurementCategory::Services => "Servizi di",
    };
    let estimate = rng.random_range(50_000..1_050_000);
    let amount = rng.random_range(MIN_MOCK_AMOUNT as i64..MAX_MOCK_AMOUNT as i64) as f64;

    let documents = vec![
        Document {
            id: format!("doc-{index}-1"),
            document_type: "tenderNotice".into(),
            title: "Bando di gara".into(),
            description: "Documentazione completa del bando di gara".into(),
            url: format!("https://example.com/documents/tender-{index}-notice.pdf"),
            date_published: published,
            language: "it".into(),
        },
        Document {
            id: format!("doc-{index}-2"),
            document_type: "technicalSpecifications".into(),
            title: "Capitolato tecnico".into(),
            description: "Specifiche tecniche dettagliate".into(),
            url: format!("https://example.com/documents/tender-{index}-specs.pdf"),
            date_published: published,
            language: "it".into(),
        },
    ];

    Tender {
        id: format!("tender-{index:03}"),
        cig: format!("CIG{index:08}"),
        title: format!("{title_prefix} {lowered}"),
        description: format!("Procedura {method} per {lowered}. Importo stimato: €{estimate}"),
        status,
        buyer: Buyer {
            id: authority.id.into(),
            name: authority.name.into(),
            identifier: authority.identifier.into(),
            contact_point: ContactPoint {
                name: format!("Responsabile Acquisti {}", authority.name),
                email: format!("acquisti@{}.gov.it", email_domain(authority.name)),
                telephone: None,
            },
            address: mock_address(rng, authority.name, 100),
        },
        suppliers: vec![Supplier {
            id: supplier.id.into(),
            name: supplier.name.into(),
            identifier: supplier.identifier.into(),
            address: mock_address(rng, supplier.name, 200),
        }],
        value: Value {
            amount,
            currency: "EUR".into(),
        },
        dates: TenderDates {
            published,
            tender_period: Period {
                start_date: tender_start,
                end_date: tender_end,
            },
            award_date,
            contract_date,
        },
        cpv: Cpv {
            code: cpv_code.into(),
            description: cpv_description.into(),
        },
        classification: Classification {
            scheme: "CPV".into(),
            id: cpv_code.into(),
            description: cpv_description.into(),
        },
        documents,
        procurement_method: method,
        main_procurement_category: category,
        eligibility_criteria: "Requisiti di qualificazione secondo il Codice degli Appalti".into(),
        award_criteria: "Offerta economicamente più vantaggiosa".into(),
        submission_method: vec!["electronicSubmission".into()],
        submission_method_details: "Invio telematico tramite piattaforma digitale".into(),
        enquiry_period: Some(Period {
            start_date: tender_start,
            end_date: tender_end - TimeDelta::days(7),
        }),
        has_enquiries: rng.random_bool(0.5),
        number_of_tenderers: rng.random_range(1..=15),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn seeded_generation_is_reproducible() {
        assert_eq!(generate_seeded(7, 10), generate_seeded(7, 10));
    }

    #[test]
    fn ids_are_unique_and_padded() {
        let tenders = generate_seeded(1, DEFAULT_MOCK_COUNT);
        assert_eq!(tenders.len(), DEFAULT_MOCK_COUNT);
        assert_eq!(tenders[0].id, "tender-001");
        assert_eq!(tenders[49].cig, "CIG00000050");
        let ids: HashSet<_> = tenders.iter().map(|t| &t.id).collect();
        assert_eq!(ids.len(), DEFAULT_MOCK_COUNT);
    }

    #[test]
    fn generated_values_stay_in_range() {
        for t in generate_seeded(42, 200) {
            assert!(t.value.amount >= MIN_MOCK_AMOUNT && t.value.amount < MAX_MOCK_AMOUNT);
            assert_eq!(t.value.currency, "EUR");
            assert!(t.dates.tender_period.start_date >= t.dates.published);
            assert!(t.dates.tender_period.end_date >= t.dates.tender_period.start_date);
            assert_eq!(t.dates.award_date.is_some(), t.status.is_awarded());
            assert_eq!(t.dates.contract_date.is_some(), t.status.is_contracted());
            assert_eq!(t.suppliers.len(), 1);
            assert_eq!(t.documents.len(), 2);
            assert!((1..=15).contains(&t.number_of_tenderers));
        }
    }

    #[test]
    fn email_domain_strips_punctuation_and_spaces() {
        assert_eq!(email_domain("ANAS S.p.A."), "anasspa");
        assert_eq!(email_domain("Ministero dell'Istruzione"), "ministerodellistruzione");
    }
}
