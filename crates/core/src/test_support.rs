//! Tender fixtures for unit tests.

use chrono::{TimeZone, Utc};

use crate::tender::{
    Address, Buyer, Classification, ContactPoint, Cpv, Period, ProcurementCategory,
    ProcurementMethod, Supplier, Tender, TenderDates, TenderStatus, Value,
};
use crate::types::Timestamp;

/// Midnight UTC on the given day.
pub fn at(year: i32, month: u32, day: u32) -> Timestamp {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

fn address() -> Address {
    Address {
        street_address: "Via Roma 1".into(),
        locality: "Torino".into(),
        region: "Piemonte".into(),
        postal_code: "10100".into(),
        country_name: "Italy".into(),
    }
}

/// A minimal tender: services, open procedure, one supplier.
pub fn tender(id: &str, published: Timestamp, status: TenderStatus, amount: f64) -> Tender {
    Tender {
        id: id.into(),
        cig: format!("CIG-{id}"),
        title: "Servizi di manutenzione".into(),
        description: "Procedura aperta".into(),
        status,
        buyer: Buyer {
            id: "RP001".into(),
            name: "Regione Piemonte".into(),
            identifier: "IT-RP-001".into(),
            contact_point: ContactPoint {
                name: "Ufficio Acquisti".into(),
                email: "acquisti@regione.piemonte.it".into(),
                telephone: None,
            },
            address: address(),
        },
        suppliers: vec![Supplier {
            id: "LOG001".into(),
            name: "Logistica Express".into(),
            identifier: "IT-LOG-001".into(),
            address: address(),
        }],
        value: Value {
            amount,
            currency: "EUR".into(),
        },
        dates: TenderDates {
            published,
            tender_period: Period {
                start_date: published,
                end_date: published,
            },
            award_date: None,
            contract_date: None,
        },
        cpv: Cpv {
            code: "50000000-5".into(),
            description: "Repair and maintenance services".into(),
        },
        classification: Classification {
            scheme: "CPV".into(),
            id: "50000000-5".into(),
            description: "Repair and maintenance services".into(),
        },
        documents: Vec::new(),
        procurement_method: ProcurementMethod::Open,
        main_procurement_category: ProcurementCategory::Services,
        eligibility_criteria: String::new(),
        award_criteria: String::new(),
        submission_method: Vec::new(),
        submission_method_details: String::new(),
        enquiry_period: None,
        has_enquiries: false,
        number_of_tenderers: 1,
    }
}
