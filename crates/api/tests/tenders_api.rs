//! HTTP-level tests for the tender endpoints over the in-memory store.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use bancadati_core::tender::TenderStatus;
use common::{body_json, get, mock_store, UnreachableStore};
use serde_json::Value;

fn ids(json: &Value) -> Vec<String> {
    json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap().to_string())
        .collect()
}

async fn list(uri: &str) -> Value {
    let response = get(common::mock_app(), uri).await;
    assert_eq!(response.status(), StatusCode::OK, "GET {uri}");
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_defaults_to_first_page_of_ten() {
    let json = list("/api/tenders").await;

    assert_eq!(json["data"].as_array().unwrap().len(), 10);
    assert_eq!(json["pagination"]["currentPage"], 1);
    assert_eq!(json["pagination"]["totalPages"], 5);
    assert_eq!(json["pagination"]["totalItems"], 50);
    assert_eq!(json["pagination"]["itemsPerPage"], 10);
}

#[tokio::test]
async fn tenders_use_camel_case_wire_names() {
    let json = list("/api/tenders?limit=1").await;
    let tender = &json["data"][0];

    for key in [
        "id",
        "cig",
        "title",
        "status",
        "buyer",
        "suppliers",
        "value",
        "dates",
        "cpv",
        "classification",
        "documents",
        "procurementMethod",
        "mainProcurementCategory",
        "awardCriteria",
        "submissionMethod",
        "numberOfTenderers",
    ] {
        assert!(!tender[key].is_null(), "missing {key}");
    }
    assert!(tender["dates"]["tenderPeriod"]["startDate"].is_string());
    assert!(tender["buyer"]["contactPoint"]["email"].is_string());
}

#[tokio::test]
async fn list_is_newest_first() {
    let json = list("/api/tenders?limit=100").await;
    let published: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["dates"]["published"].as_str().unwrap())
        .collect();

    let parsed: Vec<_> = published
        .iter()
        .map(|p| chrono::DateTime::parse_from_rfc3339(p).unwrap())
        .collect();
    assert!(parsed.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn limit_is_clamped_and_page_normalized() {
    let json = list("/api/tenders?limit=1000&page=0").await;
    assert_eq!(json["pagination"]["itemsPerPage"], 100);
    assert_eq!(json["pagination"]["currentPage"], 1);
    assert_eq!(json["data"].as_array().unwrap().len(), 50);
}

#[tokio::test]
async fn pages_reassemble_the_full_listing() {
    let all = ids(&list("/api/tenders?limit=50").await);

    let mut paged = Vec::new();
    for page in 1..=4 {
        paged.extend(ids(&list(&format!("/api/tenders?limit=15&page={page}")).await));
    }

    assert_eq!(paged, all);
}

#[tokio::test]
async fn page_beyond_the_end_is_empty_not_an_error() {
    let json = list("/api/tenders?page=9").await;
    assert!(json["data"].as_array().unwrap().is_empty());
    assert_eq!(json["pagination"]["currentPage"], 9);
    assert_eq!(json["pagination"]["totalItems"], 50);
}

#[tokio::test]
async fn malformed_numbers_are_ignored() {
    let json = list("/api/tenders?minValue=abc&maxValue=&page=x&limit=y").await;
    assert_eq!(json["pagination"]["totalItems"], 50);
    assert_eq!(json["pagination"]["itemsPerPage"], 10);
}

#[tokio::test]
async fn unknown_keys_are_ignored() {
    let json = list("/api/tenders?sortBy=value&foo=bar").await;
    assert_eq!(json["pagination"]["totalItems"], 50);
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

#[tokio::test]
async fn zero_minimum_is_a_real_bound() {
    let json = list("/api/tenders?minValue=0&limit=100").await;
    assert_eq!(json["pagination"]["totalItems"], 50);

    let json = list("/api/tenders?maxValue=0").await;
    assert_eq!(json["pagination"]["totalItems"], 0);
}

#[tokio::test]
async fn value_range_is_inclusive() {
    let store = mock_store();
    let amount = store.tenders()[0].value.amount;
    let expected = store
        .tenders()
        .iter()
        .filter(|t| t.value.amount == amount)
        .count();

    let json = list(&format!("/api/tenders?minValue={amount}&maxValue={amount}")).await;

    assert_eq!(json["pagination"]["totalItems"], expected);
}

#[tokio::test]
async fn status_filter_matches_exactly() {
    let store = mock_store();
    let expected = store
        .tenders()
        .iter()
        .filter(|t| t.status == TenderStatus::Award)
        .count();

    let json = list("/api/tenders?status=award&limit=100").await;

    assert_eq!(json["pagination"]["totalItems"], expected);
    assert!(json["data"]
        .as_array()
        .unwrap()
        .iter()
        .all(|t| t["status"] == "award"));

    let json = list("/api/tenders?status=awar").await;
    assert_eq!(json["pagination"]["totalItems"], 0);
}

#[tokio::test]
async fn search_is_case_insensitive_across_fields() {
    let store = mock_store();
    let cig = store.tenders()[3].cig.to_lowercase();

    let json = list(&format!("/api/tenders?search={cig}")).await;

    assert_eq!(json["pagination"]["totalItems"], 1);
    assert_eq!(json["data"][0]["id"], store.tenders()[3].id);
}

#[tokio::test]
async fn combined_filters_are_conjunctive() {
    let store = mock_store();
    let expected = store
        .tenders()
        .iter()
        .filter(|t| t.buyer.name.contains("Ministero") && t.value.amount >= 1_000_000.0)
        .count();

    let json = list("/api/tenders?contractingAuthority=ministero&minValue=1000000&limit=100").await;

    assert_eq!(json["pagination"]["totalItems"], expected);
}

#[tokio::test]
async fn date_only_upper_bound_includes_the_whole_day() {
    let store = mock_store();
    let day = store.tenders()[0].dates.published.date_naive();
    let expected = store
        .tenders()
        .iter()
        .filter(|t| t.dates.published.date_naive() == day)
        .count();

    let json = list(&format!("/api/tenders?dateFrom={day}&dateTo={day}&limit=100")).await;

    assert_eq!(json["pagination"]["totalItems"], expected);
}

#[tokio::test]
async fn malformed_dates_are_ignored() {
    let json = list("/api/tenders?dateFrom=yesterday&dateTo=2024-13-45").await;
    assert_eq!(json["pagination"]["totalItems"], 50);
}

// ---------------------------------------------------------------------------
// Detail
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_tender_by_id() {
    let response = get(common::mock_app(), "/api/tenders/tender-012").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["id"], "tender-012");
    assert_eq!(json["cig"], "CIG00000012");
    assert_eq!(json["documents"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn unknown_tender_returns_404() {
    let response = get(common::mock_app(), "/api/tenders/tender-999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert!(json["error"].as_str().unwrap().contains("tender-999"));
}

// ---------------------------------------------------------------------------
// Filter options
// ---------------------------------------------------------------------------

#[tokio::test]
async fn filter_options_are_sorted_and_distinct() {
    let json = list("/api/tenders/filters/options").await;

    for key in [
        "authorities",
        "contractors",
        "cpvCodes",
        "statuses",
        "methods",
        "categories",
    ] {
        let values: Vec<&str> = json[key]
            .as_array()
            .unwrap_or_else(|| panic!("missing {key}"))
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert!(!values.is_empty(), "{key} is empty");
        assert!(values.windows(2).all(|w| w[0] < w[1]), "{key} not sorted");
    }

    let cpv = json["cpvCodes"][0].as_str().unwrap();
    assert!(cpv.contains(" - "), "cpv label {cpv}");
}

// ---------------------------------------------------------------------------
// Store failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unreachable_store_yields_generic_500() {
    for uri in [
        "/api/tenders",
        "/api/tenders/tender-001",
        "/api/tenders/filters/options",
    ] {
        let app = common::build_test_app(Arc::new(UnreachableStore));
        let response = get(app, uri).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR, "GET {uri}");
        let json = body_json(response).await;
        assert_eq!(json["error"], "Internal server error");
        assert_eq!(json["code"], "INTERNAL_ERROR");
    }
}
