use sqlx::PgPool;

/// Connect, migrate, verify the lookup tables are populated.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    bancadati_db::health_check(&pool).await.unwrap();

    let expected = [
        ("tender_statuses", 6),
        ("procurement_categories", 3),
        ("award_criteria", 2),
    ];
    for (table, rows) in expected {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, rows, "{table} seed rows");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_procurement_method_is_checked(pool: PgPool) {
    let authority: i64 = sqlx::query_scalar(
        "INSERT INTO contracting_authorities (code, name) VALUES ('A1', 'Comune') RETURNING id",
    )
    .fetch_one(&pool)
    .await
    .unwrap();

    let result = sqlx::query(
        "INSERT INTO tenders (ocid, authority_id, status_id, procurement_method, title, published_at) \
         VALUES ('x', $1, 1, 'auction', 'Gara', now())",
    )
    .bind(authority)
    .execute(&pool)
    .await;

    assert!(result.is_err(), "unknown procurement method must be rejected");
}
