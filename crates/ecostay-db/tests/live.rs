//! Live integration tests for ecostay-db using `#[sqlx::test]`.
//!
//! Each test gets a fresh, fully-migrated Postgres database spun up by the
//! sqlx test harness. Run with `DATABASE_URL` set and `--ignored`.

use ecostay_core::{CertificationLevel, CertificationRecord};
use ecostay_db::{list_certified_hotels, upsert_certified_hotels};

fn record(id: &str, level: CertificationLevel, description: &str) -> CertificationRecord {
    CertificationRecord {
        id: id.to_string(),
        certification_level: level,
        description: description.to_string(),
    }
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn upsert_then_list_round_trips_registry(pool: sqlx::PgPool) {
    let records = vec![
        record("789012", CertificationLevel::Silver, "Rainwater harvesting"),
        record("123456", CertificationLevel::Gold, "Renewable energy"),
    ];
    let written = upsert_certified_hotels(&pool, &records)
        .await
        .expect("upsert");
    assert_eq!(written, 2);

    let listed = list_certified_hotels(&pool).await.expect("list");
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, "123456");
    assert_eq!(listed[0].certification_level, CertificationLevel::Gold);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn upsert_updates_existing_level(pool: sqlx::PgPool) {
    upsert_certified_hotels(
        &pool,
        &[record("1", CertificationLevel::Silver, "before")],
    )
    .await
    .expect("first upsert");
    upsert_certified_hotels(
        &pool,
        &[record("1", CertificationLevel::VerifiedGreen, "after")],
    )
    .await
    .expect("second upsert");

    let listed = list_certified_hotels(&pool).await.expect("list");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].certification_level, CertificationLevel::VerifiedGreen);
    assert_eq!(listed[0].description, "after");
}
