//! Read and seed operations for the `certified_hotels` table.

use chrono::{DateTime, Utc};
use ecostay_core::{CertificationLevel, CertificationRecord};
use sqlx::PgPool;

use crate::DbError;

/// A row from the `certified_hotels` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CertifiedHotelRow {
    pub id: String,
    pub cert_level: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<CertifiedHotelRow> for CertificationRecord {
    type Error = DbError;

    fn try_from(row: CertifiedHotelRow) -> Result<Self, Self::Error> {
        let certification_level = row.cert_level.parse::<CertificationLevel>().map_err(|_| {
            DbError::InvalidCertification {
                id: row.id.clone(),
                level: row.cert_level.clone(),
            }
        })?;
        Ok(CertificationRecord {
            id: row.id,
            certification_level,
            description: row.description,
        })
    }
}

/// Return the full current registry, ordered by id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails, or
/// [`DbError::InvalidCertification`] if a row carries an unknown level.
pub async fn list_certified_hotels(pool: &PgPool) -> Result<Vec<CertificationRecord>, DbError> {
    let rows = sqlx::query_as::<_, CertifiedHotelRow>(
        "SELECT id, cert_level, description, created_at, updated_at \
         FROM certified_hotels \
         ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(CertificationRecord::try_from).collect()
}

/// Upsert registry records. All writes run in one transaction.
///
/// Returns the number of records processed.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any statement fails; nothing is committed.
pub async fn upsert_certified_hotels(
    pool: &PgPool,
    records: &[CertificationRecord],
) -> Result<usize, DbError> {
    let mut tx = pool.begin().await?;

    for record in records {
        sqlx::query(
            "INSERT INTO certified_hotels (id, cert_level, description) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (id) DO UPDATE SET \
                 cert_level = EXCLUDED.cert_level, \
                 description = EXCLUDED.description, \
                 updated_at = NOW()",
        )
        .bind(&record.id)
        .bind(record.certification_level.as_str())
        .bind(&record.description)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(records.len())
}
