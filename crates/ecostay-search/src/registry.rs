//! Read access to the certified-hotel registry.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use ecostay_core::{load_registry_file, CertificationRecord};
use sqlx::PgPool;

use crate::error::SearchError;

/// Read-only view of the certified-hotel registry.
///
/// Each call returns a consistent snapshot of the full current set; the merge
/// step works against that snapshot for the rest of the search.
#[async_trait]
pub trait CertificationRegistry: Send + Sync {
    async fn certified_hotels(&self) -> Result<Vec<CertificationRecord>, SearchError>;

    /// Cheap availability probe for health checks.
    async fn check(&self) -> Result<(), SearchError> {
        self.certified_hotels().await.map(|_| ())
    }
}

/// Registry backed by the `certified_hotels` Postgres table.
#[derive(Clone)]
pub struct PgRegistry {
    pool: PgPool,
}

impl PgRegistry {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CertificationRegistry for PgRegistry {
    async fn certified_hotels(&self) -> Result<Vec<CertificationRecord>, SearchError> {
        ecostay_db::list_certified_hotels(&self.pool)
            .await
            .map_err(|e| SearchError::Registry(e.to_string()))
    }

    async fn check(&self) -> Result<(), SearchError> {
        ecostay_db::health_check(&self.pool)
            .await
            .map_err(|e| SearchError::Registry(e.to_string()))
    }
}

/// Registry held in memory, typically loaded once from the YAML file.
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    records: Arc<Vec<CertificationRecord>>,
}

impl StaticRegistry {
    #[must_use]
    pub fn new(records: Vec<CertificationRecord>) -> Self {
        Self {
            records: Arc::new(records),
        }
    }

    /// # Errors
    ///
    /// Returns [`SearchError::Registry`] if the file cannot be read, parsed or
    /// validated.
    pub fn from_file(path: &Path) -> Result<Self, SearchError> {
        let file = load_registry_file(path).map_err(|e| SearchError::Registry(e.to_string()))?;
        tracing::info!(
            path = %path.display(),
            count = file.hotels.len(),
            "loaded certified hotel registry file"
        );
        Ok(Self::new(file.hotels))
    }
}

#[async_trait]
impl CertificationRegistry for StaticRegistry {
    async fn certified_hotels(&self) -> Result<Vec<CertificationRecord>, SearchError> {
        Ok(self.records.as_ref().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecostay_core::CertificationLevel;

    #[tokio::test]
    async fn static_registry_returns_its_records() {
        let registry = StaticRegistry::new(vec![CertificationRecord {
            id: "123456".to_string(),
            certification_level: CertificationLevel::Gold,
            description: "Solar".to_string(),
        }]);
        let records = registry.certified_hotels().await.unwrap();
        assert_eq!(records.len(), 1);
        assert!(registry.check().await.is_ok());
    }

    #[test]
    fn missing_file_is_registry_error() {
        let err = StaticRegistry::from_file(Path::new("/nonexistent/registry.yaml")).unwrap_err();
        assert!(matches!(err, SearchError::Registry(_)));
    }
}
