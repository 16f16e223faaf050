use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::hotels::CertificationRecord;
use crate::ConfigError;

/// On-disk form of the certified-hotel registry.
///
/// ```yaml
/// hotels:
///   - id: "123456"
///     cert_level: Gold
///     description: Powered entirely by renewable energy.
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryFile {
    pub hotels: Vec<CertificationRecord>,
}

/// Load and validate the certified-hotel registry from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_registry_file(path: &Path) -> Result<RegistryFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::RegistryFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_registry(&content)
}

/// Parse and validate registry YAML already in memory.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_registry(content: &str) -> Result<RegistryFile, ConfigError> {
    let registry: RegistryFile = serde_yaml::from_str(content)?;
    validate_registry(&registry)?;
    Ok(registry)
}

fn validate_registry(registry: &RegistryFile) -> Result<(), ConfigError> {
    let mut seen_ids = HashSet::new();

    for record in &registry.hotels {
        if record.id.trim().is_empty() {
            return Err(ConfigError::Validation(
                "certified hotel id must be non-empty".to_string(),
            ));
        }

        if !seen_ids.insert(record.id.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate certified hotel id: '{}'",
                record.id
            )));
        }
    }

    Ok(())
}
