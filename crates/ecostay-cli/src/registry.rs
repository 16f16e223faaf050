use std::path::Path;

use ecostay_core::{load_registry_file, CertificationLevel, RegistryFile};

/// Validate the registry file at `path` and print a per-level summary.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed, or validated.
pub(crate) fn run_check(path: &Path) -> anyhow::Result<()> {
    let file = load_registry_file(path)?;
    println!("{}: {}", path.display(), summarize(&file));
    Ok(())
}

fn summarize(file: &RegistryFile) -> String {
    let count = |level: CertificationLevel| {
        file.hotels
            .iter()
            .filter(|r| r.certification_level == level)
            .count()
    };
    format!(
        "{} certified hotels (Gold: {}, Silver: {}, Verified Green: {})",
        file.hotels.len(),
        count(CertificationLevel::Gold),
        count(CertificationLevel::Silver),
        count(CertificationLevel::VerifiedGreen),
    )
}
