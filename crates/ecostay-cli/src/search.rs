//! `search` subcommand: runs the pipeline once and prints the event stream.

use std::io::Write;
use std::sync::Arc;

use chrono::Utc;
use clap::Args;
use ecostay_core::{AppConfig, SearchRequest};
use ecostay_db::PoolConfig;
use ecostay_search::{
    build_http_client, ndjson_line, stream_hotels, CertificationRegistry, PgRegistry,
    SearchPipeline, StaticRegistry,
};
use futures::StreamExt;

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Free-text destination (e.g., "Aspen")
    #[arg(long)]
    pub destination: String,
    /// Check-in date, YYYY-MM-DD
    #[arg(long)]
    pub check_in: String,
    /// Check-out date, YYYY-MM-DD
    #[arg(long)]
    pub check_out: String,
    /// Keep only this certification level (repeatable)
    #[arg(long = "certification")]
    pub certifications: Vec<String>,
    /// Minimum nightly price
    #[arg(long)]
    pub min_price: Option<f64>,
    /// Maximum nightly price
    #[arg(long)]
    pub max_price: Option<f64>,
    /// Require this amenity (repeatable)
    #[arg(long = "amenity")]
    pub amenities: Vec<String>,
}

impl SearchArgs {
    fn into_request(self) -> SearchRequest {
        let price_range = match (self.min_price, self.max_price) {
            (None, None) => None,
            (min, max) => Some([min.unwrap_or(0.0), max.unwrap_or(f64::INFINITY)]),
        };
        SearchRequest {
            destination: self.destination,
            check_in: self.check_in,
            check_out: self.check_out,
            certifications: (!self.certifications.is_empty()).then_some(self.certifications),
            price_range,
            amenities: (!self.amenities.is_empty()).then_some(self.amenities),
        }
    }
}

/// Run one search and write NDJSON frames to stdout.
///
/// # Errors
///
/// Returns an error if the arguments fail validation, the registry cannot be
/// opened, or any pipeline stage fails. No frames are written in that case.
pub(crate) async fn run_search(config: &AppConfig, args: SearchArgs) -> anyhow::Result<()> {
    let query = args.into_request().into_query(Utc::now().date_naive())?;
    let registry = open_registry(config).await?;
    let http = build_http_client(
        config.providers.http_timeout_secs,
        &config.providers.http_user_agent,
    )?;
    let pipeline = SearchPipeline::from_settings(&config.providers, &http, registry)?;

    let hotels = pipeline.run(&query).await?;

    let mut events = Box::pin(stream_hotels(hotels));
    let mut stdout = std::io::stdout();
    while let Some(event) = events.next().await {
        stdout.write_all(ndjson_line(&event)?.as_bytes())?;
    }
    stdout.flush()?;
    Ok(())
}

async fn open_registry(config: &AppConfig) -> anyhow::Result<Arc<dyn CertificationRegistry>> {
    if let Some(database_url) = config.database_url.as_deref() {
        let pool =
            ecostay_db::connect_pool(database_url, PoolConfig::from_app_config(config)).await?;
        return Ok(Arc::new(PgRegistry::new(pool)));
    }
    Ok(Arc::new(StaticRegistry::from_file(&config.registry_path)?))
}
