mod api;
mod middleware;

use std::sync::Arc;
use std::time::Duration;

use ecostay_search::{build_http_client, CertificationRegistry, PgRegistry, StaticRegistry};
use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, AppState},
    middleware::RateLimitState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ecostay_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(env = %config.env, bind_addr = %config.bind_addr, "starting ecostay-server");

    let registry: Arc<dyn CertificationRegistry> = match config.database_url.as_deref() {
        Some(database_url) => {
            let pool_config = ecostay_db::PoolConfig::from_app_config(&config);
            let pool = ecostay_db::connect_pool(database_url, pool_config).await?;
            ecostay_db::run_migrations(&pool).await?;
            tracing::info!("certification registry: postgres");
            Arc::new(PgRegistry::new(pool))
        }
        None => {
            let registry = StaticRegistry::from_file(&config.registry_path)?;
            tracing::info!(
                path = %config.registry_path.display(),
                "certification registry: yaml file (DATABASE_URL not set)"
            );
            Arc::new(registry)
        }
    };

    if config.providers.geocoding_api_key.is_none() {
        tracing::warn!(
            provider = %config.providers.geocoding_provider,
            "GEOCODING_API_KEY not set; searches will fail with a configuration error"
        );
    }
    if config.providers.inventory_api_key.is_none() {
        tracing::warn!("INVENTORY_API_KEY not set; searches will fail with a configuration error");
    }

    let http = build_http_client(
        config.providers.http_timeout_secs,
        &config.providers.http_user_agent,
    )?;
    let state = AppState {
        providers: Arc::new(config.providers.clone()),
        http,
        registry,
    };
    let rate_limit = RateLimitState::new(config.rate_limit_per_minute, Duration::from_secs(60));
    let app = build_app(state, rate_limit);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
