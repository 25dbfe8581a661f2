use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info, warn};

use tenant_api::{build_router, AppState};
use tenant_core::diagnostics::TracingDiagnosticSink;
use tenant_core::services::{ProvisioningService, TenantQueryService};
use tenant_infrastructure::secrets::{resolve_required, SecretProvider};
use tenant_infrastructure::{
    create_pool, run_migrations, EnvSecretProvider, HttpIdentityClient, PgTenantStore, VaultSecretProvider,
};
use tenant_shared::config::AppConfig;
use tenant_shared::constants::DATABASE_URL_SECRET;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("failed to load configuration")?;

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = tenant_shared::telemetry::init_telemetry(&config.telemetry)?;

    info!(env = %config.app.env, "{} starting...", config.app.name);

    let database_url = resolve_database_url(&config).await?;

    let pool = create_pool(&config.database, &database_url)
        .await
        .context("failed to connect to database")?;
    info!("Database connection established.");

    if config.database.run_migrations {
        run_migrations(&pool).await.context("failed to run migrations")?;
        info!("Database migrations applied.");
    }

    let store = Arc::new(PgTenantStore::new(pool.clone()));
    let identity = Arc::new(
        HttpIdentityClient::new(config.identity.base_url.clone(), config.identity.timeout())
            .context("failed to build identity service client")?,
    );
    info!("Identity service at {}", config.identity.base_url);

    let provisioning = ProvisioningService::new(
        store.clone(),
        identity,
        Arc::new(TracingDiagnosticSink),
        config.provisioning.remote_deadline(),
    );
    let queries = TenantQueryService::new(store);

    let app = build_router(AppState::new(provisioning, queries), config.app.request_timeout());

    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("{} stopped.", config.app.name);

    Ok(())
}

/// Explicit `database.url` wins; otherwise Vault when configured, else the environment.
async fn resolve_database_url(config: &AppConfig) -> anyhow::Result<String> {
    if !config.database.url.is_empty() {
        return Ok(config.database.url.clone());
    }

    let provider: Box<dyn SecretProvider> = match config.vault.credentials() {
        Some((addr, token)) => Box::new(VaultSecretProvider::new(addr, token, &config.vault.secret_path)?),
        None => Box::new(EnvSecretProvider),
    };
    info!("Resolving database URL from {}", provider.name());

    resolve_required(provider.as_ref(), DATABASE_URL_SECRET)
        .await
        .with_context(|| format!("failed to resolve {} from {}", DATABASE_URL_SECRET, provider.name()))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    warn!("Shutdown signal received, draining connections...");
}
