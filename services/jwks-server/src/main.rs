//! JWKS server binary.

use std::sync::Arc;

use anyhow::Context;
use jwks_server::keys::{KeyGenerator, RsaKeyGenerator, seed_keys};
use jwks_server::{AppState, Clock, Config, KeyStore, SqliteStore, SystemClock, create_router, shutdown, telemetry};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    telemetry::init(&config.telemetry)?;

    info!(db_path = %config.db_path.display(), "Starting JWKS server");

    let store: Arc<dyn KeyStore> = Arc::new(
        SqliteStore::open(&config.db_path)
            .await
            .context("opening key store")?,
    );
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let generator: Arc<dyn KeyGenerator> = Arc::new(RsaKeyGenerator::new());

    // Nothing is served until both keys are stored.
    let report = seed_keys(store.as_ref(), generator, clock.now())
        .await
        .context("seeding signing keys")?;
    info!(valid_kid = report.valid_kid, expired_kid = report.expired_kid, "Key store ready");

    let app = create_router(Arc::new(AppState::new(store, clock)));

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    info!(addr = %addr, "JWKS server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown::wait_for_signal())
        .await?;

    info!("Shutdown complete");
    Ok(())
}
