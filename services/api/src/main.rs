use anyhow::{Context, Result};
use auth::{AuthService, CredentialHasher, JwtService, UserRepository};
use common::database::{health_check, init_pool, run_migrations};
use media::S3Uploader;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use dealer_api::{
    config::Settings,
    create_router,
    payments::MercadoPagoClient,
    repositories::{ConfigRepository, VehicleRepository},
    services::{CatalogService, ConfigService},
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting dealership API service");

    let settings = Settings::from_env().context("Failed to load settings")?;

    // Initialize database connection pool and schema
    let pool = init_pool(&settings.database).await?;
    run_migrations(&pool).await?;
    if health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    let auth = AuthService::new(
        Arc::new(UserRepository::new(pool.clone())),
        JwtService::new(settings.jwt.clone())?,
        CredentialHasher::default(),
        settings.bootstrap.superadmin_username.clone(),
    );
    let created = auth
        .seed_superadmin(
            &settings.bootstrap.superadmin_name,
            settings.bootstrap.superadmin_password.as_deref(),
        )
        .await
        .context("Failed to bootstrap the superadmin account")?;
    if created {
        info!(
            "Created superadmin {}",
            settings.bootstrap.superadmin_username
        );
    }

    let uploader = S3Uploader::from_config(settings.media.clone()).await;
    let catalog = CatalogService::new(
        Arc::new(VehicleRepository::new(pool.clone())),
        Arc::new(uploader),
    );
    let seeded = catalog.seed_default_catalog().await?;
    if seeded > 0 {
        info!("Seeded {} default vehicles", seeded);
    }

    let payments = MercadoPagoClient::new(settings.payments.clone());
    if !payments.is_configured() {
        warn!("No Mercado Pago access token configured, checkout links are disabled");
    }

    let app_state = AppState {
        auth,
        catalog,
        site_config: ConfigService::new(Arc::new(ConfigRepository::new(pool))),
        payments: Arc::new(payments),
    };

    // Start the web server
    let app = create_router(app_state, &settings.server);

    let address = settings.server.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    info!("API service listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("API service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for the shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down API service");
}
