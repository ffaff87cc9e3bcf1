//! Product rating service entry point.
//!
//! Reads configuration from a TOML file
//! (~/.config/rating-service/config.toml by default, `RATING_CONFIG` to
//! override), runs migrations and serves the REST API.

use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use rating_service::application::{AuthService, CatalogService, ReviewService};
use rating_service::config::AppConfig;
use rating_service::infrastructure::blob::LocalDiskStore;
use rating_service::infrastructure::crypto::jwt::JwtConfig;
use rating_service::infrastructure::database::migrator::Migrator;
use rating_service::infrastructure::database::repositories::{
    ProductRepository, ReviewRepository, UserRepository,
};
use rating_service::{create_api_router, default_config_path, init_database, DatabaseConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("RATING_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            warn!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting product rating service...");

    // ── Prometheus metrics recorder (must be installed before any metrics calls) ──
    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder");
    info!("Prometheus metrics recorder installed");

    // ── Security ───────────────────────────────────────────────
    // Refuse to start without a provisioned signing secret; a default one
    // would make every session forgeable.
    let Some(secret) = app_cfg.security.resolved_secret() else {
        error!("No JWT secret configured. Set [security].jwt_secret or the JWT_SECRET env var.");
        return Err("missing JWT secret".into());
    };
    let jwt_config = JwtConfig::new(secret, app_cfg.security.token_ttl_hours);
    info!(
        "JWT configured with {}h token expiration",
        jwt_config.expiration_hours
    );

    // ── Database ───────────────────────────────────────────────
    let db_config = DatabaseConfig {
        url: app_cfg.database.connection_url(),
    };

    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    // ── Repositories & services ────────────────────────────────
    let user_repo = Arc::new(UserRepository::new(db.clone()));
    let product_repo = Arc::new(ProductRepository::new(db.clone()));
    let review_repo = Arc::new(ReviewRepository::new(db.clone()));

    let auth_service = Arc::new(AuthService::new(user_repo, jwt_config.clone()));
    let catalog_service = Arc::new(CatalogService::new(
        product_repo.clone(),
        review_repo.clone(),
    ));
    let review_service = Arc::new(ReviewService::new(review_repo, product_repo));

    let blob_store = Arc::new(LocalDiskStore::new(
        &app_cfg.uploads.dir,
        app_cfg.uploads.public_base.clone(),
    ));
    info!("Blob store writing to {}", app_cfg.uploads.dir);

    // ── REST API ───────────────────────────────────────────────
    let api_router = create_api_router(
        auth_service,
        catalog_service,
        review_service,
        blob_store,
        db.clone(),
        jwt_config,
        prometheus_handle,
    );

    let addr = format!("{}:{}", app_cfg.server.host, app_cfg.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("REST API server listening on http://{}", addr);
    info!("Swagger UI available at http://{}/docs/", addr);

    axum::serve(listener, api_router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // ── Cleanup ────────────────────────────────────────────────
    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    } else {
        info!("Database connection closed");
    }

    info!("Product rating service shutdown complete");
    Ok(())
}

/// Resolve on SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
