//! # PlotMap Service
//!
//! REST API server for real-estate layout maps and plot booking.
//! Reads configuration from TOML file (~/.config/plotmap/config.toml).

use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use plotmap::application::services::{BookingService, LayoutService, PlotService};
use plotmap::auth::{hash_password, JwtConfig};
use plotmap::domain::{RepositoryProvider, User, UserRole};
use plotmap::infrastructure::image::{DefaultImageProbe, FsImageStore};
use plotmap::{
    create_api_router, default_config_path, init_database, AppConfig, DatabaseConfig, Migrator,
    SeaOrmRepositoryProvider,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("PLOTMAP_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            init_logging(&cfg);
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            let cfg = AppConfig::default();
            init_logging(&cfg);
            warn!("Failed to load config: {}. Using defaults.", e);
            cfg
        }
    };

    info!("Starting PlotMap Service...");

    let db_config = DatabaseConfig {
        url: app_cfg.database.url.clone(),
    };
    info!("Database: {}", db_config.url);

    let jwt_config = JwtConfig {
        secret: app_cfg.security.jwt_secret.clone(),
        expiration_hours: app_cfg.security.jwt_expiration_hours,
        issuer: "plotmap".to_string(),
    };
    info!(
        "JWT configured with {}h token expiration",
        jwt_config.expiration_hours
    );

    // ── Database ───────────────────────────────────────────────
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

    let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));

    // Create default admin user if no users exist
    create_default_admin(repos.as_ref(), &app_cfg).await;

    // ── Services ───────────────────────────────────────────────
    let image_store = Arc::new(FsImageStore::new(
        app_cfg.uploads.dir.clone(),
        app_cfg.uploads.public_prefix.clone(),
    ));
    let layout_service = Arc::new(LayoutService::new(
        repos.clone(),
        image_store,
        Arc::new(DefaultImageProbe),
    ));
    let plot_service = Arc::new(PlotService::new(repos.clone()));
    let booking_service = Arc::new(BookingService::new(repos.clone()));

    // ── HTTP server ────────────────────────────────────────────
    let router = create_api_router(
        repos,
        layout_service,
        plot_service,
        booking_service,
        jwt_config,
        app_cfg.uploads.dir.clone(),
        &app_cfg.uploads.public_prefix,
    );

    let addr = app_cfg.server.address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("REST API server listening on http://{}", addr);
    info!("Swagger UI available at http://{}/docs/", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Performing final cleanup...");
    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    } else {
        info!("Database connection closed");
    }

    info!("PlotMap Service shutdown complete");
    Ok(())
}

fn init_logging(cfg: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level));
    if cfg.logging.json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received");
}

/// Create default admin user if no users exist
async fn create_default_admin(repos: &dyn RepositoryProvider, app_cfg: &AppConfig) {
    let users_count = match repos.users().count().await {
        Ok(n) => n,
        Err(e) => {
            error!("Failed to count users: {}", e);
            return;
        }
    };
    if users_count > 0 {
        return;
    }

    info!("Creating default admin user...");
    let password_hash = match hash_password(&app_cfg.admin.password) {
        Ok(hash) => hash,
        Err(e) => {
            error!("Failed to hash admin password: {}", e);
            return;
        }
    };

    let admin = User::new(
        app_cfg.admin.username.clone(),
        app_cfg.admin.email.clone(),
        password_hash,
        UserRole::Admin,
    );
    match repos.users().save(admin).await {
        Ok(()) => info!(
            "Default admin user created (username: {})",
            app_cfg.admin.username
        ),
        Err(e) => error!("Failed to create default admin: {}", e),
    }
}
