//! ML Fitness backend server
//!
//! Layers, outermost first:
//! - Routes: HTTP handling and authentication
//! - Services: validation and business rules
//! - Repositories: PostgreSQL access through SQLx
//! - Nutrition: external barcode and restaurant lookups

use anyhow::Result;
use ml_fitness_backend::{config, db, metrics, routes, state::AppState};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    init_tracing();

    let config = config::AppConfig::load()?;
    let production = config::AppConfig::is_production();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if production { "production" } else { "development" },
        "Starting ML Fitness backend"
    );

    if production {
        config.validate_for_production()?;
        if config.database.url.contains("localhost") || config.database.url.contains("127.0.0.1") {
            warn!("Database URL points at localhost in production");
        }
    }
    log_provider_status(&config.nutrition);

    info!("Connecting to database...");
    let db_pool = db::create_pool(&config.database).await?;

    // production runs migrations as a separate job
    if !production {
        db::run_migrations(&db_pool).await?;
    }

    let prometheus = metrics::install_recorder()?;
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(db_pool, config)?.with_metrics(prometheus);

    let app = routes::create_router(state);

    info!(address = %addr, "Server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if config::AppConfig::is_production() {
            "ml_fitness_backend=info,tower_http=info".into()
        } else {
            "ml_fitness_backend=debug,tower_http=debug,sqlx=warn".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if config::AppConfig::is_production() {
        subscriber
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

/// Missing keys are not an error: those providers are skipped
fn log_provider_status(nutrition: &config::NutritionConfig) {
    let configured = |present: bool| if present { "configured" } else { "skipped" };
    info!(
        usda = configured(nutrition.usda_key().is_some()),
        spoonacular = configured(nutrition.spoonacular_key().is_some()),
        nutritionix = configured(nutrition.nutritionix_credentials().is_some()),
        mock_fallback = nutrition.use_mock_fallback,
        "Nutrition providers"
    );
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
