//! Application state shared with every handler
//!
//! Everything here is built once at startup and is cheap to clone: the pool
//! and HTTP client are internally reference counted, the rest sit behind
//! `Arc`.

use crate::auth::JwtService;
use crate::config::AppConfig;
use crate::nutrition::{self, BarcodeLookupChain, RestaurantSearch, SupplementLookupChain};
use anyhow::Result;
use metrics_exporter_prometheus::PrometheusHandle;
use ml_fitness_shared::supplements::SupplementCatalog;
use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::RwLock;

/// External lookups, all sharing one HTTP client
#[derive(Clone)]
pub struct NutritionClients {
    pub foods: BarcodeLookupChain,
    pub supplements: SupplementLookupChain,
    pub restaurants: RestaurantSearch,
}

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<AppConfig>,
    /// JWT keys are derived once here
    pub jwt: JwtService,
    pub nutrition: NutritionClients,
    /// Built-in formulations plus custom additions made at runtime
    pub catalog: Arc<RwLock<SupplementCatalog>>,
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(db: PgPool, config: AppConfig) -> Result<Self> {
        let jwt = JwtService::new(
            &config.jwt.secret,
            config.jwt.access_token_expiry_secs,
            config.jwt.refresh_token_expiry_secs,
        );

        let client = nutrition::http_client(&config.nutrition)?;
        let nutrition = NutritionClients {
            foods: BarcodeLookupChain::from_config(client.clone(), &config.nutrition),
            supplements: SupplementLookupChain::from_config(client.clone(), &config.nutrition),
            restaurants: RestaurantSearch::from_config(client, &config.nutrition),
        };

        Ok(Self {
            db,
            config: Arc::new(config),
            jwt,
            nutrition,
            catalog: Arc::new(RwLock::new(SupplementCatalog::builtin())),
            metrics: None,
        })
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    #[inline]
    pub fn db(&self) -> &PgPool {
        &self.db
    }

    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[inline]
    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }

    #[inline]
    pub fn nutrition(&self) -> &NutritionClients {
        &self.nutrition
    }
}
