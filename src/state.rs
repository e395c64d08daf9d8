use std::fmt;
use std::sync::Arc;

use anyhow::Context;
use bims_auth::{Authenticator, UserStore};
use bims_config::{CorsConfig, JwtConfig, StoreConfig};
use bims_db::{MemoryUserStore, PgUserStore, init_db_pool, run_migrations};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub authenticator: Authenticator,
    pub cors_config: CorsConfig,
    pub metrics_handle: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(jwt_config: JwtConfig, cors_config: CorsConfig, users: Arc<dyn UserStore>) -> Self {
        Self {
            authenticator: Authenticator::new(jwt_config, users.clone()),
            users,
            cors_config,
            metrics_handle: None,
        }
    }

    pub fn with_metrics(mut self, handle: Option<PrometheusHandle>) -> Self {
        self.metrics_handle = handle;
        self
    }

    pub fn jwt_config(&self) -> &JwtConfig {
        self.authenticator.jwt_config()
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("authenticator", &self.authenticator)
            .field("cors_config", &self.cors_config)
            .field("metrics", &self.metrics_handle.is_some())
            .finish_non_exhaustive()
    }
}

pub async fn init_user_store(config: &StoreConfig) -> anyhow::Result<Arc<dyn UserStore>> {
    match config {
        StoreConfig::Postgres {
            database_url,
            run_migrations: migrate,
            max_connections,
        } => {
            let pool = init_db_pool(database_url, *max_connections)
                .await
                .context("Failed to connect to database")?;

            if *migrate {
                run_migrations(&pool)
                    .await
                    .context("Failed to run database migrations")?;
                tracing::info!("Database migrations applied");
            }

            Ok(Arc::new(PgUserStore::new(pool)))
        }
        StoreConfig::Memory => {
            tracing::warn!("Using in-memory user store; records are lost on restart");
            Ok(Arc::new(MemoryUserStore::new()))
        }
    }
}

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let jwt_config = JwtConfig::from_env()?;
    let cors_config = CorsConfig::from_env();
    let store_config = StoreConfig::from_env()?;

    let users = init_user_store(&store_config).await?;

    Ok(AppState::new(jwt_config, cors_config, users))
}
