//! User store selection.
//!
//! # Environment Variables
//!
//! - `BIMS_STORE`: `postgres` (default) or `memory`
//! - `DATABASE_URL`: PostgreSQL connection string (required for `postgres`)
//! - `RUN_MIGRATIONS`: apply pending migrations at startup (default: `true`)
//! - `DB_MAX_CONNECTIONS`: pool size (default: 10)

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    Postgres {
        database_url: String,
        run_migrations: bool,
        max_connections: u32,
    },
    /// Process-local store; contents are lost on restart.
    Memory,
}

impl StoreConfig {
    pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(crate::env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = lookup("BIMS_STORE").unwrap_or_else(|| "postgres".to_string());

        match backend.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "postgres" | "postgresql" => {
                let database_url =
                    lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
                let run_migrations = lookup("RUN_MIGRATIONS")
                    .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no"))
                    .unwrap_or(true);
                let max_connections = match lookup("DB_MAX_CONNECTIONS") {
                    Some(raw) => match raw.trim().parse::<u32>() {
                        Ok(n) if n > 0 => n,
                        _ => {
                            return Err(ConfigError::invalid(
                                "DB_MAX_CONNECTIONS",
                                format!("expected a positive integer, got '{}'", raw),
                            ));
                        }
                    },
                    None => Self::DEFAULT_MAX_CONNECTIONS,
                };

                Ok(Self::Postgres {
                    database_url,
                    run_migrations,
                    max_connections,
                })
            }
            other => Err(ConfigError::invalid(
                "BIMS_STORE",
                format!("unknown backend '{}', expected 'postgres' or 'memory'", other),
            )),
        }
    }
}
