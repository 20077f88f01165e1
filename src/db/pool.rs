use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::config::DatabaseConfig;

pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
  let pool = pool_options(config).connect(&config.url).await?;

  tracing::info!(max_connections = config.max_connections, "Database pool created");

  Ok(pool)
}

/// Builds a pool that only opens connections on first use.
pub fn create_lazy_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
  pool_options(config).connect_lazy(&config.url)
}

fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
  PgPoolOptions::new()
    .max_connections(config.max_connections)
    .max_lifetime(config.max_lifetime)
    .test_before_acquire(true)
}
