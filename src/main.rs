use anyhow::Context;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use dotenvy::dotenv;

use blog_api::app::{cors_layer, create_app};
use blog_api::config::Config;
use blog_api::db::pool::create_pool;
use blog_api::state::SharedAppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  dotenv().ok();

  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("blog_api=info,tower_http=info")),
    )
    .init();

  let config = Config::from_env()?;

  let pool = create_pool(&config.database)
    .await
    .context("Failed to create database pool")?;

  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .context("Failed to apply database migrations")?;

  tracing::info!("Database migrations applied successfully");

  let app_state = SharedAppState::new(pool.clone());
  let app = create_app(app_state).layer(cors_layer(&config.cors_allowed_origins));

  let address = config.bind_address();
  let listener = tokio::net::TcpListener::bind(&address)
    .await
    .with_context(|| format!("Failed to bind {}", address))?;

  tracing::info!("Server running on http://{}", address);

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

  pool.close().await;
  tracing::info!("Database pool closed");

  Ok(())
}

async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(e) = signal::ctrl_c().await {
      tracing::error!("Failed to install Ctrl+C handler: {}", e);
      std::future::pending::<()>().await;
    }
  };

  #[cfg(unix)]
  let terminate = async {
    match signal::unix::signal(signal::unix::SignalKind::terminate()) {
      Ok(mut stream) => {
        stream.recv().await;
      }
      Err(e) => {
        tracing::error!("Failed to install signal handler: {}", e);
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

  tracing::info!("Received termination signal, shutting down gracefully...");
}
