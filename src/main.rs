use anyhow::Context;
use clap::Parser;
use dotenvy::dotenv;
use tracing::{error, info, warn};

use taxdesk::cli::{Cli, Command};
use taxdesk::logging::init_tracing;
use taxdesk::metrics::{init_metrics, metrics_app};
use taxdesk::modules::users::repository::UserRepository;
use taxdesk::modules::users::service::UserService;
use taxdesk::router::init_router;
use taxdesk::state::init_app_state;
use taxdesk_config::AppConfig;
use taxdesk_db::init_db_pool;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    init_tracing();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration; refusing to start");
            return Err(e.into());
        }
    };

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::CreateAdmin { username, password } => {
            create_admin(&config, &username, &password).await
        }
    }
}

async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let state = init_app_state(&config).await?;
    let app = init_router(state);

    if let Some(metrics_addr) = config.server.metrics_addr {
        match init_metrics() {
            Some(handle) => {
                let listener = tokio::net::TcpListener::bind(metrics_addr)
                    .await
                    .with_context(|| format!("failed to bind metrics listener on {}", metrics_addr))?;
                info!("Metrics available at http://{}/metrics", metrics_addr);
                tokio::spawn(async move {
                    if let Err(e) = axum::serve(listener, metrics_app(handle)).await {
                        error!(error = %e, "Metrics server stopped");
                    }
                });
            }
            None => warn!("METRICS_ADDR set but metrics are disabled"),
        }
    }

    let listener = tokio::net::TcpListener::bind(config.server.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.server.addr))?;
    info!("Server running on http://{}", config.server.addr);
    info!("Swagger UI available at http://{}/swagger-ui", config.server.addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server stopped");
    Ok(())
}

async fn create_admin(config: &AppConfig, username: &str, password: &str) -> anyhow::Result<()> {
    let database_url = config
        .server
        .database_url
        .as_deref()
        .context("DATABASE_URL must be set to create an admin")?;

    let pool = init_db_pool(database_url)
        .await
        .context("failed to connect to database")?;
    sqlx::migrate!()
        .run(&pool)
        .await
        .context("failed to run database migrations")?;

    let users = UserRepository::postgres(pool);
    let admin = UserService::create_admin(&users, username, password)
        .await
        .map_err(|e| anyhow::anyhow!("failed to create admin: {}", e.error))?;

    info!(user_id = admin.id, username = %admin.username, "Admin created");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
