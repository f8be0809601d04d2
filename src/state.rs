use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use taxdesk_auth::TokenCodec;
use taxdesk_config::{AppConfig, CorsConfig, JwtConfig};
use taxdesk_db::init_db_pool;

use crate::middleware::policy::AuthorizationPolicy;
use crate::modules::tax_types::repository::TaxTypeRepository;
use crate::modules::users::repository::UserRepository;

#[derive(Clone, Debug)]
pub struct AppState {
    pub token_codec: Arc<TokenCodec>,
    pub policy: Arc<AuthorizationPolicy>,
    pub users: UserRepository,
    pub tax_types: TaxTypeRepository,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(
        jwt_config: &JwtConfig,
        cors_config: CorsConfig,
        users: UserRepository,
        tax_types: TaxTypeRepository,
    ) -> Self {
        Self {
            token_codec: Arc::new(TokenCodec::new(jwt_config)),
            policy: Arc::new(AuthorizationPolicy::default()),
            users,
            tax_types,
            cors_config,
        }
    }

    /// State backed by empty in-memory repositories.
    pub fn in_memory(jwt_config: &JwtConfig) -> Self {
        Self::new(
            jwt_config,
            CorsConfig::default(),
            UserRepository::in_memory(),
            TaxTypeRepository::in_memory(),
        )
    }

    pub fn with_policy(mut self, policy: AuthorizationPolicy) -> Self {
        self.policy = Arc::new(policy);
        self
    }
}

/// Builds the state from configuration, connecting to PostgreSQL and
/// applying migrations when a database URL is configured.
pub async fn init_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let (users, tax_types) = match config.server.database_url.as_deref() {
        Some(database_url) => {
            let pool = init_db_pool(database_url)
                .await
                .context("failed to connect to database")?;
            sqlx::migrate!()
                .run(&pool)
                .await
                .context("failed to run database migrations")?;
            info!("Using PostgreSQL repositories");
            (
                UserRepository::postgres(pool.clone()),
                TaxTypeRepository::postgres(pool),
            )
        }
        None => {
            warn!("DATABASE_URL not set; using in-memory repositories (data is lost on restart)");
            (UserRepository::in_memory(), TaxTypeRepository::in_memory())
        }
    };

    Ok(AppState::new(
        &config.jwt,
        config.cors.clone(),
        users,
        tax_types,
    ))
}
