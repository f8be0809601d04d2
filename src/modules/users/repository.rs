//! User storage.
//!
//! PostgreSQL when a database is configured, otherwise a process-local map.
//! Usernames are unique in both backends.

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::anyhow;
use sqlx::PgPool;
use tokio::sync::RwLock;

use taxdesk_core::AppError;

use super::model::{NewUser, UserRecord};

pub const USERNAME_TAKEN: &str = "Username already registered";

#[derive(Debug, Default)]
pub struct InMemoryUsers {
    last_id: i64,
    by_username: BTreeMap<String, UserRecord>,
}

#[derive(Debug, Clone)]
pub enum UserRepository {
    Postgres(PgPool),
    InMemory(Arc<RwLock<InMemoryUsers>>),
}

impl UserRepository {
    pub fn postgres(pool: PgPool) -> Self {
        Self::Postgres(pool)
    }

    pub fn in_memory() -> Self {
        Self::InMemory(Arc::new(RwLock::new(InMemoryUsers::default())))
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, AppError> {
        match self {
            Self::Postgres(db) => {
                let user = sqlx::query_as::<_, UserRecord>(
                    "SELECT id, username, password, roles FROM users WHERE username = $1",
                )
                .bind(username)
                .fetch_optional(db)
                .await?;
                Ok(user)
            }
            Self::InMemory(store) => Ok(store.read().await.by_username.get(username).cloned()),
        }
    }

    pub async fn exists_by_username(&self, username: &str) -> Result<bool, AppError> {
        match self {
            Self::Postgres(db) => {
                let exists: bool =
                    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
                        .bind(username)
                        .fetch_one(db)
                        .await?;
                Ok(exists)
            }
            Self::InMemory(store) => Ok(store.read().await.by_username.contains_key(username)),
        }
    }

    /// Stores a new user. A taken username is a 409.
    pub async fn insert(&self, user: NewUser) -> Result<UserRecord, AppError> {
        let roles: Vec<String> = user.roles.iter().map(|r| r.as_str().to_string()).collect();

        match self {
            Self::Postgres(db) => {
                let result = sqlx::query_as::<_, UserRecord>(
                    "INSERT INTO users (username, password, roles)
                     VALUES ($1, $2, $3)
                     RETURNING id, username, password, roles",
                )
                .bind(&user.username)
                .bind(&user.password_hash)
                .bind(&roles)
                .fetch_one(db)
                .await;

                match result {
                    Ok(record) => Ok(record),
                    Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                        Err(AppError::conflict(anyhow!(USERNAME_TAKEN)))
                    }
                    Err(e) => Err(AppError::database(e)),
                }
            }
            Self::InMemory(store) => {
                let mut store = store.write().await;
                if store.by_username.contains_key(&user.username) {
                    return Err(AppError::conflict(anyhow!(USERNAME_TAKEN)));
                }

                store.last_id += 1;
                let record = UserRecord {
                    id: store.last_id,
                    username: user.username.clone(),
                    password_hash: user.password_hash,
                    roles,
                };
                store.by_username.insert(user.username, record.clone());
                Ok(record)
            }
        }
    }

    /// All users ordered by id.
    pub async fn list(&self) -> Result<Vec<UserRecord>, AppError> {
        match self {
            Self::Postgres(db) => {
                let users = sqlx::query_as::<_, UserRecord>(
                    "SELECT id, username, password, roles FROM users ORDER BY id",
                )
                .fetch_all(db)
                .await?;
                Ok(users)
            }
            Self::InMemory(store) => {
                let mut users: Vec<UserRecord> =
                    store.read().await.by_username.values().cloned().collect();
                users.sort_by_key(|u| u.id);
                Ok(users)
            }
        }
    }
}
