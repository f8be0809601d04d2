use std::collections::BTreeMap;
use std::sync::Arc;

use sqlx::PgPool;
use tokio::sync::RwLock;

use taxdesk_core::AppError;

use super::model::{NewTaxType, TaxType};

#[derive(Debug, Default)]
pub struct InMemoryTaxTypes {
    last_id: i64,
    by_id: BTreeMap<i64, TaxType>,
}

#[derive(Debug, Clone)]
pub enum TaxTypeRepository {
    Postgres(PgPool),
    InMemory(Arc<RwLock<InMemoryTaxTypes>>),
}

impl TaxTypeRepository {
    pub fn postgres(pool: PgPool) -> Self {
        Self::Postgres(pool)
    }

    pub fn in_memory() -> Self {
        Self::InMemory(Arc::new(RwLock::new(InMemoryTaxTypes::default())))
    }

    pub async fn list(&self) -> Result<Vec<TaxType>, AppError> {
        match self {
            Self::Postgres(db) => {
                let taxes = sqlx::query_as::<_, TaxType>(
                    "SELECT id, name, description, rate FROM tax_types ORDER BY id",
                )
                .fetch_all(db)
                .await?;
                Ok(taxes)
            }
            Self::InMemory(store) => Ok(store.read().await.by_id.values().cloned().collect()),
        }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<TaxType>, AppError> {
        match self {
            Self::Postgres(db) => {
                let tax = sqlx::query_as::<_, TaxType>(
                    "SELECT id, name, description, rate FROM tax_types WHERE id = $1",
                )
                .bind(id)
                .fetch_optional(db)
                .await?;
                Ok(tax)
            }
            Self::InMemory(store) => Ok(store.read().await.by_id.get(&id).cloned()),
        }
    }

    pub async fn insert(&self, tax: NewTaxType) -> Result<TaxType, AppError> {
        match self {
            Self::Postgres(db) => {
                let created = sqlx::query_as::<_, TaxType>(
                    "INSERT INTO tax_types (name, description, rate)
                     VALUES ($1, $2, $3)
                     RETURNING id, name, description, rate",
                )
                .bind(&tax.name)
                .bind(&tax.description)
                .bind(tax.rate)
                .fetch_one(db)
                .await?;
                Ok(created)
            }
            Self::InMemory(store) => {
                let mut store = store.write().await;
                store.last_id += 1;
                let created = TaxType {
                    id: store.last_id,
                    name: tax.name,
                    description: tax.description,
                    rate: tax.rate,
                };
                store.by_id.insert(created.id, created.clone());
                Ok(created)
            }
        }
    }

    /// Returns whether a row was removed.
    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        match self {
            Self::Postgres(db) => {
                let result = sqlx::query("DELETE FROM tax_types WHERE id = $1")
                    .bind(id)
                    .execute(db)
                    .await?;
                Ok(result.rows_affected() > 0)
            }
            Self::InMemory(store) => Ok(store.write().await.by_id.remove(&id).is_some()),
        }
    }
}
