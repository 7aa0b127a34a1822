use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, types::Json, Executor, Pool, Postgres, Row};
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::entities::{PricingOwner, PricingRecord};
use crate::error::Error;

#[async_trait]
pub trait PricingStore {
    async fn find_record(&self, owner: PricingOwner) -> Result<Option<PricingRecord>, Error>;
    async fn save_record(&self, owner: PricingOwner, record: &PricingRecord) -> Result<(), Error>;
}

pub struct PgStore {
    pool: Pool<Postgres>,
}

impl PgStore {
    #[tracing::instrument(name = "PgStore::new", skip(db_uri))]
    pub async fn new(db_uri: &str, max_connections: u32) -> Result<Self, Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(db_uri)
            .await?;

        // pricing configurations (KV store keyed by owner)
        pool.execute("CREATE TABLE IF NOT EXISTS pricing_configurations (owner_kind VARCHAR NOT NULL, owner_id UUID NOT NULL, data JSONB NOT NULL, PRIMARY KEY (owner_kind, owner_id))")
            .await?;

        tracing::info!("pricing store ready");

        Ok(Self { pool })
    }
}

#[async_trait]
impl PricingStore for PgStore {
    #[tracing::instrument(skip(self))]
    async fn find_record(&self, owner: PricingOwner) -> Result<Option<PricingRecord>, Error> {
        let maybe_row = self
            .pool
            .fetch_optional(
                sqlx::query(
                    "SELECT data FROM pricing_configurations WHERE owner_kind = $1 AND owner_id = $2",
                )
                .bind(owner.kind())
                .bind(owner.id()),
            )
            .await?;

        match maybe_row {
            Some(row) => {
                let Json(record): Json<PricingRecord> = row.try_get("data")?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    #[tracing::instrument(skip(self, record))]
    async fn save_record(&self, owner: PricingOwner, record: &PricingRecord) -> Result<(), Error> {
        self.pool
            .execute(
                sqlx::query("INSERT INTO pricing_configurations (owner_kind, owner_id, data) VALUES ($1, $2, $3) ON CONFLICT (owner_kind, owner_id) DO UPDATE SET data = EXCLUDED.data")
                    .bind(owner.kind())
                    .bind(owner.id())
                    .bind(Json(record)),
            )
            .await?;

        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<PricingOwner, PricingRecord>>,
}

impl MemoryStore {
    pub fn with_records(records: impl IntoIterator<Item = (PricingOwner, PricingRecord)>) -> Self {
        Self {
            records: RwLock::new(records.into_iter().collect()),
        }
    }
}

#[async_trait]
impl PricingStore for MemoryStore {
    async fn find_record(&self, owner: PricingOwner) -> Result<Option<PricingRecord>, Error> {
        Ok(self.records.read().await.get(&owner).cloned())
    }

    async fn save_record(&self, owner: PricingOwner, record: &PricingRecord) -> Result<(), Error> {
        self.records.write().await.insert(owner, record.clone());
        Ok(())
    }
}
