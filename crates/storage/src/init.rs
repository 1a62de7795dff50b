//! pgvector smoke-test schema initializer.
//!
//! Three statements, in order: enable the extension, create the table,
//! seed one smoke row. The first two are idempotent (`IF NOT EXISTS`);
//! seeding appends a row per run. The sequence aborts on the first failure.

use serde::Serialize;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};

use crate::constants::{
    EMBEDDING_DIMENSION, PG_POOL_ACQUIRE_TIMEOUT_SECS, PG_POOL_MAX_CONNECTIONS, SMOKE_PREFIX,
    TEST_TABLE,
};
use crate::error::InitError;

/// Schema initializer over a PostgreSQL pool.
#[derive(Clone, Debug)]
pub struct SchemaInit {
    pool: PgPool,
}

/// Read-only report of what the initializer has (or has not) set up.
#[derive(Debug, Clone, Serialize)]
pub struct SchemaStatus {
    pub extension_installed: bool,
    pub table_exists: bool,
    pub row_count: i64,
}

impl SchemaInit {
    /// Connect to the target database. No retries; connection failures
    /// propagate as [`InitError::Database`].
    pub async fn connect(database_url: &str) -> Result<Self, InitError> {
        let pool = PgPoolOptions::new()
            .max_connections(PG_POOL_MAX_CONNECTIONS)
            .acquire_timeout(std::time::Duration::from_secs(PG_POOL_ACQUIRE_TIMEOUT_SECS))
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    /// Wrap an already-connected pool, e.g. one built with custom
    /// credentials via `PgConnectOptions`.
    pub fn with_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying pool, for verification queries outside the
    /// initializer's own surface.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Step 1: enable pgvector. No-op if already enabled.
    pub async fn ensure_extension(&self) -> Result<(), InitError> {
        sqlx::query("CREATE EXTENSION IF NOT EXISTS vector").execute(&self.pool).await?;
        tracing::info!("vector extension present");
        Ok(())
    }

    /// Step 2: create the smoke-test table. No-op if already present.
    pub async fn ensure_table(&self) -> Result<(), InitError> {
        sqlx::query(&format!(
            "CREATE TABLE IF NOT EXISTS {TEST_TABLE} (
                id SERIAL PRIMARY KEY,
                embedding vector({EMBEDDING_DIMENSION})
            )"
        ))
        .execute(&self.pool)
        .await?;
        tracing::info!(table = TEST_TABLE, dimension = EMBEDDING_DIMENSION, "table present");
        Ok(())
    }

    /// Step 3: insert one smoke row. Appends on every call.
    /// Returns the database-assigned id.
    pub async fn seed_smoke_row(&self) -> Result<i32, InitError> {
        let literal = vector_literal(&smoke_embedding());
        let row = sqlx::query(&format!(
            "INSERT INTO {TEST_TABLE} (embedding) VALUES ($1::vector) RETURNING id"
        ))
        .bind(&literal)
        .fetch_one(&self.pool)
        .await?;
        let id: i32 = row.try_get("id").map_err(InitError::Database)?;
        tracing::info!(id, "smoke row inserted");
        Ok(id)
    }

    /// The full contract: steps 1-3 in order, aborting on the first failure.
    pub async fn run(&self) -> Result<i32, InitError> {
        self.ensure_extension().await?;
        self.ensure_table().await?;
        self.seed_smoke_row().await
    }

    /// Probe what exists. Read-only; safe against an uninitialized database.
    pub async fn status(&self) -> Result<SchemaStatus, InitError> {
        let extension_installed: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM pg_extension WHERE extname = 'vector')")
                .fetch_one(&self.pool)
                .await?;

        let table_exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(
                SELECT 1 FROM information_schema.tables
                WHERE table_schema = current_schema() AND table_name = $1
            )",
        )
        .bind(TEST_TABLE)
        .fetch_one(&self.pool)
        .await?;

        let row_count: i64 = if table_exists {
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {TEST_TABLE}"))
                .fetch_one(&self.pool)
                .await?
        } else {
            0
        };

        Ok(SchemaStatus { extension_installed, table_exists, row_count })
    }
}

/// The seeded vector: `[0.1, 0.2, 0.3]` zero-padded to the declared column
/// dimension. pgvector rejects dimension mismatches at insert time, so the
/// bare 3-component literal is never sent as-is.
pub fn smoke_embedding() -> Vec<f32> {
    let mut v = vec![0.0_f32; EMBEDDING_DIMENSION];
    v[..SMOKE_PREFIX.len()].copy_from_slice(&SMOKE_PREFIX);
    v
}

/// Format an f32 slice as a pgvector text literal, e.g. `[0.1,0.2,0.3]`.
pub fn vector_literal(embedding: &[f32]) -> String {
    format!("[{}]", embedding.iter().map(|f| f.to_string()).collect::<Vec<_>>().join(","))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoke_embedding_has_declared_dimension() {
        let v = smoke_embedding();
        assert_eq!(v.len(), EMBEDDING_DIMENSION);
    }

    #[test]
    fn smoke_embedding_keeps_recognizable_prefix() {
        let v = smoke_embedding();
        assert_eq!(&v[..3], &[0.1, 0.2, 0.3]);
        assert!(v[3..].iter().all(|&c| c == 0.0));
    }

    #[test]
    fn vector_literal_formats_brackets_and_commas() {
        assert_eq!(vector_literal(&[0.1, 0.2, 0.3]), "[0.1,0.2,0.3]");
        assert_eq!(vector_literal(&[]), "[]");
        assert_eq!(vector_literal(&[1.0]), "[1]");
    }

    #[test]
    fn smoke_literal_has_expected_shape() {
        let lit = vector_literal(&smoke_embedding());
        assert!(lit.starts_with("[0.1,0.2,0.3,0,"));
        assert!(lit.ends_with(",0]"));
        assert_eq!(lit.matches(',').count(), EMBEDDING_DIMENSION - 1);
    }
}
