//! Shared constants for vectest.

/// Embedding vector dimension (OpenAI text-embedding-3-small: 1536d).
pub const EMBEDDING_DIMENSION: usize = 1536;

/// Name of the smoke-test table.
pub const TEST_TABLE: &str = "test_vectors";

/// Leading components of the seeded smoke vector; the rest is zero-padded
/// up to [`EMBEDDING_DIMENSION`].
pub const SMOKE_PREFIX: [f32; 3] = [0.1, 0.2, 0.3];

/// PostgreSQL connection pool: maximum connections.
pub const PG_POOL_MAX_CONNECTIONS: u32 = 2;

/// PostgreSQL connection pool: acquire timeout in seconds.
pub const PG_POOL_ACQUIRE_TIMEOUT_SECS: u64 = 10;
