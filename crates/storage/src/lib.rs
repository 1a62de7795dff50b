//! Schema initializer for the pgvector smoke-test table.
//!
//! Enables the `vector` extension, creates `test_vectors`, and seeds one
//! smoke row. Nothing here is a migration framework; it is the one-time
//! setup sequence plus a status probe to verify it.

mod constants;
mod error;
mod init;

pub use constants::{EMBEDDING_DIMENSION, SMOKE_PREFIX, TEST_TABLE};
pub use error::InitError;
pub use init::{smoke_embedding, vector_literal, SchemaInit, SchemaStatus};
