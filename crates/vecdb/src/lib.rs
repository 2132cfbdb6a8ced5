//! Unified vector database client.
//!
//! [`new_client`] resolves a backend identifier, builds the matching adapter
//! and returns a [`DbClient`] that forwards the four contract operations to
//! it.
//!
//! ```rust,no_run
//! use vecdb::{new_client, ConnectionConfig, DEFAULT_TOP_K};
//!
//! # async fn example() -> vecdb::Result<()> {
//! let mut client = new_client("qdrant", ConnectionConfig::default())?;
//! client.connect().await?;
//! client.create_collection("docs", 3, "cosine").await?;
//! client.insert_vector("docs", 1u64, &[0.1, 0.2, 0.3], None).await?;
//! let hits = client.search_vectors("docs", &[0.1, 0.2, 0.3], DEFAULT_TOP_K).await?;
//! # let _ = hits;
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod client;

pub use backend::Backend;
pub use client::{new_client, DbClient};

pub use vecdb_core::{
    ClientError, ConnectionConfig, ErrorKind, Payload, PointId, Result, ScoredPoint, VectorDbClient,
    VectorDbConfig, VectorDbError, DEFAULT_TOP_K,
};
pub use vecdb_qdrant::QdrantAdapter;
