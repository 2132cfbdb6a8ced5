//! vecdb core: the backend-agnostic vector database contract.
//!
//! Provides the error taxonomy shared by every backend, the
//! [`VectorDbClient`] capability trait, the point/search data model and the
//! configuration loader.

pub mod client;
pub mod config;
pub mod error;
pub mod types;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use client::VectorDbClient;
pub use config::{ConnectionConfig, VectorDbConfig};
pub use error::{ClientError, ErrorKind, Result, VectorDbError};
pub use types::{Payload, PointId, ScoredPoint, DEFAULT_TOP_K};
