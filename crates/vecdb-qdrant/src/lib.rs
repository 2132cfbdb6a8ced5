//! Qdrant backend for the vecdb contract.
//!
//! [`QdrantAdapter`] implements [`vecdb_core::VectorDbClient`] on top of a
//! [`QdrantApi`] handle. The handle is produced by a [`Connector`];
//! [`HttpConnector`] talks to the Qdrant REST API.

pub mod adapter;
pub mod api;
pub mod distance;
pub mod http;

pub use adapter::QdrantAdapter;
pub use api::{Connector, PointStruct, QdrantApi, QdrantApiError, VectorParams};
pub use distance::Distance;
pub use http::{HttpConnector, QdrantHttpClient};

/// Identifier under which this backend is registered.
pub const BACKEND_NAME: &str = "qdrant";
