use std::any::Any;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Payload, PointId, ScoredPoint};

/// Capability contract implemented by every vector database backend.
///
/// Every operation awaits the backend and returns; nothing is retried or
/// queued. Backend rejections come back as [`VectorDbError::Client`] with
/// the kind matching the operation, bad caller input as
/// [`VectorDbError::InvalidArgument`].
///
/// [`VectorDbError::Client`]: crate::VectorDbError::Client
/// [`VectorDbError::InvalidArgument`]: crate::VectorDbError::InvalidArgument
#[async_trait]
pub trait VectorDbClient: Send + Sync {
    /// Establish a connection, replacing any existing one.
    async fn connect(&mut self) -> Result<()>;

    /// Create a collection of `vector_size`-dimensional vectors.
    ///
    /// `distance_metric` is resolved by the backend; unknown names are an
    /// invalid argument and no request is sent.
    async fn create_collection(
        &self,
        name: &str,
        vector_size: u64,
        distance_metric: &str,
    ) -> Result<()>;

    /// Insert a single vector with optional metadata.
    ///
    /// The vector length is checked by the backend against the collection
    /// dimensionality.
    async fn insert_vector(
        &self,
        collection_name: &str,
        vector_id: PointId,
        vector: &[f32],
        metadata: Option<Payload>,
    ) -> Result<()>;

    /// Return up to `top_k` matches for `query_vector`, exactly as the
    /// backend ordered them.
    async fn search_vectors(
        &self,
        collection_name: &str,
        query_vector: &[f32],
        top_k: usize,
    ) -> Result<Vec<ScoredPoint>>;

    /// Identifier of the backend, e.g. `"qdrant"`.
    fn backend_name(&self) -> &'static str;

    /// Access to the concrete adapter for backend-specific operations.
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}
