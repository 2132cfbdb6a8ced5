//! The dispatching facade.

use std::any::Any;

use tracing::info;
use vecdb_core::{
    ConnectionConfig, Payload, PointId, Result, ScoredPoint, VectorDbClient, VectorDbConfig,
    DEFAULT_TOP_K,
};

use crate::backend::Backend;

/// Single entry point over the active backend adapter.
///
/// Each operation forwards to the adapter and, on success, records one
/// event of its own. Errors come back exactly as the adapter returned them.
/// Adapter-specific operations are reached through [`DbClient::extension`].
pub struct DbClient {
    inner: Box<dyn VectorDbClient>,
}

/// Build a client for `backend`. Nothing is contacted until
/// [`DbClient::connect`].
pub fn new_client(backend: &str, config: ConnectionConfig) -> Result<DbClient> {
    DbClient::new(backend, config)
}

impl DbClient {
    /// Resolve `backend` and build its adapter. An unknown identifier fails
    /// with `DB_UNSUPPORTED_BACKEND` before any adapter exists.
    pub fn new(backend: &str, config: ConnectionConfig) -> Result<Self> {
        let backend: Backend = backend.parse()?;
        Ok(Self::with_adapter(backend.build(config)))
    }

    pub fn from_config(config: &VectorDbConfig) -> Result<Self> {
        Self::new(&config.backend, config.connection.clone())
    }

    /// Wrap an already-built adapter.
    pub fn with_adapter(adapter: Box<dyn VectorDbClient>) -> Self {
        Self { inner: adapter }
    }

    pub fn backend_name(&self) -> &'static str {
        self.inner.backend_name()
    }

    pub async fn connect(&mut self) -> Result<()> {
        self.inner.connect().await?;
        info!(backend = self.inner.backend_name(), "Connected to the vector database.");
        Ok(())
    }

    pub async fn create_collection(
        &self,
        name: &str,
        vector_size: u64,
        distance_metric: &str,
    ) -> Result<()> {
        self.inner
            .create_collection(name, vector_size, distance_metric)
            .await?;
        info!(collection = name, "Collection '{name}' created.");
        Ok(())
    }

    /// [`create_collection`](Self::create_collection) with cosine distance.
    pub async fn create_collection_default(&self, name: &str, vector_size: u64) -> Result<()> {
        self.create_collection(name, vector_size, "cosine").await
    }

    pub async fn insert_vector(
        &self,
        collection_name: &str,
        vector_id: impl Into<PointId>,
        vector: &[f32],
        metadata: Option<Payload>,
    ) -> Result<()> {
        let vector_id = vector_id.into();
        self.inner
            .insert_vector(collection_name, vector_id.clone(), vector, metadata)
            .await?;
        info!(
            collection = collection_name,
            vector_id = %vector_id,
            "Vector '{vector_id}' inserted into collection '{collection_name}'."
        );
        Ok(())
    }

    pub async fn search_vectors(
        &self,
        collection_name: &str,
        query_vector: &[f32],
        top_k: usize,
    ) -> Result<Vec<ScoredPoint>> {
        let results = self
            .inner
            .search_vectors(collection_name, query_vector, top_k)
            .await?;
        info!(collection = collection_name, "Search completed in collection '{collection_name}'.");
        Ok(results)
    }

    /// [`search_vectors`](Self::search_vectors) with [`DEFAULT_TOP_K`].
    pub async fn search_vectors_default(
        &self,
        collection_name: &str,
        query_vector: &[f32],
    ) -> Result<Vec<ScoredPoint>> {
        self.search_vectors(collection_name, query_vector, DEFAULT_TOP_K)
            .await
    }

    pub fn adapter(&self) -> &dyn VectorDbClient {
        &*self.inner
    }

    pub fn adapter_mut(&mut self) -> &mut dyn VectorDbClient {
        &mut *self.inner
    }

    /// The active adapter as its concrete type, if it is a `T`.
    pub fn extension<T: Any>(&self) -> Option<&T> {
        self.inner.as_any().downcast_ref::<T>()
    }

    pub fn extension_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.inner.as_any_mut().downcast_mut::<T>()
    }
}
