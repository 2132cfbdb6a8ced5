//! [`VectorDbClient`] implementation for Qdrant.
//!
//! Each backend call passes through a single failure boundary: log the
//! failure at error level, translate it into the operation's
//! [`ErrorKind`], return. The log always precedes the return.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};
use vecdb_core::{
    ClientError, ConnectionConfig, ErrorKind, Payload, PointId, Result, ScoredPoint, VectorDbClient,
};

use crate::api::{Connector, PointStruct, QdrantApi, QdrantApiError, VectorParams};
use crate::distance::Distance;
use crate::http::HttpConnector;
use crate::BACKEND_NAME;

/// Why a backend call did not succeed.
enum Failure {
    NotConnected,
    Backend(QdrantApiError),
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConnected => write!(f, "not connected"),
            Self::Backend(e) => write!(f, "{e}"),
        }
    }
}

impl From<QdrantApiError> for Failure {
    fn from(e: QdrantApiError) -> Self {
        Self::Backend(e)
    }
}

impl Failure {
    fn into_client_error(self, kind: ErrorKind, message: &str) -> ClientError {
        let err = ClientError::new(kind, message);
        match self {
            Self::NotConnected => err.with_metadata("reason", "not connected"),
            Self::Backend(e) => {
                let err = match e.status() {
                    Some(status) => err.with_metadata("status", status),
                    None => err,
                };
                err.with_source(e)
            }
        }
    }
}

/// Qdrant adapter.
///
/// Holds no handle until [`connect`](VectorDbClient::connect) succeeds.
pub struct QdrantAdapter {
    config: ConnectionConfig,
    connector: Arc<dyn Connector>,
    client: Option<Box<dyn QdrantApi>>,
}

impl QdrantAdapter {
    /// Adapter that connects over the REST API.
    pub fn new(config: ConnectionConfig) -> Self {
        Self::with_connector(config, Arc::new(HttpConnector::new()))
    }

    pub fn with_connector(config: ConnectionConfig, connector: Arc<dyn Connector>) -> Self {
        Self {
            config,
            connector,
            client: None,
        }
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Base URL requests are sent to.
    pub fn endpoint(&self) -> String {
        self.config.endpoint()
    }

    pub fn is_connected(&self) -> bool {
        self.client.is_some()
    }

    fn handle(&self) -> std::result::Result<&dyn QdrantApi, Failure> {
        self.client.as_deref().ok_or(Failure::NotConnected)
    }
}

impl fmt::Debug for QdrantAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QdrantAdapter")
            .field("host", &self.config.host)
            .field("port", &self.config.port)
            .field("connected", &self.is_connected())
            .finish()
    }
}

#[async_trait]
impl VectorDbClient for QdrantAdapter {
    async fn connect(&mut self) -> Result<()> {
        match self.connector.connect(&self.config).await {
            Ok(client) => {
                self.client = Some(client);
                info!(
                    host = %self.config.host,
                    port = self.config.port,
                    "Successfully connected to Qdrant at {}",
                    self.config.address()
                );
                Ok(())
            }
            Err(e) => {
                error!(host = %self.config.host, port = self.config.port, error = %e, "Connection to Qdrant failed");
                Err(ClientError::new(ErrorKind::Connection, "Failed to connect to Qdrant server")
                    .with_metadata("host", &self.config.host)
                    .with_metadata("port", self.config.port)
                    .with_source(e)
                    .into())
            }
        }
    }

    async fn create_collection(&self, name: &str, vector_size: u64, distance_metric: &str) -> Result<()> {
        let distance: Distance = distance_metric.parse()?;
        let params = VectorParams {
            size: vector_size,
            distance,
        };

        let outcome = match self.handle() {
            Ok(api) => api.create_collection(name, params).await.map_err(Failure::from),
            Err(f) => Err(f),
        };
        match outcome {
            Ok(()) => {
                info!(collection = name, vector_size, distance = %distance, "Collection '{name}' created successfully.");
                Ok(())
            }
            Err(f) => {
                error!(collection = name, error = %f, "Failed to create collection");
                Err(f
                    .into_client_error(ErrorKind::CollectionCreation, "Failed to create collection")
                    .with_metadata("collection", name)
                    .into())
            }
        }
    }

    async fn insert_vector(
        &self,
        collection_name: &str,
        vector_id: PointId,
        vector: &[f32],
        metadata: Option<Payload>,
    ) -> Result<()> {
        let point = PointStruct::new(vector_id.clone(), vector.to_vec(), metadata);

        let outcome = match self.handle() {
            Ok(api) => api.upsert(collection_name, vec![point]).await.map_err(Failure::from),
            Err(f) => Err(f),
        };
        match outcome {
            Ok(()) => {
                info!(
                    collection = collection_name,
                    vector_id = %vector_id,
                    "Vector with ID '{vector_id}' inserted successfully into '{collection_name}'."
                );
                Ok(())
            }
            Err(f) => {
                error!(collection = collection_name, vector_id = %vector_id, error = %f, "Failed to insert vector");
                Err(f
                    .into_client_error(ErrorKind::VectorInsertion, "Failed to insert vector")
                    .with_metadata("collection", collection_name)
                    .with_metadata("vector_id", &vector_id)
                    .into())
            }
        }
    }

    async fn search_vectors(
        &self,
        collection_name: &str,
        query_vector: &[f32],
        top_k: usize,
    ) -> Result<Vec<ScoredPoint>> {
        let outcome = match self.handle() {
            Ok(api) => api
                .search(collection_name, query_vector, top_k)
                .await
                .map_err(Failure::from),
            Err(f) => Err(f),
        };
        match outcome {
            Ok(results) => {
                info!(
                    collection = collection_name,
                    top_k,
                    hits = results.len(),
                    "Search completed successfully in collection '{collection_name}'."
                );
                Ok(results)
            }
            Err(f) => {
                error!(collection = collection_name, top_k, error = %f, "Failed to search vectors");
                Err(f
                    .into_client_error(ErrorKind::VectorSearch, "Failed to search vectors")
                    .with_metadata("collection", collection_name)
                    .into())
            }
        }
    }

    fn backend_name(&self) -> &'static str {
        BACKEND_NAME
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
