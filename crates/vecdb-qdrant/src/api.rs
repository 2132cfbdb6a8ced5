//! The boundary between the adapter and whatever actually talks to Qdrant.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use vecdb_core::{ConnectionConfig, Payload, PointId, ScoredPoint};

use crate::distance::Distance;

#[derive(Error, Debug)]
pub enum QdrantApiError {
    /// The server answered with a non-success status.
    #[error("Unexpected response: {status} {body}")]
    UnexpectedResponse { status: u16, body: String },
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Decode error: {0}")]
    Decode(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl QdrantApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UnexpectedResponse { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Dense vector parameters of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorParams {
    pub size: u64,
    pub distance: Distance,
}

/// A point as sent in an upsert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointStruct {
    pub id: PointId,
    pub vector: Vec<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Payload>,
}

impl PointStruct {
    pub fn new(id: impl Into<PointId>, vector: Vec<f32>, payload: Option<Payload>) -> Self {
        Self {
            id: id.into(),
            vector,
            payload,
        }
    }
}

/// Operations the adapter needs from a live Qdrant handle.
#[async_trait]
pub trait QdrantApi: Send + Sync {
    async fn create_collection(&self, name: &str, params: VectorParams) -> Result<(), QdrantApiError>;

    async fn upsert(&self, collection_name: &str, points: Vec<PointStruct>) -> Result<(), QdrantApiError>;

    async fn search(
        &self,
        collection_name: &str,
        vector: &[f32],
        limit: usize,
    ) -> Result<Vec<ScoredPoint>, QdrantApiError>;
}

/// Produces a fresh handle for a connection config.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self, config: &ConnectionConfig) -> Result<Box<dyn QdrantApi>, QdrantApiError>;
}
