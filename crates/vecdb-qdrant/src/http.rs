//! Qdrant REST client built on reqwest.

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Url};
use serde_json::{json, Value};
use vecdb_core::{ConnectionConfig, ScoredPoint};

use crate::api::{Connector, PointStruct, QdrantApi, QdrantApiError, VectorParams};

const API_KEY_HEADER: &str = "api-key";

/// Talks to a Qdrant server over its REST API.
#[derive(Debug, Clone)]
pub struct QdrantHttpClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: Option<String>,
}

impl QdrantHttpClient {
    /// Build a client for `config`. No request is sent.
    pub fn new(config: &ConnectionConfig) -> Result<Self, QdrantApiError> {
        let http = reqwest::Client::builder().build()?;
        Self::with_client(config, http)
    }

    /// Build a client around a caller-supplied `reqwest::Client`.
    pub fn with_client(config: &ConnectionConfig, http: reqwest::Client) -> Result<Self, QdrantApiError> {
        let raw = format!("{}/", config.endpoint());
        let base_url = Url::parse(&raw)
            .map_err(|e| QdrantApiError::InvalidConfig(format!("{raw}: {e}")))?;
        Ok(Self {
            http,
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Check that the server answers at all.
    pub async fn probe(&self) -> Result<(), QdrantApiError> {
        self.send(self.request(Method::GET, self.base_url.clone())).await?;
        Ok(())
    }

    fn url(&self, segments: &[&str]) -> Result<Url, QdrantApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| QdrantApiError::InvalidConfig(format!("{} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let req = self.http.request(method, url);
        match &self.api_key {
            Some(key) => req.header(API_KEY_HEADER, key),
            None => req,
        }
    }

    async fn send(&self, req: RequestBuilder) -> Result<Value, QdrantApiError> {
        let response = req.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(QdrantApiError::UnexpectedResponse {
                status: status.as_u16(),
                body,
            });
        }
        response
            .json::<Value>()
            .await
            .map_err(|e| QdrantApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl QdrantApi for QdrantHttpClient {
    async fn create_collection(&self, name: &str, params: VectorParams) -> Result<(), QdrantApiError> {
        let url = self.url(&["collections", name])?;
        let body = json!({ "vectors": params });
        self.send(self.request(Method::PUT, url).json(&body)).await?;
        Ok(())
    }

    async fn upsert(&self, collection_name: &str, points: Vec<PointStruct>) -> Result<(), QdrantApiError> {
        let mut url = self.url(&["collections", collection_name, "points"])?;
        url.query_pairs_mut().append_pair("wait", "true");
        let body = json!({ "points": points });
        self.send(self.request(Method::PUT, url).json(&body)).await?;
        Ok(())
    }

    async fn search(
        &self,
        collection_name: &str,
        vector: &[f32],
        limit: usize,
    ) -> Result<Vec<ScoredPoint>, QdrantApiError> {
        let url = self.url(&["collections", collection_name, "points", "search"])?;
        let body = json!({
            "vector": vector,
            "limit": limit,
            "with_payload": true,
        });
        let mut resp = self.send(self.request(Method::POST, url).json(&body)).await?;
        let result = resp
            .get_mut("result")
            .map(Value::take)
            .ok_or_else(|| QdrantApiError::Decode("missing 'result' in search response".to_string()))?;
        serde_json::from_value(result).map_err(|e| QdrantApiError::Decode(e.to_string()))
    }
}

/// Connects by building a [`QdrantHttpClient`] and probing the server.
#[derive(Debug, Clone, Default)]
pub struct HttpConnector {
    http: Option<reqwest::Client>,
}

impl HttpConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reuse one `reqwest::Client` for every handle this connector makes.
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http: Some(http) }
    }
}

#[async_trait]
impl Connector for HttpConnector {
    async fn connect(&self, config: &ConnectionConfig) -> Result<Box<dyn QdrantApi>, QdrantApiError> {
        let client = match &self.http {
            Some(http) => QdrantHttpClient::with_client(config, http.clone())?,
            None => QdrantHttpClient::new(config)?,
        };
        client.probe().await?;
        Ok(Box::new(client))
    }
}
