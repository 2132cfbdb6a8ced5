//! QdrantAdapter behaviour against a recording in-memory backend.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::json;
use tracing::Level;
use vecdb_core::testing::LogCapture;
use vecdb_core::{ConnectionConfig, ErrorKind, PointId, ScoredPoint, VectorDbClient, VectorDbError, DEFAULT_TOP_K};
use vecdb_qdrant::{
    Connector, Distance, PointStruct, QdrantAdapter, QdrantApi, QdrantApiError, VectorParams,
};

// ============================================================
// Mock backend
// ============================================================

#[derive(Debug, Clone, PartialEq)]
enum Call {
    CreateCollection { name: String, params: VectorParams },
    Upsert { collection: String, points: Vec<PointStruct> },
    Search { collection: String, vector: Vec<f32>, limit: usize },
}

#[derive(Default)]
struct MockState {
    calls: Vec<Call>,
    connects: usize,
    refuse_connect: bool,
    reject_create: Option<u16>,
    reject_upsert: bool,
    reject_search: bool,
    search_results: Vec<ScoredPoint>,
}

type Shared = Arc<Mutex<MockState>>;

struct MockQdrant {
    state: Shared,
}

#[async_trait]
impl QdrantApi for MockQdrant {
    async fn create_collection(&self, name: &str, params: VectorParams) -> Result<(), QdrantApiError> {
        let mut state = self.state.lock();
        state.calls.push(Call::CreateCollection { name: name.to_string(), params });
        match state.reject_create {
            Some(status) => Err(QdrantApiError::UnexpectedResponse {
                status,
                body: "Error occurred while creating collection".to_string(),
            }),
            None => Ok(()),
        }
    }

    async fn upsert(&self, collection_name: &str, points: Vec<PointStruct>) -> Result<(), QdrantApiError> {
        let mut state = self.state.lock();
        state.calls.push(Call::Upsert { collection: collection_name.to_string(), points });
        if state.reject_upsert {
            return Err(QdrantApiError::Decode("Insertion Failed".to_string()));
        }
        Ok(())
    }

    async fn search(
        &self,
        collection_name: &str,
        vector: &[f32],
        limit: usize,
    ) -> Result<Vec<ScoredPoint>, QdrantApiError> {
        let mut state = self.state.lock();
        state.calls.push(Call::Search {
            collection: collection_name.to_string(),
            vector: vector.to_vec(),
            limit,
        });
        if state.reject_search {
            return Err(QdrantApiError::UnexpectedResponse { status: 404, body: "Not found".to_string() });
        }
        Ok(state.search_results.clone())
    }
}

struct MockConnector {
    state: Shared,
}

#[async_trait]
impl Connector for MockConnector {
    async fn connect(&self, _config: &ConnectionConfig) -> Result<Box<dyn QdrantApi>, QdrantApiError> {
        let mut state = self.state.lock();
        state.connects += 1;
        if state.refuse_connect {
            return Err(QdrantApiError::Decode("Connection Failed".to_string()));
        }
        Ok(Box::new(MockQdrant { state: self.state.clone() }))
    }
}

fn adapter(state: &Shared) -> QdrantAdapter {
    QdrantAdapter::with_connector(
        ConnectionConfig::new("localhost", 6333),
        Arc::new(MockConnector { state: state.clone() }),
    )
}

async fn connected(state: &Shared) -> QdrantAdapter {
    let mut adapter = adapter(state);
    adapter.connect().await.unwrap();
    adapter
}

fn calls(state: &Shared) -> Vec<Call> {
    state.lock().calls.clone()
}

// ============================================================
// connect
// ============================================================

#[tokio::test]
async fn test_connect_success() {
    let capture = LogCapture::new();
    let _guard = capture.install();
    let state = Shared::default();
    let mut adapter = adapter(&state);
    assert!(!adapter.is_connected());

    adapter.connect().await.unwrap();

    assert!(adapter.is_connected());
    assert_eq!(
        capture.messages(Level::INFO),
        vec!["Successfully connected to Qdrant at localhost:6333".to_string()]
    );
    assert!(capture.at_level(Level::ERROR).is_empty());
}

#[tokio::test]
async fn test_connect_failure() {
    let capture = LogCapture::new();
    let _guard = capture.install();
    let state = Shared::default();
    state.lock().refuse_connect = true;
    let mut adapter = adapter(&state);

    let err = adapter.connect().await.unwrap_err();

    assert_eq!(err.error_code(), Some("DB_CONN_ERROR"));
    assert_eq!(err.to_string(), "Failed to connect to Qdrant server");
    let client_err = err.client_error().unwrap();
    assert_eq!(client_err.metadata().get("host").map(String::as_str), Some("localhost"));
    assert_eq!(client_err.metadata().get("port").map(String::as_str), Some("6333"));
    assert_eq!(capture.messages(Level::ERROR), vec!["Connection to Qdrant failed".to_string()]);
    assert!(capture.at_level(Level::INFO).is_empty());
    assert!(!adapter.is_connected());
}

#[tokio::test]
async fn test_reconnect_replaces_handle() {
    let state = Shared::default();
    let mut adapter = connected(&state).await;
    adapter.connect().await.unwrap();
    assert_eq!(state.lock().connects, 2);
    assert!(adapter.is_connected());
}

#[tokio::test]
async fn test_failed_reconnect_keeps_previous_handle() {
    let state = Shared::default();
    let mut adapter = connected(&state).await;
    state.lock().refuse_connect = true;

    assert!(adapter.connect().await.is_err());
    assert!(adapter.is_connected());
    adapter.create_collection("c", 4, "dot").await.unwrap();
}

// ============================================================
// create_collection
// ============================================================

#[tokio::test]
async fn test_create_collection_success() {
    let state = Shared::default();
    let adapter = connected(&state).await;
    let capture = LogCapture::new();
    let _guard = capture.install();

    adapter.create_collection("test_collection", 128, "cosine").await.unwrap();

    assert_eq!(
        calls(&state),
        vec![Call::CreateCollection {
            name: "test_collection".into(),
            params: VectorParams { size: 128, distance: Distance::Cosine },
        }]
    );
    assert_eq!(
        capture.messages(Level::INFO),
        vec!["Collection 'test_collection' created successfully.".to_string()]
    );
}

#[tokio::test]
async fn test_create_collection_metric_case_insensitive() {
    let state = Shared::default();
    let adapter = connected(&state).await;

    adapter.create_collection("a", 3, "EUCLIDEAN").await.unwrap();
    adapter.create_collection("b", 3, "Dot").await.unwrap();

    let distances: Vec<Distance> = calls(&state)
        .into_iter()
        .map(|c| match c {
            Call::CreateCollection { params, .. } => params.distance,
            other => panic!("unexpected call {other:?}"),
        })
        .collect();
    assert_eq!(distances, vec![Distance::Euclid, Distance::Dot]);
}

#[tokio::test]
async fn test_create_collection_invalid_distance_metric() {
    let state = Shared::default();
    let adapter = connected(&state).await;
    let capture = LogCapture::new();
    let _guard = capture.install();

    let err = adapter
        .create_collection("test_collection", 128, "INVALID_METRIC")
        .await
        .unwrap_err();

    assert!(matches!(err, VectorDbError::InvalidArgument(_)));
    assert!(err.to_string().contains("Unsupported distance metric: INVALID_METRIC"));
    assert!(calls(&state).is_empty());
    assert!(capture.events().is_empty());
}

#[tokio::test]
async fn test_create_collection_unexpected_response() {
    let state = Shared::default();
    state.lock().reject_create = Some(400);
    let adapter = connected(&state).await;
    let capture = LogCapture::new();
    let _guard = capture.install();

    let err = adapter.create_collection("test_collection", 128, "cosine").await.unwrap_err();

    assert_eq!(err.kind(), Some(ErrorKind::CollectionCreation));
    assert_eq!(err.error_code(), Some("COLLECTION_CREATION_ERROR"));
    assert_eq!(err.to_string(), "Failed to create collection");
    let client_err = err.client_error().unwrap();
    assert_eq!(client_err.metadata().get("status").map(String::as_str), Some("400"));
    assert_eq!(
        client_err.metadata().get("collection").map(String::as_str),
        Some("test_collection")
    );
    let source = std::error::Error::source(client_err).unwrap();
    assert!(source.downcast_ref::<QdrantApiError>().is_some());

    assert_eq!(capture.messages(Level::ERROR), vec!["Failed to create collection".to_string()]);
    assert!(capture.at_level(Level::INFO).is_empty());
}

// ============================================================
// insert_vector
// ============================================================

#[tokio::test]
async fn test_insert_vector_success() {
    let state = Shared::default();
    let adapter = connected(&state).await;
    let capture = LogCapture::new();
    let _guard = capture.install();

    adapter
        .insert_vector("test_collection", "vec1".into(), &[0.1, 0.2, 0.3], None)
        .await
        .unwrap();

    assert_eq!(
        calls(&state),
        vec![Call::Upsert {
            collection: "test_collection".into(),
            points: vec![PointStruct::new("vec1", vec![0.1, 0.2, 0.3], None)],
        }]
    );
    let infos = capture.at_level(Level::INFO);
    assert_eq!(infos.len(), 1);
    assert_eq!(
        infos[0].message,
        "Vector with ID 'vec1' inserted successfully into 'test_collection'."
    );
    assert_eq!(infos[0].fields.get("vector_id").map(String::as_str), Some("vec1"));
}

#[tokio::test]
async fn test_insert_vector_with_metadata() {
    let state = Shared::default();
    let adapter = connected(&state).await;
    let payload = json!({"source": "doc-7", "page": 3}).as_object().cloned().unwrap();

    adapter
        .insert_vector("c", PointId::Num(7), &[1.0, 0.0], Some(payload.clone()))
        .await
        .unwrap();

    match &calls(&state)[0] {
        Call::Upsert { points, .. } => {
            assert_eq!(points.len(), 1);
            assert_eq!(points[0].id, PointId::Num(7));
            assert_eq!(points[0].payload.as_ref(), Some(&payload));
        }
        other => panic!("unexpected call {other:?}"),
    }
}

#[tokio::test]
async fn test_insert_vector_failure() {
    let state = Shared::default();
    state.lock().reject_upsert = true;
    let adapter = connected(&state).await;
    let capture = LogCapture::new();
    let _guard = capture.install();

    let err = adapter
        .insert_vector("test_collection", "vec1".into(), &[0.1, 0.2, 0.3], None)
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), Some("VECTOR_INSERTION_ERROR"));
    assert_eq!(
        err.client_error().unwrap().metadata().get("vector_id").map(String::as_str),
        Some("vec1")
    );
    assert_eq!(capture.at_level(Level::ERROR).len(), 1);
    assert!(capture.at_level(Level::INFO).is_empty());
}

// ============================================================
// search_vectors
// ============================================================

#[tokio::test]
async fn test_search_vectors_success() {
    let state = Shared::default();
    let expected = vec![
        ScoredPoint::new("result1", 0.9),
        ScoredPoint::new("result2", 0.4),
    ];
    state.lock().search_results = expected.clone();
    let adapter = connected(&state).await;
    let capture = LogCapture::new();
    let _guard = capture.install();

    let results = adapter
        .search_vectors("test_collection", &[0.1, 0.2, 0.3], DEFAULT_TOP_K)
        .await
        .unwrap();

    assert_eq!(results, expected);
    assert_eq!(
        calls(&state),
        vec![Call::Search {
            collection: "test_collection".into(),
            vector: vec![0.1, 0.2, 0.3],
            limit: 10,
        }]
    );
    assert_eq!(
        capture.messages(Level::INFO),
        vec!["Search completed successfully in collection 'test_collection'.".to_string()]
    );
}

#[tokio::test]
async fn test_search_vectors_failure() {
    let state = Shared::default();
    state.lock().reject_search = true;
    let adapter = connected(&state).await;
    let capture = LogCapture::new();
    let _guard = capture.install();

    let err = adapter
        .search_vectors("test_collection", &[0.1, 0.2, 0.3], 5)
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), Some("VECTOR_SEARCH_ERROR"));
    assert_eq!(err.to_string(), "Failed to search vectors");
    assert_eq!(capture.messages(Level::ERROR), vec!["Failed to search vectors".to_string()]);
}

// ============================================================
// Not connected
// ============================================================

#[tokio::test]
async fn test_operations_before_connect() {
    let state = Shared::default();
    let adapter = adapter(&state);
    let capture = LogCapture::new();
    let _guard = capture.install();

    let err = adapter.create_collection("c", 3, "cosine").await.unwrap_err();
    assert_eq!(err.error_code(), Some("COLLECTION_CREATION_ERROR"));
    assert_eq!(
        err.client_error().unwrap().metadata().get("reason").map(String::as_str),
        Some("not connected")
    );

    let err = adapter.insert_vector("c", 1u64.into(), &[0.0], None).await.unwrap_err();
    assert_eq!(err.error_code(), Some("VECTOR_INSERTION_ERROR"));

    let err = adapter.search_vectors("c", &[0.0], 1).await.unwrap_err();
    assert_eq!(err.error_code(), Some("VECTOR_SEARCH_ERROR"));

    let err = adapter.create_collection("c", 3, "nope").await.unwrap_err();
    assert!(matches!(err, VectorDbError::InvalidArgument(_)));

    assert_eq!(capture.at_level(Level::ERROR).len(), 3);
    assert_eq!(state.lock().connects, 0);
    assert!(calls(&state).is_empty());
}

#[test]
fn test_endpoint_and_identity() {
    let adapter = QdrantAdapter::new(ConnectionConfig::new("vectors.local", 6400));
    assert_eq!(adapter.endpoint(), "http://vectors.local:6400");
    assert_eq!(adapter.backend_name(), "qdrant");
    assert_eq!(adapter.config().port, 6400);

    let adapter = QdrantAdapter::new(ConnectionConfig::new("cloud", 6333).with_api_key("k"));
    assert_eq!(adapter.endpoint(), "https://cloud:6333");
}
