use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Stable classification of backend failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// Connection establishment failed.
    Connection,
    /// The backend rejected a collection creation request.
    CollectionCreation,
    /// The backend rejected a vector insertion.
    VectorInsertion,
    /// The backend rejected a similarity search.
    VectorSearch,
    /// The requested backend identifier is unknown.
    UnsupportedBackend,
}

impl ErrorKind {
    /// Machine-readable code carried by every error of this kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Connection => "DB_CONN_ERROR",
            Self::CollectionCreation => "COLLECTION_CREATION_ERROR",
            Self::VectorInsertion => "VECTOR_INSERTION_ERROR",
            Self::VectorSearch => "VECTOR_SEARCH_ERROR",
            Self::UnsupportedBackend => "DB_UNSUPPORTED_BACKEND",
        }
    }

    fn fallback_message(&self) -> &'static str {
        match self {
            Self::Connection => "Failed to connect to the vector database",
            Self::CollectionCreation => "Failed to create collection",
            Self::VectorInsertion => "Failed to insert vector",
            Self::VectorSearch => "Failed to search vectors",
            Self::UnsupportedBackend => "Backend is not supported",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A structured backend failure: message, stable code and metadata.
///
/// Built once and never mutated afterwards; the builder methods consume
/// `self`.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct ClientError {
    kind: ErrorKind,
    message: String,
    metadata: BTreeMap<String, String>,
    #[source]
    source: Option<BoxError>,
}

impl ClientError {
    /// Create an error. An empty message is replaced by the kind's default.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        let mut message = message.into();
        if message.trim().is_empty() {
            message = kind.fallback_message().to_string();
        }
        Self {
            kind,
            message,
            metadata: BTreeMap::new(),
            source: None,
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.metadata.insert(key.into(), value.to_string());
        self
    }

    /// Attach the backend error that caused this failure.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn error_code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }
}

/// Error type returned by every vector database operation.
#[derive(Error, Debug)]
pub enum VectorDbError {
    /// The backend does not provide this operation. An integration defect,
    /// not a runtime failure.
    #[error("operation '{operation}' is not implemented by this backend")]
    NotImplemented { operation: &'static str },
    /// Caller-supplied data rejected before any backend call.
    #[error("{0}")]
    InvalidArgument(String),
    #[error(transparent)]
    Client(#[from] ClientError),
}

impl VectorDbError {
    pub fn not_implemented(operation: &'static str) -> Self {
        Self::NotImplemented { operation }
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Taxonomy code, if this is a backend failure.
    pub fn error_code(&self) -> Option<&'static str> {
        self.client_error().map(ClientError::error_code)
    }

    pub fn kind(&self) -> Option<ErrorKind> {
        self.client_error().map(ClientError::kind)
    }

    pub fn client_error(&self) -> Option<&ClientError> {
        match self {
            Self::Client(err) => Some(err),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, VectorDbError>;
