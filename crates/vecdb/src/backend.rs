//! Known backends and how to build their adapters.

use std::fmt;
use std::str::FromStr;

use vecdb_core::{ClientError, ConnectionConfig, ErrorKind, VectorDbClient, VectorDbError};
use vecdb_qdrant::QdrantAdapter;

/// The closed set of backends this crate can dispatch to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Backend {
    #[default]
    Qdrant,
}

impl Backend {
    pub const ALL: &'static [Backend] = &[Backend::Qdrant];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Qdrant => vecdb_qdrant::BACKEND_NAME,
        }
    }

    /// Build an unconnected adapter for this backend.
    pub fn build(&self, config: ConnectionConfig) -> Box<dyn VectorDbClient> {
        match self {
            Self::Qdrant => Box::new(QdrantAdapter::new(config)),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = VectorDbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|b| b.as_str() == s)
            .ok_or_else(|| {
                ClientError::new(
                    ErrorKind::UnsupportedBackend,
                    format!("Backend '{s}' is not supported"),
                )
                .with_metadata("backend", s)
                .into()
            })
    }
}
