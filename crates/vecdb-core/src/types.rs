use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of matches returned by a search when the caller does not say.
pub const DEFAULT_TOP_K: usize = 10;

/// Free-form key-value metadata stored alongside a vector.
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// Identifier of a vector within its collection.
///
/// Which forms are accepted is up to the backend; this layer only carries
/// the value through.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PointId {
    Num(u64),
    Str(String),
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Num(n) => write!(f, "{n}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<u64> for PointId {
    fn from(n: u64) -> Self {
        Self::Num(n)
    }
}

impl From<&str> for PointId {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for PointId {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<uuid::Uuid> for PointId {
    fn from(id: uuid::Uuid) -> Self {
        Self::Str(id.to_string())
    }
}

/// One search match, as reported by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPoint {
    pub id: PointId,
    #[serde(default)]
    pub version: u64,
    pub score: f32,
    #[serde(default)]
    pub payload: Option<Payload>,
}

impl ScoredPoint {
    pub fn new(id: impl Into<PointId>, score: f32) -> Self {
        Self {
            id: id.into(),
            version: 0,
            score,
            payload: None,
        }
    }

    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = Some(payload);
        self
    }
}
