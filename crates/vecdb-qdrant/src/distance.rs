//! Distance metrics understood by Qdrant.

use std::fmt;
use std::str::FromStr;

use vecdb_core::VectorDbError;

/// Qdrant's distance functions, serialized the way the REST API expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Distance {
    Cosine,
    Euclid,
    Dot,
    Manhattan,
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cosine => write!(f, "cosine"),
            Self::Euclid => write!(f, "euclid"),
            Self::Dot => write!(f, "dot"),
            Self::Manhattan => write!(f, "manhattan"),
        }
    }
}

impl FromStr for Distance {
    type Err = VectorDbError;

    /// Case-insensitive. Anything outside the closed set is an invalid
    /// argument carrying the name as given.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cosine" => Ok(Self::Cosine),
            "euclid" | "euclidean" => Ok(Self::Euclid),
            "dot" => Ok(Self::Dot),
            "manhattan" => Ok(Self::Manhattan),
            _ => Err(VectorDbError::invalid_argument(format!(
                "Unsupported distance metric: {s}"
            ))),
        }
    }
}
