//! Client configuration and its environment loader.
//!
//! Adapters receive a resolved [`ConnectionConfig`]; only the loader here
//! looks at the process environment.

use serde::{Deserialize, Serialize};

use crate::error::{Result, VectorDbError};

/// Prefix of every environment variable read by [`VectorDbConfig::from_env`].
pub const ENV_PREFIX: &str = "VECTORDB";

pub const DEFAULT_BACKEND: &str = "qdrant";
pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 6333;

/// Where and how to reach the vector store service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub api_key: Option<String>,
    /// Force TLS on or off. Unset means "TLS when an API key is present".
    #[serde(default)]
    pub https: Option<bool>,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_backend() -> String {
    DEFAULT_BACKEND.to_string()
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: DEFAULT_PORT,
            api_key: None,
            https: None,
        }
    }
}

impl ConnectionConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_https(mut self, https: bool) -> Self {
        self.https = Some(https);
        self
    }

    /// Whether requests should use TLS.
    pub fn use_https(&self) -> bool {
        self.https.unwrap_or(self.api_key.is_some())
    }

    pub fn scheme(&self) -> &'static str {
        if self.use_https() {
            "https"
        } else {
            "http"
        }
    }

    /// `host:port`, as used in log events.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Base URL of the server, without a trailing slash.
    pub fn endpoint(&self) -> String {
        format!("{}://{}", self.scheme(), self.address())
    }
}

/// Top-level configuration: which backend and how to reach it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorDbConfig {
    #[serde(default = "default_backend")]
    pub backend: String,
    #[serde(default)]
    pub connection: ConnectionConfig,
}

impl Default for VectorDbConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            connection: ConnectionConfig::default(),
        }
    }
}

impl VectorDbConfig {
    /// Defaults overridden by `VECTORDB_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(Self::default(), |key| std::env::var(key).ok())
    }

    /// Resolve `defaults` against `lookup`. A variable that is present wins
    /// over the corresponding default.
    ///
    /// Recognised keys: `VECTORDB_BACKEND`, `VECTORDB_HOST`, `VECTORDB_PORT`,
    /// `VECTORDB_API_KEY`, `VECTORDB_HTTPS`.
    pub fn from_lookup<F>(defaults: Self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{ENV_PREFIX}_{name}"));
        let mut cfg = defaults;

        if let Some(backend) = var("BACKEND") {
            cfg.backend = backend;
        }
        if let Some(host) = var("HOST") {
            cfg.connection.host = host;
        }
        if let Some(port) = var("PORT") {
            cfg.connection.port = port.trim().parse().map_err(|_| {
                VectorDbError::invalid_argument(format!(
                    "{ENV_PREFIX}_PORT is not a valid port: {port}"
                ))
            })?;
        }
        if let Some(api_key) = var("API_KEY") {
            cfg.connection.api_key = Some(api_key);
        }
        if let Some(https) = var("HTTPS") {
            cfg.connection.https = Some(parse_flag(&https).ok_or_else(|| {
                VectorDbError::invalid_argument(format!(
                    "{ENV_PREFIX}_HTTPS is not a boolean: {https}"
                ))
            })?);
        }

        Ok(cfg)
    }

    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json_str(s: &str) -> Result<Self> {
        serde_json::from_str(s)
            .map_err(|e| VectorDbError::invalid_argument(format!("invalid configuration: {e}")))
    }
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
