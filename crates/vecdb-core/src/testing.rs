//! Test helpers shared by the backend and facade crates.
//!
//! Enabled with the `test-util` feature.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

use crate::client::VectorDbClient;
use crate::error::{Result, VectorDbError};
use crate::types::{Payload, PointId, ScoredPoint};

/// A client that provides none of the contract's operations.
///
/// Used to check how callers react to an adapter that was wired in but
/// never implemented.
#[derive(Debug, Default)]
pub struct UnimplementedClient;

#[async_trait]
impl VectorDbClient for UnimplementedClient {
    async fn connect(&mut self) -> Result<()> {
        Err(VectorDbError::not_implemented("connect"))
    }

    async fn create_collection(&self, _: &str, _: u64, _: &str) -> Result<()> {
        Err(VectorDbError::not_implemented("create_collection"))
    }

    async fn insert_vector(&self, _: &str, _: PointId, _: &[f32], _: Option<Payload>) -> Result<()> {
        Err(VectorDbError::not_implemented("insert_vector"))
    }

    async fn search_vectors(&self, _: &str, _: &[f32], _: usize) -> Result<Vec<ScoredPoint>> {
        Err(VectorDbError::not_implemented("search_vectors"))
    }

    fn backend_name(&self) -> &'static str {
        "unimplemented"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// One recorded tracing event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedEvent {
    pub level: Level,
    pub target: String,
    pub message: String,
    pub fields: BTreeMap<String, String>,
}

/// A tracing layer that keeps every event whose target starts with a
/// given prefix.
#[derive(Clone)]
pub struct LogCapture {
    prefix: &'static str,
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl Default for LogCapture {
    fn default() -> Self {
        Self::new()
    }
}

impl LogCapture {
    /// Capture events from the `vecdb*` crates.
    pub fn new() -> Self {
        Self::for_target("vecdb")
    }

    pub fn for_target(prefix: &'static str) -> Self {
        Self {
            prefix,
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Make this capture the current thread's subscriber until the guard
    /// is dropped.
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::registry().with(self.clone());
        tracing::subscriber::set_default(subscriber)
    }

    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().clone()
    }

    pub fn at_level(&self, level: Level) -> Vec<CapturedEvent> {
        self.events
            .lock()
            .iter()
            .filter(|e| e.level == level)
            .cloned()
            .collect()
    }

    pub fn messages(&self, level: Level) -> Vec<String> {
        self.at_level(level).into_iter().map(|e| e.message).collect()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl<S: Subscriber> Layer<S> for LogCapture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let meta = event.metadata();
        if !meta.target().starts_with(self.prefix) {
            return;
        }
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        self.events.lock().push(CapturedEvent {
            level: *meta.level(),
            target: meta.target().to_string(),
            message: visitor.message,
            fields: visitor.fields,
        });
    }
}

#[derive(Default)]
struct FieldVisitor {
    message: String,
    fields: BTreeMap<String, String>,
}

impl Visit for FieldVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.insert(field.name().to_string(), value.to_string());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.fields.insert(field.name().to_string(), format!("{value:?}"));
        }
    }
}
