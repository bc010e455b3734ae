//! Metadata composition.
//!
//! Actions receive meta from up to three layers: the factory, the creator
//! (`common_meta`) and the call site. Layers are merged shallowly in that
//! order, so a later layer replaces a same-named key from an earlier one.

use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::action::Meta;

pub const ACTOR_KEY: &str = "actor";
pub const CORRELATION_ID_KEY: &str = "correlation_id";
pub const TIMESTAMP_KEY: &str = "timestamp";

/// Shallow-merge meta layers, later layers winning.
///
/// Returns `None` when every layer is absent or empty, so callers can omit
/// the field entirely.
pub fn merge_layers(layers: &[Option<&Meta>]) -> Option<Meta> {
    let mut merged = Meta::new();
    for layer in layers.iter().flatten() {
        for (key, value) in layer.iter() {
            merged.insert(key.clone(), value.clone());
        }
    }

    if merged.is_empty() {
        None
    } else {
        Some(merged)
    }
}

/// Fluent builder for meta maps.
///
/// # Examples
///
/// ```
/// use fluxa::MetaBuilder;
///
/// let meta = MetaBuilder::new()
///     .actor("user-42")
///     .correlation_id("req-abc")
///     .insert("source", "api")
///     .build();
///
/// assert_eq!(meta["actor"], "user-42");
/// assert_eq!(meta["correlation_id"], "req-abc");
/// assert_eq!(meta["source"], "api");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MetaBuilder {
    map: Meta,
}

impl MetaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identity of whoever triggered the action.
    pub fn actor(self, actor: impl Into<String>) -> Self {
        self.insert(ACTOR_KEY, actor.into())
    }

    /// Correlate this action with others from the same request.
    pub fn correlation_id(self, id: impl Into<String>) -> Self {
        self.insert(CORRELATION_ID_KEY, id.into())
    }

    /// Attach a freshly generated UUID v4 correlation id.
    pub fn new_correlation_id(self) -> Self {
        self.correlation_id(Uuid::new_v4().to_string())
    }

    /// Stamp an RFC 3339 timestamp.
    pub fn timestamp(self, at: DateTime<Utc>) -> Self {
        self.insert(TIMESTAMP_KEY, at.to_rfc3339())
    }

    pub fn now(self) -> Self {
        self.timestamp(Utc::now())
    }

    pub fn insert(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.map.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> Meta {
        self.map
    }
}

impl From<MetaBuilder> for Meta {
    fn from(builder: MetaBuilder) -> Self {
        builder.build()
    }
}
