//! Scale objects as seen from the widget models.
//!
//! The widgets never look inside a scale. All they need is that the scale is
//! itself a synchronized model, so it can be referenced by handle on the wire.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use colorbar_common::{Error, ModelId, Result, model_ref, parse_model_ref_value};

/// Capability of being synchronized independently across the boundary.
pub trait SyncModel: Send + Sync + fmt::Debug {
    /// Id under which the model is known on both sides.
    fn model_id(&self) -> &ModelId;

    /// Model class name, e.g. "LinearScaleModel".
    fn model_name(&self) -> &str;
}

/// A color scale mapping a domain to colors.
///
/// Opaque to this crate: the computation lives with the scale's own model.
pub trait Scale: SyncModel {}

/// A scale known only by its model id and class name.
///
/// This is the natural stand-in for a scale widget owned elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScaleHandle {
    id: ModelId,
    model_name: String,
}

impl ScaleHandle {
    /// Create a handle with a freshly generated model id.
    pub fn new(model_name: impl Into<String>) -> Self {
        Self::with_id(ModelId::new(), model_name)
    }

    /// Create a handle for an existing model id.
    pub fn with_id(id: ModelId, model_name: impl Into<String>) -> Self {
        Self {
            id,
            model_name: model_name.into(),
        }
    }
}

impl SyncModel for ScaleHandle {
    fn model_id(&self) -> &ModelId {
        &self.id
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

impl Scale for ScaleHandle {}

/// Resolves model handles back into shared scale objects.
pub trait ReferenceResolver {
    fn resolve(&self, id: &ModelId) -> Option<Arc<dyn Scale>>;
}

/// Scales known on this side of the boundary, keyed by model id.
#[derive(Debug, Default)]
pub struct ScaleRegistry {
    scales: HashMap<ModelId, Arc<dyn Scale>>,
}

impl ScaleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a scale; returns the scale previously registered under its id.
    pub fn register(&mut self, scale: Arc<dyn Scale>) -> Option<Arc<dyn Scale>> {
        let id = scale.model_id().clone();
        tracing::debug!(model_id = %id, model_name = scale.model_name(), "Registered scale");
        self.scales.insert(id, scale)
    }

    pub fn unregister(&mut self, id: &ModelId) -> Option<Arc<dyn Scale>> {
        self.scales.remove(id)
    }

    pub fn contains(&self, id: &ModelId) -> bool {
        self.scales.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.scales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scales.is_empty()
    }
}

impl ReferenceResolver for ScaleRegistry {
    fn resolve(&self, id: &ModelId) -> Option<Arc<dyn Scale>> {
        self.scales.get(id).cloned()
    }
}

/// Encode a shared model as its wire handle.
pub fn serialize_reference<M: SyncModel + ?Sized>(model: &M) -> Value {
    Value::String(model_ref(model.model_id()))
}

/// Resolve a wire handle into the shared scale it names.
pub fn deserialize_reference(
    value: &Value,
    resolver: &dyn ReferenceResolver,
) -> Result<Arc<dyn Scale>> {
    let id = parse_model_ref_value(value)?;
    resolver
        .resolve(&id)
        .ok_or_else(|| Error::UnresolvedReference(id.to_string()))
}
