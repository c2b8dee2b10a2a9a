use serde_json::Value;

use crate::error::{Error, Result};
use crate::message::ModelId;

/// Prefix marking a string as a handle to another synchronized model.
pub const MODEL_REF_PREFIX: &str = "IPY_MODEL_";

/// Build the wire handle for a model.
///
/// # Example
/// ```
/// use colorbar_common::message::ModelId;
/// use colorbar_common::reference::model_ref;
///
/// let handle = model_ref(&ModelId::from("4f1c"));
/// assert_eq!(handle, "IPY_MODEL_4f1c");
/// ```
pub fn model_ref(id: &ModelId) -> String {
    format!("{}{}", MODEL_REF_PREFIX, id)
}

/// Parse a wire handle back into the model id it names.
///
/// # Example
/// ```
/// use colorbar_common::reference::parse_model_ref;
///
/// let id = parse_model_ref("IPY_MODEL_4f1c").unwrap();
/// assert_eq!(id.as_str(), "4f1c");
/// assert!(parse_model_ref("4f1c").is_err());
/// ```
pub fn parse_model_ref(handle: &str) -> Result<ModelId> {
    match handle.strip_prefix(MODEL_REF_PREFIX) {
        Some(id) if !id.is_empty() => Ok(ModelId::from(id)),
        _ => Err(Error::InvalidReference(handle.to_string())),
    }
}

/// Parse a wire value that must hold a model handle.
pub fn parse_model_ref_value(value: &Value) -> Result<ModelId> {
    match value {
        Value::String(handle) => parse_model_ref(handle),
        other => Err(Error::InvalidReference(other.to_string())),
    }
}
