use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::config::ModuleConfig;

/// Name of the front-end module implementing the views.
pub const MODULE_NAME: &str = "jupyter-colorbar";

/// Version range of the front-end module the models are written against.
pub const EXTENSION_SPEC_VERSION: &str = "1.0.0";

/// Read-only keys naming the model and view classes of a state.
pub const IDENTITY_KEYS: [&str; 6] = [
    "_model_name",
    "_model_module",
    "_model_module_version",
    "_view_name",
    "_view_module",
    "_view_module_version",
];

/// Synchronized state: field name to wire value.
pub type State = serde_json::Map<String, Value>;

/// Identifier of a synchronized model.
///
/// Freshly generated ids are UUID v4 in simple (hex) form, which is what
/// notebook comm ids look like.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelId(String);

impl ModelId {
    /// Generate a new random model id.
    pub fn new() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Get the string form of this id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ModelId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for ModelId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ModelId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ModelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind of a synchronization message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// A model comes into existence; `state` holds the full snapshot.
    Open,
    /// One or more fields changed; `state` holds only those fields.
    Update,
    /// Ask the owner to resend its full state.
    RequestState,
    /// The model is going away.
    Close,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Open => "open",
            Method::Update => "update",
            Method::RequestState => "request_state",
            Method::Close => "close",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A message on the channel between a model and its remote view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncMessage {
    /// Model the message is about.
    pub model_id: ModelId,

    pub method: Method,

    /// Field values in wire form.
    #[serde(default, skip_serializing_if = "State::is_empty")]
    pub state: State,
}

impl SyncMessage {
    pub fn open(model_id: ModelId, state: State) -> Self {
        Self {
            model_id,
            method: Method::Open,
            state,
        }
    }

    pub fn update(model_id: ModelId, state: State) -> Self {
        Self {
            model_id,
            method: Method::Update,
            state,
        }
    }

    pub fn request_state(model_id: ModelId) -> Self {
        Self {
            model_id,
            method: Method::RequestState,
            state: State::new(),
        }
    }

    pub fn close(model_id: ModelId) -> Self {
        Self {
            model_id,
            method: Method::Close,
            state: State::new(),
        }
    }

    /// Add a field value to this message.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.state.insert(name.into(), value.into());
        self
    }
}

/// Model and view names announced by every synchronized model.
///
/// The remote side uses these to pick which model and view classes to
/// instantiate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelIdentity {
    #[serde(rename = "_model_name")]
    pub model_name: String,
    #[serde(rename = "_model_module")]
    pub model_module: String,
    #[serde(rename = "_model_module_version")]
    pub model_module_version: String,
    #[serde(rename = "_view_name")]
    pub view_name: String,
    #[serde(rename = "_view_module")]
    pub view_module: String,
    #[serde(rename = "_view_module_version")]
    pub view_module_version: String,
}

impl ModelIdentity {
    /// Identity for a model/view pair served by `module`.
    pub fn new(model_name: &str, view_name: &str, module: &ModuleConfig) -> Self {
        Self {
            model_name: model_name.to_string(),
            model_module: module.name.clone(),
            model_module_version: module.version.clone(),
            view_name: view_name.to_string(),
            view_module: module.name.clone(),
            view_module_version: module.version.clone(),
        }
    }

    /// Write the identity keys into a state map.
    pub fn write_into(&self, state: &mut State) {
        let values = [
            &self.model_name,
            &self.model_module,
            &self.model_module_version,
            &self.view_name,
            &self.view_module,
            &self.view_module_version,
        ];
        for (key, value) in IDENTITY_KEYS.into_iter().zip(values) {
            state.insert(key.to_string(), Value::String(value.clone()));
        }
    }

    /// Module a state was announced with.
    ///
    /// Keys that are absent or not strings fall back to the defaults.
    pub fn module_of(state: &State) -> ModuleConfig {
        let mut module = ModuleConfig::default();
        if let Some(name) = state.get("_model_module").and_then(Value::as_str) {
            module.name = name.to_string();
        }
        if let Some(version) = state.get("_model_module_version").and_then(Value::as_str) {
            module.version = version.to_string();
        }
        module
    }
}

/// Whether `key` is one of the read-only [`IDENTITY_KEYS`].
pub fn is_identity_key(key: &str) -> bool {
    IDENTITY_KEYS.contains(&key)
}
