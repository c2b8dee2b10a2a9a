use thiserror::Error;

/// Common error type for the color bar widget models.
#[derive(Debug, Error)]
pub enum Error {
    /// A required field was not supplied at construction.
    #[error("Missing required value: {widget}.{field}")]
    MissingRequiredValue {
        widget: &'static str,
        field: &'static str,
    },

    /// A value falls outside the declared type, choice set or range of a field.
    #[error("Constraint violation on '{field}': {reason}")]
    ConstraintViolation { field: String, reason: String },

    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// A string that should be a model handle is not one.
    #[error("Invalid model reference: {0}")]
    InvalidReference(String),

    /// A well-formed model handle names no known model.
    #[error("Unresolved model reference: {0}")]
    UnresolvedReference(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CBOR serialization error: {0}")]
    Cbor(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a constraint violation for `field`.
    pub fn constraint(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ConstraintViolation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error is a constraint violation.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, Self::ConstraintViolation { .. })
    }
}

impl From<ciborium::ser::Error<std::io::Error>> for Error {
    fn from(e: ciborium::ser::Error<std::io::Error>) -> Self {
        Error::Cbor(e.to_string())
    }
}

impl From<ciborium::de::Error<std::io::Error>> for Error {
    fn from(e: ciborium::de::Error<std::io::Error>) -> Self {
        Error::Cbor(e.to_string())
    }
}

/// Result type alias using the widget models' Error.
pub type Result<T> = std::result::Result<T, Error>;
