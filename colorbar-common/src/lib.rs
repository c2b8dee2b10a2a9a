//! Color bar widget models: common library
//!
//! This crate provides the types shared by the widget models and whatever
//! transport carries their state to a remote view:
//!
//! - [`message`] - Sync messages (`SyncMessage`, `Method`, `ModelId`) and model identity
//! - [`reference`] - Model handles (`IPY_MODEL_<id>`) used for reference serialization
//! - [`serialization`] - JSON/CBOR encoding and decoding
//! - [`config`] - Configuration loading (JSON5 format)
//! - [`error`] - Error types

pub mod config;
pub mod error;
pub mod message;
pub mod reference;
pub mod serialization;

// Re-export commonly used types at the crate root
pub use config::{LogFormat, LoggingConfig, ModuleConfig, SyncConfig, load_config, parse_config};
pub use error::{Error, Result};
pub use message::{
    EXTENSION_SPEC_VERSION, IDENTITY_KEYS, MODULE_NAME, Method, ModelId, ModelIdentity, State,
    SyncMessage, is_identity_key,
};
pub use reference::{MODEL_REF_PREFIX, model_ref, parse_model_ref, parse_model_ref_value};
pub use serialization::{
    Format, decode, decode_auto, decode_message, detect_format, encode, encode_message,
};

/// Initialize tracing with the given configuration.
///
/// Supports two output formats:
/// - `LogFormat::Text` (default): Human-readable text format
/// - `LogFormat::Json`: Structured JSON format for log aggregation systems
///
/// `RUST_LOG`, when set, takes precedence over `config.level`.
///
/// # Example
///
/// ```ignore
/// use colorbar_common::{LoggingConfig, LogFormat, init_tracing};
///
/// let config = LoggingConfig {
///     level: "debug".to_string(),
///     format: LogFormat::Json,
/// };
/// init_tracing(&config)?;
/// ```
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format {
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(fmt::layer())
                .with(filter)
                .try_init()
                .map_err(|e| Error::Config(format!("Failed to initialize tracing: {}", e)))?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(fmt::layer().json())
                .with(filter)
                .try_init()
                .map_err(|e| Error::Config(format!("Failed to initialize tracing: {}", e)))?;
        }
    }

    Ok(())
}
