use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};
use crate::message::{EXTENSION_SPEC_VERSION, MODULE_NAME};
use crate::serialization::Format;

/// Front-end module the widget models bind to.
///
/// These values end up in the `_model_module*` and `_view_module*` keys of
/// every synchronized state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModuleConfig {
    /// Module name, e.g. "jupyter-colorbar".
    #[serde(default = "default_module_name")]
    pub name: String,

    /// Semver range of the front-end module.
    #[serde(default = "default_module_version")]
    pub version: String,
}

fn default_module_name() -> String {
    MODULE_NAME.to_string()
}

fn default_module_version() -> String {
    EXTENSION_SPEC_VERSION.to_string()
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self {
            name: default_module_name(),
            version: default_module_version(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable text format (default).
    #[default]
    Text,
    /// Structured JSON format.
    Json,
}

/// Common logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format: "text" or "json".
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Configuration of the synchronization side of the widget models.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Front-end module identity.
    #[serde(default)]
    pub module: ModuleConfig,

    /// Encoding used at the transport edge.
    #[serde(default)]
    pub serialization: Format,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Load a configuration file in JSON5 format.
pub fn load_config<T: for<'de> Deserialize<'de>>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!(
            "Failed to read config file '{}': {}",
            path.display(),
            e
        ))
    })?;

    let config = json5::from_str(&content).map_err(|e| {
        Error::Config(format!(
            "Failed to parse config file '{}': {}",
            path.display(),
            e
        ))
    })?;

    tracing::debug!(path = %path.display(), "Loaded configuration");

    Ok(config)
}

/// Load a configuration from a JSON5 string.
pub fn parse_config<T: for<'de> Deserialize<'de>>(content: &str) -> Result<T> {
    json5::from_str(content).map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sync_config() {
        let json5 = r#"
        {
            module: {
                name: "my-colorbar",
                version: "^2.0.0",
            },
            serialization: "cbor",
            logging: {
                level: "debug",
            },
        }
        "#;

        let config: SyncConfig = parse_config(json5).unwrap();

        assert_eq!(config.module.name, "my-colorbar");
        assert_eq!(config.module.version, "^2.0.0");
        assert_eq!(config.serialization, Format::Cbor);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_default_config() {
        let config: SyncConfig = parse_config("{}").unwrap();

        assert_eq!(config.module.name, "jupyter-colorbar");
        assert_eq!(config.module.version, "1.0.0");
        assert_eq!(config.serialization, Format::Json);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Text);
    }

    #[test]
    fn test_partial_module_config() {
        let config: SyncConfig = parse_config(r#"{ module: { version: "0.2.0" } }"#).unwrap();

        assert_eq!(config.module.name, "jupyter-colorbar");
        assert_eq!(config.module.version, "0.2.0");
    }

    #[test]
    fn test_json_logging_format() {
        let json5 = r#"
        {
            logging: {
                level: "debug",
                format: "json",
            },
        }
        "#;

        let config: SyncConfig = parse_config(json5).unwrap();

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_load_missing_file() {
        let result: Result<SyncConfig> = load_config("/nonexistent/colorbar.json5");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_parse_invalid() {
        let result: Result<SyncConfig> = parse_config("{ serialization: \"xml\" }");
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
