use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiagError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Module inspection failed for '{module}': {message}")]
    ModuleInspectionError { module: String, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Event export failed: {message}")]
    ExportError { message: String },

    /// 快取下來的失敗結果，每次呼叫都回傳同一個原因
    #[error(transparent)]
    Shared(Arc<DiagError>),
}

impl DiagError {
    pub fn module_inspection(module: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ModuleInspectionError {
            module: module.into(),
            message: message.into(),
        }
    }

    /// The underlying error, looking through shared (cached) wrappers.
    pub fn root_cause(&self) -> &DiagError {
        match self {
            Self::Shared(inner) => inner.root_cause(),
            other => other,
        }
    }

    /// 給終端使用者看的簡短說明
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::IoError(e) => format!("File access failed: {}", e),
            Self::SerializationError(_) => "Could not serialize a diagnostic event".to_string(),
            Self::TomlError(_) => "The configuration file is not valid TOML".to_string(),
            Self::ModuleInspectionError { module, .. } => {
                format!("Could not read startup markers from module '{}'", module)
            }
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            Self::ExportError { message } => format!("Exporting events failed: {}", message),
            Self::Shared(inner) => inner.user_friendly_message(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::IoError(_) => "Check that the path exists and is readable/writable",
            Self::SerializationError(_) => "Check that event fields hold plain JSON values",
            Self::TomlError(_) | Self::ConfigError { .. } => {
                "Fix the configuration file and run again"
            }
            Self::ModuleInspectionError { .. } => "Verify the module manifest lists valid markers",
            Self::InvalidConfigValueError { .. } => {
                "Correct the named setting in the config file or on the command line"
            }
            Self::ExportError { .. } => "Check the export destination; events keep flowing meanwhile",
            Self::Shared(inner) => inner.recovery_suggestion(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DiagError>;
