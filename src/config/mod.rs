#[cfg(feature = "cli")]
pub mod cli;
pub mod env;

use crate::core::filter::PrefixAllowList;
use crate::utils::error::{DiagError, Result};
use crate::utils::validation::{
    validate_log_level, validate_non_empty_string, validate_unique_names, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

/// Settings for the service resolution log channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionLogConfig {
    /// Start with the gate already open.
    #[serde(default)]
    pub enabled: bool,
    /// Empty means no filtering.
    #[serde(default)]
    pub allowed_prefixes: Vec<String>,
}

impl ResolutionLogConfig {
    pub fn allow_list(&self) -> PrefixAllowList {
        PrefixAllowList::new(&self.allowed_prefixes)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    #[serde(default)]
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleConfig {
    pub name: String,
    #[serde(default)]
    pub markers: Vec<MarkerConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerConfig {
    pub kind: String,
    pub target: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub resolution_log: ResolutionLogConfig,
    #[serde(default)]
    pub modules: Vec<ModuleConfig>,
}

impl DiagConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DiagError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${RESOLUTION_PREFIXES})，找不到的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DiagError::ConfigError {
            message: format!("env substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.level.as_deref()
    }
}

impl Validate for DiagConfig {
    fn validate(&self) -> Result<()> {
        if let Some(level) = &self.logging.level {
            validate_log_level("logging.level", level)?;
        }

        for module in &self.modules {
            validate_non_empty_string("modules.name", &module.name)?;
            for marker in &module.markers {
                validate_non_empty_string("modules.markers.kind", &marker.kind)?;
                validate_non_empty_string("modules.markers.target", &marker.target)?;
            }
        }
        validate_unique_names("modules.name", self.modules.iter().map(|m| m.name.as_str()))?;

        Ok(())
    }
}
