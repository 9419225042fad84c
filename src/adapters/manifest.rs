use crate::config::ModuleConfig;
use crate::core::{MarkerAttribute, ModuleHandle, Result};

/// A module whose marker attributes are listed in configuration rather than
/// read from a loaded binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestModule {
    name: String,
    markers: Vec<MarkerAttribute>,
}

impl ManifestModule {
    pub fn new(name: impl Into<String>, markers: Vec<MarkerAttribute>) -> Self {
        Self {
            name: name.into(),
            markers,
        }
    }

    pub fn from_config(config: &ModuleConfig) -> Self {
        Self::new(
            config.name.clone(),
            config
                .markers
                .iter()
                .map(|m| MarkerAttribute::new(m.kind.clone(), m.target.clone()))
                .collect(),
        )
    }
}

impl ModuleHandle for ManifestModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn marker_attributes(&self, kind: &str) -> Result<Vec<MarkerAttribute>> {
        Ok(self
            .markers
            .iter()
            .filter(|m| m.kind == kind)
            .cloned()
            .collect())
    }
}
