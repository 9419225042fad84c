use crate::core::{ModuleHandle, Result, StartupTypeLocator, TypeRef};
use crate::utils::error::DiagError;
use once_cell::sync::OnceCell;
use std::sync::Arc;

/// Marker attribute kind that declares an extension startup type.
pub const STARTUP_MARKER_KIND: &str = "ExtensionStartup";

/// Collects startup types from a fixed set of modules, once.
///
/// Order is module order, then marker order within a module. The scan runs at
/// most once: a failure is cached too and returned to every later caller.
pub struct ModuleStartupTypeLocator<M: ModuleHandle> {
    modules: Vec<M>,
    startup_types: OnceCell<std::result::Result<Vec<TypeRef>, Arc<DiagError>>>,
}

impl<M: ModuleHandle> ModuleStartupTypeLocator<M> {
    pub fn new(modules: Vec<M>) -> Self {
        Self {
            modules,
            startup_types: OnceCell::new(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    pub fn is_computed(&self) -> bool {
        self.startup_types.get().is_some()
    }

    fn scan(&self) -> Result<Vec<TypeRef>> {
        let mut types = Vec::new();

        for module in &self.modules {
            let markers = module.marker_attributes(STARTUP_MARKER_KIND)?;
            tracing::debug!(
                "Module '{}' declares {} startup marker(s)",
                module.name(),
                markers.len()
            );
            types.extend(markers.into_iter().map(|marker| marker.target));
        }

        tracing::debug!(
            "Located {} startup type(s) across {} module(s)",
            types.len(),
            self.modules.len()
        );
        Ok(types)
    }
}

impl<M: ModuleHandle> Default for ModuleStartupTypeLocator<M> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<M: ModuleHandle> StartupTypeLocator for ModuleStartupTypeLocator<M> {
    fn get_startup_types(&self) -> Result<&[TypeRef]> {
        match self
            .startup_types
            .get_or_init(|| self.scan().map_err(Arc::new))
        {
            Ok(types) => Ok(types.as_slice()),
            Err(cause) => Err(DiagError::Shared(cause.clone())),
        }
    }
}
