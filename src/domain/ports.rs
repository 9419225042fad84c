use crate::domain::model::{MarkerAttribute, ServiceResolutionEvent, TypeRef};
use crate::utils::error::Result;
use async_trait::async_trait;

/// A loaded module that can be asked for its marker attributes.
///
/// Loading and reflection belong to the host; this is only the query the locator needs.
pub trait ModuleHandle: Send + Sync {
    fn name(&self) -> &str;
    fn marker_attributes(&self, kind: &str) -> Result<Vec<MarkerAttribute>>;
}

pub trait StartupTypeLocator: Send + Sync {
    fn get_startup_types(&self) -> Result<&[TypeRef]>;
}

/// Host lifecycle milestone ("specialization has happened").
pub trait SpecializationSignal: Send + Sync {
    fn has_specialized(&self) -> bool;
}

impl<F> SpecializationSignal for F
where
    F: Fn() -> bool + Send + Sync,
{
    fn has_specialized(&self) -> bool {
        self()
    }
}

/// Producer side of the resolution log. Never blocks, never reports failure.
pub trait ResolutionLogSink: Send + Sync {
    fn send(&self, event: ServiceResolutionEvent);
}

/// Consumer side destination for drained events.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn export(&self, event: &ServiceResolutionEvent) -> Result<()>;
}
