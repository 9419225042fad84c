pub mod channel;
pub mod exporter;
pub mod filter;
pub mod gate;
pub mod locator;

pub use crate::domain::model::{MarkerAttribute, ServiceResolutionEvent, TypeRef};
pub use crate::domain::ports::{
    EventSink, ModuleHandle, ResolutionLogSink, SpecializationSignal, StartupTypeLocator,
};
pub use crate::utils::error::Result;
