pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{JsonLinesSink, ManifestModule, TracingSink};
pub use config::{DiagConfig, ResolutionLogConfig};
pub use crate::core::{
    channel::{LogStream, ServiceResolutionLogChannel},
    exporter::{ExportSummary, ResolutionLogExporter},
    filter::PrefixAllowList,
    gate::{ActivationGate, GateState},
    locator::{ModuleStartupTypeLocator, STARTUP_MARKER_KIND},
};
pub use domain::model::{MarkerAttribute, ServiceResolutionEvent, TypeRef};
pub use domain::ports::{
    EventSink, ModuleHandle, ResolutionLogSink, SpecializationSignal, StartupTypeLocator,
};
pub use utils::error::{DiagError, Result};
