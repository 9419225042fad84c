// Adapters layer: concrete implementations for external systems (module manifests, event sinks).

pub mod manifest;
pub mod sinks;

pub use manifest::ManifestModule;
pub use sinks::{JsonLinesSink, TracingSink};
