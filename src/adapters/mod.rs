// Adapters layer: concrete implementations for external systems (HTTP service, display sinks)

pub mod http;
pub mod render;
