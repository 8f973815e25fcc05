pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

#[cfg(feature = "cli")]
pub use adapters::render::TerminalRenderer;

pub use adapters::http::HttpMeasurementService;
pub use adapters::render::{HtmlRenderer, MemoryRenderer};
pub use config::ServiceConfig;
pub use core::client::ConversionClient;
pub use domain::model::{DisplayState, Label, Outcome};
pub use utils::error::{ClientError, Result};
