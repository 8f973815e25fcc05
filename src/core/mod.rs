pub mod client;

pub use crate::domain::model::{DisplayState, Label, Outcome};
pub use crate::domain::ports::{ConfigProvider, MeasurementService, Renderer};
pub use crate::utils::error::Result;
