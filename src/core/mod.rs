pub mod aggregate;
pub mod engine;
pub mod flatten;
pub mod pipeline;
pub mod ratio;
pub mod records;

pub use crate::domain::ports::{ConfigProvider, ModelStore, Pipeline, Simulator, Storage};
pub use crate::domain::report::{ReportBatch, ReportRow};
pub use crate::utils::error::Result;
