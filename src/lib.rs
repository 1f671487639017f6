pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::{HttpModelStore, HttpSimulator, LocalStorage};
pub use crate::config::CliConfig;
pub use crate::core::{engine::ReportEngine, pipeline::ReportPipeline};
pub use crate::utils::error::{Result, StatError};
