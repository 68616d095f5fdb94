pub mod analysis;
pub mod config;
pub mod data_ingestion;
pub mod errors;
pub mod logging;
pub mod report;

pub use errors::{ReportError, Result};
