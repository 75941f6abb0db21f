//! Sea-level trend fitting and projection.
//!
//! Loads a yearly sea-level series, fits a least-squares trend over the full
//! range and another from a cutoff year onward, and lays out a chart that
//! extends the recent trend to a horizon year. Drawing lives in the binary.

pub mod chart;
pub mod config;
pub mod data;
pub mod pipeline;
pub mod trend;

pub use chart::{ChartData, ChartLabels, Series};
pub use config::PipelineConfig;
pub use data::model::{ColumnSpec, Observation, ObservationSet};
pub use pipeline::{analyze, Analysis, PipelineError};
pub use trend::{fit, fit_detailed, FitStats, TrendError, TrendFit, TrendModel};
