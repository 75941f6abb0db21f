use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use sea_level_predictor::PipelineConfig;

#[derive(Debug, Parser)]
#[command(name = "sea-level-predictor")]
#[command(about = "Fit sea-level trends and chart their projection", long_about = None)]
pub struct Cli {
    /// Observations file (CSV, JSON or Parquet)
    pub data_file: Option<PathBuf>,

    /// JSON run configuration; flags given here override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// First year of the recent-trend fit
    #[arg(long)]
    pub cutoff: Option<i32>,

    /// Last year the recent trend is drawn to
    #[arg(long)]
    pub horizon: Option<i32>,

    /// Write the chart to this PNG and close the window
    #[arg(long)]
    pub export: Option<PathBuf>,
}

impl Cli {
    /// Build the run configuration: defaults, then the `--config` file, then
    /// the remaining command-line values.
    pub fn into_config(self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_json_file(path)?,
            None => PipelineConfig::default(),
        };

        if let Some(path) = self.data_file {
            config.data_path = path;
        }
        if let Some(year) = self.cutoff {
            config.cutoff_year = year;
        }
        if let Some(year) = self.horizon {
            config.horizon_year = year;
        }
        if let Some(path) = self.export {
            config.export_path = Some(path);
        }

        config.validate()?;
        Ok(config)
    }
}
