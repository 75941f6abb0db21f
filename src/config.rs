use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::chart::ChartLabels;
use crate::data::model::ColumnSpec;

pub const DEFAULT_DATA_PATH: &str = "sea_level_data.csv";
/// First year of the second, recent-trend fit.
pub const DEFAULT_CUTOFF_YEAR: i32 = 2000;
/// Last year the recent trend is drawn to.
pub const DEFAULT_HORIZON_YEAR: i32 = 2050;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("horizon year {horizon_year} is before cutoff year {cutoff_year}")]
    HorizonBeforeCutoff { cutoff_year: i32, horizon_year: i32 },
}

/// Everything a run needs. Every field has a default, so a config file only
/// has to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub data_path: PathBuf,
    pub columns: ColumnSpec,
    pub cutoff_year: i32,
    pub horizon_year: i32,
    pub labels: ChartLabels,
    /// When set, the chart is written to this PNG and the window closes.
    pub export_path: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            columns: ColumnSpec::default(),
            cutoff_year: DEFAULT_CUTOFF_YEAR,
            horizon_year: DEFAULT_HORIZON_YEAR,
            labels: ChartLabels::default(),
            export_path: None,
        }
    }
}

impl PipelineConfig {
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.horizon_year < self.cutoff_year {
            return Err(ConfigError::HorizonBeforeCutoff {
                cutoff_year: self.cutoff_year,
                horizon_year: self.horizon_year,
            });
        }
        Ok(())
    }
}
