use crate::chart::{ChartData, ChartLabels};
use crate::config::{ConfigError, PipelineConfig};
use crate::data::loader::{load_file, LoadError};
use crate::data::model::ObservationSet;
use crate::trend::{fit_detailed, TrendError, TrendFit};

/// A recent window with fewer rows than this still fits, but gets a warning.
const FEW_POINTS: usize = 5;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("loading observations: {0}")]
    Load(#[from] LoadError),

    #[error(transparent)]
    Trend(#[from] TrendError),
}

// ---------------------------------------------------------------------------
// Analysis – the numeric result of a run
// ---------------------------------------------------------------------------

/// Loaded series plus both trend fits.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub observations: ObservationSet,
    pub cutoff_year: i32,
    /// Fit over every observation.
    pub full: TrendFit,
    /// Fit over observations from `cutoff_year` onward.
    pub recent: TrendFit,
}

impl Analysis {
    /// Fit both trends. Fails if either window has fewer than two distinct years.
    pub fn from_observations(
        observations: ObservationSet,
        cutoff_year: i32,
    ) -> Result<Self, TrendError> {
        if let [first, .., last] = observations.observations() {
            log::debug!("Series runs from {first} to {last}");
        }

        let full = fit_detailed(observations.observations(), None)?;
        let recent = fit_detailed(observations.observations(), Some(cutoff_year))?;

        log::info!("Full-range trend: {} (r² = {:.4})", full.model, full.stats.r_squared());
        log::info!(
            "Trend from {cutoff_year}: {} (r² = {:.4})",
            recent.model,
            recent.stats.r_squared()
        );
        if recent.stats.n_observations < FEW_POINTS {
            log::warn!(
                "Only {} observations at or after {cutoff_year}; the recent trend is poorly constrained",
                recent.stats.n_observations
            );
        }

        Ok(Analysis {
            observations,
            cutoff_year,
            full,
            recent,
        })
    }

    /// Level the recent trend predicts for `horizon_year`.
    pub fn projection(&self, horizon_year: i32) -> f64 {
        self.recent.model.predict_year(horizon_year)
    }

    pub fn chart(&self, labels: &ChartLabels, horizon_year: i32) -> ChartData {
        ChartData::build(
            &self.observations,
            Some(&self.full.model),
            Some(&self.recent.model),
            labels,
            self.cutoff_year,
            horizon_year,
        )
    }
}

/// Load the configured file and fit both trends. Rendering is left to the caller.
pub fn analyze(config: &PipelineConfig) -> Result<Analysis, PipelineError> {
    config.validate()?;
    let observations = load_file(&config.data_path, &config.columns)?;
    let analysis = Analysis::from_observations(observations, config.cutoff_year)?;
    Ok(analysis)
}
