//! Ordinary least-squares trend lines over a yearly series.
//!
//! Fits `level = intercept + slope * year` and keeps the result as a plain
//! value ([`TrendModel`]) that can be evaluated at any year, including years
//! past the data (extrapolation is the point of the exercise).

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::filter::since_year;
use crate::data::model::Observation;

/// Errors raised while fitting a trend.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TrendError {
    #[error("{}: need at least 2 distinct years, found {distinct_years}", window_label(.min_year))]
    InsufficientData {
        distinct_years: usize,
        min_year: Option<i32>,
    },
}

fn window_label(min_year: &Option<i32>) -> String {
    match min_year {
        Some(year) => format!("cannot fit trend from {year}"),
        None => "cannot fit trend over full range".to_string(),
    }
}

/// A fitted straight line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendModel {
    /// Level change per year.
    pub slope: f64,
    /// Level at year 0.
    pub intercept: f64,
}

impl TrendModel {
    pub fn new(slope: f64, intercept: f64) -> Self {
        Self { slope, intercept }
    }

    /// Predicted level at `year`. No range check is applied.
    pub fn predict(&self, year: f64) -> f64 {
        self.intercept + self.slope * year
    }

    pub fn predict_year(&self, year: i32) -> f64 {
        self.predict(year as f64)
    }

    /// Residuals `level - predict(year)` for each observation.
    pub fn residuals<'a>(
        &'a self,
        observations: &'a [Observation],
    ) -> impl Iterator<Item = f64> + 'a {
        observations
            .iter()
            .map(move |o| o.level - self.predict_year(o.year))
    }
}

impl fmt::Display for TrendModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.slope < 0.0 { '-' } else { '+' };
        write!(
            f,
            "level = {:.4} {sign} {:.6} · year",
            self.intercept,
            self.slope.abs()
        )
    }
}

/// Goodness-of-fit figures that come for free with the regression.
/// Informational only; nothing downstream depends on them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitStats {
    /// Rows in the fit window.
    pub n_observations: usize,
    pub first_year: i32,
    pub last_year: i32,
    /// Pearson correlation between year and level.
    pub r_value: f64,
    /// Standard error of the slope estimate.
    pub std_err: f64,
}

impl FitStats {
    /// Coefficient of determination.
    pub fn r_squared(&self) -> f64 {
        self.r_value * self.r_value
    }
}

/// A model together with the statistics of the window it was fitted on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendFit {
    pub model: TrendModel,
    pub stats: FitStats,
}

/// Fit a trend over the observations with `year >= min_year` (all rows when
/// `min_year` is `None`).
pub fn fit(observations: &[Observation], min_year: Option<i32>) -> Result<TrendModel, TrendError> {
    fit_detailed(observations, min_year).map(|f| f.model)
}

/// Same as [`fit`], also returning [`FitStats`].
pub fn fit_detailed(
    observations: &[Observation],
    min_year: Option<i32>,
) -> Result<TrendFit, TrendError> {
    let window = since_year(observations, min_year);

    let distinct_years = window.iter().map(|o| o.year).collect::<BTreeSet<_>>().len();
    if distinct_years < 2 {
        return Err(TrendError::InsufficientData {
            distinct_years,
            min_year,
        });
    }

    let n = window.len() as f64;
    let mean_x = window.iter().map(|o| o.year as f64).sum::<f64>() / n;
    let mean_y = window.iter().map(|o| o.level).sum::<f64>() / n;

    // Centred sums keep precision with year values around 2000.
    let mut sxx = 0.0;
    let mut syy = 0.0;
    let mut sxy = 0.0;
    for o in &window {
        let dx = o.year as f64 - mean_x;
        let dy = o.level - mean_y;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;

    // A flat series has no correlation to report.
    let r_value = if syy == 0.0 {
        0.0
    } else {
        (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
    };

    let std_err = if window.len() > 2 {
        let dof = n - 2.0;
        ((1.0 - r_value * r_value).max(0.0) * syy / sxx / dof).sqrt()
    } else {
        0.0
    };

    let first_year = window.iter().map(|o| o.year).min().unwrap_or_default();
    let last_year = window.iter().map(|o| o.year).max().unwrap_or_default();

    let model = TrendModel { slope, intercept };
    log::debug!(
        "Fitted {model} over {} rows ({first_year}..={last_year}), r = {r_value:.4}",
        window.len()
    );

    Ok(TrendFit {
        model,
        stats: FitStats {
            n_observations: window.len(),
            first_year,
            last_year,
            r_value,
            std_err,
        },
    })
}
