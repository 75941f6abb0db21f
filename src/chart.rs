//! Geometry of the comparison chart, independent of any drawing backend.
//!
//! The window code only turns these point lists into plot items.

use serde::{Deserialize, Serialize};

use crate::data::model::ObservationSet;
use crate::trend::TrendModel;

const CUTOFF_PLACEHOLDER: &str = "{cutoff}";

/// Text shown on the chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartLabels {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub observed: String,
    pub full_fit: String,
    /// `{cutoff}` is replaced by the cutoff year.
    pub recent_fit: String,
}

impl Default for ChartLabels {
    fn default() -> Self {
        Self {
            title: "Rise in Sea Level".to_string(),
            x_label: "Year".to_string(),
            y_label: "CSIRO Adjusted Sea Level (inches)".to_string(),
            observed: "Original data".to_string(),
            full_fit: "Fitted line (All data)".to_string(),
            recent_fit: format!("Fitted line (From {CUTOFF_PLACEHOLDER})"),
        }
    }
}

impl ChartLabels {
    pub fn recent_fit_name(&self, cutoff_year: i32) -> String {
        self.recent_fit
            .replace(CUTOFF_PLACEHOLDER, &cutoff_year.to_string())
    }
}

/// A named list of `[x, y]` points.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub points: Vec<[f64; 2]>,
}

/// Everything needed to draw the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Raw observations, drawn as a scatter.
    pub observed: Series,
    /// Full-range fit evaluated at each observed year.
    pub full_fit: Option<Series>,
    /// Recent fit from the first observed year to the horizon; a straight
    /// line, so only its two endpoints are stored.
    pub recent_fit: Option<Series>,
}

impl ChartData {
    /// Lay out the chart. The recent line always starts at the earliest
    /// observed year, whatever window its model was fitted on, and runs
    /// through `horizon_year` inclusive. A horizon before the first observed
    /// year falls back to the observed range.
    pub fn build(
        observations: &ObservationSet,
        full: Option<&TrendModel>,
        recent: Option<&TrendModel>,
        labels: &ChartLabels,
        cutoff_year: i32,
        horizon_year: i32,
    ) -> Self {
        let observed = Series {
            name: labels.observed.clone(),
            points: observations
                .observations()
                .iter()
                .map(|o| [o.year as f64, o.level])
                .collect(),
        };

        let full_fit = full.map(|model| Series {
            name: labels.full_fit.clone(),
            points: observations
                .years()
                .map(|year| [year as f64, model.predict_year(year)])
                .collect(),
        });

        let recent_fit = recent.map(|model| {
            let points = match observations.year_range() {
                Some((first, last)) => {
                    let end = if horizon_year < first {
                        log::warn!(
                            "Horizon {horizon_year} is before the first observation ({first}); \
                             drawing the recent trend over {first}..={last}"
                        );
                        last
                    } else {
                        horizon_year
                    };
                    vec![
                        [first as f64, model.predict_year(first)],
                        [end as f64, model.predict_year(end)],
                    ]
                }
                None => Vec::new(),
            };
            Series {
                name: labels.recent_fit_name(cutoff_year),
                points,
            }
        });

        ChartData {
            title: labels.title.clone(),
            x_label: labels.x_label.clone(),
            y_label: labels.y_label.clone(),
            observed,
            full_fit,
            recent_fit,
        }
    }
}
