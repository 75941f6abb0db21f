use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use eframe::egui::ColorImage;

use sea_level_predictor::data::loader::load_file;
use sea_level_predictor::{Analysis, ChartData, PipelineConfig};

use crate::color::SeriesColors;
use crate::export::save_png;

/// Frames to draw before a screenshot, so the plot has laid out its bounds.
const SETTLE_FRAMES: u64 = 3;

// ---------------------------------------------------------------------------
// Export state
// ---------------------------------------------------------------------------

/// Progress of a PNG export.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ExportState {
    #[default]
    Idle,
    /// Waiting until `after_frame` before asking for a screenshot.
    Pending {
        path: PathBuf,
        after_frame: u64,
        close_after: bool,
    },
    /// Screenshot requested; waiting for the image event.
    Requested { path: PathBuf, close_after: bool },
}

/// Error of an export that closes the window, handed back to `main` once the
/// event loop has returned.
pub type ExportFailure = Arc<Mutex<Option<anyhow::Error>>>;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: PipelineConfig,

    /// Numeric result of the current run.
    pub analysis: Analysis,

    /// Chart geometry derived from `analysis` (cached).
    pub chart: ChartData,

    pub colors: SeriesColors,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    pub export: ExportState,

    /// Frames drawn so far.
    pub frame: u64,

    export_failure: ExportFailure,
}

impl AppState {
    pub fn new(config: PipelineConfig, analysis: Analysis) -> Self {
        let chart = analysis.chart(&config.labels, config.horizon_year);
        let export = match &config.export_path {
            Some(path) => ExportState::Pending {
                path: path.clone(),
                after_frame: SETTLE_FRAMES,
                close_after: true,
            },
            None => ExportState::Idle,
        };

        Self {
            config,
            analysis,
            chart,
            colors: SeriesColors::default(),
            status_message: None,
            export,
            frame: 0,
            export_failure: ExportFailure::default(),
        }
    }

    /// Replace the current analysis and rebuild the chart.
    pub fn set_analysis(&mut self, analysis: Analysis) {
        self.chart = analysis.chart(&self.config.labels, self.config.horizon_year);
        self.analysis = analysis;
        self.status_message = None;
    }

    /// Re-run the fits on another file with the current settings.
    /// On failure the previous analysis stays on screen.
    pub fn open_path(&mut self, path: &Path) {
        let result = load_file(path, &self.config.columns)
            .map_err(anyhow::Error::from)
            .and_then(|observations| {
                Analysis::from_observations(observations, self.config.cutoff_year)
                    .map_err(anyhow::Error::from)
            });

        match result {
            Ok(analysis) => {
                self.config.data_path = path.to_path_buf();
                self.set_analysis(analysis);
            }
            Err(e) => {
                log::error!("Failed to analyse {}: {e:#}", path.display());
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// One-line description of the loaded data for the top bar.
    pub fn summary(&self) -> String {
        let observations = &self.analysis.observations;
        let columns = observations.columns();
        format!(
            "{}: {} rows of '{}' by '{}', cutoff {}, horizon {}",
            self.config.data_path.display(),
            observations.len(),
            columns.level,
            columns.year,
            self.config.cutoff_year,
            self.config.horizon_year
        )
    }

    /// Queue an interactive export; the screenshot is taken a couple of
    /// frames later so open menus have closed.
    pub fn request_export(&mut self, path: PathBuf) {
        self.export = ExportState::Pending {
            path,
            after_frame: self.frame + 2,
            close_after: false,
        };
    }

    /// Move a due `Pending` export to `Requested`; returns true when the
    /// caller must ask the viewport for a screenshot now.
    pub fn poll_export(&mut self) -> bool {
        match &self.export {
            ExportState::Pending {
                path,
                after_frame,
                close_after,
            } if self.frame >= *after_frame => {
                self.export = ExportState::Requested {
                    path: path.clone(),
                    close_after: *close_after,
                };
                true
            }
            _ => false,
        }
    }

    pub fn export_in_progress(&self) -> bool {
        self.export != ExportState::Idle
    }

    /// Shared slot that receives the error of a failed closing export.
    pub fn export_failure(&self) -> ExportFailure {
        Arc::clone(&self.export_failure)
    }

    /// Save the screenshot for a `Requested` export. Returns true when the
    /// window should close now. A failure of a closing export is stored in
    /// the failure slot so the process does not exit cleanly.
    pub fn complete_export(&mut self, image: &ColorImage) -> bool {
        if !matches!(self.export, ExportState::Requested { .. }) {
            return false;
        }
        let ExportState::Requested { path, close_after } = std::mem::take(&mut self.export) else {
            return false;
        };

        match save_png(image, &path) {
            Ok(()) => {
                self.status_message = Some(format!("Saved {}", path.display()));
            }
            Err(e) => {
                log::error!("Failed to export chart: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
                if close_after {
                    if let Ok(mut slot) = self.export_failure.lock() {
                        *slot = Some(e);
                    }
                }
            }
        }

        close_after
    }
}
