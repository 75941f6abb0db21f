use std::sync::Arc;

use eframe::egui::{self, ColorImage};

use sea_level_predictor::{Analysis, PipelineConfig};

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SeaLevelApp {
    pub state: AppState,
}

impl SeaLevelApp {
    pub fn new(config: PipelineConfig, analysis: Analysis) -> Self {
        Self {
            state: AppState::new(config, analysis),
        }
    }

    /// Save a screenshot that arrived for an outstanding export request.
    fn handle_screenshot(&mut self, ctx: &egui::Context) {
        let shot: Option<Arc<ColorImage>> = ctx.input(|i| {
            i.raw.events.iter().find_map(|e| match e {
                egui::Event::Screenshot { image, .. } => Some(image.clone()),
                _ => None,
            })
        });
        let Some(image) = shot else {
            return;
        };

        if self.state.complete_export(&image) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }
}

impl eframe::App for SeaLevelApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_screenshot(ctx);

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: fit summaries ----
        egui::SidePanel::left("trend_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &self.state);
            });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::trend_plot(ui, &self.state);
        });

        self.state.frame += 1;
        if self.state.poll_export() {
            ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(egui::UserData::default()));
        }
        if self.state.export_in_progress() {
            ctx.request_repaint();
        }
    }
}
