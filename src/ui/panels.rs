use eframe::egui::{self, Color32, RichText, Ui};

use sea_level_predictor::TrendFit;

use crate::color::lighten;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – fit summaries
// ---------------------------------------------------------------------------

fn fit_summary(ui: &mut Ui, title: &str, color: Color32, fit: &TrendFit) {
    ui.label(RichText::new(title).strong().color(lighten(color, 0.15)));
    egui::Grid::new(title)
        .num_columns(2)
        .spacing([12.0, 2.0])
        .show(ui, |ui: &mut Ui| {
            ui.label("Slope");
            ui.monospace(format!("{:+.5} / yr", fit.model.slope));
            ui.end_row();

            ui.label("Intercept");
            ui.monospace(format!("{:.3}", fit.model.intercept));
            ui.end_row();

            ui.label("r / r²");
            ui.monospace(format!("{:.4} / {:.4}", fit.stats.r_value, fit.stats.r_squared()));
            ui.end_row();

            ui.label("Std. err");
            ui.monospace(format!("{:.5}", fit.stats.std_err));
            ui.end_row();

            ui.label("Window");
            ui.monospace(format!(
                "{}–{} ({} rows)",
                fit.stats.first_year, fit.stats.last_year, fit.stats.n_observations
            ));
            ui.end_row();
        });
}

/// Render the left panel with both fits and the projection.
pub fn side_panel(ui: &mut Ui, state: &AppState) {
    ui.heading("Trends");
    ui.separator();

    let analysis = &state.analysis;
    let chart = &state.chart;

    if let Some(full) = &chart.full_fit {
        fit_summary(ui, &full.name, state.colors.full_fit, &analysis.full);
        ui.add_space(8.0);
    }
    if let Some(recent) = &chart.recent_fit {
        fit_summary(ui, &recent.name, state.colors.recent_fit, &analysis.recent);
        ui.add_space(8.0);
    }

    ui.separator();
    let horizon = state.config.horizon_year;
    ui.strong(format!("Projected level in {horizon}"));
    ui.label(
        RichText::new(format!("{:.3}", analysis.projection(horizon)))
            .size(20.0)
            .color(lighten(state.colors.recent_fit, 0.15)),
    );
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let exporting = state.export_in_progress();
            if ui
                .add_enabled(!exporting, egui::Button::new("Export PNG…"))
                .clicked()
            {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(state.summary());

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open sea level data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open_path(&path);
    }
}

pub fn export_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export chart")
        .add_filter("PNG image", &["png"])
        .set_file_name("sea_level.png")
        .save_file();

    if let Some(path) = file {
        state.request_export(path);
    }
}
