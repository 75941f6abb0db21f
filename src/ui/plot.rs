use eframe::egui::{RichText, Ui};
use egui_plot::{Legend, Line, MarkerShape, Plot, PlotPoints, Points};

use sea_level_predictor::Series;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Trend plot (central panel)
// ---------------------------------------------------------------------------

fn plot_points(series: &Series) -> PlotPoints {
    series.points.iter().copied().collect()
}

/// Render the title and the observations/trends plot in the central panel.
pub fn trend_plot(ui: &mut Ui, state: &AppState) {
    let chart = &state.chart;
    let colors = &state.colors;

    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(RichText::new(&chart.title).strong());
    });

    Plot::new("trend_plot")
        .legend(Legend::default())
        .x_axis_label(chart.x_label.as_str())
        .y_axis_label(chart.y_label.as_str())
        .show_grid(true)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            let observed = Points::new(plot_points(&chart.observed))
                .name(&chart.observed.name)
                .color(colors.observed)
                .shape(MarkerShape::Circle)
                .filled(true)
                .radius(2.5);
            plot_ui.points(observed);

            if let Some(full) = &chart.full_fit {
                let line = Line::new(plot_points(full))
                    .name(&full.name)
                    .color(colors.full_fit)
                    .width(2.0);
                plot_ui.line(line);
            }

            if let Some(recent) = &chart.recent_fit {
                let line = Line::new(plot_points(recent))
                    .name(&recent.name)
                    .color(colors.recent_fit)
                    .width(2.0);
                plot_ui.line(line);
            }
        });
}
