mod app;
mod cli;
mod color;
mod export;
mod state;
mod ui;

use anyhow::{Context, Result};
use app::SeaLevelApp;
use clap::Parser;
use cli::Cli;
use eframe::egui;

use sea_level_predictor::pipeline;

fn run() -> Result<()> {
    let config = Cli::parse().into_config()?;

    // Fit before opening any window; a failed fit never renders.
    let analysis = pipeline::analyze(&config)
        .with_context(|| format!("analysing {}", config.data_path.display()))?;

    log::info!(
        "Projected level in {}: {:.3}",
        config.horizon_year,
        analysis.projection(config.horizon_year)
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 600.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let app = SeaLevelApp::new(config, analysis);
    let export_failure = app.state.export_failure();

    eframe::run_native(
        "Sea Level Predictor",
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow::anyhow!("chart window failed: {e}"))?;

    let failure = export_failure
        .lock()
        .map_err(|_| anyhow::anyhow!("export state lock poisoned"))?
        .take();
    match failure {
        Some(e) => Err(e.context("exporting chart")),
        None => Ok(()),
    }
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        log::error!("{e:#}");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
