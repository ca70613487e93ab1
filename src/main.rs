mod app;
mod config;
mod data;
mod state;
mod ui;

use app::WaterQualityApp;
use config::AppConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = AppConfig::default();
    log::debug!("artifact search directories: {:?}", config.base_dirs);

    // Load before the window opens so a missing artifact is reported even
    // when no display is available.
    let app = WaterQualityApp::new(&config);
    if let Some(err) = app.state.fatal_error() {
        log::error!("startup failed: {err}");
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(&config.title)
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size),
        ..Default::default()
    };

    eframe::run_native(
        &config.title,
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
}
