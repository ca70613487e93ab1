use eframe::egui::{self, ScrollArea, Ui};

use crate::config::AppConfig;
use crate::state::AppState;
use crate::ui::{form, result};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct WaterQualityApp {
    pub title: String,
    pub state: AppState,
}

impl WaterQualityApp {
    /// Loads the artifacts; a failure is kept in the state and rendered
    /// instead of the form.
    pub fn new(config: &AppConfig) -> Self {
        Self {
            title: config.title.clone(),
            state: AppState::new(config),
        }
    }
}

impl eframe::App for WaterQualityApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(&self.title);
            ui.separator();

            if let Some(err) = self.state.fatal_error() {
                form::fatal_panel(ui, err);
                return;
            }

            form::status_line(ui, &self.state);
            if let Some(inference) = self.state.context() {
                form::artifact_info(ui, inference);
            }

            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    if form::input_form(ui, &mut self.state) {
                        self.state.submit();
                    }

                    let Some(prediction) = &self.state.prediction else {
                        return;
                    };
                    ui.add_space(10.0);
                    result::verdict_banner(ui, prediction);

                    if self.state.show_details {
                        ui.add_space(8.0);
                        result::details_table(ui, prediction);
                        ui.add_space(8.0);
                        result::scaled_plot(ui, prediction);
                    }
                });
        });
    }
}
