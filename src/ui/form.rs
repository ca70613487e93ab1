use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::error::WaterError;
use crate::data::features::Feature;
use crate::data::predictor::InferenceContext;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Input form
// ---------------------------------------------------------------------------

/// Render the nine measurement inputs, the details toggle and the submit
/// button. Returns `true` when the user asked for a prediction.
pub fn input_form(ui: &mut Ui, state: &mut AppState) -> bool {
    ui.label("Enter the water parameters below to check if it's Safe or UnSafe.");
    ui.add_space(6.0);

    egui::Grid::new("measurement_inputs")
        .num_columns(2)
        .striped(true)
        .spacing([16.0, 6.0])
        .show(ui, |ui: &mut Ui| {
            for feature in Feature::ALL {
                ui.label(format!("Enter {feature}"));
                ui.add(
                    egui::DragValue::new(state.inputs.get_mut(feature))
                        .speed(0.01)
                        .min_decimals(2)
                        .range(feature.input_range()),
                );
                ui.end_row();
            }
        });

    ui.add_space(6.0);
    ui.checkbox(&mut state.show_details, "Show details");
    ui.add_space(6.0);

    ui.button(RichText::new("🔍 Predict").strong()).clicked()
}

// ---------------------------------------------------------------------------
// Status and fatal error
// ---------------------------------------------------------------------------

/// Status lines under the title: the load confirmation in green, then the
/// last submission's error, if any, in red.
pub fn status_line(ui: &mut Ui, state: &AppState) {
    if let Some(msg) = &state.load_message {
        ui.label(RichText::new(format!("✅ {msg}")).color(Color32::DARK_GREEN));
    }
    if let Some(err) = &state.last_error {
        let color = if err.is_fatal() {
            Color32::DARK_RED
        } else {
            Color32::RED
        };
        ui.label(RichText::new(format!("❌ {err}")).color(color));
    }
}

/// Full-window error shown instead of the form when startup failed.
pub fn fatal_panel(ui: &mut Ui, err: &WaterError) {
    ui.add_space(12.0);
    egui::Frame::group(ui.style())
        .fill(Color32::from_rgb(80, 16, 16))
        .show(ui, |ui: &mut Ui| {
            ui.set_width(ui.available_width());
            ui.label(
                RichText::new(format!("❌ {err}"))
                    .color(Color32::WHITE)
                    .strong(),
            );
        });
    ui.add_space(6.0);
    ui.label("Place svm.json and scaler.json next to the executable or in a models/ folder, then restart.");
}

/// Collapsible summary of where the artifacts came from and how labels map.
pub fn artifact_info(ui: &mut Ui, ctx: &InferenceContext) {
    egui::CollapsingHeader::new("Artifacts")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.label(format!("Model: {}", ctx.model_path.display()));
            ui.label(format!("Scaler: {}", ctx.scaler_path.display()));
            for (label, verdict) in ctx.mapping().iter() {
                ui.monospace(format!("{label} → {verdict}"));
            }
        });
}
