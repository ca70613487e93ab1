use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, Plot};

use crate::data::features::Feature;
use crate::data::predictor::Prediction;

// ---------------------------------------------------------------------------
// Verdict banner
// ---------------------------------------------------------------------------

/// Green banner for safe water, red for unsafe.
pub fn verdict_banner(ui: &mut Ui, prediction: &Prediction) {
    let (icon, fill) = if prediction.verdict.is_safe() {
        ("✅", Color32::from_rgb(22, 96, 44))
    } else {
        ("⚠", Color32::from_rgb(128, 24, 24))
    };

    egui::Frame::group(ui.style())
        .fill(fill)
        .show(ui, |ui: &mut Ui| {
            ui.set_width(ui.available_width());
            ui.label(
                RichText::new(format!("{icon} Prediction: Water is {}", prediction.verdict))
                    .heading()
                    .color(Color32::WHITE),
            );
        });
}

// ---------------------------------------------------------------------------
// Details: raw vs scaled inputs
// ---------------------------------------------------------------------------

/// Table of raw and scaled inputs plus the raw model output.
pub fn details_table(ui: &mut Ui, prediction: &Prediction) {
    ui.label(format!("🔎 Model output: {}", prediction.label));
    ui.add_space(4.0);

    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::auto().at_least(120.0))
        .column(Column::auto().at_least(90.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Feature");
            });
            header.col(|ui| {
                ui.strong("Raw input");
            });
            header.col(|ui| {
                ui.strong("Scaled input");
            });
        })
        .body(|mut body| {
            for (feature, raw) in prediction.raw_input.iter() {
                let scaled = prediction
                    .scaled_input
                    .get(feature.index())
                    .copied()
                    .unwrap_or(f64::NAN);
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(feature.name());
                    });
                    row.col(|ui| {
                        ui.monospace(format!("{raw:.2}"));
                    });
                    row.col(|ui| {
                        ui.monospace(format!("{scaled:+.4}"));
                    });
                });
            }
        });
}

/// Bar chart of the scaled input, one bar per feature.
pub fn scaled_plot(ui: &mut Ui, prediction: &Prediction) {
    let bars: Vec<Bar> = prediction
        .scaled_input
        .iter()
        .zip(Feature::ALL)
        .map(|(&z, feature)| {
            let color = if z >= 0.0 {
                Color32::LIGHT_BLUE
            } else {
                Color32::from_rgb(230, 150, 60)
            };
            Bar::new(feature.index() as f64, z)
                .name(feature.name())
                .fill(color)
        })
        .collect();

    Plot::new("scaled_input_plot")
        .height(180.0)
        .x_axis_label("Feature index")
        .y_axis_label("Scaled value")
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).width(0.6));
        });
}
