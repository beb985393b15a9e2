use eframe::egui::{self, RichText, Ui};

use super::{EguiApp, style};
use crate::egui_app::state::InputTab;

impl EguiApp {
    pub(super) fn render_input(&mut self, ui: &mut Ui) {
        ui.label(RichText::new("Customer Feedback Data Input").strong().size(16.0));
        ui.horizontal(|ui| {
            let mut tab = self.controller.ui.input_tab;
            for candidate in [InputTab::Upload, InputTab::Manual] {
                ui.selectable_value(&mut tab, candidate, candidate.label());
            }
            if tab != self.controller.ui.input_tab {
                self.controller.set_input_tab(tab);
            }
        });
        ui.add_space(6.0);
        match self.controller.ui.input_tab {
            InputTab::Upload => self.render_upload_tab(ui),
            InputTab::Manual => self.render_manual_tab(ui),
        }
        ui.add_space(8.0);
        let analyze = ui.add_enabled(
            !self.controller.is_busy(),
            egui::Button::new("Analyze Reviews & Generate Report"),
        );
        if analyze.clicked() {
            self.controller.start_analysis();
        }
        if self.controller.ui.progress.visible {
            let progress = &self.controller.ui.progress;
            let bar = egui::ProgressBar::new(progress.fraction())
                .animate(true)
                .text(format!("{} / {}", progress.completed, progress.total));
            ui.add(bar);
        }
    }

    fn render_upload_tab(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            if ui.button("Upload CSV File").clicked() {
                self.controller.pick_csv_via_dialog();
            }
            ui.label(
                RichText::new("or drop a .csv file onto the window")
                    .color(style::palette().text_muted),
            );
        });
        if let Some(upload) = &self.controller.ui.upload {
            ui.label(format!(
                "{}: {} reviews from column '{}'",
                upload.file_name, upload.count, upload.column
            ));
        }
    }

    fn render_manual_tab(&mut self, ui: &mut Ui) {
        ui.label("Enter reviews (one per line):");
        let mut text = self.controller.ui.manual_text.clone();
        let edit = egui::TextEdit::multiline(&mut text)
            .desired_rows(8)
            .desired_width(f32::INFINITY);
        if ui.add(edit).changed() {
            self.controller.set_manual_text(text);
        }
    }
}
