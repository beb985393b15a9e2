use eframe::egui::{self, Frame, Margin, RichText, Ui};

use super::{EguiApp, chart, style};
use crate::report::{CategoryView, ReportSummary, TOTAL_CAPTION};
use crate::sentiment::Sentiment;

const CHART_DIAMETER: f32 = 320.0;

impl EguiApp {
    pub(super) fn render_report(&mut self, ui: &mut Ui) {
        let (Some(summary), Some(chart)) = (self.controller.summary(), self.controller.chart())
        else {
            return;
        };
        ui.add_space(12.0);
        ui.heading("Sentiment Analysis Report");
        ui.separator();
        ui.label(RichText::new("Sentiment Performance Indicators").strong());
        render_metrics(ui, &summary);
        ui.add_space(12.0);
        chart::render_donut(ui, &chart, CHART_DIAMETER);
        ui.add_space(8.0);
        if ui.button("Download Full Sentiment Data (CSV)").clicked() {
            self.controller.export_via_dialog();
        }
        ui.separator();
        ui.label(RichText::new("Explore Reviews by Sentiment Category").strong());
        ui.horizontal(|ui| {
            let mut tab = self.controller.ui.result_tab;
            for sentiment in Sentiment::ALL {
                ui.selectable_value(&mut tab, sentiment, format!("{sentiment} Reviews"));
            }
            if tab != self.controller.ui.result_tab {
                self.controller.set_result_tab(tab);
            }
        });
        if let Some(view) = self.controller.category_view(self.controller.ui.result_tab) {
            render_reviews(ui, &view);
        }
    }
}

fn render_metrics(ui: &mut Ui, summary: &ReportSummary) {
    ui.columns(4, |columns| {
        metric_card(
            &mut columns[0],
            TOTAL_CAPTION,
            summary.total_label(),
            None,
            style::palette().accent_ice,
        );
        for (column, stat) in columns[1..].iter_mut().zip(summary.categories.iter()) {
            metric_card(
                column,
                stat.caption(),
                stat.percentage_label(),
                Some(stat.count_label()),
                style::sentiment_fill(stat.sentiment),
            );
        }
    });
}

fn metric_card(
    ui: &mut Ui,
    title: &str,
    value: String,
    detail: Option<String>,
    accent: egui::Color32,
) {
    Frame::new()
        .fill(style::palette().bg_tertiary)
        .stroke(style::card_border())
        .inner_margin(Margin::same(10))
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.label(RichText::new(title).color(style::palette().text_muted));
            ui.label(RichText::new(value).size(24.0).color(accent).strong());
            if let Some(detail) = detail {
                ui.label(RichText::new(detail).color(style::palette().text_muted));
            }
        });
}

fn render_reviews(ui: &mut Ui, view: &CategoryView) {
    if let Some(placeholder) = view.placeholder() {
        ui.label(RichText::new(placeholder).italics());
        return;
    }
    let accent = style::sentiment_fill(view.sentiment);
    egui::ScrollArea::vertical()
        .id_salt("category_reviews")
        .max_height(360.0)
        .show(ui, |ui| {
            for review in &view.reviews {
                Frame::new()
                    .fill(style::palette().bg_tertiary)
                    .stroke(egui::Stroke::new(1.0, accent))
                    .inner_margin(Margin::same(8))
                    .show(ui, |ui| {
                        ui.set_min_width(ui.available_width());
                        ui.label(RichText::new(view.sentiment.as_str()).color(accent).strong());
                        ui.label(review);
                    });
                ui.add_space(4.0);
            }
        });
}
