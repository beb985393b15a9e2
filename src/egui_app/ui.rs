//! egui renderer for the dashboard.

mod chart;
mod input;
mod report;
pub mod style;

use std::time::Duration;

use eframe::egui::{self, Color32, Frame, Margin, RichText, Vec2};

use crate::egui_app::controller::DashboardController;

/// Smallest window that still fits the metric cards.
pub const MIN_VIEWPORT_SIZE: Vec2 = Vec2::new(720.0, 540.0);

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Renders the dashboard using the shared controller state.
pub struct EguiApp {
    controller: DashboardController,
    visuals_set: bool,
}

impl EguiApp {
    pub fn new(controller: DashboardController) -> Self {
        Self {
            controller,
            visuals_set: false,
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn render_header(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header")
            .frame(Frame::new().fill(style::palette().bg_primary).inner_margin(Margin::same(10)))
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading(RichText::new("Hotel Reviews Sentiment Analysis").size(26.0));
                    ui.label(
                        RichText::new(
                            "Analyze customer feedback for immediate operational insights and quality control.",
                        )
                        .color(style::palette().text_muted),
                    );
                });
            });
    }

    fn render_status(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .frame(Frame::new().fill(Color32::BLACK).inner_margin(Margin::same(4)))
            .show(ctx, |ui| {
                let status = &self.controller.ui.status;
                ui.horizontal(|ui| {
                    ui.add_space(8.0);
                    let (badge, _) =
                        ui.allocate_exact_size(Vec2::splat(18.0), egui::Sense::hover());
                    ui.painter()
                        .circle_filled(badge.center(), 9.0, status.badge_color);
                    ui.label(&status.badge_label);
                    ui.separator();
                    ui.label(&status.text);
                });
            });
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.controller.poll_jobs();
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if !dropped.is_empty() && !self.controller.is_busy() {
            self.controller.handle_dropped_files(&dropped);
        }
        self.render_header(ctx);
        self.render_status(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("dashboard_scroll")
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    self.render_input(ui);
                    self.render_report(ui);
                });
        });
        if self.controller.is_busy() {
            ctx.request_repaint_after(POLL_INTERVAL);
        }
    }
}
