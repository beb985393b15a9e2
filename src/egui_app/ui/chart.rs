//! Donut chart painter.

use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Sense, Shape, Stroke, Ui, Vec2};

use super::style;
use crate::report::DonutChart;

/// Angular resolution for a full ring.
const SEGMENTS_PER_TURN: f32 = 120.0;

pub(super) fn render_donut(ui: &mut Ui, chart: &DonutChart, diameter: f32) {
    ui.vertical_centered(|ui| {
        ui.label(egui::RichText::new(chart.title).strong());
    });
    let (rect, response) = ui.allocate_exact_size(Vec2::splat(diameter), Sense::hover());
    let painter = ui.painter_at(rect);
    let center = rect.center();
    let outer = diameter * 0.5 - 4.0;
    let inner = outer * chart.hole_ratio;

    for (slice, (start, end)) in chart.slices.iter().zip(chart.spans()) {
        let fill = style::sentiment_fill(slice.sentiment);
        let steps = ((end - start) * SEGMENTS_PER_TURN).ceil().max(1.0) as usize;
        for step in 0..steps {
            let a0 = turn_to_angle(start + (end - start) * step as f32 / steps as f32);
            let a1 = turn_to_angle(start + (end - start) * (step + 1) as f32 / steps as f32);
            let quad = vec![
                polar(center, outer, a0),
                polar(center, outer, a1),
                polar(center, inner, a1),
                polar(center, inner, a0),
            ];
            painter.add(Shape::convex_polygon(quad, fill, Stroke::NONE));
        }
        let mid = turn_to_angle((start + end) * 0.5);
        painter.text(
            polar(center, (outer + inner) * 0.5, mid),
            Align2::CENTER_CENTER,
            slice.caption(),
            FontId::proportional(12.0),
            Color32::BLACK,
        );
    }

    if response.hovered()
        && let Some(pos) = response.hover_pos()
        && let Some(index) = slice_at(chart, center, inner, outer, pos)
    {
        let slice = &chart.slices[index];
        response.on_hover_text(format!("{}: {} reviews", slice.sentiment, slice.count));
    }

    ui.horizontal(|ui| {
        for slice in &chart.slices {
            let (swatch, _) = ui.allocate_exact_size(Vec2::splat(12.0), Sense::hover());
            ui.painter()
                .rect_filled(swatch, 0.0, style::sentiment_fill(slice.sentiment));
            ui.label(slice.sentiment.as_str());
            ui.add_space(8.0);
        }
    });
}

fn turn_to_angle(turn: f32) -> f32 {
    turn * TAU - FRAC_PI_2
}

fn polar(center: Pos2, radius: f32, angle: f32) -> Pos2 {
    center + Vec2::angled(angle) * radius
}

fn slice_at(chart: &DonutChart, center: Pos2, inner: f32, outer: f32, pos: Pos2) -> Option<usize> {
    let offset = pos - center;
    let distance = offset.length();
    if distance < inner || distance > outer {
        return None;
    }
    let turn = ((offset.angle() + FRAC_PI_2) / TAU).rem_euclid(1.0);
    chart
        .spans()
        .iter()
        .position(|(start, end)| turn >= *start && turn < *end)
}
