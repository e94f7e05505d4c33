/// Painters for the scene backdrops: gradient sky, twinkling stars,
/// login constellation and the home cosmic grid.
use crate::constants::{STAR_PIXEL_SCALE, STAR_TWINKLE_MAX_DELAY_SECS};
use crate::models::StarDescriptor;
use crate::state::scene_state::Segment;
use crate::ui_components::colors::*;
use eframe::egui::{self, Color32, Pos2, Rect, Stroke};
use std::f32::consts::TAU;

/// Vertical gradient filling `rect`
pub fn paint_backdrop(painter: &egui::Painter, rect: Rect) {
    let mut mesh = egui::Mesh::default();
    mesh.colored_vertex(rect.left_top(), BG_SPACE_TOP);
    mesh.colored_vertex(rect.right_top(), BG_SPACE_TOP);
    mesh.colored_vertex(rect.left_bottom(), BG_SPACE_BOTTOM);
    mesh.colored_vertex(rect.right_bottom(), BG_SPACE_BOTTOM);
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(1, 3, 2);
    painter.add(egui::Shape::mesh(mesh));
}

/// Percent-space point mapped into `rect`
pub fn to_screen(rect: Rect, (x, y): (f32, f32)) -> Pos2 {
    Pos2::new(
        rect.left() + rect.width() * x / 100.0,
        rect.top() + rect.height() * y / 100.0,
    )
}

/// Opacity of star `index` at `time`: oscillates between 30% and 100% of its
/// base opacity over its twinkle duration, phase-shifted per star
pub fn twinkle_opacity(star: &StarDescriptor, index: usize, time: f64) -> f32 {
    let delay = (index as f32 * 0.618_034).fract() * STAR_TWINKLE_MAX_DELAY_SECS;
    let duration = star.twinkle_duration_secs.max(0.1);
    let phase = ((time as f32 + delay) / duration).fract();
    let wave = 0.5 - 0.5 * (phase * TAU).cos();
    star.opacity * (0.3 + 0.7 * wave)
}

pub fn paint_stars(painter: &egui::Painter, rect: Rect, stars: &[StarDescriptor], time: f64) {
    for (i, star) in stars.iter().enumerate() {
        let pos = to_screen(rect, (star.x, star.y));
        let alpha = twinkle_opacity(star, i, time);
        let radius = star.size * STAR_PIXEL_SCALE;

        if star.blur_radius > 0.0 {
            painter.circle_filled(
                pos,
                radius + star.blur_radius,
                STAR.gamma_multiply(alpha * 0.25),
            );
        }
        painter.circle_filled(pos, radius, STAR.gamma_multiply(alpha));
    }
}

pub fn paint_constellation(painter: &egui::Painter, rect: Rect, segments: &[Segment], time: f64) {
    let glow = 0.12 + 0.06 * (time as f32 * 0.5).sin();
    let stroke = Stroke::new(0.8, RING.gamma_multiply(glow));
    for (from, to) in segments {
        painter.line_segment([to_screen(rect, *from), to_screen(rect, *to)], stroke);
    }
}

/// Horizontal, vertical and both diagonal lines through the center
pub fn paint_cosmic_grid(painter: &egui::Painter, rect: Rect) {
    let stroke = Stroke::new(1.0, GRID.gamma_multiply(0.12));
    let c = rect.center();
    painter.hline(rect.x_range(), c.y, stroke);
    painter.vline(c.x, rect.y_range(), stroke);
    painter.line_segment([rect.left_top(), rect.right_bottom()], stroke);
    painter.line_segment([rect.right_top(), rect.left_bottom()], stroke);
}

/// Soft radial glow behind centered content
pub fn paint_nebula(painter: &egui::Painter, center: Pos2, radius: f32, tint: Color32) {
    for step in 0..6 {
        let t = step as f32 / 6.0;
        painter.circle_filled(center, radius * (1.0 - t * 0.8), tint.gamma_multiply(0.02 + t * 0.03));
    }
}
