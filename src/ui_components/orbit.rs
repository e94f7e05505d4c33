/// Home scene orbit painters: rings, floating particles and avatar tiles
use crate::constants::*;
use crate::models::OrbitEntity;
use crate::services::orbit_layout::ring_offsets;
use crate::services::OrbitLayout;
use crate::ui_components::colors::*;
use eframe::egui::{self, Align2, FontId, Pos2, Stroke, Vec2};

fn at(center: Pos2, (x, y): (f32, f32)) -> Pos2 {
    center + Vec2::new(x, y)
}

/// Three concentric rings whose diameters are 1.5x, 2x and 2.5x the animation size
pub fn paint_rings(painter: &egui::Painter, center: Pos2, animation_size: f32, time: f64) {
    for (i, factor) in ORBITAL_RING_FACTORS.iter().enumerate() {
        let pulse = 0.18 + 0.08 * ((time as f32) * 0.8 + i as f32).sin();
        painter.circle_stroke(
            center,
            animation_size * factor / 2.0,
            Stroke::new(1.0, RING.gamma_multiply(pulse)),
        );
    }
}

/// Particle offsets: evenly spaced on a circle of 0.75x the size, slowly spinning
pub fn particle_offsets(animation_size: f32, time: f64) -> Vec<(f32, f32)> {
    let spin = (time as f32 * FLOATING_PARTICLE_SPIN_DEG_PER_SEC).to_radians();
    let (sin, cos) = spin.sin_cos();
    ring_offsets(
        FLOATING_PARTICLE_COUNT,
        animation_size * FLOATING_PARTICLE_RADIUS_FACTOR,
    )
    .into_iter()
    .map(|(_, x, y)| (x * cos - y * sin, x * sin + y * cos))
    .collect()
}

pub fn paint_particles(painter: &egui::Painter, center: Pos2, animation_size: f32, time: f64) {
    for (i, offset) in particle_offsets(animation_size, time).into_iter().enumerate() {
        let flicker = 0.55 + 0.45 * ((time as f32) * 1.7 + i as f32 * 0.9).sin().abs();
        painter.circle_filled(at(center, offset), 2.0, STAR.gamma_multiply(flicker));
    }
}

/// Chords, spokes and one tile per roster entity
pub fn paint_orbit(
    painter: &egui::Painter,
    center: Pos2,
    layout: &OrbitLayout,
    roster: &[OrbitEntity],
) {
    let faint = Stroke::new(1.0, ACCENT.gamma_multiply(0.18));
    for spoke in layout.spokes() {
        painter.line_segment([at(center, spoke.start), at(center, spoke.end)], faint);
    }

    let chord = Stroke::new(1.2, RING.gamma_multiply(0.35));
    for c in layout.chords() {
        painter.line_segment([at(center, c.start), at(center, c.end)], chord);
    }

    for position in layout.positions() {
        let Some(entity) = roster.iter().find(|e| e.id == position.entity_id) else {
            continue;
        };
        let pos = at(center, position.offset());
        let color = token_color(&entity.color_token);

        painter.circle_filled(pos, ORBIT_TILE_RADIUS + 4.0, color.gamma_multiply(0.15));
        painter.circle_filled(pos, ORBIT_TILE_RADIUS, color);
        painter.circle_stroke(pos, ORBIT_TILE_RADIUS, Stroke::new(1.5, TEXT_PRIMARY.gamma_multiply(0.6)));
        painter.text(
            pos,
            Align2::CENTER_CENTER,
            &entity.initials,
            FontId::proportional(13.0),
            TEXT_PRIMARY,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn particles_keep_their_radius_while_spinning() {
        for time in [0.0, 1.3, 17.0] {
            let offsets = particle_offsets(120.0, time);
            assert_eq!(offsets.len(), FLOATING_PARTICLE_COUNT);
            for (x, y) in offsets {
                assert!(((x * x + y * y).sqrt() - 90.0).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn particles_start_at_thirty_degree_steps() {
        let offsets = particle_offsets(120.0, 0.0);
        assert!((offsets[0].0 - 90.0).abs() < 1e-4);
        let (x, y) = offsets[3];
        assert!(x.abs() < 1e-3 && (y - 90.0).abs() < 1e-3);
    }
}
