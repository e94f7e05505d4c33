/// Orbit layout: evenly spaced avatar positions on a circle around the
/// central animation, plus the spokes and ring chords drawn between them.
use crate::models::{Chord, OrbitEntity, OrbitPosition, Spoke};
use std::f32::consts::TAU;

/// Offsets of `count` points evenly spaced on a circle, starting at angle 0.
///
/// Returns `(angle_degrees, x, y)` per point. Empty when `count` is 0 or the
/// radius is not a positive finite number.
pub fn ring_offsets(count: usize, radius: f32) -> Vec<(f32, f32, f32)> {
    if count == 0 || !radius.is_finite() || radius <= 0.0 {
        return Vec::new();
    }

    (0..count)
        .map(|i| {
            let angle = TAU * i as f32 / count as f32;
            (angle.to_degrees(), radius * angle.cos(), radius * angle.sin())
        })
        .collect()
}

/// Lay out `entities` on a circle of `radius`, entity i at 2π·i/N
pub fn layout(entities: &[OrbitEntity], radius: f32) -> Vec<OrbitPosition> {
    entities
        .iter()
        .zip(ring_offsets(entities.len(), radius))
        .map(|(entity, (angle_degrees, x, y))| OrbitPosition {
            entity_id: entity.id.clone(),
            angle_degrees,
            x,
            y,
        })
        .collect()
}

/// Closed ring: entity i connects to entity (i + 1) mod N
pub fn ring_chords(positions: &[OrbitPosition]) -> Vec<Chord> {
    let n = positions.len();
    (0..n)
        .map(|i| {
            let from = &positions[i];
            let to = &positions[(i + 1) % n];
            Chord {
                from: from.entity_id.clone(),
                to: to.entity_id.clone(),
                start: from.offset(),
                end: to.offset(),
            }
        })
        .collect()
}

/// Center-to-entity lines
pub fn spokes(positions: &[OrbitPosition]) -> Vec<Spoke> {
    positions
        .iter()
        .map(|p| Spoke {
            entity_id: p.entity_id.clone(),
            start: (0.0, 0.0),
            end: p.offset(),
        })
        .collect()
}

/// Cached layout for one roster/radius pair; recomputed only when either changes
#[derive(Debug, Clone, Default)]
pub struct OrbitLayout {
    radius: f32,
    positions: Vec<OrbitPosition>,
    chords: Vec<Chord>,
    spokes: Vec<Spoke>,
}

impl OrbitLayout {
    pub fn new(entities: &[OrbitEntity], radius: f32) -> Self {
        let positions = layout(entities, radius);
        let chords = ring_chords(&positions);
        let spokes = spokes(&positions);
        Self {
            radius,
            positions,
            chords,
            spokes,
        }
    }

    /// Recompute when the radius changed; returns true if a relayout happened
    pub fn update_radius(&mut self, entities: &[OrbitEntity], radius: f32) -> bool {
        let roster_changed = self.positions.len() != entities.len()
            || self
                .positions
                .iter()
                .zip(entities)
                .any(|(p, e)| p.entity_id != e.id);

        if !roster_changed && (self.radius - radius).abs() < f32::EPSILON {
            return false;
        }

        log::debug!(
            "[Orbit] Relayout {} entities at radius {:.1}",
            entities.len(),
            radius
        );
        *self = Self::new(entities, radius);
        true
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn positions(&self) -> &[OrbitPosition] {
        &self.positions
    }

    pub fn chords(&self) -> &[Chord] {
        &self.chords
    }

    pub fn spokes(&self) -> &[Spoke] {
        &self.spokes
    }
}
