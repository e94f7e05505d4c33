use serde::{Deserialize, Serialize};

/// One avatar on the orbit ring (from the fixed roster)
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct OrbitEntity {
    pub id: String,
    pub display_name: String,
    pub color_token: String,
    pub initials: String,
}

/// Position of an entity relative to the orbit center
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitPosition {
    pub entity_id: String,
    pub angle_degrees: f32,
    pub x: f32,
    pub y: f32,
}

impl OrbitPosition {
    pub fn offset(&self) -> (f32, f32) {
        (self.x, self.y)
    }
}

/// Ring segment between two consecutive entities
#[derive(Debug, Clone, PartialEq)]
pub struct Chord {
    pub from: String,
    pub to: String,
    pub start: (f32, f32),
    pub end: (f32, f32),
}

/// Line from the orbit center to one entity
#[derive(Debug, Clone, PartialEq)]
pub struct Spoke {
    pub entity_id: String,
    pub start: (f32, f32),
    pub end: (f32, f32),
}
