use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Render parameters for one background star.
///
/// Positions are percentages of the scene rect, size is in (pre-scale) pixels.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct StarDescriptor {
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub opacity: f32,
    pub twinkle_duration_secs: f32,
    pub blur_radius: f32,
}

/// Value ranges used for one star field generation.
///
/// Every range is half-open; an empty range (start == end) pins the field to `start`.
#[derive(Debug, Clone, PartialEq)]
pub struct StarFieldProfile {
    pub x: Range<f32>,
    pub y: Range<f32>,
    pub size: Range<f32>,
    pub opacity: Range<f32>,
    pub twinkle_duration_secs: Range<f32>,
    pub blur_radius: Range<f32>,
}

impl StarFieldProfile {
    /// Home scene ranges
    pub fn cosmic() -> Self {
        Self {
            x: 0.0..100.0,
            y: 0.0..100.0,
            size: 0.2..1.4,
            opacity: 0.1..0.6,
            twinkle_duration_secs: 10.0..30.0,
            blur_radius: 0.0..3.0,
        }
    }

    /// Login scene: smaller, dimmer, unblurred stars
    pub fn login() -> Self {
        Self {
            size: 0.2..1.0,
            opacity: 0.1..0.4,
            blur_radius: 0.0..0.0,
            ..Self::cosmic()
        }
    }

    /// True when every field of `star` lies inside this profile
    pub fn contains(&self, star: &StarDescriptor) -> bool {
        fn within(range: &Range<f32>, value: f32) -> bool {
            if range.is_empty() {
                value == range.start
            } else {
                range.contains(&value)
            }
        }

        within(&self.x, star.x)
            && within(&self.y, star.y)
            && within(&self.size, star.size)
            && within(&self.opacity, star.opacity)
            && within(&self.twinkle_duration_secs, star.twinkle_duration_secs)
            && within(&self.blur_radius, star.blur_radius)
    }
}

impl Default for StarFieldProfile {
    fn default() -> Self {
        Self::cosmic()
    }
}
