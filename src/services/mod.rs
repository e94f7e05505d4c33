/// Services module - scene computations
///
/// Pure generators and the clock ticker used by the scenes. None of these
/// touch egui; the screens turn their output into paint calls.

pub mod clock;
pub mod orbit_layout;
pub mod star_field;

// Re-export commonly used types
pub use clock::{ClockTicker, RepaintWaker};
pub use orbit_layout::OrbitLayout;
