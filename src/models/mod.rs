// Data models for scene descriptors and identities

pub mod orbit;
pub mod star;
pub mod user;

// Re-export commonly used types
pub use orbit::{Chord, OrbitEntity, OrbitPosition, Spoke};
pub use star::{StarDescriptor, StarFieldProfile};
pub use user::UserProfile;
