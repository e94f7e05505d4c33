/// Mock roster of explorers shown on the home scene orbit.
///
/// There is no presence backend; the roster is fixed and every home mount
/// lays out the same entities.
use crate::models::OrbitEntity;
use crate::utils::formatting::initials_of;

// (id, display name, color token)
const ROSTER: [(&str, &str, &str); 8] = [
    ("u-vega", "Vega Nova", "violet"),
    ("u-orion", "Orion Reyes", "cyan"),
    ("u-lyra", "Lyra Chen", "magenta"),
    ("u-atlas", "Atlas Okafor", "amber"),
    ("u-nyx", "Nyx Larsen", "indigo"),
    ("u-sol", "Sol Moreau", "gold"),
    ("u-kai", "Kai Tanaka", "teal"),
    ("u-mira", "Mira Kowalski", "rose"),
];

/// Build the roster entities in orbit order
pub fn mock_roster() -> Vec<OrbitEntity> {
    ROSTER
        .iter()
        .map(|(id, name, color)| OrbitEntity {
            id: id.to_string(),
            display_name: name.to_string(),
            color_token: color.to_string(),
            initials: initials_of(name),
        })
        .collect()
}
