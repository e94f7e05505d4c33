pub mod roster;

pub use roster::mock_roster;
