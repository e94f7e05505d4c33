pub mod colors;
pub mod file_chooser;
pub mod notice;
pub mod orbit;
pub mod starfield;
