pub mod auth_state;
pub mod background_tasks;
pub mod gate;
pub mod scene_state;
pub mod session;
pub mod ui_state;

pub use auth_state::AuthState;
pub use background_tasks::BackgroundTasks;
pub use gate::{Scene, SceneGate};
pub use scene_state::{HomeScene, LoginScene, MountedScene};
pub use session::SessionHub;
pub use ui_state::UIState;
