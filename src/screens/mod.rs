pub mod home;
pub mod loading;
pub mod login;

pub use home::{render_home_screen, HomeAction};
pub use loading::render_loading_screen;
pub use login::{render_login_screen, LoginAction};
