use crate::models::UserProfile;
use crate::utils::avatar::AvatarError;
use crate::utils::AuthError;
use egui::ColorImage;
use std::sync::mpsc::Receiver;

#[derive(Default)]
pub struct BackgroundTasks {
    // Identity provider round trips
    pub restore_rx: Option<Receiver<Result<Option<UserProfile>, AuthError>>>,
    pub sign_in_rx: Option<Receiver<Result<UserProfile, AuthError>>>,
    pub sign_out_rx: Option<Receiver<Result<(), AuthError>>>,

    // User Avatar
    pub user_avatar_rx: Option<Receiver<Result<ColorImage, AvatarError>>>,
}

impl BackgroundTasks {
    /// Check if any background task is active
    pub fn has_active_tasks(&self) -> bool {
        self.restore_rx.is_some()
            || self.sign_in_rx.is_some()
            || self.sign_out_rx.is_some()
            || self.user_avatar_rx.is_some()
    }

    /// Clear all task receivers (for cleanup)
    pub fn clear_all(&mut self) {
        self.restore_rx = None;
        self.sign_in_rx = None;
        self.sign_out_rx = None;
        self.user_avatar_rx = None;
    }
}
