use crate::constants::{
    ANIMATION_SIZE_DEFAULT, ANIMATION_SIZE_MAX, ANIMATION_SIZE_MIN, ANIMATION_SIZE_STEP,
};
use crate::ui_components::file_chooser::FileChooser;
use crate::ui_components::notice::Notice;

pub struct UIState {
    // Blocking notice (alert) shown over everything
    pub notice: Option<Notice>,

    // Central animation size in px; rings, particles and orbit scale with it
    pub animation_size: f32,

    // Upload stub
    pub file_chooser: FileChooser,
    pub last_selected_file: Option<String>,

    pub is_shutting_down: bool,
}

impl Default for UIState {
    fn default() -> Self {
        Self {
            notice: None,
            animation_size: ANIMATION_SIZE_DEFAULT,
            file_chooser: FileChooser::default(),
            last_selected_file: None,
            is_shutting_down: false,
        }
    }
}

impl UIState {
    pub fn show_notice(&mut self, title: &str, message: impl Into<String>) {
        let message = message.into();
        log::debug!("[UI] Notice: {} - {}", title, message);
        self.notice = Some(Notice::new(title, message));
    }

    /// Grow by one step while below the maximum; returns true if the size changed
    pub fn grow_animation(&mut self) -> bool {
        if self.animation_size < ANIMATION_SIZE_MAX {
            self.animation_size += ANIMATION_SIZE_STEP;
            true
        } else {
            false
        }
    }

    /// Shrink by one step while above the minimum; returns true if the size changed
    pub fn shrink_animation(&mut self) -> bool {
        if self.animation_size > ANIMATION_SIZE_MIN {
            self.animation_size -= ANIMATION_SIZE_STEP;
            true
        } else {
            false
        }
    }

    /// Upload stub: remember the name and tell the user, nothing else
    pub fn file_selected(&mut self, name: String) {
        log::info!("[UI] File selected: {}", name);
        self.show_notice("Upload", format!("Ready to upload: {}", name));
        self.last_selected_file = Some(name);
    }
}
