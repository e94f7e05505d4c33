use crate::ui_components::colors::*;
use eframe::egui;

/// Blocking notice (alert) rendered as a modal over the current scene
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    /// Show the modal; returns true once the user dismissed it
    pub fn render(&self, ctx: &egui::Context) -> bool {
        let mut dismissed = false;

        let response = egui::Modal::new(egui::Id::new("notice_modal")).show(ctx, |ui| {
            ui.set_width(340.0);
            ui.label(
                egui::RichText::new(&self.title)
                    .size(18.0)
                    .color(TEXT_PRIMARY)
                    .strong(),
            );
            ui.add_space(10.0);
            ui.label(egui::RichText::new(&self.message).size(14.0).color(TEXT_SECONDARY));
            ui.add_space(16.0);

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .add(egui::Button::new(egui::RichText::new("OK").color(TEXT_PRIMARY)).fill(ACCENT_SOFT))
                    .clicked()
                {
                    dismissed = true;
                }
            });
        });

        dismissed || response.should_close()
    }
}
