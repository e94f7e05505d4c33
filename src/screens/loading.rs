use crate::ui_components::colors::*;
use crate::ui_components::starfield::paint_backdrop;
use eframe::egui;

/// Loading screen - shown while the stored session is being restored
pub fn render_loading_screen(ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::NONE)
        .show(ctx, |ui| {
            let rect = ui.max_rect();
            paint_backdrop(ui.painter(), rect);

            ui.vertical_centered(|ui| {
                ui.add_space(rect.height() / 2.0 - 40.0);
                ui.add(egui::Spinner::new().size(36.0).color(ACCENT));
                ui.add_space(16.0);
                ui.label(
                    egui::RichText::new("Initializing X-11...")
                        .size(16.0)
                        .color(TEXT_SECONDARY),
                );
            });
        });
}
