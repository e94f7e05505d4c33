use crate::state::LoginScene;
use crate::ui_components::colors::*;
use crate::ui_components::starfield::{paint_backdrop, paint_constellation, paint_nebula, paint_stars};
use eframe::egui;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoginAction {
    SignIn,
    CancelSignIn,
}

/// Login screen - star field, constellation, animation and the sign-in card
pub fn render_login_screen(
    ctx: &egui::Context,
    scene: &mut LoginScene,
    is_authenticating: bool,
) -> Option<LoginAction> {
    let mut action = None;
    let time = ctx.input(|i| i.time);

    egui::CentralPanel::default()
        .frame(egui::Frame::NONE)
        .show(ctx, |ui| {
            let rect = ui.max_rect();
            let painter = ui.painter().clone();

            paint_backdrop(&painter, rect);
            paint_stars(&painter, rect, &scene.stars, time);
            paint_constellation(&painter, rect, &scene.constellation, time);

            let animation_rect = egui::Rect::from_center_size(
                egui::pos2(rect.center().x, rect.top() + rect.height() * 0.2),
                egui::vec2(180.0, 180.0),
            );
            paint_nebula(&painter, animation_rect.center(), 160.0, ACCENT);
            scene.animation.paint(&painter, animation_rect, time);

            ui.vertical_centered(|ui| {
                ui.add_space(animation_rect.bottom() - rect.top() + 10.0);
                ui.label(
                    egui::RichText::new("X-11")
                        .size(48.0)
                        .color(TEXT_PRIMARY)
                        .strong(),
                );
                ui.label(
                    egui::RichText::new("Explore the Digital Cosmos")
                        .size(16.0)
                        .color(TEXT_SECONDARY),
                );
                ui.add_space(28.0);

                render_login_card(ui, is_authenticating, &mut action);
            });
        });

    action
}

fn render_login_card(ui: &mut egui::Ui, is_authenticating: bool, action: &mut Option<LoginAction>) {
    egui::Frame::new()
        .fill(BG_PANEL)
        .stroke(egui::Stroke::new(1.0, ACCENT_SOFT.gamma_multiply(0.6)))
        .corner_radius(16.0)
        .inner_margin(28.0)
        .show(ui, |ui| {
            ui.set_width(340.0);
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new("Welcome, Explorer")
                        .size(22.0)
                        .color(TEXT_PRIMARY)
                        .strong(),
                );
                ui.add_space(6.0);
                ui.label(
                    egui::RichText::new("Sign in to join the cosmic network")
                        .size(14.0)
                        .color(TEXT_SECONDARY),
                );
                ui.add_space(22.0);

                let label = if is_authenticating {
                    "Waiting for Google..."
                } else {
                    "Continue with Google"
                };
                let button = egui::Button::new(
                    egui::RichText::new(label)
                        .size(15.0)
                        .color(egui::Color32::from_rgb(40, 40, 60)),
                )
                .fill(egui::Color32::WHITE)
                .corner_radius(10.0)
                .min_size(egui::vec2(280.0, 44.0));

                let response = ui.add_enabled(!is_authenticating, button);
                if response.clicked() {
                    *action = Some(LoginAction::SignIn);
                }
                if is_authenticating {
                    ui.add_space(10.0);
                    ui.horizontal(|ui| {
                        ui.spinner();
                        let cancel = egui::Button::new(
                            egui::RichText::new("Cancel").size(13.0).color(TEXT_SECONDARY),
                        )
                        .frame(false);
                        if ui.add(cancel).clicked() {
                            *action = Some(LoginAction::CancelSignIn);
                        }
                    });
                }

                ui.add_space(18.0);
                ui.label(
                    egui::RichText::new("By continuing, you agree to our Terms and Privacy Policy")
                        .size(11.0)
                        .color(TEXT_MUTED),
                );
            });
        });
}
