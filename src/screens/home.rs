use crate::state::HomeScene;
use crate::ui_components::colors::*;
use crate::ui_components::orbit::{paint_orbit, paint_particles, paint_rings};
use crate::ui_components::starfield::{paint_backdrop, paint_cosmic_grid, paint_nebula, paint_stars};
use eframe::egui::{self, Align2, Color32};

/// Action to take after interacting with the home screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HomeAction {
    Upload,
    Connect,
    Explore,
    Settings,
    Logout,
    ShrinkAnimation,
    GrowAnimation,
}

/// Home screen - cosmic sky, central animation with orbit, user and control panels
pub fn render_home_screen(
    ctx: &egui::Context,
    scene: &mut HomeScene,
    animation_size: f32,
    avatar: Option<&egui::TextureHandle>,
    is_signing_out: bool,
) -> Option<HomeAction> {
    let mut action = None;
    let time = ctx.input(|i| i.time);

    egui::CentralPanel::default()
        .frame(egui::Frame::NONE)
        .show(ctx, |ui| {
            let rect = ui.max_rect();
            let painter = ui.painter().clone();
            let center = rect.center();

            paint_backdrop(&painter, rect);
            paint_stars(&painter, rect, &scene.stars, time);
            paint_cosmic_grid(&painter, rect);

            paint_nebula(&painter, center, animation_size * 1.4, ACCENT);
            paint_rings(&painter, center, animation_size, time);
            paint_orbit(&painter, center, &scene.orbit, &scene.roster);
            paint_particles(&painter, center, animation_size, time);

            let animation_rect =
                egui::Rect::from_center_size(center, egui::vec2(animation_size, animation_size));
            scene.animation.paint(&painter, animation_rect, time);
        });

    render_user_panel(ctx, scene, avatar);
    render_size_controls(ctx, animation_size, &mut action);
    render_control_panel(ctx, is_signing_out, &mut action);

    if scene.is_loading_overlay_visible() {
        render_loading_overlay(ctx);
    }

    action
}

fn panel_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(BG_PANEL)
        .stroke(egui::Stroke::new(1.0, ACCENT_SOFT.gamma_multiply(0.5)))
        .corner_radius(14.0)
        .inner_margin(14.0)
}

fn render_user_panel(ctx: &egui::Context, scene: &HomeScene, avatar: Option<&egui::TextureHandle>) {
    egui::Area::new(egui::Id::new("user_panel"))
        .anchor(Align2::LEFT_TOP, egui::vec2(20.0, 20.0))
        .show(ctx, |ui| {
            panel_frame().show(ui, |ui| {
                ui.horizontal(|ui| {
                    let avatar_size = egui::vec2(48.0, 48.0);
                    match avatar {
                        Some(texture) => {
                            ui.add(
                                egui::Image::new(texture)
                                    .fit_to_exact_size(avatar_size)
                                    .corner_radius(24.0),
                            );
                        }
                        None => {
                            let (rect, _) = ui.allocate_exact_size(avatar_size, egui::Sense::hover());
                            ui.painter().circle_filled(rect.center(), 24.0, ACCENT_SOFT);
                            ui.painter().text(
                                rect.center(),
                                Align2::CENTER_CENTER,
                                scene.user.avatar_initial(),
                                egui::FontId::proportional(22.0),
                                TEXT_PRIMARY,
                            );
                        }
                    }

                    ui.add_space(8.0);
                    ui.vertical(|ui| {
                        ui.label(
                            egui::RichText::new(scene.user.display_name_or_default())
                                .size(16.0)
                                .color(TEXT_PRIMARY)
                                .strong(),
                        );
                        ui.label(
                            egui::RichText::new(&scene.user.email)
                                .size(12.0)
                                .color(TEXT_SECONDARY),
                        );
                        ui.add_space(4.0);
                        ui.label(
                            egui::RichText::new(format!("🕒 {}", scene.current_time))
                                .size(14.0)
                                .monospace()
                                .color(TEXT_PRIMARY),
                        );
                    });
                });
            });
        });
}

fn render_size_controls(ctx: &egui::Context, animation_size: f32, action: &mut Option<HomeAction>) {
    egui::Area::new(egui::Id::new("size_controls"))
        .anchor(Align2::RIGHT_TOP, egui::vec2(-20.0, 100.0))
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("−").clicked() {
                    *action = Some(HomeAction::ShrinkAnimation);
                }
                ui.label(
                    egui::RichText::new(format!("{}px", animation_size as i32))
                        .color(Color32::WHITE),
                );
                if ui.button("+").clicked() {
                    *action = Some(HomeAction::GrowAnimation);
                }
            });
        });
}

fn render_control_panel(ctx: &egui::Context, is_signing_out: bool, action: &mut Option<HomeAction>) {
    let buttons = [
        ("📁", "Upload", HomeAction::Upload),
        ("🌐", "Connect", HomeAction::Connect),
        ("🔭", "Explore", HomeAction::Explore),
        ("⚙", "Settings", HomeAction::Settings),
        ("🚪", "Logout", HomeAction::Logout),
    ];

    egui::Area::new(egui::Id::new("control_panel"))
        .anchor(Align2::CENTER_BOTTOM, egui::vec2(0.0, -28.0))
        .show(ctx, |ui| {
            panel_frame().show(ui, |ui| {
                ui.horizontal(|ui| {
                    for (icon, label, button_action) in buttons {
                        let is_logout = button_action == HomeAction::Logout;
                        let color = if is_logout { DANGER } else { TEXT_PRIMARY };
                        let button = egui::Button::new(
                            egui::RichText::new(format!("{}  {}", icon, label))
                                .size(14.0)
                                .color(color),
                        )
                        .fill(BG_CARD)
                        .corner_radius(10.0)
                        .min_size(egui::vec2(104.0, 38.0));

                        let enabled = !(is_logout && is_signing_out);
                        if ui.add_enabled(enabled, button).clicked() {
                            *action = Some(button_action);
                        }
                    }
                });
            });
        });
}

fn render_loading_overlay(ctx: &egui::Context) {
    let screen = ctx.content_rect();
    egui::Area::new(egui::Id::new("home_loading_overlay"))
        .order(egui::Order::Foreground)
        .fixed_pos(screen.min)
        .show(ctx, |ui| {
            ui.painter().rect_filled(screen, 0.0, BG_SPACE_TOP.gamma_multiply(0.92));
            ui.scope_builder(egui::UiBuilder::new().max_rect(screen), |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(screen.height() / 2.0 - 30.0);
                    ui.add(egui::Spinner::new().size(32.0).color(ACCENT));
                    ui.add_space(12.0);
                    ui.label(
                        egui::RichText::new("Entering Cosmic Space...")
                            .size(16.0)
                            .color(TEXT_SECONDARY),
                    );
                });
            });
        });
}
