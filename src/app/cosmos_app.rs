use crate::api::{select_provider, IdentityProvider};
use crate::app::animation::{AnimationRenderer, LottieRenderer};
use crate::constants::*;
use crate::screens::{HomeAction, LoginAction};
use crate::services::RepaintWaker;
use crate::state::{
    AuthState, BackgroundTasks, HomeScene, LoginScene, MountedScene, Scene, SceneGate, SessionHub,
    UIState,
};
use crate::ui_components::colors;
use eframe::egui;
use std::sync::mpsc::TryRecvError;
use std::sync::Arc;
use std::time::Duration;

pub struct CosmosApp {
    // Auth state (provider, in-flight flags, avatar texture)
    pub auth: AuthState,

    // UI state (notice, animation size, file chooser)
    pub ui: UIState,

    // Background tasks (receivers for async operations)
    pub tasks: BackgroundTasks,

    // Current session, delivered to the gate on the UI thread
    pub session: SessionHub,
    pub gate: SceneGate,

    // What is on screen right now; replaced when the gate moves on
    pub scene: MountedScene,

    renderer: Box<dyn AnimationRenderer>,
    waker: Option<RepaintWaker>,
}

impl CosmosApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let provider = select_provider(crate::GOOGLE_CLIENT_ID, crate::GOOGLE_CLIENT_SECRET);
        let ctx = cc.egui_ctx.clone();
        let waker: RepaintWaker = Arc::new(move || ctx.request_repaint());

        Self::with_parts(
            provider,
            Box::new(LottieRenderer::new(ASSETS_DIR)),
            Some(waker),
        )
    }

    /// Wire the app around a provider and renderer, then start the session check
    pub fn with_parts(
        provider: Arc<dyn IdentityProvider>,
        renderer: Box<dyn AnimationRenderer>,
        waker: Option<RepaintWaker>,
    ) -> Self {
        let session = SessionHub::new();
        let mut gate = SceneGate::new();
        gate.attach(&session);

        let mut app = Self {
            auth: AuthState::new(provider),
            ui: UIState::default(),
            tasks: BackgroundTasks::default(),
            session,
            gate,
            scene: MountedScene::Loading,
            renderer,
            waker,
        };
        app.auth.begin_restore(&mut app.tasks);
        app
    }

    /// Collect finished provider round trips; failures become a blocking notice
    pub fn check_auth_updates(&mut self) {
        if let Some(message) = self.auth.poll(&mut self.tasks, &self.session) {
            self.ui.show_notice("X-11", message);
        }
    }

    /// Remount when the gate's scene differs from the mounted one
    pub fn sync_scene(&mut self) {
        let target = self.gate.scene();
        if self.scene.matches(&target) {
            return;
        }
        log::info!("[App] Switching to {} scene", target.label());

        // Unmount first so the old clock and animation are released before the new ones start
        self.scene = MountedScene::Loading;
        self.auth.user_avatar_texture = None;
        self.tasks.user_avatar_rx = None;
        self.ui.file_chooser.close();

        self.scene = match target {
            Scene::Loading => MountedScene::Loading,
            Scene::Login => MountedScene::Login(LoginScene::mount(self.renderer.as_ref())),
            Scene::Home(user) => {
                if let Some(url) = &user.avatar_url {
                    self.tasks.user_avatar_rx = Some(crate::utils::avatar::fetch_avatar(url.clone()));
                }
                self.ui.animation_size = ANIMATION_SIZE_DEFAULT;
                MountedScene::Home(Box::new(HomeScene::mount(
                    user,
                    self.ui.animation_size,
                    self.renderer.as_ref(),
                    self.waker.clone(),
                )))
            }
        };
    }

    /// Check for the downloaded user avatar
    pub fn check_user_avatar(&mut self, ctx: &egui::Context) {
        if let Some(rx) = &self.tasks.user_avatar_rx {
            match rx.try_recv() {
                Ok(Ok(color_image)) => {
                    self.auth.user_avatar_texture = Some(ctx.load_texture(
                        "user_avatar",
                        color_image,
                        egui::TextureOptions::LINEAR,
                    ));
                    self.tasks.user_avatar_rx = None;
                }
                Ok(Err(e)) => {
                    log::warn!("[App] Avatar unavailable, using initial: {}", e);
                    self.tasks.user_avatar_rx = None;
                }
                Err(TryRecvError::Disconnected) => {
                    self.tasks.user_avatar_rx = None;
                }
                Err(TryRecvError::Empty) => {}
            }
        }
    }

    pub fn handle_login_action(&mut self, action: LoginAction) {
        match action {
            LoginAction::SignIn => self.auth.begin_sign_in(&mut self.tasks),
            LoginAction::CancelSignIn => self.auth.cancel_sign_in(&mut self.tasks),
        }
    }

    pub fn handle_home_action(&mut self, action: HomeAction) {
        match action {
            HomeAction::Upload => self.ui.file_chooser.open(),
            HomeAction::Connect | HomeAction::Explore | HomeAction::Settings => {
                log::debug!("[Home] {:?} is not available yet", action);
            }
            HomeAction::Logout => match self.session.current_user() {
                Some(user) => {
                    log::info!("[App] Logout requested for {}", user.email);
                    self.auth.begin_sign_out(&mut self.tasks);
                }
                None => log::warn!("[App] Logout requested without a session"),
            },
            HomeAction::ShrinkAnimation | HomeAction::GrowAnimation => {
                let changed = if action == HomeAction::GrowAnimation {
                    self.ui.grow_animation()
                } else {
                    self.ui.shrink_animation()
                };
                if changed {
                    if let MountedScene::Home(home) = &mut self.scene {
                        home.sync_orbit(self.ui.animation_size);
                    }
                }
            }
        }
    }

    /// Files dropped onto the window count as an upload selection on the home scene
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        if !matches!(self.scene, MountedScene::Home(_)) {
            return;
        }
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if let Some(file) = dropped.first() {
            let name = file
                .path
                .as_ref()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| file.name.clone());
            if !name.is_empty() {
                self.ui.file_selected(name);
            }
        }
    }

    fn cleanup_and_exit(&mut self, ctx: &egui::Context) {
        log::info!("[Shutdown] Starting graceful cleanup...");

        // Unmounting stops the clock thread and the animation
        log::info!("[Shutdown] Unmounting scene...");
        self.scene = MountedScene::Loading;

        log::info!("[Shutdown] Clearing pending background tasks...");
        self.tasks.clear_all();
        self.auth.user_avatar_texture = None;

        if self.gate.is_attached() {
            self.gate.detach();
            log::info!(
                "[Shutdown] Session released ({} subscribers left)",
                self.session.subscriber_count()
            );
        }

        log::info!("[Shutdown] Cleanup complete, closing application...");
        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
    }
}

impl eframe::App for CosmosApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Stars twinkle and particles spin continuously
        ctx.request_repaint_after(Duration::from_millis(REPAINT_INTERVAL_IDLE_MILLIS));

        // Handle close request - cleanup and exit immediately
        if ctx.input(|i| i.viewport().close_requested()) && !self.ui.is_shutting_down {
            self.ui.is_shutting_down = true;
            self.cleanup_and_exit(ctx);
            return;
        }

        self.check_auth_updates();
        self.sync_scene();
        self.check_user_avatar(ctx);
        self.handle_dropped_files(ctx);

        let mut visuals = egui::Visuals::dark();
        visuals.override_text_color = Some(colors::TEXT_PRIMARY);
        visuals.panel_fill = colors::BG_SPACE_TOP;
        visuals.window_fill = colors::BG_CARD;
        visuals.extreme_bg_color = colors::BG_SPACE_TOP;
        ctx.set_visuals(visuals);

        ctx.style_mut(|style| {
            style.interaction.selectable_labels = false;
        });

        let mut login_action = None;
        let mut home_action = None;
        match &mut self.scene {
            MountedScene::Loading => crate::screens::render_loading_screen(ctx),
            MountedScene::Login(scene) => {
                login_action =
                    crate::screens::render_login_screen(ctx, scene, self.auth.is_authenticating);
            }
            MountedScene::Home(scene) => {
                scene.poll_clock();
                home_action = crate::screens::render_home_screen(
                    ctx,
                    scene,
                    self.ui.animation_size,
                    self.auth.user_avatar_texture.as_ref(),
                    self.auth.is_signing_out,
                );
            }
        }

        if let Some(action) = login_action {
            self.handle_login_action(action);
        }
        if let Some(action) = home_action {
            self.handle_home_action(action);
        }

        if let Some(name) = self.ui.file_chooser.show(ctx) {
            self.ui.file_selected(name);
        }

        // Notice renders on top of everything
        if let Some(notice) = &self.ui.notice {
            if notice.render(ctx) {
                self.ui.notice = None;
            }
        }

        if self.tasks.has_active_tasks() {
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::DemoIdentityProvider;
    use crate::app::animation::{AnimationHandle, AnimationOptions};
    use crate::models::UserProfile;
    use std::time::Instant;

    struct Still;

    impl AnimationHandle for Still {
        fn paint(&mut self, _: &egui::Painter, _: egui::Rect, _: f64) {}
        fn stop(&mut self) {}
        fn is_stopped(&self) -> bool {
            false
        }
    }

    struct StillRenderer;

    impl AnimationRenderer for StillRenderer {
        fn load(&self, _: &str, _: AnimationOptions) -> Box<dyn AnimationHandle> {
            Box::new(Still)
        }
    }

    fn explorer() -> UserProfile {
        UserProfile {
            user_id: "e-1".into(),
            display_name: None,
            email: "nameless@x11.local".into(),
            avatar_url: None,
        }
    }

    fn app() -> CosmosApp {
        let provider = DemoIdentityProvider::with_profile(explorer(), Duration::from_millis(1));
        CosmosApp::with_parts(Arc::new(provider), Box::new(StillRenderer), None)
    }

    fn pump_until(app: &mut CosmosApp, done: impl Fn(&CosmosApp) -> bool) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            app.check_auth_updates();
            app.sync_scene();
            if done(app) {
                return;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        panic!("condition not reached, scene is {}", app.gate.scene().label());
    }

    #[test]
    fn launch_sign_in_resize_and_sign_out() {
        let mut app = app();
        assert!(matches!(app.scene, MountedScene::Loading));

        pump_until(&mut app, |a| matches!(a.scene, MountedScene::Login(_)));

        app.handle_login_action(LoginAction::SignIn);
        pump_until(&mut app, |a| matches!(a.scene, MountedScene::Home(_)));
        match &app.scene {
            MountedScene::Home(home) => {
                assert_eq!(home.user, explorer());
                assert_eq!(home.user.display_name_or_default(), "User");
                assert_eq!(home.orbit.radius(), ANIMATION_SIZE_DEFAULT * ORBIT_RADIUS_FACTOR);
            }
            _ => unreachable!(),
        }

        app.handle_home_action(HomeAction::GrowAnimation);
        assert_eq!(app.ui.animation_size, 140.0);
        if let MountedScene::Home(home) = &app.scene {
            assert_eq!(home.orbit.radius(), 140.0 * ORBIT_RADIUS_FACTOR);
        }

        app.handle_home_action(HomeAction::Logout);
        pump_until(&mut app, |a| matches!(a.scene, MountedScene::Login(_)));
        assert!(app.ui.notice.is_none());
    }

    #[test]
    fn cancelled_sign_in_stays_on_login() {
        let provider = DemoIdentityProvider::with_profile(explorer(), Duration::from_millis(100));
        let mut app = CosmosApp::with_parts(Arc::new(provider), Box::new(StillRenderer), None);
        pump_until(&mut app, |a| matches!(a.scene, MountedScene::Login(_)));

        app.handle_login_action(LoginAction::SignIn);
        assert!(app.auth.is_authenticating);
        app.handle_login_action(LoginAction::CancelSignIn);
        assert!(!app.auth.is_authenticating);

        std::thread::sleep(Duration::from_millis(200));
        app.check_auth_updates();
        app.sync_scene();
        assert!(matches!(app.scene, MountedScene::Login(_)));
        assert!(app.ui.notice.is_none());
    }

    #[test]
    fn inert_buttons_change_nothing() {
        let mut app = app();
        app.handle_home_action(HomeAction::Connect);
        app.handle_home_action(HomeAction::Explore);
        app.handle_home_action(HomeAction::Settings);
        assert!(app.ui.notice.is_none());
        assert!(!app.ui.file_chooser.is_open);
        assert_eq!(app.ui.animation_size, ANIMATION_SIZE_DEFAULT);
    }
}
