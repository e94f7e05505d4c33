use crate::api::IdentityProvider;
use crate::state::background_tasks::BackgroundTasks;
use crate::state::session::{SessionHub, SessionUpdate};
use crate::utils::async_helper::spawn_and_send;
use std::sync::mpsc::{channel, TryRecvError};
use std::sync::Arc;

pub struct AuthState {
    pub provider: Arc<dyn IdentityProvider>,
    pub is_authenticating: bool,
    pub is_signing_out: bool,
    pub restore_attempted: bool,
    pub user_avatar_texture: Option<egui::TextureHandle>,
}

impl AuthState {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self {
            provider,
            is_authenticating: false,
            is_signing_out: false,
            restore_attempted: false,
            user_avatar_texture: None,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.is_authenticating || self.is_signing_out
    }

    /// Ask the provider for a previous session (once per launch)
    pub fn begin_restore(&mut self, tasks: &mut BackgroundTasks) {
        if self.restore_attempted {
            return;
        }
        self.restore_attempted = true;

        let provider = Arc::clone(&self.provider);
        let (tx, rx) = channel();
        spawn_and_send(move || provider.restore(), tx);
        tasks.restore_rx = Some(rx);
        log::info!("[Auth] Checking for an existing {} session", self.provider.name());
    }

    pub fn begin_sign_in(&mut self, tasks: &mut BackgroundTasks) {
        if self.is_busy() {
            log::debug!("[Auth] Sign-in ignored, another request is in flight");
            return;
        }
        self.is_authenticating = true;

        let provider = Arc::clone(&self.provider);
        let (tx, rx) = channel();
        spawn_and_send(move || provider.sign_in(), tx);
        tasks.sign_in_rx = Some(rx);
        log::info!("[Auth] Starting {} login...", self.provider.name());
    }

    /// Abandon the sign-in in flight: the provider is told to stop waiting and
    /// whatever the attempt still produces is discarded, so the session stays as it was
    pub fn cancel_sign_in(&mut self, tasks: &mut BackgroundTasks) {
        if !self.is_authenticating {
            return;
        }
        self.provider.cancel_sign_in();
        tasks.sign_in_rx = None;
        self.is_authenticating = false;
        log::info!("[Auth] Login cancelled by user");
    }

    pub fn begin_sign_out(&mut self, tasks: &mut BackgroundTasks) {
        if self.is_busy() {
            log::debug!("[Auth] Sign-out ignored, another request is in flight");
            return;
        }
        self.is_signing_out = true;

        let provider = Arc::clone(&self.provider);
        let (tx, rx) = channel();
        spawn_and_send(move || provider.sign_out(), tx);
        tasks.sign_out_rx = Some(rx);
        log::info!("[Auth] Logging out...");
    }

    /// Collect finished round trips, publish session changes, and return a
    /// blocking notice message when a round trip failed
    pub fn poll(&mut self, tasks: &mut BackgroundTasks, session: &SessionHub) -> Option<String> {
        let mut notice = None;

        if let Some(rx) = &tasks.restore_rx {
            match rx.try_recv() {
                Ok(Ok(user)) => {
                    log::info!("[Auth] Session check complete - {}", if user.is_some() { "logged in" } else { "not logged in" });
                    session.publish(SessionUpdate::Changed(user));
                    tasks.restore_rx = None;
                }
                Ok(Err(e)) => {
                    log::error!("[Auth] Session restore failed: {}", e);
                    session.publish(SessionUpdate::Failed(e.to_string()));
                    tasks.restore_rx = None;
                }
                Err(TryRecvError::Disconnected) => {
                    session.publish(SessionUpdate::Failed("session check aborted".to_string()));
                    tasks.restore_rx = None;
                }
                Err(TryRecvError::Empty) => {}
            }
        }

        if let Some(rx) = &tasks.sign_in_rx {
            let finished = match rx.try_recv() {
                Ok(Ok(user)) => {
                    log::info!("[Auth] Login successful: {}", user.email);
                    session.publish(SessionUpdate::Changed(Some(user)));
                    true
                }
                Ok(Err(e)) => {
                    log::error!("[Auth] Login error: {}", e);
                    notice = Some(format!("Login failed: {}", e));
                    true
                }
                Err(TryRecvError::Disconnected) => {
                    notice = Some("Login failed: sign-in was interrupted".to_string());
                    true
                }
                Err(TryRecvError::Empty) => false,
            };
            if finished {
                tasks.sign_in_rx = None;
                self.is_authenticating = false;
            }
        }

        if let Some(rx) = &tasks.sign_out_rx {
            let finished = match rx.try_recv() {
                Ok(Ok(())) => {
                    log::info!("[Auth] Logout successful");
                    self.user_avatar_texture = None;
                    session.publish(SessionUpdate::Changed(None));
                    true
                }
                Ok(Err(e)) => {
                    log::error!("[Auth] Logout error: {}", e);
                    notice = Some(format!("Logout failed: {}", e));
                    true
                }
                Err(TryRecvError::Disconnected) => {
                    notice = Some("Logout failed: sign-out was interrupted".to_string());
                    true
                }
                Err(TryRecvError::Empty) => false,
            };
            if finished {
                tasks.sign_out_rx = None;
                self.is_signing_out = false;
            }
        }

        notice
    }
}
