/// Scene selection from session state
use crate::models::UserProfile;
use crate::state::session::{SessionHub, SessionUpdate, Subscription};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub enum Scene {
    /// Session not known yet
    Loading,
    Login,
    Home(UserProfile),
}

impl Scene {
    fn from_update(update: &SessionUpdate) -> Self {
        match update {
            SessionUpdate::Changed(Some(user)) => Scene::Home(user.clone()),
            SessionUpdate::Changed(None) => Scene::Login,
            SessionUpdate::Failed(message) => {
                log::error!("[Gate] Session stream error: {} - showing login", message);
                Scene::Login
            }
        }
    }
}

pub struct SceneGate {
    scene: Rc<RefCell<Scene>>,
    subscription: Option<Subscription>,
}

impl Default for SceneGate {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGate {
    pub fn new() -> Self {
        Self {
            scene: Rc::new(RefCell::new(Scene::Loading)),
            subscription: None,
        }
    }

    /// Follow `hub`, releasing any previous subscription first
    pub fn attach(&mut self, hub: &SessionHub) {
        self.detach();

        let scene = Rc::clone(&self.scene);
        self.subscription = Some(hub.subscribe(move |update| {
            let next = Scene::from_update(update);
            let mut current = scene.borrow_mut();
            if *current != next {
                log::info!("[Gate] Scene -> {}", next.label());
            }
            *current = next;
        }));
    }

    pub fn detach(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn scene(&self) -> Scene {
        self.scene.borrow().clone()
    }
}

impl Scene {
    pub fn label(&self) -> &'static str {
        match self {
            Scene::Loading => "loading",
            Scene::Login => "login",
            Scene::Home(_) => "home",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vega() -> UserProfile {
        UserProfile {
            user_id: "g-1087".to_string(),
            display_name: Some("Vega Nova".to_string()),
            email: "vega.nova@example.com".to_string(),
            avatar_url: Some("https://lh3.example/vega.jpg".to_string()),
        }
    }

    #[test]
    fn loading_until_first_update() {
        let hub = SessionHub::new();
        let mut gate = SceneGate::new();
        gate.attach(&hub);
        assert_eq!(gate.scene(), Scene::Loading);
    }

    #[test]
    fn sign_in_then_sign_out_round_trip() {
        let hub = SessionHub::new();
        let mut gate = SceneGate::new();
        gate.attach(&hub);

        hub.publish(SessionUpdate::Changed(None));
        assert_eq!(gate.scene(), Scene::Login);

        hub.publish(SessionUpdate::Changed(Some(vega())));
        match gate.scene() {
            Scene::Home(user) => {
                assert_eq!(user.display_name.as_deref(), Some("Vega Nova"));
                assert_eq!(user.email, "vega.nova@example.com");
            }
            other => panic!("expected home scene, got {:?}", other),
        }

        hub.publish(SessionUpdate::Changed(None));
        assert_eq!(gate.scene(), Scene::Login);
    }

    #[test]
    fn stream_failure_shows_login_instead_of_loading() {
        let hub = SessionHub::new();
        let mut gate = SceneGate::new();
        gate.attach(&hub);

        hub.publish(SessionUpdate::Failed("token refresh rejected".into()));
        assert_eq!(gate.scene(), Scene::Login);
    }

    #[test]
    fn reattach_keeps_a_single_subscription() {
        let hub = SessionHub::new();
        let mut gate = SceneGate::new();
        gate.attach(&hub);
        gate.attach(&hub);
        assert_eq!(hub.subscriber_count(), 1);

        // Re-attaching to a hub with a known session delivers it immediately
        hub.publish(SessionUpdate::Changed(Some(vega())));
        let other = SessionHub::new();
        other.publish(SessionUpdate::Changed(None));
        gate.attach(&other);
        assert_eq!(hub.subscriber_count(), 0);
        assert_eq!(gate.scene(), Scene::Login);

        gate.detach();
        assert!(!gate.is_attached());
        assert_eq!(other.subscriber_count(), 0);
    }
}
