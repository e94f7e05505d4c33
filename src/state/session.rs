/// Current-session context shared by the gate and the auth flow.
///
/// The hub is created once by the app and handed out explicitly; there is no
/// global session. Subscribers get the latest known update immediately and
/// every later one until their `Subscription` is released.
use crate::models::UserProfile;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

#[derive(Debug, Clone, PartialEq)]
pub enum SessionUpdate {
    Changed(Option<UserProfile>),
    /// The session stream itself failed; consumers treat this as "no session"
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Unknown,
    SignedOut,
    SignedIn(UserProfile),
}

type Callback = Box<dyn FnMut(&SessionUpdate)>;

struct HubInner {
    state: SessionState,
    last_update: Option<SessionUpdate>,
    subscribers: Vec<(u64, Callback)>,
    next_id: u64,
    dispatching: bool,
    // Published from inside a callback; delivered after the current round
    queued: VecDeque<SessionUpdate>,
    // Unsubscribed while their callback list was checked out for dispatch
    removed_during_dispatch: Vec<u64>,
}

#[derive(Clone)]
pub struct SessionHub {
    inner: Rc<RefCell<HubInner>>,
}

impl Default for SessionHub {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionHub {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(HubInner {
                state: SessionState::Unknown,
                last_update: None,
                subscribers: Vec::new(),
                next_id: 0,
                dispatching: false,
                queued: VecDeque::new(),
                removed_during_dispatch: Vec::new(),
            })),
        }
    }

    pub fn state(&self) -> SessionState {
        self.inner.borrow().state.clone()
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        match self.state() {
            SessionState::SignedIn(user) => Some(user),
            _ => None,
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    /// Register `callback`; it is invoked right away when the session is already known
    pub fn subscribe(&self, callback: impl FnMut(&SessionUpdate) + 'static) -> Subscription {
        let mut callback: Callback = Box::new(callback);

        let current = self.inner.borrow().last_update.clone();
        if let Some(update) = &current {
            callback(update);
        }

        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.subscribers.push((id, callback));
        log::debug!("[Session] Subscriber {} added ({} total)", id, inner.subscribers.len());

        Subscription {
            hub: Rc::downgrade(&self.inner),
            id: Some(id),
        }
    }

    /// Record a session transition and deliver it to every subscriber.
    ///
    /// A publish made by a callback is queued and delivered, in order, once
    /// the current round has reached every subscriber.
    pub fn publish(&self, update: SessionUpdate) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.dispatching {
                inner.queued.push_back(update);
                return;
            }
            inner.dispatching = true;
        }

        let mut next = Some(update);
        while let Some(update) = next {
            self.dispatch(&update);
            next = self.inner.borrow_mut().queued.pop_front();
        }
        self.inner.borrow_mut().dispatching = false;
    }

    fn dispatch(&self, update: &SessionUpdate) {
        let mut subscribers = {
            let mut inner = self.inner.borrow_mut();
            inner.state = match update {
                SessionUpdate::Changed(Some(user)) => SessionState::SignedIn(user.clone()),
                SessionUpdate::Changed(None) | SessionUpdate::Failed(_) => SessionState::SignedOut,
            };
            inner.last_update = Some(update.clone());
            std::mem::take(&mut inner.subscribers)
        };

        // Callbacks run without the hub borrowed, so they may subscribe or unsubscribe
        for (_, callback) in subscribers.iter_mut() {
            callback(update);
        }

        let mut inner = self.inner.borrow_mut();
        let removed = std::mem::take(&mut inner.removed_during_dispatch);
        subscribers.retain(|(id, _)| !removed.contains(id));
        // Subscribers added during dispatch go after the existing ones
        subscribers.append(&mut inner.subscribers);
        inner.subscribers = subscribers;
    }
}

/// Disposer returned by `SessionHub::subscribe`; releasing it stops delivery
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    hub: Weak<RefCell<HubInner>>,
    id: Option<u64>,
}

impl Subscription {
    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        let Some(id) = self.id.take() else {
            return;
        };
        let Some(hub) = self.hub.upgrade() else {
            return;
        };
        let mut inner = hub.borrow_mut();
        let before = inner.subscribers.len();
        inner.subscribers.retain(|(sid, _)| *sid != id);
        if inner.subscribers.len() == before && inner.dispatching {
            inner.removed_during_dispatch.push(id);
        }
        log::debug!("[Session] Subscriber {} released", id);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str) -> UserProfile {
        UserProfile {
            user_id: format!("id-{}", name),
            display_name: Some(name.to_string()),
            email: format!("{}@example.com", name.to_lowercase()),
            avatar_url: None,
        }
    }

    fn recorder() -> (Rc<RefCell<Vec<SessionUpdate>>>, impl FnMut(&SessionUpdate) + 'static) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        (seen, move |u: &SessionUpdate| sink.borrow_mut().push(u.clone()))
    }

    #[test]
    fn unknown_session_delivers_nothing_on_subscribe() {
        let hub = SessionHub::new();
        let (seen, cb) = recorder();
        let _sub = hub.subscribe(cb);
        assert!(seen.borrow().is_empty());
        assert_eq!(hub.state(), SessionState::Unknown);
    }

    #[test]
    fn late_subscriber_gets_current_state_then_transitions() {
        let hub = SessionHub::new();
        hub.publish(SessionUpdate::Changed(Some(user("Vega"))));

        let (seen, cb) = recorder();
        let _sub = hub.subscribe(cb);
        hub.publish(SessionUpdate::Changed(None));

        assert_eq!(
            *seen.borrow(),
            vec![
                SessionUpdate::Changed(Some(user("Vega"))),
                SessionUpdate::Changed(None)
            ]
        );
        assert_eq!(hub.state(), SessionState::SignedOut);
        assert!(hub.current_user().is_none());
    }

    #[test]
    fn unsubscribe_and_drop_stop_delivery() {
        let hub = SessionHub::new();
        let (first_seen, first) = recorder();
        let (second_seen, second) = recorder();
        let first_sub = hub.subscribe(first);
        let second_sub = hub.subscribe(second);
        assert_eq!(hub.subscriber_count(), 2);

        first_sub.unsubscribe();
        drop(second_sub);
        assert_eq!(hub.subscriber_count(), 0);

        hub.publish(SessionUpdate::Changed(None));
        assert!(first_seen.borrow().is_empty());
        assert!(second_seen.borrow().is_empty());
    }

    #[test]
    fn failure_counts_as_signed_out() {
        let hub = SessionHub::new();
        hub.publish(SessionUpdate::Failed("network down".into()));
        assert_eq!(hub.state(), SessionState::SignedOut);
    }

    #[test]
    fn callbacks_may_unsubscribe_during_dispatch() {
        let hub = SessionHub::new();
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let calls = Rc::new(RefCell::new(0));

        let slot_in_cb = Rc::clone(&slot);
        let calls_in_cb = Rc::clone(&calls);
        let sub = hub.subscribe(move |_| {
            *calls_in_cb.borrow_mut() += 1;
            // One-shot listener
            if let Some(sub) = slot_in_cb.borrow_mut().take() {
                sub.unsubscribe();
            }
        });
        *slot.borrow_mut() = Some(sub);

        hub.publish(SessionUpdate::Changed(None));
        hub.publish(SessionUpdate::Changed(Some(user("Lyra"))));

        assert_eq!(*calls.borrow(), 1);
        assert_eq!(hub.subscriber_count(), 0);
    }

    #[test]
    fn publish_from_a_callback_is_delivered_after_the_round() {
        let hub = SessionHub::new();

        // Signs the user straight back out the first time it sees them
        let hub_in_cb = hub.clone();
        let kicked = Rc::new(RefCell::new(false));
        let kicked_in_cb = Rc::clone(&kicked);
        let _kicker = hub.subscribe(move |u| {
            if matches!(u, SessionUpdate::Changed(Some(_))) && !*kicked_in_cb.borrow() {
                *kicked_in_cb.borrow_mut() = true;
                hub_in_cb.publish(SessionUpdate::Changed(None));
            }
        });

        let (seen, cb) = recorder();
        let _watcher = hub.subscribe(cb);

        // One-shot listener that leaves after the nested publish was issued
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let calls = Rc::new(RefCell::new(0));
        let slot_in_cb = Rc::clone(&slot);
        let calls_in_cb = Rc::clone(&calls);
        let once = hub.subscribe(move |_| {
            *calls_in_cb.borrow_mut() += 1;
            if let Some(sub) = slot_in_cb.borrow_mut().take() {
                sub.unsubscribe();
            }
        });
        *slot.borrow_mut() = Some(once);

        hub.publish(SessionUpdate::Changed(Some(user("Lyra"))));

        assert_eq!(
            *seen.borrow(),
            vec![
                SessionUpdate::Changed(Some(user("Lyra"))),
                SessionUpdate::Changed(None)
            ]
        );
        assert_eq!(*calls.borrow(), 1);
        assert_eq!(hub.subscriber_count(), 2);
        assert_eq!(hub.state(), SessionState::SignedOut);
    }

    #[test]
    fn subscription_outliving_hub_is_harmless() {
        let hub = SessionHub::new();
        let (_seen, cb) = recorder();
        let sub = hub.subscribe(cb);
        drop(hub);
        sub.unsubscribe();
    }
}
