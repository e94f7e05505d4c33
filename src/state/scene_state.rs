/// Per-mount scene state.
///
/// Each scene owns what it generated on mount (stars, orbit layout), its
/// animation handle and, for home, the clock ticker. Dropping the scene is
/// the unmount: handles are stopped and the ticker thread is joined.
use crate::app::animation::{AnimationHandle, AnimationOptions, AnimationRenderer};
use crate::constants::*;
use crate::data::mock_roster;
use crate::models::{OrbitEntity, StarDescriptor, StarFieldProfile, UserProfile};
use crate::services::clock::{format_clock, LocalClock, TimeSource};
use crate::services::star_field::{constellation, generate, generate_stars};
use crate::services::{ClockTicker, OrbitLayout, RepaintWaker};
use crate::state::gate::Scene;
use std::time::{Duration, Instant};

pub type Segment = ((f32, f32), (f32, f32));

pub struct LoginScene {
    pub stars: Vec<StarDescriptor>,
    pub constellation: Vec<Segment>,
    pub animation: Box<dyn AnimationHandle>,
}

impl LoginScene {
    pub fn mount(renderer: &dyn AnimationRenderer) -> Self {
        let stars = generate_stars(&StarFieldProfile::login(), LOGIN_STAR_COUNT);
        let constellation = constellation(&stars, LOGIN_CONSTELLATION_LINES);
        let animation = renderer.load(LOGIN_ANIMATION_SOURCE, AnimationOptions::default());
        log::info!("[Scene] Login mounted ({} stars)", stars.len());

        Self {
            stars,
            constellation,
            animation,
        }
    }
}

impl Drop for LoginScene {
    fn drop(&mut self) {
        if !self.animation.is_stopped() {
            self.animation.stop();
        }
        log::info!("[Scene] Login unmounted");
    }
}

pub struct HomeScene {
    pub user: UserProfile,
    pub stars: Vec<StarDescriptor>,
    pub roster: Vec<OrbitEntity>,
    pub orbit: OrbitLayout,
    pub current_time: String,
    pub animation: Box<dyn AnimationHandle>,
    clock: Option<ClockTicker>,
    mounted_at: Instant,
}

impl HomeScene {
    pub fn mount(
        user: UserProfile,
        animation_size: f32,
        renderer: &dyn AnimationRenderer,
        waker: Option<RepaintWaker>,
    ) -> Self {
        let stars = generate(HOME_STAR_COUNT, &mut rand::rng());
        let roster = mock_roster();
        let orbit = OrbitLayout::new(&roster, orbit_radius(animation_size));
        let animation = renderer.load(
            HOME_ANIMATION_SOURCE,
            AnimationOptions {
                scale: ANIMATION_HOME_SCALE,
                ..Default::default()
            },
        );

        // Clock text is valid from the first frame, ticks replace it afterwards
        let current_time = format_clock(LocalClock.now());
        let clock = match ClockTicker::start_local(waker) {
            Ok(ticker) => Some(ticker),
            Err(e) => {
                log::error!("[Scene] Failed to start clock: {}", e);
                None
            }
        };

        log::info!(
            "[Scene] Home mounted for {} ({} stars, {} orbiting)",
            user.email,
            stars.len(),
            roster.len()
        );

        Self {
            user,
            stars,
            roster,
            orbit,
            current_time,
            animation,
            clock,
            mounted_at: Instant::now(),
        }
    }

    pub fn is_loading_overlay_visible(&self) -> bool {
        self.overlay_visible_at(Instant::now())
    }

    fn overlay_visible_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.mounted_at)
            < Duration::from_millis(HOME_LOADING_OVERLAY_MILLIS)
    }

    /// Re-lay out the orbit after an animation size change
    pub fn sync_orbit(&mut self, animation_size: f32) {
        if self.orbit.update_radius(&self.roster, orbit_radius(animation_size)) {
            log::debug!("[Scene] Orbit radius now {:.0}px", self.orbit.radius());
        }
    }

    /// Pull the latest clock tick into `current_time`
    pub fn poll_clock(&mut self) {
        if let Some(ticker) = self.clock.as_mut() {
            if let Some(tick) = ticker.poll() {
                if tick.as_str() != self.current_time {
                    self.current_time = tick.as_str().to_string();
                }
            }
        }
        // No ticker thread: read the wall clock on each frame instead
        if !self.is_clock_running() {
            let now = format_clock(LocalClock.now());
            if now != self.current_time {
                self.current_time = now;
            }
        }
    }

    pub fn is_clock_running(&self) -> bool {
        self.clock.as_ref().is_some_and(ClockTicker::is_running)
    }
}

impl Drop for HomeScene {
    fn drop(&mut self) {
        if let Some(mut clock) = self.clock.take() {
            clock.stop();
        }
        if !self.animation.is_stopped() {
            self.animation.stop();
        }
        log::info!("[Scene] Home unmounted");
    }
}

pub fn orbit_radius(animation_size: f32) -> f32 {
    animation_size * ORBIT_RADIUS_FACTOR
}

/// The scene currently mounted in the window
pub enum MountedScene {
    Loading,
    Login(LoginScene),
    Home(Box<HomeScene>),
}

impl MountedScene {
    /// True when this mount already renders `scene` (same kind, same user)
    pub fn matches(&self, scene: &Scene) -> bool {
        match (self, scene) {
            (MountedScene::Loading, Scene::Loading) => true,
            (MountedScene::Login(_), Scene::Login) => true,
            (MountedScene::Home(home), Scene::Home(user)) => home.user == *user,
            _ => false,
        }
    }
}
