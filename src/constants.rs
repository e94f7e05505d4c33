//! Application constants and configuration values

// === Scenes ===
pub const LOGIN_STAR_COUNT: usize = 80;
pub const HOME_STAR_COUNT: usize = 150;
pub const HOME_LOADING_OVERLAY_MILLIS: u64 = 800;
pub const LOGIN_CONSTELLATION_LINES: usize = 15;

// Rendered star radius = descriptor size * this scale (descriptor sizes are sub-pixel)
pub const STAR_PIXEL_SCALE: f32 = 2.2;
// Upper bound of the per-star twinkle phase offset
pub const STAR_TWINKLE_MAX_DELAY_SECS: f32 = 5.0;

// === Central animation & orbit ===
pub const ANIMATION_SIZE_DEFAULT: f32 = 120.0;
pub const ANIMATION_SIZE_MIN: f32 = 50.0;
pub const ANIMATION_SIZE_MAX: f32 = 300.0;
pub const ANIMATION_SIZE_STEP: f32 = 20.0;
pub const ANIMATION_HOME_SCALE: f32 = 0.5;

// Ring diameters as multiples of the animation size
pub const ORBITAL_RING_FACTORS: [f32; 3] = [1.5, 2.0, 2.5];
pub const FLOATING_PARTICLE_COUNT: usize = 12;
pub const FLOATING_PARTICLE_RADIUS_FACTOR: f32 = 0.75;
pub const FLOATING_PARTICLE_SPIN_DEG_PER_SEC: f32 = 12.0;

// Avatar tiles sit on the outermost ring
pub const ORBIT_RADIUS_FACTOR: f32 = 1.25;
pub const ORBIT_TILE_RADIUS: f32 = 20.0;

pub const LOGIN_ANIMATION_SOURCE: &str = "lottie/X11-login.json";
pub const HOME_ANIMATION_SOURCE: &str = "lottie/X11-cosmic.json";
pub const ASSETS_DIR: &str = "assets";

// === Clock ===
pub const CLOCK_TICK_INTERVAL_MILLIS: u64 = 1000;
pub const CLOCK_FORMAT: &str = "%H:%M:%S";

// === Frame pacing ===
pub const REPAINT_INTERVAL_IDLE_MILLIS: u64 = 33; // ~30 FPS for twinkle and orbit motion

// === OAuth (Google, installed-app loopback flow) ===
pub const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const GOOGLE_REVOKE_URL: &str = "https://oauth2.googleapis.com/revoke";
pub const GOOGLE_USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";
pub const GOOGLE_SCOPES: &str = "openid email profile";
pub const OAUTH_LOOPBACK_HOST: &str = "127.0.0.1";
pub const OAUTH_CALLBACK_TIMEOUT_SECS: u64 = 300;
pub const OAUTH_POLL_INTERVAL_MILLIS: u64 = 250;
pub const HTTP_TIMEOUT_SECS: u64 = 20;
pub const DEMO_SIGN_IN_DELAY_MILLIS: u64 = 600;

// === Session storage ===
pub const APP_CONFIG_DIR: &str = "X11Cosmos";
pub const SESSION_FILE_NAME: &str = "session.json";

// Runtime override for provider selection: "google" | "demo"
pub const PROVIDER_ENV_VAR: &str = "X11_PROVIDER";
