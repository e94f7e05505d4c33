// Identity provider clients

pub mod demo;
pub mod google;

use crate::models::UserProfile;
use crate::utils::async_helper::AsyncTask;
use crate::utils::AuthError;
use std::sync::Arc;

pub use demo::DemoIdentityProvider;
pub use google::GoogleIdentityProvider;

/// Boxed provider round trip
pub type AuthFuture<T> = AsyncTask<T, AuthError>;

/// External identity provider boundary.
///
/// Futures are `'static + Send` so they can run on a background runtime;
/// implementations clone whatever state they need into the future.
pub trait IdentityProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Previous session, if the provider can bring one back without user interaction
    fn restore(&self) -> AuthFuture<Option<UserProfile>>;

    fn sign_in(&self) -> AuthFuture<UserProfile>;

    /// Abandon the interactive sign-in in flight, if any
    fn cancel_sign_in(&self) {}

    fn sign_out(&self) -> AuthFuture<()>;
}

/// Pick the provider: `X11_PROVIDER` wins, otherwise Google when a client id was compiled in
pub fn select_provider(client_id: &str, client_secret: &str) -> Arc<dyn IdentityProvider> {
    let requested = std::env::var(crate::constants::PROVIDER_ENV_VAR)
        .ok()
        .map(|v| v.trim().to_lowercase());

    let use_google = match requested.as_deref() {
        Some("demo") => false,
        Some("google") => true,
        Some(other) => {
            log::warn!("[Auth] Unknown provider '{}', using default selection", other);
            !client_id.trim().is_empty()
        }
        None => !client_id.trim().is_empty(),
    };

    if use_google {
        log::info!("[Auth] Using Google identity provider");
        Arc::new(GoogleIdentityProvider::new(
            client_id.to_string(),
            client_secret.to_string(),
        ))
    } else {
        log::info!("[Auth] No Google client configured - using demo identity provider");
        Arc::new(DemoIdentityProvider::default())
    }
}
