use super::{AuthFuture, IdentityProvider};
use crate::constants::DEMO_SIGN_IN_DELAY_MILLIS;
use crate::models::UserProfile;
use futures_util::FutureExt;
use std::time::Duration;

/// Offline provider: signs in a fixed explorer after a short delay
pub struct DemoIdentityProvider {
    profile: UserProfile,
    delay: Duration,
}

impl Default for DemoIdentityProvider {
    fn default() -> Self {
        Self::with_profile(
            UserProfile {
                user_id: "demo-explorer".to_string(),
                display_name: Some("Demo Explorer".to_string()),
                email: "explorer@x11.local".to_string(),
                avatar_url: None,
            },
            Duration::from_millis(DEMO_SIGN_IN_DELAY_MILLIS),
        )
    }
}

impl DemoIdentityProvider {
    pub fn with_profile(profile: UserProfile, delay: Duration) -> Self {
        Self { profile, delay }
    }
}

impl IdentityProvider for DemoIdentityProvider {
    fn name(&self) -> &'static str {
        "demo"
    }

    fn restore(&self) -> AuthFuture<Option<UserProfile>> {
        async { Ok(None) }.boxed()
    }

    fn sign_in(&self) -> AuthFuture<UserProfile> {
        let profile = self.profile.clone();
        let delay = self.delay;
        async move {
            tokio::time::sleep(delay).await;
            log::info!("[Demo] Signed in as {}", profile.email);
            Ok(profile)
        }
        .boxed()
    }

    fn sign_out(&self) -> AuthFuture<()> {
        async {
            log::info!("[Demo] Signed out");
            Ok(())
        }
        .boxed()
    }
}
