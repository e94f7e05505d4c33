use crate::constants::HTTP_TIMEOUT_SECS;
use once_cell::sync::Lazy;
use std::time::Duration;

static CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .user_agent(concat!("X11Cosmos/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|e| {
            log::warn!("[Http] Falling back to default client: {}", e);
            reqwest::Client::new()
        })
});

/// Shared async HTTP client (connection pool reused across tasks)
pub fn client() -> &'static reqwest::Client {
    &CLIENT
}
