use super::{AuthFuture, IdentityProvider};
use crate::models::UserProfile;
use crate::utils::error_handling::safe_lock;
use crate::utils::oauth::{self, OAuthConfig};
use crate::utils::token_store::{StoredSession, TokenStore};
use crate::utils::AuthError;
use futures_util::FutureExt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Tokens of the live session, kept so sign-out can revoke them
#[derive(Debug, Default, Clone)]
struct LiveTokens {
    access_token: Option<String>,
    refresh_token: Option<String>,
}

/// Google sign-in through the system browser
pub struct GoogleIdentityProvider {
    config: OAuthConfig,
    store: Option<TokenStore>,
    tokens: Arc<Mutex<LiveTokens>>,
    // Cancel flag of the latest interactive sign-in
    pending_cancel: Mutex<Arc<AtomicBool>>,
}

impl GoogleIdentityProvider {
    pub fn new(client_id: String, client_secret: String) -> Self {
        let store = TokenStore::default_location();
        match &store {
            Some(store) => log::debug!("[Google] Session file: {}", store.path().display()),
            None => log::warn!("[Google] No config directory - sessions will not be remembered"),
        }
        Self::with_store(OAuthConfig::new(client_id, client_secret), store)
    }

    pub fn with_store(config: OAuthConfig, store: Option<TokenStore>) -> Self {
        Self {
            config,
            store,
            tokens: Arc::new(Mutex::new(LiveTokens::default())),
            pending_cancel: Mutex::new(Arc::new(AtomicBool::new(false))),
        }
    }
}

impl IdentityProvider for GoogleIdentityProvider {
    fn name(&self) -> &'static str {
        "google"
    }

    fn restore(&self) -> AuthFuture<Option<UserProfile>> {
        restore_session(
            self.config.clone(),
            self.store.clone(),
            Arc::clone(&self.tokens),
        )
        .boxed()
    }

    fn sign_in(&self) -> AuthFuture<UserProfile> {
        let cancel = Arc::new(AtomicBool::new(false));
        *safe_lock(&self.pending_cancel, "Google") = Arc::clone(&cancel);
        interactive_sign_in(
            self.config.clone(),
            self.store.clone(),
            Arc::clone(&self.tokens),
            cancel,
        )
        .boxed()
    }

    fn cancel_sign_in(&self) {
        safe_lock(&self.pending_cancel, "Google").store(true, Ordering::Relaxed);
        log::info!("[Google] Sign-in cancel requested");
    }

    fn sign_out(&self) -> AuthFuture<()> {
        revoke_session(self.store.clone(), Arc::clone(&self.tokens)).boxed()
    }
}

async fn restore_session(
    config: OAuthConfig,
    store: Option<TokenStore>,
    tokens: Arc<Mutex<LiveTokens>>,
) -> Result<Option<UserProfile>, AuthError> {
    let Some(store) = store else {
        return Ok(None);
    };
    let Some(saved) = store.load()? else {
        log::info!("[Google] No saved session");
        return Ok(None);
    };
    if !config.is_configured() {
        return Ok(None);
    }

    log::info!("[Google] Restoring saved session");
    let refreshed = match oauth::refresh_access_token(&config, &saved.refresh_token).await {
        Ok(refreshed) => refreshed,
        Err(e) => return forget_if_rejected(&store, e),
    };
    let user = oauth::fetch_user_info(&refreshed.access_token).await?;

    let mut live = safe_lock(&tokens, "Google");
    live.access_token = Some(refreshed.access_token);
    live.refresh_token = Some(saved.refresh_token);
    Ok(Some(user))
}

/// A refresh token the endpoint refused will never work again; drop it so the
/// next launch goes straight to login instead of repeating the call
fn forget_if_rejected(
    store: &TokenStore,
    err: AuthError,
) -> Result<Option<UserProfile>, AuthError> {
    match err {
        AuthError::Token(reason) if is_rejected_grant(&reason) => {
            log::warn!("[Google] Saved session rejected ({}), forgetting it", reason);
            store.clear()?;
            Ok(None)
        }
        other => Err(other),
    }
}

fn is_rejected_grant(reason: &str) -> bool {
    reason.starts_with("400") || reason.starts_with("401") || reason.contains("invalid_grant")
}

async fn interactive_sign_in(
    config: OAuthConfig,
    store: Option<TokenStore>,
    tokens: Arc<Mutex<LiveTokens>>,
    cancel: Arc<AtomicBool>,
) -> Result<UserProfile, AuthError> {
    let granted = oauth::authorize(&config, cancel).await?;
    let user = oauth::fetch_user_info(&granted.access_token).await?;

    if let (Some(store), Some(refresh)) = (&store, &granted.refresh_token) {
        // Remembering the session is best effort
        if let Err(e) = store.save(&StoredSession::new(refresh.clone())) {
            log::warn!("[Google] Could not save session: {}", e);
        }
    }

    let mut live = safe_lock(&tokens, "Google");
    live.access_token = Some(granted.access_token);
    live.refresh_token = granted.refresh_token;
    log::info!("[Google] Signed in as {}", user.email);
    Ok(user)
}

async fn revoke_session(
    store: Option<TokenStore>,
    tokens: Arc<Mutex<LiveTokens>>,
) -> Result<(), AuthError> {
    let live = safe_lock(&tokens, "Google").clone();

    // Revoking the refresh token ends the whole grant
    if let Some(token) = live.refresh_token.or(live.access_token) {
        oauth::revoke_token(&token).await?;
    }
    if let Some(store) = &store {
        store.clear()?;
    }

    *safe_lock(&tokens, "Google") = LiveTokens::default();
    log::info!("[Google] Signed out");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unconfigured(store: Option<TokenStore>) -> GoogleIdentityProvider {
        GoogleIdentityProvider::with_store(OAuthConfig::new(String::new(), String::new()), store)
    }

    #[test]
    fn restore_without_saved_session_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let provider = unconfigured(Some(TokenStore::at(dir.path().join("session.json"))));
        let rt = crate::utils::error_handling::create_runtime().unwrap();
        assert!(rt.block_on(provider.restore()).unwrap().is_none());
    }

    #[test]
    fn sign_in_requires_client_id() {
        let provider = unconfigured(None);
        let rt = crate::utils::error_handling::create_runtime().unwrap();
        assert!(matches!(
            rt.block_on(provider.sign_in()),
            Err(AuthError::NotConfigured)
        ));
    }

    #[test]
    fn rejected_refresh_token_is_forgotten() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::at(dir.path().join("session.json"));
        store.save(&StoredSession::new("revoked".into())).unwrap();

        let rejected = AuthError::Token("400 Bad Request {\"error\": \"invalid_grant\"}".into());
        assert!(forget_if_rejected(&store, rejected).unwrap().is_none());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn transient_refresh_failure_keeps_saved_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::at(dir.path().join("session.json"));
        store.save(&StoredSession::new("still-good".into())).unwrap();

        let outage = AuthError::Token("503 Service Unavailable".into());
        assert!(matches!(forget_if_rejected(&store, outage), Err(AuthError::Token(_))));
        assert!(matches!(forget_if_rejected(&store, AuthError::Timeout), Err(AuthError::Timeout)));
        assert_eq!(store.load().unwrap().unwrap().refresh_token, "still-good");
    }

    #[test]
    fn each_sign_in_gets_a_fresh_cancel_flag() {
        let provider = unconfigured(None);
        let _first = provider.sign_in();
        provider.cancel_sign_in();
        assert!(safe_lock(&provider.pending_cancel, "test").load(Ordering::Relaxed));

        let _second = provider.sign_in();
        assert!(!safe_lock(&provider.pending_cancel, "test").load(Ordering::Relaxed));
    }

    #[test]
    fn sign_out_without_tokens_clears_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::at(dir.path().join("session.json"));
        store.save(&StoredSession::new("stale".into())).unwrap();

        let provider = unconfigured(Some(store.clone()));
        let rt = crate::utils::error_handling::create_runtime().unwrap();
        rt.block_on(provider.sign_out()).unwrap();
        assert!(store.load().unwrap().is_none());
    }
}
