/// Google OAuth 2.0 for installed apps: loopback redirect + PKCE.
///
/// Flow: bind a one-shot listener on 127.0.0.1:<ephemeral>, open the consent
/// page in the system browser, wait for the redirect carrying `code`, then
/// exchange it (with the PKCE verifier) for tokens.
use crate::constants::*;
use crate::models::UserProfile;
use crate::utils::errors::AuthError;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct OAuthConfig {
    pub client_id: String,
    pub client_secret: String,
}

impl OAuthConfig {
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self {
            client_id,
            client_secret,
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.client_id.trim().is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct PkcePair {
    pub verifier: String,
    pub challenge: String,
}

/// S256 code challenge for a verifier
pub fn challenge_for(verifier: &str) -> String {
    URL_SAFE_NO_PAD.encode(Sha256::digest(verifier.as_bytes()))
}

pub fn generate_pkce() -> PkcePair {
    let bytes: [u8; 32] = rand::random();
    let verifier = URL_SAFE_NO_PAD.encode(bytes);
    let challenge = challenge_for(&verifier);
    PkcePair {
        verifier,
        challenge,
    }
}

/// Anti-forgery value echoed back on the redirect
pub fn random_state() -> String {
    let bytes: [u8; 16] = rand::random();
    URL_SAFE_NO_PAD.encode(bytes)
}

pub fn build_auth_url(config: &OAuthConfig, redirect_uri: &str, challenge: &str, state: &str) -> String {
    format!(
        "{}?client_id={}&redirect_uri={}&response_type=code&scope={}&code_challenge={}&code_challenge_method=S256&state={}&access_type=offline&prompt=select_account",
        GOOGLE_AUTH_URL,
        urlencoding::encode(&config.client_id),
        urlencoding::encode(redirect_uri),
        urlencoding::encode(GOOGLE_SCOPES),
        urlencoding::encode(challenge),
        urlencoding::encode(state),
    )
}

fn parse_query(url: &str) -> HashMap<String, String> {
    let query = url.split_once('?').map(|(_, q)| q).unwrap_or("");
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .map(|(k, v)| {
            let value = urlencoding::decode(&v.replace('+', " "))
                .map(|c| c.into_owned())
                .unwrap_or_else(|_| v.to_string());
            (k.to_string(), value)
        })
        .collect()
}

/// Extract the authorization code from the redirect request line
pub fn parse_callback(url: &str, expected_state: &str) -> Result<String, AuthError> {
    let params = parse_query(url);

    if let Some(error) = params.get("error") {
        return Err(AuthError::Denied(error.clone()));
    }
    if params.get("state").map(String::as_str) != Some(expected_state) {
        return Err(AuthError::StateMismatch);
    }
    params
        .get("code")
        .filter(|code| !code.is_empty())
        .cloned()
        .ok_or_else(|| AuthError::Callback("missing authorization code".to_string()))
}

const CALLBACK_PAGE_OK: &str = "<html><body style=\"background:#05060f;color:#e8e6ff;font-family:sans-serif;text-align:center;padding-top:80px\"><h2>Welcome, Explorer</h2><p>You can close this window and return to X-11.</p></body></html>";
const CALLBACK_PAGE_FAILED: &str = "<html><body style=\"background:#05060f;color:#ffb4b4;font-family:sans-serif;text-align:center;padding-top:80px\"><h2>Sign-in failed</h2><p>Return to X-11 and try again.</p></body></html>";

fn respond_html(request: tiny_http::Request, status: u16, body: &str) {
    let mut response = tiny_http::Response::from_string(body).with_status_code(status);
    if let Ok(header) = "Content-Type: text/html; charset=utf-8".parse::<tiny_http::Header>() {
        response = response.with_header(header);
    }
    if let Err(e) = request.respond(response) {
        log::warn!("[OAuth] Failed to answer browser: {}", e);
    }
}

/// Block until the browser hits the loopback listener, `timeout` elapses or
/// `cancel` is raised (checked every poll interval)
pub fn wait_for_callback(
    server: &tiny_http::Server,
    expected_state: &str,
    timeout: Duration,
    cancel: &AtomicBool,
) -> Result<String, AuthError> {
    let deadline = Instant::now() + timeout;

    while Instant::now() < deadline {
        if cancel.load(Ordering::Relaxed) {
            log::info!("[OAuth] Sign-in cancelled, closing loopback listener");
            return Err(AuthError::Cancelled);
        }
        let request = match server.recv_timeout(Duration::from_millis(OAUTH_POLL_INTERVAL_MILLIS))? {
            Some(request) => request,
            None => continue,
        };

        let url = request.url().to_string();
        // Browsers also ask for /favicon.ico and friends
        if !url.starts_with("/?") && url != "/" {
            respond_html(request, 404, "");
            continue;
        }

        let outcome = parse_callback(&url, expected_state);
        match &outcome {
            Ok(_) => respond_html(request, 200, CALLBACK_PAGE_OK),
            Err(_) => respond_html(request, 400, CALLBACK_PAGE_FAILED),
        }
        return outcome;
    }

    Err(AuthError::Timeout)
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoogleUserInfo {
    sub: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    picture: Option<String>,
}

impl From<GoogleUserInfo> for UserProfile {
    fn from(info: GoogleUserInfo) -> Self {
        UserProfile {
            user_id: info.sub,
            display_name: info.name,
            email: info.email.unwrap_or_default(),
            avatar_url: info.picture,
        }
    }
}

async fn post_token_form(form: &[(&str, &str)]) -> Result<TokenResponse, AuthError> {
    let resp = crate::utils::http::client()
        .post(GOOGLE_TOKEN_URL)
        .form(form)
        .send()
        .await?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        return Err(AuthError::Token(format!("{} {}", status, body.trim())));
    }
    let tokens = resp.json::<TokenResponse>().await?;
    if let Some(secs) = tokens.expires_in {
        log::debug!("[OAuth] Access token valid for {}s", secs);
    }
    Ok(tokens)
}

pub async fn exchange_code(
    config: &OAuthConfig,
    code: &str,
    verifier: &str,
    redirect_uri: &str,
) -> Result<TokenResponse, AuthError> {
    post_token_form(&[
        ("code", code),
        ("client_id", config.client_id.as_str()),
        ("client_secret", config.client_secret.as_str()),
        ("redirect_uri", redirect_uri),
        ("grant_type", "authorization_code"),
        ("code_verifier", verifier),
    ])
    .await
}

pub async fn refresh_access_token(
    config: &OAuthConfig,
    refresh_token: &str,
) -> Result<TokenResponse, AuthError> {
    post_token_form(&[
        ("client_id", config.client_id.as_str()),
        ("client_secret", config.client_secret.as_str()),
        ("refresh_token", refresh_token),
        ("grant_type", "refresh_token"),
    ])
    .await
}

/// Revoke an access or refresh token (revoking the refresh token ends the grant)
pub async fn revoke_token(token: &str) -> Result<(), AuthError> {
    let resp = crate::utils::http::client()
        .post(GOOGLE_REVOKE_URL)
        .form(&[("token", token)])
        .send()
        .await?;

    // 400 invalid_token means it is already gone
    if resp.status().is_success() || resp.status() == reqwest::StatusCode::BAD_REQUEST {
        Ok(())
    } else {
        Err(AuthError::Token(format!("revoke returned {}", resp.status())))
    }
}

pub async fn fetch_user_info(access_token: &str) -> Result<UserProfile, AuthError> {
    let resp = crate::utils::http::client()
        .get(GOOGLE_USERINFO_URL)
        .bearer_auth(access_token)
        .send()
        .await?
        .error_for_status()?;

    let info = resp.json::<GoogleUserInfo>().await?;
    log::debug!("[OAuth] Userinfo received for sub={}", info.sub);
    Ok(info.into())
}

/// Full interactive flow: browser consent -> loopback redirect -> token exchange
pub async fn authorize(
    config: &OAuthConfig,
    cancel: Arc<AtomicBool>,
) -> Result<TokenResponse, AuthError> {
    if !config.is_configured() {
        return Err(AuthError::NotConfigured);
    }

    let server = tiny_http::Server::http((OAUTH_LOOPBACK_HOST, 0))
        .map_err(|e| AuthError::Io(std::io::Error::other(e.to_string())))?;
    let port = server
        .server_addr()
        .to_ip()
        .map(|addr| addr.port())
        .ok_or_else(|| AuthError::Callback("loopback listener has no port".to_string()))?;
    let redirect_uri = format!("http://{}:{}", OAUTH_LOOPBACK_HOST, port);

    let pkce = generate_pkce();
    let state = random_state();
    let url = build_auth_url(config, &redirect_uri, &pkce.challenge, &state);

    log::info!("[OAuth] Opening browser for Google sign-in (callback on port {})", port);
    webbrowser::open(&url).map_err(|e| AuthError::Browser(e.to_string()))?;

    let timeout = Duration::from_secs(OAUTH_CALLBACK_TIMEOUT_SECS);
    let code = tokio::task::spawn_blocking(move || wait_for_callback(&server, &state, timeout, &cancel))
        .await
        .map_err(|e| AuthError::Io(std::io::Error::other(e.to_string())))??;

    log::info!("[OAuth] Authorization code received, exchanging for tokens");
    exchange_code(config, &code, &pkce.verifier, &redirect_uri).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn challenge_matches_rfc7636_example() {
        // RFC 7636 appendix B
        let verifier = "dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk";
        assert_eq!(
            challenge_for(verifier),
            "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM"
        );
    }

    #[test]
    fn generated_pkce_is_consistent() {
        let pkce = generate_pkce();
        assert_eq!(pkce.verifier.len(), 43);
        assert_eq!(challenge_for(&pkce.verifier), pkce.challenge);
        assert_ne!(generate_pkce().verifier, pkce.verifier);
    }

    #[test]
    fn auth_url_carries_encoded_parameters() {
        let config = OAuthConfig::new("abc.apps.googleusercontent.com".into(), String::new());
        let url = build_auth_url(&config, "http://127.0.0.1:5555", "chal", "st");
        assert!(url.starts_with(GOOGLE_AUTH_URL));
        assert!(url.contains("redirect_uri=http%3A%2F%2F127.0.0.1%3A5555"));
        assert!(url.contains("scope=openid%20email%20profile"));
        assert!(url.contains("code_challenge_method=S256"));
        assert!(url.contains("state=st"));
    }

    #[test]
    fn callback_with_code_and_state() {
        let code = parse_callback("/?state=xyz&code=4%2F0Abc&scope=email", "xyz").unwrap();
        assert_eq!(code, "4/0Abc");
    }

    #[test]
    fn callback_errors() {
        assert!(matches!(
            parse_callback("/?error=access_denied&state=xyz", "xyz"),
            Err(AuthError::Denied(e)) if e == "access_denied"
        ));
        assert!(matches!(
            parse_callback("/?state=other&code=c", "xyz"),
            Err(AuthError::StateMismatch)
        ));
        assert!(matches!(
            parse_callback("/?state=xyz", "xyz"),
            Err(AuthError::Callback(_))
        ));
    }

    #[test]
    fn unconfigured_client_is_rejected() {
        assert!(!OAuthConfig::new("  ".into(), String::new()).is_configured());
        let rt = crate::utils::error_handling::create_runtime().unwrap();
        let cancel = Arc::new(AtomicBool::new(false));
        let result = rt.block_on(authorize(&OAuthConfig::new(String::new(), String::new()), cancel));
        assert!(matches!(result, Err(AuthError::NotConfigured)));
    }

    #[test]
    fn raised_cancel_flag_ends_the_wait() {
        let server = tiny_http::Server::http((OAUTH_LOOPBACK_HOST, 0)).unwrap();
        let cancel = AtomicBool::new(true);
        let started = Instant::now();

        let result = wait_for_callback(&server, "st", Duration::from_secs(30), &cancel);
        assert!(matches!(result, Err(AuthError::Cancelled)));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn cancel_raised_while_waiting_ends_the_wait() {
        let server = tiny_http::Server::http((OAUTH_LOOPBACK_HOST, 0)).unwrap();
        let cancel = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancel);
        let raiser = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(100));
            flag.store(true, Ordering::Relaxed);
        });

        let result = wait_for_callback(&server, "st", Duration::from_secs(30), &cancel);
        raiser.join().unwrap();
        assert!(matches!(result, Err(AuthError::Cancelled)));
    }

    #[test]
    fn userinfo_maps_to_profile() {
        let info: GoogleUserInfo = serde_json::from_str(
            r#"{"sub":"1087","name":"Vega Nova","email":"vega@example.com","picture":"https://lh3.example/p.jpg"}"#,
        )
        .unwrap();
        let profile = UserProfile::from(info);
        assert_eq!(profile.user_id, "1087");
        assert_eq!(profile.display_name.as_deref(), Some("Vega Nova"));
        assert_eq!(profile.email, "vega@example.com");
        assert_eq!(profile.avatar_url.as_deref(), Some("https://lh3.example/p.jpg"));
    }
}
