/// On-disk refresh token so a previous session can be restored on launch.
use crate::constants::{APP_CONFIG_DIR, SESSION_FILE_NAME};
use crate::utils::errors::AuthError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredSession {
    pub refresh_token: String,
    pub saved_at: u64, // unix seconds
}

impl StoredSession {
    pub fn new(refresh_token: String) -> Self {
        let saved_at = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self {
            refresh_token,
            saved_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// `<config_dir>/X11Cosmos/session.json`, None when the platform has no config dir
    pub fn default_location() -> Option<Self> {
        dirs::config_dir().map(|dir| Self::at(dir.join(APP_CONFIG_DIR).join(SESSION_FILE_NAME)))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Option<StoredSession>, AuthError> {
        match std::fs::read_to_string(&self.path) {
            Ok(json) => Ok(Some(serde_json::from_str(&json)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, session: &StoredSession) -> Result<(), AuthError> {
        if let Some(parent) = self.path.parent() {
            create_private_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(session)?;
        if let Err(e) = write_private(&self.path, json.as_bytes()) {
            // Never leave a partial or wrongly-permissioned token behind
            if let Err(remove_err) = std::fs::remove_file(&self.path) {
                if remove_err.kind() != std::io::ErrorKind::NotFound {
                    log::warn!("[TokenStore] Could not remove {}: {}", self.path.display(), remove_err);
                }
            }
            return Err(e.into());
        }
        log::debug!("[TokenStore] Session saved to {}", self.path.display());
        Ok(())
    }

    pub fn clear(&self) -> Result<(), AuthError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(unix)]
fn create_private_dir(dir: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    std::fs::DirBuilder::new().recursive(true).mode(0o700).create(dir)
}

#[cfg(not(unix))]
fn create_private_dir(dir: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(dir)
}

/// Owner-only from the moment the file exists; the mode is narrowed again
/// before writing in case an older file with wider permissions is reused
#[cfg(unix)]
fn write_private(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    file.write_all(bytes)?;
    file.sync_all()
}

#[cfg(not(unix))]
fn write_private(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    std::fs::write(path, bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::at(dir.path().join("nested").join("session.json"));
        assert!(store.load().unwrap().is_none());
        store.clear().unwrap();
    }

    #[test]
    fn save_load_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::at(dir.path().join("X11Cosmos").join("session.json"));

        let session = StoredSession::new("1//refresh".to_string());
        store.save(&session).unwrap();
        assert_eq!(store.load().unwrap(), Some(session));

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn saved_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::at(dir.path().join("X11Cosmos").join("session.json"));
        store.save(&StoredSession::new("1//refresh".to_string())).unwrap();

        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        let dir_mode = std::fs::metadata(dir.path().join("X11Cosmos")).unwrap().permissions().mode();
        assert_eq!(dir_mode & 0o077, 0);
    }

    #[cfg(unix)]
    #[test]
    fn existing_readable_file_is_narrowed_on_save() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{}").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        let store = TokenStore::at(&path);
        store.save(&StoredSession::new("1//rotated".to_string())).unwrap();

        assert_eq!(std::fs::metadata(&path).unwrap().permissions().mode() & 0o777, 0o600);
        assert_eq!(store.load().unwrap().unwrap().refresh_token, "1//rotated");
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(TokenStore::at(path).load(), Err(AuthError::Json(_))));
    }
}
