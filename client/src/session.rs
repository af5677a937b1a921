//! Persisted session state
//!
//! Three entries survive between runs: the access token, the refresh token
//! and the cached user JSON. Key names follow the backend flavor so a
//! session file written by one app is never mistaken for the other's.
//!
//! # Design Principles
//!
//! 1. **Synchronous store**: writes finish before the caller continues
//! 2. **Atomic clear**: all three entries go in a single write
//! 3. **Secrets stay wrapped**: tokens leave the store as `SecretString`

use crate::api::AppFlavor;
use crate::error::{ClientError, ClientResult};
use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};
use tracker_shared::models::User;

/// Session entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionKey {
    AccessToken,
    RefreshToken,
    User,
}

impl SessionKey {
    pub const ALL: [SessionKey; 3] = [
        SessionKey::AccessToken,
        SessionKey::RefreshToken,
        SessionKey::User,
    ];

    /// Persisted key name for a flavor
    pub fn name(&self, flavor: AppFlavor) -> &'static str {
        match (flavor, self) {
            (AppFlavor::Skillup, SessionKey::AccessToken) => "accessToken",
            (AppFlavor::Skillup, SessionKey::RefreshToken) => "refreshToken",
            (AppFlavor::Fitness, SessionKey::AccessToken) => "access_token",
            (AppFlavor::Fitness, SessionKey::RefreshToken) => "refresh_token",
            (_, SessionKey::User) => "user",
        }
    }
}

/// Key-value store behind the session
pub trait SessionStore: Send + Sync {
    fn get(&self, key: SessionKey) -> Option<String>;

    fn set(&self, key: SessionKey, value: &str) -> ClientResult<()>;

    fn remove(&self, key: SessionKey) -> ClientResult<()>;

    /// Remove every session entry at once
    fn clear(&self) -> ClientResult<()>;

    fn access_token(&self) -> Option<SecretString> {
        self.get(SessionKey::AccessToken).map(SecretString::new)
    }

    fn refresh_token(&self) -> Option<SecretString> {
        self.get(SessionKey::RefreshToken).map(SecretString::new)
    }

    /// Cached user; an unreadable entry counts as absent
    fn cached_user(&self) -> Option<User> {
        let raw = self.get(SessionKey::User)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!("Ignoring unreadable cached user: {}", e);
                None
            }
        }
    }

    fn store_tokens(&self, access: &SecretString, refresh: &SecretString) -> ClientResult<()> {
        self.set(SessionKey::AccessToken, access.expose_secret())?;
        self.set(SessionKey::RefreshToken, refresh.expose_secret())
    }

    fn store_user(&self, user: &User) -> ClientResult<()> {
        let raw = serde_json::to_string(user)
            .map_err(|e| ClientError::Session(format!("Failed to encode user: {}", e)))?;
        self.set(SessionKey::User, &raw)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> ClientResult<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| ClientError::Session("Session store lock poisoned".to_string()))
}

// ============================================================================
// In-memory store
// ============================================================================

/// Store that lives for the process only
#[derive(Debug)]
pub struct MemoryStore {
    flavor: AppFlavor,
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new(flavor: AppFlavor) -> Self {
        Self {
            flavor,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Raw entries by persisted key name
    pub fn snapshot(&self) -> HashMap<String, String> {
        lock(&self.entries).map(|e| e.clone()).unwrap_or_default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: SessionKey) -> Option<String> {
        lock(&self.entries).ok()?.get(key.name(self.flavor)).cloned()
    }

    fn set(&self, key: SessionKey, value: &str) -> ClientResult<()> {
        lock(&self.entries)?.insert(key.name(self.flavor).to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: SessionKey) -> ClientResult<()> {
        lock(&self.entries)?.remove(key.name(self.flavor));
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        let mut entries = lock(&self.entries)?;
        for key in SessionKey::ALL {
            entries.remove(key.name(self.flavor));
        }
        Ok(())
    }
}

// ============================================================================
// File store
// ============================================================================

/// Store persisted as one JSON object on disk
///
/// Every write replaces the file through a temp file and rename.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    flavor: AppFlavor,
    guard: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>, flavor: AppFlavor) -> Self {
        Self {
            path: path.into(),
            flavor,
            guard: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> ClientResult<HashMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(HashMap::new()),
            Ok(raw) => serde_json::from_str(&raw).map_err(|e| {
                ClientError::Session(format!(
                    "Session file {} is corrupt: {}",
                    self.path.display(),
                    e
                ))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(ClientError::Session(format!(
                "Failed to read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    fn write(&self, entries: &HashMap<String, String>) -> ClientResult<()> {
        let io_error = |e: std::io::Error| {
            ClientError::Session(format!("Failed to write {}: {}", self.path.display(), e))
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }

        let raw = serde_json::to_string_pretty(entries)
            .map_err(|e| ClientError::Session(format!("Failed to encode session: {}", e)))?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, raw).map_err(io_error)?;
        fs::rename(&tmp, &self.path).map_err(io_error)?;
        debug!(path = %self.path.display(), entries = entries.len(), "Session saved");
        Ok(())
    }

    fn update<F>(&self, change: F) -> ClientResult<()>
    where
        F: FnOnce(&mut HashMap<String, String>),
    {
        let _guard = lock(&self.guard)?;
        let mut entries = self.read()?;
        change(&mut entries);
        self.write(&entries)
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: SessionKey) -> Option<String> {
        let _guard = lock(&self.guard).ok()?;
        match self.read() {
            Ok(mut entries) => entries.remove(key.name(self.flavor)),
            Err(e) => {
                warn!("{}", e);
                None
            }
        }
    }

    fn set(&self, key: SessionKey, value: &str) -> ClientResult<()> {
        let name = key.name(self.flavor);
        self.update(|entries| {
            entries.insert(name.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: SessionKey) -> ClientResult<()> {
        let name = key.name(self.flavor);
        self.update(|entries| {
            entries.remove(name);
        })
    }

    fn clear(&self) -> ClientResult<()> {
        let flavor = self.flavor;
        self.update(|entries| {
            for key in SessionKey::ALL {
                entries.remove(key.name(flavor));
            }
        })
    }
}
