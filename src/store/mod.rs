//! Durable credential storage.
//!
//! The store is the single owner of every credential the client holds: the
//! administrator session and one token per `(role, election)` pair. It is
//! deliberately dumb: `set`/`get`/`clear` on string keys, no business
//! logic, so the session, scoped-access, dispatch, and gate layers can all
//! be handed the same instance and tested against an in-memory substitute.
//!
//! A corrupt or unreadable credential file is never an error for callers:
//! it loads as empty and every read degrades to "absent".

use crate::scoped::Role;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};
use tracing::{error, warn};

/// Storage key for the administrator's short-lived bearer token.
pub const ADMIN_ACCESS_TOKEN_KEY: &str = "admin-access-token";
/// Storage key for the administrator's long-lived refresh token.
pub const ADMIN_REFRESH_TOKEN_KEY: &str = "admin-refresh-token";
/// Storage key for the administrator profile, encoded as JSON text.
pub const ADMIN_PROFILE_KEY: &str = "admin-profile";

/// Storage key for the token scoped to one role and one election.
#[must_use]
pub fn scoped_token_key(role: Role, election_id: &str) -> String {
    format!("scoped-token:{role}:{election_id}")
}

/// Process-wide persisted key/value state for credentials.
///
/// Writes are immediately visible to subsequent reads within the process.
pub trait CredentialStore: Send + Sync {
    fn set(&self, key: &str, value: &str);
    fn get(&self, key: &str) -> Option<String>;
    fn clear(&self, key: &str);
}

/// File-backed store, durable across process restarts.
///
/// The file holds a single JSON object of string keys and values. It is
/// loaded once on open; every write rewrites it. Persistence is best-effort:
/// a failed write is logged and the in-memory state stays authoritative, so
/// in-process visibility never depends on the disk.
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileStore {
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let entries = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<HashMap<String, String>>(&raw) {
                Ok(entries) => entries,
                Err(err) => {
                    warn!("Ignoring corrupt credential file {}: {err}", path.display());
                    HashMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => {
                warn!("Unable to read credential file {}: {err}", path.display());
                HashMap::new()
            }
        };

        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    fn persist(&self, entries: &HashMap<String, String>) {
        let encoded = match serde_json::to_string_pretty(entries) {
            Ok(encoded) => encoded,
            Err(err) => {
                error!("Failed to encode credentials: {err}");
                return;
            }
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(err) = fs::create_dir_all(parent) {
                    error!("Failed to create {}: {err}", parent.display());
                    return;
                }
            }
        }

        if let Err(err) = fs::write(&self.path, encoded) {
            error!(
                "Failed to persist credentials to {}: {err}",
                self.path.display()
            );
        }
    }
}

impl CredentialStore for FileStore {
    fn set(&self, key: &str, value: &str) {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries);
    }

    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn clear(&self, key: &str) {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        self.persist(&entries);
    }
}

/// In-memory store with the same contract, for tests and substitution.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryStore {
    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
    }

    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn clear(&self, key: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}
