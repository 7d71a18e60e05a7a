use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::session::{DEFAULT_STORE_FILENAME, MAX_STORED_UIDS, RECENT_UIDS_VERSION};
use crate::errors::AssemblyError;
use crate::types::Uid;

/// Persistence backend for the previous session's question uids.
///
/// Loading is deliberately infallible: a missing, corrupt, or outdated
/// store degrades to an empty history so assembly can always proceed.
pub trait SessionStore: Send + Sync {
    /// Return the uids remembered from the previous session.
    fn load_recent_uids(&self) -> HashSet<Uid>;
    /// Replace the remembered uids with those of the latest quiz.
    fn store_recent_uids(&self, uids: &[Uid]) -> Result<(), AssemblyError>;
}

/// In-memory session store for tests and single-process runs.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    uids: RwLock<Vec<Uid>>,
}

impl MemorySessionStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load_recent_uids(&self) -> HashSet<Uid> {
        self.uids
            .read()
            .map(|guard| guard.iter().cloned().collect())
            .unwrap_or_default()
    }

    fn store_recent_uids(&self, uids: &[Uid]) -> Result<(), AssemblyError> {
        let mut guard = self
            .uids
            .write()
            .map_err(|_| AssemblyError::SessionStore("lock poisoned".into()))?;
        *guard = uids.iter().take(MAX_STORED_UIDS).cloned().collect();
        Ok(())
    }
}

/// Versioned on-disk payload for [`FileSessionStore`].
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecentUidsFile {
    version: u32,
    saved_at: DateTime<Utc>,
    uids: Vec<Uid>,
}

/// File-backed session store for persistent runs.
///
/// The payload is a small versioned JSON document. Any load problem is
/// logged and treated as an empty history rather than surfaced.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Create a file-backed store at `path`.
    ///
    /// A directory path resolves to the default filename inside it.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: coerce_store_path(path.into()),
        }
    }

    /// Default session-store file path inside a custom directory.
    pub fn default_path_in_dir<P: AsRef<Path>>(dir: P) -> PathBuf {
        dir.as_ref().join(DEFAULT_STORE_FILENAME)
    }

    /// The file this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load_recent_uids(&self) -> HashSet<Uid> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return HashSet::new(),
            Err(err) => {
                warn!(path = %self.path.display(), %err, "could not read recent uids, starting fresh");
                return HashSet::new();
            }
        };
        let file: RecentUidsFile = match serde_json::from_str(&raw) {
            Ok(file) => file,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "corrupt recent uids payload, starting fresh");
                return HashSet::new();
            }
        };
        if file.version != RECENT_UIDS_VERSION {
            warn!(
                found = file.version,
                expected = RECENT_UIDS_VERSION,
                "recent uids version mismatch, starting fresh"
            );
            return HashSet::new();
        }
        file.uids.into_iter().collect()
    }

    fn store_recent_uids(&self, uids: &[Uid]) -> Result<(), AssemblyError> {
        ensure_parent_dir(&self.path)?;
        let mut kept: Vec<Uid> = uids.to_vec();
        kept.truncate(MAX_STORED_UIDS);
        let file = RecentUidsFile {
            version: RECENT_UIDS_VERSION,
            saved_at: Utc::now(),
            uids: kept,
        };
        let payload = serde_json::to_string_pretty(&file).map_err(|err| {
            AssemblyError::SessionStore(format!("failed to encode recent uids: {err}"))
        })?;
        fs::write(&self.path, payload)?;
        Ok(())
    }
}

fn coerce_store_path(path: PathBuf) -> PathBuf {
    if path.is_dir() {
        return path.join(DEFAULT_STORE_FILENAME);
    }
    path
}

fn ensure_parent_dir(path: &Path) -> Result<(), AssemblyError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
