use crate::errors::StoreError;
use serde::{Serialize, de::DeserializeOwned};
use std::{
    collections::HashMap,
    env, fs,
    path::{Path, PathBuf},
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
};
use tracing::{debug, error, warn};

pub const SLEEP_KEY: &str = "sleepData";
pub const JOURNAL_KEY: &str = "journalEntries";
pub const FITNESS_KEY: &str = "fitnessRoutines";

pub fn resolve_data_dir() -> PathBuf {
    if let Ok(path) = env::var("APP_DATA_DIR") {
        return PathBuf::from(path);
    }

    PathBuf::from("data")
}

/// Raw key-value persistence. Each key holds one complete JSON snapshot.
pub trait StoragePort: Send + Sync {
    /// Returns `Ok(None)` when nothing has been stored under `key`.
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replaces the whole value under `key`.
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;

    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// One `<key>.json` file per key inside a directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StoragePort for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        let target = self.path_for(key);
        let staging = self.dir.join(format!(".{key}.json.tmp"));
        fs::write(&staging, value)?;
        fs::rename(&staging, &target)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// In-memory port for tests and for sessions without a usable data dir.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
    fail_io: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail as if the backing storage vanished.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.fail_io.store(unavailable, Ordering::SeqCst);
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    pub fn insert_raw(&self, key: &str, value: &str) {
        self.lock().insert(key.to_string(), value.to_string());
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.values.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.fail_io.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(std::io::Error::other(
                "memory store marked unavailable",
            )));
        }
        Ok(())
    }
}

impl StoragePort for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.check()?;
        Ok(self.lock().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.check()?;
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.check()?;
        self.lock().remove(key);
        Ok(())
    }
}

/// Typed snapshot persistence over a [`StoragePort`].
///
/// Errors are recovered here and never reach the caller:
/// - an I/O failure switches the store into in-memory-only mode for the rest
///   of the session; later saves are skipped,
/// - a snapshot that fails to parse is discarded and reported as missing so
///   the owning collection reseeds.
#[derive(Clone)]
pub struct Store {
    port: Arc<dyn StoragePort>,
    available: Arc<AtomicBool>,
}

impl Store {
    pub fn new(port: Arc<dyn StoragePort>) -> Self {
        Self {
            port,
            available: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    pub fn try_load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<Vec<T>>, StoreError> {
        let Some(raw) = self.port.read(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Malformed {
                key: key.to_string(),
                source,
            })
    }

    /// `None` tells the caller to seed sample data.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<Vec<T>> {
        if !self.is_available() {
            return None;
        }
        match self.try_load(key) {
            Ok(records) => records,
            Err(StoreError::Unavailable(err)) => {
                self.mark_unavailable(&err);
                None
            }
            Err(err @ StoreError::Malformed { .. }) => {
                warn!("discarding stored snapshot: {err}");
                if let Err(StoreError::Unavailable(io)) = self.port.remove(key) {
                    self.mark_unavailable(&io);
                }
                None
            }
        }
    }

    pub fn save<T: Serialize>(&self, key: &str, records: &[T]) {
        if !self.is_available() {
            debug!("storage unavailable, keeping {key} in memory only");
            return;
        }
        let payload = match serde_json::to_string(records) {
            Ok(payload) => payload,
            Err(err) => {
                error!("failed to serialize {key}: {err}");
                return;
            }
        };
        match self.port.write(key, &payload) {
            Ok(()) => debug!(key, records = records.len(), "snapshot saved"),
            Err(StoreError::Unavailable(err)) => self.mark_unavailable(&err),
            Err(err) => error!("failed to save {key}: {err}"),
        }
    }

    fn mark_unavailable(&self, err: &std::io::Error) {
        if self.available.swap(false, Ordering::SeqCst) {
            error!("storage unavailable, continuing in memory only: {err}");
        }
    }
}
