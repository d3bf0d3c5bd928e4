//! Key-value persistence boundary for locally appended catalog data.
//!
//! The catalog core persists through the [`AppendStore`] capability only, so
//! tests can inject an in-memory store and the CLI a file-backed one. Store
//! failures are the caller's to log and degrade on; nothing here panics on
//! I/O problems.

use anyhow::{bail, Context, Result};
use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tracing::warn;

/// Storage key for the accumulated appended tabular text.
pub const APPENDED_RELEASES_KEY: &str = "konpa.admin.appended_releases";

/// Storage key for the per-artist generated-profile cache. Not read by the
/// catalog core; listed here so the whole storage surface lives in one
/// place.
pub const GENERATED_PROFILES_KEY: &str = "konpa.generated_profiles";

/// String key-value storage capability.
pub trait AppendStore: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&self, key: &str, value: &str) -> Result<()>;
}

/// File-backed store: one JSON object per file, loaded once at open and
/// rewritten in full on every write.
pub struct FileAppendStore {
    file_path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileAppendStore {
    /// Open a store file, starting empty when the file does not exist yet.
    /// An unreadable or malformed existing file is logged and treated as
    /// empty; a corrupt local store must never block startup.
    pub fn open(file_path: PathBuf) -> Self {
        let entries = match Self::load(&file_path) {
            Ok(entries) => entries,
            Err(err) => {
                warn!("Ignoring unreadable store file {:?}: {err:#}", file_path);
                HashMap::new()
            }
        };
        FileAppendStore {
            file_path,
            entries: Mutex::new(entries),
        }
    }

    fn load(file_path: &PathBuf) -> Result<HashMap<String, String>> {
        let mut file = match File::open(file_path) {
            Ok(file) => file,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(HashMap::new());
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("Failed to open store file {:?}", file_path));
            }
        };
        let mut content = String::new();
        file.read_to_string(&mut content)
            .with_context(|| format!("Failed to read store file {:?}", file_path))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse store file {:?}", file_path))
    }

    fn save(&self, entries: &HashMap<String, String>) -> Result<()> {
        let json = serde_json::to_string_pretty(entries)?;
        let mut file = File::create(&self.file_path)
            .with_context(|| format!("Failed to create store file {:?}", self.file_path))?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}

impl AppendStore for FileAppendStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(key.to_owned(), value.to_owned());
        self.save(&entries)
    }
}

/// In-memory store for tests and ephemeral runs.
#[derive(Default)]
pub struct MemoryAppendStore {
    entries: Mutex<HashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryAppendStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `read` fail, to exercise degraded paths.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::Relaxed);
    }

    /// Make every subsequent `write` fail, to exercise degraded paths.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::Relaxed);
    }
}

impl AppendStore for MemoryAppendStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        if self.fail_reads.load(Ordering::Relaxed) {
            bail!("read failure injected for key {key}");
        }
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::Relaxed) {
            bail!("write failure injected for key {key}");
        }
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
