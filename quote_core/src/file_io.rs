//! # History File I/O
//!
//! Quote history lives in a single JSON file, often on a shared drive that
//! several estimators open at once. Writes therefore:
//!
//! - go to `<file>.tmp`, are fsynced, then renamed over the real file
//! - happen under an advisory lock (`<file>.lock`) that records who holds it
//! - are checked against [`SCHEMA_VERSION`] when read back
//!
//! ## Example
//!
//! ```rust,no_run
//! use quote_core::file_io::{load_history_or_default, save_history, FileLock};
//! use std::path::Path;
//!
//! let path = Path::new("quotes.json");
//! let lock = FileLock::acquire(path, "estimator@shop.example")?;
//!
//! let history = load_history_or_default(path)?;
//! save_history(&history, path)?;
//!
//! drop(lock); // releases the lock
//! # Ok::<(), quote_core::errors::QuoteError>(())
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::errors::{QuoteError, QuoteResult};
use crate::history::{QuoteHistory, SCHEMA_VERSION};

/// Locks older than this are considered abandoned
const LOCK_MAX_AGE_HOURS: i64 = 24;

/// Who holds a history file, as written into the `.lock` file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockInfo {
    /// User identifier (email or username)
    pub user_id: String,
    /// Host the lock was taken on
    pub machine: String,
    /// Process holding the lock
    pub pid: u32,
    pub locked_at: DateTime<Utc>,
}

impl LockInfo {
    /// Lock info describing the current process.
    pub fn new(user_id: impl Into<String>) -> Self {
        LockInfo {
            user_id: user_id.into(),
            machine: hostname().unwrap_or_else(|| "unknown".to_string()),
            pid: std::process::id(),
            locked_at: Utc::now(),
        }
    }

    /// A lock is stale when it is too old, or when it was taken on this
    /// machine by a process that no longer exists.
    fn is_stale(&self) -> bool {
        if Utc::now() - self.locked_at > Duration::hours(LOCK_MAX_AGE_HOURS) {
            return true;
        }
        match hostname() {
            Some(ours) if ours == self.machine => !process_alive(self.pid),
            _ => false,
        }
    }
}

fn hostname() -> Option<String> {
    #[cfg(windows)]
    {
        std::env::var("COMPUTERNAME").ok()
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOSTNAME")
            .ok()
            .or_else(|| std::env::var("HOST").ok())
    }
}

#[cfg(unix)]
fn process_alive(pid: u32) -> bool {
    Path::new(&format!("/proc/{pid}")).exists()
}

#[cfg(not(unix))]
fn process_alive(_pid: u32) -> bool {
    // No cheap liveness probe; rely on lock age instead.
    true
}

/// Exclusive lock on a history file, released on drop.
///
/// Holds an OS-level lock (via `fs2`) on the `.lock` file for process safety,
/// and writes [`LockInfo`] into it so other users can see who has the file.
#[derive(Debug)]
pub struct FileLock {
    lock_path: PathBuf,
    _handle: File,
    pub info: LockInfo,
}

impl FileLock {
    /// Acquire the lock for `path`, taking over stale locks.
    ///
    /// Returns [`QuoteError::FileLocked`] when someone else holds it.
    pub fn acquire(path: &Path, user_id: impl Into<String>) -> QuoteResult<Self> {
        let lock_path = lock_path_for(path);

        if let Some(holder) = read_lock_info(&lock_path) {
            if !holder.is_stale() {
                return Err(QuoteError::file_locked(
                    path.display().to_string(),
                    format!("{} ({})", holder.user_id, holder.machine),
                    holder.locked_at.to_rfc3339(),
                ));
            }
            warn!(
                path = %path.display(),
                holder = %holder.user_id,
                "Taking over stale lock"
            );
        }

        let mut handle = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .map_err(|e| QuoteError::file_error("create lock", lock_path.display().to_string(), e.to_string()))?;

        handle.try_lock_exclusive().map_err(|_| {
            QuoteError::file_locked(path.display().to_string(), "another process", "unknown")
        })?;

        let info = LockInfo::new(user_id);
        let body = serde_json::to_string_pretty(&info)?;
        handle
            .write_all(body.as_bytes())
            .and_then(|_| handle.sync_all())
            .map_err(|e| QuoteError::file_error("write lock", lock_path.display().to_string(), e.to_string()))?;

        debug!(path = %lock_path.display(), user = %info.user_id, "Acquired history lock");
        Ok(FileLock {
            lock_path,
            _handle: handle,
            info,
        })
    }

    /// Who holds the lock on `path`, if anyone (stale locks are ignored).
    pub fn check(path: &Path) -> Option<LockInfo> {
        read_lock_info(&lock_path_for(path)).filter(|info| !info.is_stale())
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.lock_path);
    }
}

/// `quotes.json` -> `quotes.json.lock`
fn lock_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".lock");
    PathBuf::from(name)
}

/// `quotes.json` -> `quotes.json.tmp`
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

fn read_lock_info(lock_path: &Path) -> Option<LockInfo> {
    let contents = fs::read_to_string(lock_path).ok()?;
    serde_json::from_str(&contents).ok()
}

/// Write `bytes` to `path` through a synced temp file and a rename.
fn write_atomic(path: &Path, bytes: &[u8]) -> QuoteResult<()> {
    let tmp_path = tmp_path_for(path);

    let mut tmp = File::create(&tmp_path)
        .map_err(|e| QuoteError::file_error("create temp file", tmp_path.display().to_string(), e.to_string()))?;
    tmp.write_all(bytes)
        .and_then(|_| tmp.sync_all())
        .map_err(|e| QuoteError::file_error("write temp file", tmp_path.display().to_string(), e.to_string()))?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        QuoteError::file_error("rename to final", path.display().to_string(), e.to_string())
    })
}

/// Save the history atomically.
pub fn save_history(history: &QuoteHistory, path: &Path) -> QuoteResult<()> {
    let json = serde_json::to_string_pretty(history)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| QuoteError::file_error("create directory", parent.display().to_string(), e.to_string()))?;
    }
    write_atomic(path, json.as_bytes())?;
    info!(path = %path.display(), quotes = history.len(), "Saved quote history");
    Ok(())
}

/// Load a history file, rejecting incompatible schema versions.
pub fn load_history(path: &Path) -> QuoteResult<QuoteHistory> {
    let contents = fs::read_to_string(path)
        .map_err(|e| QuoteError::file_error("read", path.display().to_string(), e.to_string()))?;

    let history: QuoteHistory = serde_json::from_str(&contents)
        .map_err(|e| QuoteError::serialization(format!("Invalid JSON in {}: {}", path.display(), e)))?;

    validate_version(&history.meta.version)?;
    debug!(path = %path.display(), quotes = history.len(), "Loaded quote history");
    Ok(history)
}

/// Like [`load_history`], but a missing file is an empty history.
pub fn load_history_or_default(path: &Path) -> QuoteResult<QuoteHistory> {
    if path.exists() {
        load_history(path)
    } else {
        debug!(path = %path.display(), "No history file yet, starting empty");
        Ok(QuoteHistory::new())
    }
}

/// Major versions must match; while on 0.x, a newer minor is also rejected.
fn validate_version(file_version: &str) -> QuoteResult<()> {
    let mismatch = || QuoteError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let parse = |v: &str| -> Option<(u32, u32)> {
        let mut parts = v.split('.').map(|p| p.parse::<u32>());
        let major = parts.next()?.ok()?;
        let minor = parts.next().and_then(|p| p.ok()).unwrap_or(0);
        Some((major, minor))
    };

    let (file_major, file_minor) = parse(file_version).ok_or_else(mismatch)?;
    let (ours_major, ours_minor) = parse(SCHEMA_VERSION).ok_or_else(mismatch)?;

    if file_major != ours_major || (ours_major == 0 && file_minor > ours_minor) {
        return Err(mismatch());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::quote::{calculate, ProcessParameters};
    use crate::geometry::Geometry;
    use crate::history::SavedQuote;
    use crate::materials::{MachineCatalog, MaterialCatalog};
    use tempfile::TempDir;

    fn history_with_one_quote() -> QuoteHistory {
        let geometry = Geometry::placeholder();
        let params = ProcessParameters::new("PP", 5000, 4);
        let breakdown = calculate(
            &geometry,
            &params,
            &MaterialCatalog::default(),
            &MachineCatalog::default(),
        )
        .unwrap();
        let mut history = QuoteHistory::new();
        history.add(SavedQuote::new("cap.step", geometry, params, breakdown, "PP"));
        history
    }

    #[test]
    fn test_sidecar_paths() {
        let path = Path::new("/data/quotes.json");
        assert_eq!(lock_path_for(path), Path::new("/data/quotes.json.lock"));
        assert_eq!(tmp_path_for(path), Path::new("/data/quotes.json.tmp"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("quotes.json");

        let history = history_with_one_quote();
        save_history(&history, &path).unwrap();
        assert!(!tmp_path_for(&path).exists());

        let loaded = load_history(&path).unwrap();
        assert_eq!(loaded.len(), 1);
        let (_, quote) = loaded.list()[0];
        assert_eq!(quote.file_name, "cap.step");
        assert_eq!(quote.parameters.cavities, 4);
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/deeper/quotes.json");
        save_history(&QuoteHistory::new(), &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_missing_file_is_empty_history() {
        let dir = TempDir::new().unwrap();
        let history = load_history_or_default(&dir.path().join("absent.json")).unwrap();
        assert!(history.is_empty());
    }

    #[test]
    fn test_corrupt_file_is_serialization_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("quotes.json");
        fs::write(&path, "{ not json").unwrap();
        let err = load_history(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_newer_schema_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("quotes.json");
        let mut history = QuoteHistory::new();
        history.meta.version = "0.9.0".to_string();
        save_history(&history, &path).unwrap();

        let err = load_history(&path).unwrap_err();
        assert_eq!(err.error_code(), "VERSION_MISMATCH");
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.7").is_ok());
        assert!(validate_version("0.0.3").is_ok());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("garbage").is_err());
    }

    #[test]
    fn test_lock_acquire_and_release() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("quotes.json");

        let lock = FileLock::acquire(&path, "estimator@example.com").unwrap();
        assert_eq!(lock.info.user_id, "estimator@example.com");
        assert!(lock_path_for(&path).exists());
        assert!(FileLock::check(&path).is_some());

        drop(lock);
        assert!(!lock_path_for(&path).exists());
        assert!(FileLock::check(&path).is_none());
    }

    #[test]
    fn test_old_lock_is_stale() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("quotes.json");
        let mut info = LockInfo::new("someone-else");
        info.machine = "other-host".to_string();
        info.locked_at = Utc::now() - Duration::hours(LOCK_MAX_AGE_HOURS + 1);
        fs::write(lock_path_for(&path), serde_json::to_string(&info).unwrap()).unwrap();

        assert!(FileLock::check(&path).is_none());
        let lock = FileLock::acquire(&path, "me").unwrap();
        assert_eq!(lock.info.user_id, "me");
    }

    #[test]
    fn test_fresh_foreign_lock_blocks() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("quotes.json");
        let mut info = LockInfo::new("someone-else");
        info.machine = "definitely-not-this-host".to_string();
        fs::write(lock_path_for(&path), serde_json::to_string(&info).unwrap()).unwrap();

        let err = FileLock::acquire(&path, "me").unwrap_err();
        assert!(err.is_recoverable());
        assert_eq!(err.error_code(), "FILE_LOCKED");
    }
}
