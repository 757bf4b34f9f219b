//! # Report Files
//!
//! Reading and writing `.carga` report files:
//! - **Atomic saves**: write `.carga.tmp`, fsync, rename over the target
//! - **Lock files**: `.carga.lock` next to the report, naming who holds it,
//!   backed by an OS-level exclusive lock
//! - **Version validation**: refuse files written by a newer schema
//!
//! ## Example
//!
//! ```rust,no_run
//! use carga_core::file_io::{load_report, save_report, FileLock};
//! use carga_core::report::FireLoadReport;
//! use std::path::Path;
//!
//! let path = Path::new("deposito-norte.carga");
//! let report = FireLoadReport::new("ACME", "J. Pérez", "Añelo");
//!
//! let lock = FileLock::acquire(path, "jperez")?;
//! save_report(&report, path)?;
//! drop(lock);
//!
//! let loaded = load_report(path)?;
//! # Ok::<(), carga_core::errors::CalcError>(())
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::errors::{CalcError, CalcResult};
use crate::report::{FireLoadReport, SCHEMA_VERSION};

/// Report file extension
pub const REPORT_EXTENSION: &str = "carga";

/// Locks older than this are taken over regardless of holder
pub const STALE_LOCK_HOURS: i64 = 12;

/// Contents of a `.carga.lock` file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LockInfo {
    /// Who is editing (user name or e-mail)
    pub user_id: String,
    pub machine: String,
    pub pid: u32,
    pub locked_at: DateTime<Utc>,
}

impl LockInfo {
    /// Lock info for the current process
    pub fn new(user_id: impl Into<String>) -> Self {
        LockInfo {
            user_id: user_id.into(),
            machine: hostname().unwrap_or_else(|| "unknown".to_string()),
            pid: std::process::id(),
            locked_at: Utc::now(),
        }
    }

    /// Holder as shown to other users
    pub fn holder(&self) -> String {
        format!("{} ({})", self.user_id, self.machine)
    }

    /// Whether the holder is gone or the lock has expired
    pub fn is_stale(&self) -> bool {
        if Utc::now() - self.locked_at > chrono::Duration::hours(STALE_LOCK_HOURS) {
            return true;
        }
        match hostname() {
            Some(machine) if machine == self.machine => !process_alive(self.pid),
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
            .or_else(|| fs::read_to_string("/etc/hostname").ok().map(|h| h.trim().to_string()))
            .filter(|h| !h.is_empty())
    }
}

#[cfg(unix)]
fn process_alive(pid: u32) -> bool {
    Path::new("/proc").join(pid.to_string()).exists() || !Path::new("/proc").exists()
}

#[cfg(not(unix))]
fn process_alive(_pid: u32) -> bool {
    true
}

/// Exclusive edit lock on a report file, released on drop.
pub struct FileLock {
    report_path: PathBuf,
    lock_path: PathBuf,
    /// Holds the OS lock for as long as the guard lives
    _handle: File,
    pub info: LockInfo,
}

impl FileLock {
    /// Acquire the edit lock on `path`.
    ///
    /// Fails with [`CalcError::FileLocked`] when a live lock exists. Stale
    /// locks are taken over.
    pub fn acquire(path: &Path, user_id: impl Into<String>) -> CalcResult<Self> {
        let lock_path = lock_path_for(path);

        if let Some(existing) = read_lock_info(&lock_path) {
            if !existing.is_stale() {
                return Err(CalcError::file_locked(
                    path.display().to_string(),
                    existing.holder(),
                    existing.locked_at.to_rfc3339(),
                ));
            }
            warn!(
                path = %path.display(),
                holder = %existing.holder(),
                "taking over stale lock"
            );
        }

        let mut handle = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .map_err(|e| CalcError::file_error("create lock", lock_path.display().to_string(), e.to_string()))?;

        handle.try_lock_exclusive().map_err(|_| {
            CalcError::file_locked(path.display().to_string(), "another process", "unknown")
        })?;

        let info = LockInfo::new(user_id);
        let json = serde_json::to_string_pretty(&info)?;
        handle
            .write_all(json.as_bytes())
            .and_then(|_| handle.sync_all())
            .map_err(|e| CalcError::file_error("write lock", lock_path.display().to_string(), e.to_string()))?;

        debug!(path = %lock_path.display(), user = %info.user_id, "lock acquired");

        Ok(FileLock {
            report_path: path.to_path_buf(),
            lock_path,
            _handle: handle,
            info,
        })
    }

    /// Current live lock on `path`, if any
    pub fn check(path: &Path) -> Option<LockInfo> {
        read_lock_info(&lock_path_for(path)).filter(|info| !info.is_stale())
    }

    pub fn report_path(&self) -> &Path {
        &self.report_path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.lock_path);
        debug!(path = %self.lock_path.display(), "lock released");
    }
}

/// `informe.carga` -> `informe.carga.lock`
fn lock_path_for(report_path: &Path) -> PathBuf {
    let extension = match report_path.extension() {
        Some(ext) => format!("{}.lock", ext.to_string_lossy()),
        None => "lock".to_string(),
    };
    report_path.with_extension(extension)
}

/// Unreadable or malformed lock files count as absent
fn read_lock_info(lock_path: &Path) -> Option<LockInfo> {
    let contents = fs::read_to_string(lock_path).ok()?;
    serde_json::from_str(&contents).ok()
}

/// Save a report with atomic write semantics.
///
/// The JSON goes to a sibling `.tmp` file which is synced and then renamed
/// over `path`, so an interrupted save never leaves a truncated report.
pub fn save_report(report: &FireLoadReport, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(report)?;
    let tmp_path = tmp_path_for(path);

    let write_tmp = || -> std::io::Result<()> {
        let mut tmp = File::create(&tmp_path)?;
        tmp.write_all(json.as_bytes())?;
        tmp.sync_all()
    };
    write_tmp().map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    info!(
        path = %path.display(),
        materials = report.materials.len(),
        bytes = json.len(),
        "report saved"
    );
    Ok(())
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let extension = match path.extension() {
        Some(ext) => format!("{}.tmp", ext.to_string_lossy()),
        None => "tmp".to_string(),
    };
    path.with_extension(extension)
}

/// Load a report, rejecting incompatible schema versions.
pub fn load_report(path: &Path) -> CalcResult<FireLoadReport> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    let report: FireLoadReport = serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
        reason: format!("Invalid report in {}: {}", path.display(), e),
    })?;

    validate_version(&report.meta.schema_version)?;

    debug!(
        path = %path.display(),
        version = %report.meta.schema_version,
        materials = report.materials.len(),
        "report loaded"
    );
    Ok(report)
}

/// Load a report together with the live lock held on it, if any.
///
/// A locked report is still returned; callers open it read-only.
pub fn load_report_with_lock_check(path: &Path) -> CalcResult<(FireLoadReport, Option<LockInfo>)> {
    let report = load_report(path)?;
    let lock = FileLock::check(path);
    if let Some(info) = &lock {
        info!(path = %path.display(), holder = %info.holder(), "report is locked, opening read-only");
    }
    Ok((report, lock))
}

/// Check a file's schema version against [`SCHEMA_VERSION`].
///
/// Major versions must match. While the major is 0 the file's minor may
/// not be newer than ours.
pub fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let parse = |v: &str| -> Option<(u32, u32)> {
        let mut parts = v.trim().split('.');
        let major = parts.next()?.parse().ok()?;
        let minor = parts.next().map_or(Some(0), |m| m.parse().ok())?;
        Some((major, minor))
    };

    let (file_major, file_minor) = parse(file_version).ok_or_else(mismatch)?;
    let (major, minor) = parse(SCHEMA_VERSION).ok_or_else(mismatch)?;

    if file_major != major || (major == 0 && file_minor > minor) {
        return Err(mismatch());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::FormEdit;
    use std::env::temp_dir;

    fn temp_report_path(name: &str) -> PathBuf {
        temp_dir().join(format!("carga_test_{}_{}.carga", name, std::process::id()))
    }

    #[test]
    fn test_lock_path_generation() {
        assert_eq!(
            lock_path_for(Path::new("/obra/deposito.carga")),
            Path::new("/obra/deposito.carga.lock")
        );
        assert_eq!(lock_path_for(Path::new("informe")), Path::new("informe.lock"));
        assert_eq!(tmp_path_for(Path::new("a.carga")), Path::new("a.carga.tmp"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_report_path("roundtrip");
        let report = FireLoadReport::new("ACME", "Operador", "Base")
            .apply(FormEdit::AddMaterialFromCatalog { name: "Gasoil".into() })
            .unwrap();

        save_report(&report, &path).unwrap();
        assert!(!tmp_path_for(&path).exists());

        let loaded = load_report(&path).unwrap();
        assert_eq!(loaded, report);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_report(Path::new("/definitely/not/here.carga")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_load_rejects_newer_schema() {
        let path = temp_report_path("newer");
        let mut report = FireLoadReport::default();
        report.meta.schema_version = "0.9.0".to_string();
        save_report(&report, &path).unwrap();

        let err = load_report(&path).unwrap_err();
        assert_eq!(err.error_code(), "VERSION_MISMATCH");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_rejects_garbage() {
        let path = temp_report_path("garbage");
        fs::write(&path, "{ not a report").unwrap();
        assert_eq!(load_report(&path).unwrap_err().error_code(), "SERIALIZATION_ERROR");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_file_lock_acquire_and_release() {
        let path = temp_report_path("lock");
        save_report(&FireLoadReport::default(), &path).unwrap();

        let lock = FileLock::acquire(&path, "jperez").unwrap();
        assert_eq!(lock.info.user_id, "jperez");
        assert_eq!(lock.report_path(), path.as_path());
        assert!(lock_path_for(&path).exists());

        let held = FileLock::check(&path).unwrap();
        assert_eq!(held.user_id, "jperez");
        let err = FileLock::acquire(&path, "otro").err().unwrap();
        assert!(err.is_recoverable());

        let (_, lock_info) = load_report_with_lock_check(&path).unwrap();
        assert!(lock_info.is_some());

        drop(lock);
        assert!(!lock_path_for(&path).exists());
        assert!(FileLock::check(&path).is_none());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_expired_lock_is_stale() {
        let mut info = LockInfo::new("ana");
        assert!(!info.is_stale());
        info.locked_at = Utc::now() - chrono::Duration::hours(STALE_LOCK_HOURS + 1);
        assert!(info.is_stale());
    }

    #[test]
    fn test_stale_lock_is_taken_over() {
        let path = temp_report_path("stale");
        let mut old = LockInfo::new("ana");
        old.locked_at = Utc::now() - chrono::Duration::hours(STALE_LOCK_HOURS * 2);
        fs::write(lock_path_for(&path), serde_json::to_string(&old).unwrap()).unwrap();

        let lock = FileLock::acquire(&path, "beto").unwrap();
        assert_eq!(lock.info.user_id, "beto");
        drop(lock);
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.7").is_ok());
        assert!(validate_version("0.0.3").is_ok());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("banana").is_err());
    }
}
