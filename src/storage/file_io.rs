//! JSON persistence for the ledger and settings files
//!
//! Files are always rewritten whole. The new contents go to a hidden sibling
//! (`.transactions.json.tmp`), are synced, then renamed over the target, so
//! readers see either the old ledger or the new one. A missing or blank file
//! reads as the type's default: a fresh data directory has neither
//! `categories.json` nor `transactions.json` yet.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::error::{TrackerError, TrackerResult};

/// Read a JSON file, falling back to `T::default()` when it is missing or blank
pub fn read_json<T>(path: &Path) -> TrackerResult<T>
where
    T: DeserializeOwned + Default,
{
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no file yet, starting empty");
            return Ok(T::default());
        }
        Err(e) => return Err(file_error("read", path, e)),
    };

    if bytes.iter().all(u8::is_ascii_whitespace) {
        debug!(path = %path.display(), "blank file, starting empty");
        return Ok(T::default());
    }

    serde_json::from_slice(&bytes).map_err(|e| {
        TrackerError::Storage(format!("{} is not valid JSON: {}", path.display(), e))
    })
}

/// Replace `path` with the pretty-printed JSON of `value`
///
/// Encoding happens before anything touches the disk. On failure the hidden
/// temporary file is removed and the previous contents of `path` are kept.
pub fn write_json_atomic<T>(path: &Path, value: &T) -> TrackerResult<()>
where
    T: Serialize + ?Sized,
{
    let mut contents = serde_json::to_vec_pretty(value).map_err(|e| {
        TrackerError::Storage(format!("Could not encode {}: {}", path.display(), e))
    })?;
    contents.push(b'\n');

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| file_error("create the directory for", path, e))?;
    }

    let temp = temp_path(path);
    if let Err(e) = write_synced(&temp, &contents).and_then(|()| fs::rename(&temp, path)) {
        let _ = fs::remove_file(&temp);
        return Err(file_error("write", path, e));
    }

    debug!(path = %path.display(), bytes = contents.len(), "saved");
    Ok(())
}

fn write_synced(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(contents)?;
    file.sync_all()
}

/// Hidden sibling of `path`; same directory so the rename stays atomic
fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.tmp", name))
}

fn file_error(action: &str, path: &Path, err: io::Error) -> TrackerError {
    TrackerError::Storage(format!("Could not {} {}: {}", action, path.display(), err))
}
