pub mod config;
pub mod object;
pub mod refs;
mod repo;

pub use config::RepositoryConfig;
pub use repo::*;

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::Result;
use crate::error::IoContext;

/// Returns true if `path` exists and is a directory, a missing path is just `false`.
///
/// # Errors
///
/// This function fails if the metadata of `path` could not be read for any other reason.
pub fn is_dir(path: &Path) -> Result<bool> {
    match fs::metadata(path) {
        Ok(metadata) => Ok(metadata.is_dir()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e).with_io_context(|| format!("could not stat {:?}", path)),
    }
}

/// Writes `bytes` to a temporary file next to `final_path` and renames it into place, so readers
/// either see the previous content or the new one.
///
/// The parent directory of `final_path` must already exist.
pub fn atomic_write(final_path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp_path = tmp_path_for(final_path);

    let written = write_tmp(&tmp_path, bytes).and_then(|_| {
        fs::rename(&tmp_path, final_path)
            .with_io_context(|| format!("rename {:?} -> {:?}", tmp_path, final_path))
    });

    if written.is_err() {
        // keep the write error, not the cleanup one
        let _ = fs::remove_file(&tmp_path);
    }
    written
}

fn write_tmp(tmp_path: &Path, bytes: &[u8]) -> Result<()> {
    let mut f = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(tmp_path)
        .with_io_context(|| format!("open temp file {:?}", tmp_path))?;

    f.write_all(bytes)
        .with_io_context(|| format!("write temp file {:?}", tmp_path))?;

    f.sync_all()
        .with_io_context(|| format!("sync temp file {:?}", tmp_path))
}

fn tmp_path_for(final_path: &Path) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let file_name = final_path.file_name().unwrap_or_default().to_string_lossy();
    final_path.with_file_name(format!(
        ".{}.tmp.{}.{}",
        file_name,
        std::process::id(),
        nanos
    ))
}
