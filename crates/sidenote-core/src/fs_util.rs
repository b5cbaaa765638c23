//! Filesystem helpers shared by the store and the active pointer
//!
//! All persisted files go through an atomic write (write to temp file, then
//! rename) so a concurrent reader never observes a partially written file.

use std::io;
use std::path::{Path, PathBuf};

use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;

use crate::error::{StoreError, StoreResult};

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
///
/// This ensures the target file is never left in a partially-written state.
/// The parent directory is created if missing.
pub async fn atomic_write(path: &Path, data: &[u8]) -> StoreResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|source| StoreError::CreateDirectory {
                path: parent.to_path_buf(),
                source,
            })?;
    }

    // Temp file lives next to the target so the rename stays on one filesystem
    let temp_path = temp_path_for(path);

    let mut file = File::create(&temp_path)
        .await
        .map_err(|source| StoreError::WriteError {
            path: temp_path.clone(),
            source,
        })?;

    file.write_all(data)
        .await
        .map_err(|source| StoreError::WriteError {
            path: temp_path.clone(),
            source,
        })?;

    file.sync_all()
        .await
        .map_err(|source| StoreError::WriteError {
            path: temp_path.clone(),
            source,
        })?;

    fs::rename(&temp_path, path)
        .await
        .map_err(|source| StoreError::AtomicWriteFailed {
            from: temp_path,
            to: path.to_path_buf(),
            source,
        })?;

    Ok(())
}

/// Serialize a value as pretty JSON with a trailing newline and write it atomically
pub async fn write_json_pretty<T: serde::Serialize>(path: &Path, value: &T) -> StoreResult<()> {
    let mut data = serde_json::to_vec_pretty(value).map_err(io::Error::from)?;
    data.push(b'\n');
    atomic_write(path, &data).await
}

/// Read a file's bytes, mapping "does not exist" to `None`
///
/// Any other I/O failure propagates with path context.
pub async fn read_opt(path: &Path) -> StoreResult<Option<Vec<u8>>> {
    match fs::read(path).await {
        Ok(bytes) => Ok(Some(bytes)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(StoreError::ReadError {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Remove a file, treating an already-absent file as success
pub async fn remove_if_exists(path: &Path) -> StoreResult<()> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(StoreError::DeleteError {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Sibling temp path used during an atomic write (`<file>.tmp`)
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
