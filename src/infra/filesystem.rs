//! Filesystem operations
//!
//! Async file and directory operations used by the staging phase.

use std::path::Path;

use crate::error::FilesystemError;

/// Create a directory and all parent directories
pub async fn create_dir_all(path: &Path) -> Result<(), FilesystemError> {
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|e| FilesystemError::CreateDir {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
}

/// Remove a directory and all its contents, if it exists
pub async fn remove_dir_all(path: &Path) -> Result<(), FilesystemError> {
    if path.exists() {
        tokio::fs::remove_dir_all(path)
            .await
            .map_err(|e| FilesystemError::RemoveDir {
                path: path.to_path_buf(),
                error: e.to_string(),
            })?;
    }
    Ok(())
}

/// Write content to a file, creating parent directories as needed
pub async fn write_file(path: &Path, content: &str) -> Result<(), FilesystemError> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent).await?;
    }
    tokio::fs::write(path, content)
        .await
        .map_err(|e| FilesystemError::WriteFile {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
}

/// Copy a file, creating the target's parent directories as needed
pub async fn copy_file(from: &Path, to: &Path) -> Result<(), FilesystemError> {
    if let Some(parent) = to.parent() {
        create_dir_all(parent).await?;
    }
    tokio::fs::copy(from, to)
        .await
        .map(|_| ())
        .map_err(|e| FilesystemError::CopyFile {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            error: e.to_string(),
        })
}
