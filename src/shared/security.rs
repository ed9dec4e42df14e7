use crate::shared::error::StigError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum benchmark source size (100 MB)
/// Larger files are rejected before they are read into memory
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Validates that a path is not a symbolic link
///
/// Uses `symlink_metadata()` so the link itself is inspected, not its target.
///
/// # Arguments
/// * `path` - The path to validate
/// * `operation` - Description of the operation (e.g., "read", "write") for error messages
pub fn validate_not_symlink(path: &Path, operation: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| {
        StigError::io(
            path,
            format!("Failed to read metadata for {} operation: {}", operation, e),
        )
    })?;

    if metadata.is_symlink() {
        return Err(StigError::Security {
            path: path.to_path_buf(),
            reason: format!(
                "Path is a symbolic link. {} operations on symbolic links are not allowed.",
                operation
            ),
            hint: "Replace the link with a regular file".to_string(),
        });
    }

    Ok(())
}

/// Validates that a path exists and is a regular file (not a directory or symlink)
///
/// # Errors
/// Returns an error if:
/// - The path doesn't exist
/// - The path is a symbolic link
/// - The path is not a regular file
pub fn validate_regular_file(path: &Path, file_description: &str) -> Result<u64> {
    let metadata = fs::symlink_metadata(path).map_err(|e| {
        StigError::io(
            path,
            format!("Failed to read {} metadata: {}", file_description, e),
        )
    })?;

    if metadata.is_symlink() {
        return Err(StigError::Security {
            path: path.to_path_buf(),
            reason: format!("{} is a symbolic link", file_description),
            hint: "Symbolic links are not followed. Copy the file into the source directory"
                .to_string(),
        });
    }

    if !metadata.is_file() {
        return Err(StigError::io(
            path,
            format!("{} is not a regular file", file_description),
        ));
    }

    Ok(metadata.len())
}

/// Validates file size is within acceptable limits
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        return Err(StigError::Security {
            path: path.to_path_buf(),
            reason: format!(
                "File is too large ({} bytes). Maximum allowed size is {} bytes.",
                file_size, max_size
            ),
            hint: "Check that the file is a single benchmark document".to_string(),
        });
    }
    Ok(())
}
