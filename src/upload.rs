//! Uploaded source files
//!
//! Validates a file before reading it, checking for:
//! - File existence and permissions
//! - Directories
//! - File size limits
//!
//! Content is decoded as UTF-8, replacing invalid sequences.

use std::fs;
use std::path::Path;

/// Maximum upload size in bytes (50 MB)
pub const MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Errors that can occur when reading an upload
#[derive(Debug, Clone, PartialEq)]
pub enum UploadError {
    /// File does not exist
    NotFound,
    /// Permission denied to read file
    PermissionDenied,
    /// Path is a directory, not a file
    IsDirectory,
    /// File exceeds size limit
    TooLarge { size_mb: f64 },
    /// Other I/O error
    IoError(String),
}

impl UploadError {
    /// Get a user-friendly error message
    pub fn user_message(&self, filename: &str) -> String {
        match self {
            Self::NotFound => format!("Failed to read {}: file not found", filename),
            Self::PermissionDenied => format!("Failed to read {}: permission denied", filename),
            Self::IsDirectory => format!("Failed to read {}: is a directory", filename),
            Self::TooLarge { size_mb } => format!(
                "Failed to read {}: too large ({:.1} MB, max {} MB)",
                filename,
                size_mb,
                MAX_FILE_SIZE / (1024 * 1024)
            ),
            Self::IoError(msg) => format!("Failed to read {}: {}", filename, msg),
        }
    }
}

impl std::fmt::Display for UploadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "file not found"),
            Self::PermissionDenied => write!(f, "permission denied"),
            Self::IsDirectory => write!(f, "is a directory"),
            Self::TooLarge { size_mb } => write!(f, "file too large ({:.1} MB)", size_mb),
            Self::IoError(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for UploadError {}

impl From<std::io::Error> for UploadError {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::NotFound => UploadError::NotFound,
            std::io::ErrorKind::PermissionDenied => UploadError::PermissionDenied,
            _ => UploadError::IoError(e.to_string()),
        }
    }
}

/// A file read into memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// File name without directories, used for language inference
    pub name: String,
    pub content: String,
}

/// Check that `path` is a readable regular file within the size limit
pub fn validate(path: &Path) -> Result<(), UploadError> {
    let metadata = fs::metadata(path)?;

    if metadata.is_dir() {
        return Err(UploadError::IsDirectory);
    }

    if metadata.len() > MAX_FILE_SIZE {
        return Err(UploadError::TooLarge {
            size_mb: metadata.len() as f64 / (1024.0 * 1024.0),
        });
    }

    Ok(())
}

/// Validate and read an upload
pub fn read_upload(path: &Path) -> Result<UploadedFile, UploadError> {
    validate(path)?;
    let bytes = fs::read(path)?;
    Ok(UploadedFile {
        name: filename_for_display(path),
        content: String::from_utf8_lossy(&bytes).into_owned(),
    })
}

/// Get the filename from a path for display in messages
pub fn filename_for_display(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}
