//! Upload validation and transient staging.

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use jewelbench_core::config::StorageConfig;
use jewelbench_core::error::{AppError, ErrorKind};

/// A mesh file received from a client.
#[derive(Debug, Clone)]
pub struct MeshUpload {
    /// Client-supplied file name, if any.
    pub file_name: Option<String>,
    /// File content bytes.
    pub data: Bytes,
}

impl MeshUpload {
    /// Create an upload from a name and content.
    pub fn new(file_name: Option<String>, data: impl Into<Bytes>) -> Self {
        Self {
            file_name,
            data: data.into(),
        }
    }

    /// Read a local file as an upload, keeping its file name.
    pub fn from_path(path: &Path) -> Result<Self, AppError> {
        let data = std::fs::read(path).map_err(|e| {
            AppError::with_source(
                ErrorKind::NotFound,
                format!("Cannot read {}", path.display()),
                e,
            )
        })?;
        let file_name = path
            .file_name()
            .and_then(|f| f.to_str())
            .map(str::to_string);
        Ok(Self::new(file_name, data))
    }
}

/// Validates uploads and writes them to uniquely named transient files.
#[derive(Debug, Clone)]
pub struct UploadStaging {
    temp_dir: PathBuf,
    max_upload_size_bytes: u64,
}

impl UploadStaging {
    /// Extension accepted for uploads.
    pub const EXTENSION: &'static str = "stl";

    /// Create a staging area in `temp_dir`.
    pub fn new(temp_dir: impl Into<PathBuf>, max_upload_size_bytes: u64) -> Self {
        Self {
            temp_dir: temp_dir.into(),
            max_upload_size_bytes,
        }
    }

    /// Create a staging area from storage configuration.
    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(config.temp_path(), config.max_upload_size_bytes)
    }

    /// Check the file name and size of an upload.
    pub fn validate(&self, upload: &MeshUpload) -> Result<(), AppError> {
        if let Some(name) = upload.file_name.as_deref() {
            let is_stl = Path::new(name)
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case(Self::EXTENSION));
            if !is_stl {
                warn!(file_name = %name, "Rejected upload with non-STL extension");
                return Err(AppError::validation(format!(
                    "Unsupported file '{name}': only .stl meshes are accepted"
                )));
            }
        }

        if upload.data.len() as u64 > self.max_upload_size_bytes {
            warn!(size = upload.data.len(), "Rejected oversized upload");
            return Err(AppError::payload_too_large(format!(
                "File exceeds maximum upload size of {} bytes",
                self.max_upload_size_bytes
            )));
        }

        Ok(())
    }

    /// Validate the upload and write it to a fresh transient file.
    pub fn stage(&self, upload: &MeshUpload) -> Result<StagedUpload, AppError> {
        self.validate(upload)?;

        let mut file = tempfile::Builder::new()
            .prefix("jewelbench-")
            .suffix(&format!(".{}", Self::EXTENSION))
            .tempfile_in(&self.temp_dir)
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create staging file in {}", self.temp_dir.display()),
                    e,
                )
            })?;

        file.write_all(&upload.data)?;
        file.flush()?;

        debug!(
            path = %file.path().display(),
            size = upload.data.len(),
            "Staged upload"
        );

        Ok(StagedUpload { file })
    }
}

/// An upload written to disk. The file is deleted when this is dropped.
pub struct StagedUpload {
    file: NamedTempFile,
}

impl StagedUpload {
    /// Path of the transient file.
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

impl fmt::Debug for StagedUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StagedUpload")
            .field("path", &self.path())
            .finish()
    }
}

impl Drop for StagedUpload {
    fn drop(&mut self) {
        debug!(path = %self.path().display(), "Removing staged upload");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staging(dir: &Path) -> UploadStaging {
        UploadStaging::new(dir, 1024)
    }

    #[test]
    fn test_stage_and_drop_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let upload = MeshUpload::new(Some("ring.STL".into()), b"solid x".to_vec());

        let staged = staging(dir.path()).stage(&upload).unwrap();
        let path = staged.path().to_path_buf();
        assert!(path.starts_with(dir.path()));
        assert_eq!(std::fs::read(&path).unwrap(), b"solid x");

        drop(staged);
        assert!(!path.exists());
    }

    #[test]
    fn test_staged_names_are_unique() {
        let dir = tempfile::tempdir().unwrap();
        let upload = MeshUpload::new(None, b"x".to_vec());
        let a = staging(dir.path()).stage(&upload).unwrap();
        let b = staging(dir.path()).stage(&upload).unwrap();
        assert_ne!(a.path(), b.path());
    }

    #[test]
    fn test_non_stl_name_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let upload = MeshUpload::new(Some("ring.obj".into()), b"x".to_vec());
        let err = staging(dir.path()).stage(&upload).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_oversized_upload_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let upload = MeshUpload::new(Some("big.stl".into()), vec![0u8; 1025]);
        let err = staging(dir.path()).validate(&upload).unwrap_err();
        assert_eq!(err.kind, ErrorKind::PayloadTooLarge);
        assert!(err.message.contains("1024"));
    }

    #[test]
    fn test_missing_temp_dir_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let upload = MeshUpload::new(None, b"x".to_vec());
        let err = staging(&dir.path().join("gone")).stage(&upload).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Storage);
    }
}
