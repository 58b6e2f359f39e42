//! Transient file storage configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where uploads are staged and CAD exports are written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory for transient upload and export files.
    ///
    /// Empty means the operating system's temporary directory.
    #[serde(default)]
    pub temp_dir: String,
    /// Maximum upload size in bytes (default 64 MB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
}

impl StorageConfig {
    /// Resolve the transient directory.
    pub fn temp_path(&self) -> PathBuf {
        if self.temp_dir.trim().is_empty() {
            std::env::temp_dir()
        } else {
            PathBuf::from(&self.temp_dir)
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            temp_dir: String::new(),
            max_upload_size_bytes: default_max_upload(),
        }
    }
}

fn default_max_upload() -> u64 {
    67_108_864 // 64 MB
}
