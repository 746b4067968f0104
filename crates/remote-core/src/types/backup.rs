//! Backup reporting types.

use serde::{Deserialize, Serialize};

/// Response from `GET /backups/{id}?size=N`: presigned multipart upload URLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupRemoteUploadResponse {
    pub parts: Vec<String>,
    pub part_size: i64,
}

/// One uploaded part of a multipart backup upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupPart {
    pub etag: String,
    pub part_number: u32,
}

/// Request body for `POST /backups/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupRequest {
    pub checksum: String,
    pub checksum_type: String,
    pub size: i64,
    pub successful: bool,
    #[serde(default)]
    pub parts: Vec<BackupPart>,
}

impl BackupRequest {
    /// A failed backup carries no checksum or size.
    pub fn failed() -> Self {
        Self::default()
    }

    /// A completed backup with a sha1 checksum.
    pub fn successful(checksum: impl Into<String>, size: i64) -> Self {
        Self {
            checksum: checksum.into(),
            checksum_type: "sha1".to_string(),
            size,
            successful: true,
            parts: Vec::new(),
        }
    }
}
