//! Media uploads
//!
//! Uploads go to an external object store when one is configured,
//! otherwise to the backend's own `uploadMedia` action with base64 file
//! content in a form field (multipart would trigger a preflight the
//! backend cannot answer). Batches are strictly sequential; one file
//! failing is recorded and does not abort the rest.

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use tracing::warn;

use causeway_core::types::UploadResult;
use causeway_core::{Action, ApiError, ApiResult};

use crate::admin::AdminApi;

/// Most files accepted in one batch
pub const MAX_BATCH: usize = 20;

/// Per-file progress callback, 0..=100
pub type ProgressFn = dyn Fn(u8) + Send + Sync;

/// A file staged for upload
#[derive(Debug, Clone)]
pub struct MediaFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl MediaFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Routing decision between image and video upload paths
    pub fn kind(&self) -> MediaKind {
        if self.content_type.starts_with("video/") {
            MediaKind::Video
        } else {
            MediaKind::Image
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

/// External object-storage collaborator
///
/// Only the contract surface is modeled; which service backs it is the
/// host's concern.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Whether the store is usable; unconfigured stores divert uploads
    /// to the backend fallback
    fn is_configured(&self) -> bool;

    async fn upload_image(
        &self,
        file: &MediaFile,
        folder: &str,
        on_progress: &(dyn Fn(u8) + Send + Sync),
    ) -> ApiResult<String>;

    async fn upload_video(
        &self,
        file: &MediaFile,
        folder: &str,
        on_progress: &(dyn Fn(u8) + Send + Sync),
    ) -> ApiResult<String>;
}

/// Outcome of a batch upload: callers need to know how many of how many
/// succeeded, not just pass/fail
#[derive(Debug, Default)]
pub struct UploadReport {
    pub attempted: usize,
    pub succeeded: usize,
    pub uploaded: Vec<UploadResult>,
    pub failures: Vec<UploadFailure>,
}

/// One failed file in a batch
#[derive(Debug)]
pub struct UploadFailure {
    pub name: String,
    pub message: String,
}

impl AdminApi {
    /// Upload a batch of files sequentially
    ///
    /// `on_progress` receives the aggregate percentage across the batch:
    /// file `i` of `N` at per-file progress `p` reports
    /// `round(i/N * 100 + p/N)`.
    pub async fn upload_media<F>(
        &self,
        files: &[MediaFile],
        folder: &str,
        on_progress: F,
    ) -> ApiResult<UploadReport>
    where
        F: Fn(u8) + Send + Sync,
    {
        if files.len() > MAX_BATCH {
            return Err(ApiError::Validation(format!(
                "too many files: {} exceeds the batch limit of {MAX_BATCH}",
                files.len()
            )));
        }

        let total = files.len();
        let mut report = UploadReport {
            attempted: total,
            ..UploadReport::default()
        };

        for (index, file) in files.iter().enumerate() {
            let per_file = |p: u8| on_progress(aggregate_progress(index, total, p));
            match self.upload_one(file, folder, &per_file).await {
                Ok(url) => {
                    report.succeeded += 1;
                    report.uploaded.push(UploadResult { url });
                }
                Err(err) => {
                    warn!(file = %file.name, error = %err, "file upload failed, continuing batch");
                    report.failures.push(UploadFailure {
                        name: file.name.clone(),
                        message: err.to_string(),
                    });
                }
            }
        }

        Ok(report)
    }

    /// Delete a previously uploaded media file
    pub async fn delete_media(&self, url: &str) -> ApiResult<()> {
        let params = vec![("url".to_string(), url.to_string())];
        let envelope = self
            .client()
            .execute_admin(Action::DeleteMedia, &params)
            .await?;
        envelope.expect_success()
    }

    async fn upload_one(
        &self,
        file: &MediaFile,
        folder: &str,
        on_progress: &(dyn Fn(u8) + Send + Sync),
    ) -> ApiResult<String> {
        match self.client().object_store() {
            Some(store) if store.is_configured() => match file.kind() {
                MediaKind::Image => store.upload_image(file, folder, on_progress).await,
                MediaKind::Video => store.upload_video(file, folder, on_progress).await,
            },
            _ => {
                let params = vec![
                    ("fileName".to_string(), file.name.clone()),
                    ("contentType".to_string(), file.content_type.clone()),
                    ("folder".to_string(), folder.to_string()),
                    ("fileData".to_string(), BASE64.encode(&file.bytes)),
                ];
                let envelope = self
                    .client()
                    .execute_admin(Action::UploadMedia, &params)
                    .await?;
                let result: UploadResult = envelope.into_data()?;
                on_progress(100);
                Ok(result.url)
            }
        }
    }
}

fn aggregate_progress(index: usize, total: usize, per_file: u8) -> u8 {
    if total == 0 {
        return 100;
    }
    let combined = (index as f64 * 100.0 + f64::from(per_file)) / total as f64;
    combined.round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_kind_routes_on_content_type() {
        assert_eq!(MediaFile::new("a.jpg", "image/jpeg", vec![]).kind(), MediaKind::Image);
        assert_eq!(MediaFile::new("b.mp4", "video/mp4", vec![]).kind(), MediaKind::Video);
        assert_eq!(MediaFile::new("c.bin", "application/octet-stream", vec![]).kind(), MediaKind::Image);
    }

    #[test]
    fn aggregate_progress_partitions_the_batch() {
        // two files: file 0 spans 0..=50, file 1 spans 50..=100
        assert_eq!(aggregate_progress(0, 2, 0), 0);
        assert_eq!(aggregate_progress(0, 2, 50), 25);
        assert_eq!(aggregate_progress(0, 2, 100), 50);
        assert_eq!(aggregate_progress(1, 2, 0), 50);
        assert_eq!(aggregate_progress(1, 2, 100), 100);
    }

    #[test]
    fn aggregate_progress_rounds_thirds() {
        assert_eq!(aggregate_progress(0, 3, 100), 33);
        assert_eq!(aggregate_progress(1, 3, 100), 67);
        assert_eq!(aggregate_progress(2, 3, 100), 100);
    }
}
