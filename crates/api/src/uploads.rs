// SPDX-FileCopyrightText: 2026 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Image attachment handling for admin forms.
//!
//! A form field accepts zero or more images depending on its mode. Files are
//! uploaded to blob storage one at a time, in selection order, and the field
//! submits a single serialized string value so the form normalizer can treat
//! every field uniformly. Removing an attachment never deletes the blob.

use async_trait::async_trait;
use rand::Rng;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("storage request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("storage rejected the upload ({status}): {message}")]
    Rejected { status: u16, message: String },
}

#[derive(Debug, Error)]
pub enum AttachmentError {
    #[error("upload of {filename} failed: {source}")]
    Upload {
        filename: String,
        #[source]
        source: UploadError,
    },
}

/// One file as selected in the admin form.
pub struct FileUpload {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `bytes` under `object` and return the public URL.
    async fn upload(
        &self,
        object: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, UploadError>;
}

/// Blob storage over the hosted storage HTTP API.
pub struct StorageClient {
    http: reqwest::Client,
    base_url: String,
    bucket: String,
    service_key: String,
}

impl StorageClient {
    pub fn new(base_url: String, bucket: String, service_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            bucket,
            service_key,
        }
    }

    /// `None` when the storage collaborator is not configured; uploads are
    /// then reported as unavailable instead of failing at request time.
    pub fn from_env() -> Option<Self> {
        let base_url = std::env::var("STORAGE_URL").ok()?;
        let service_key = std::env::var("STORAGE_SERVICE_KEY").ok()?;
        let bucket = std::env::var("STORAGE_BUCKET").unwrap_or_else(|_| "uploads".to_string());
        Some(Self::new(base_url, bucket, service_key))
    }
}

#[async_trait]
impl BlobStore for StorageClient {
    async fn upload(
        &self,
        object: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, UploadError> {
        let endpoint = format!("{}/storage/v1/object/{}/{object}", self.base_url, self.bucket);
        let response = self
            .http
            .post(&endpoint)
            .bearer_auth(&self.service_key)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(UploadError::Rejected { status, message });
        }
        Ok(format!(
            "{}/storage/v1/object/public/{}/{object}",
            self.base_url, self.bucket
        ))
    }
}

/// Randomized object name so concurrent operators can never collide;
/// keeps the original extension for content-type sniffing downstream.
pub fn random_object_name(original: &str) -> String {
    let stem: String = rand::thread_rng()
        .sample_iter(&rand::distributions::Alphanumeric)
        .take(16)
        .map(char::from)
        .collect();
    let stem = stem.to_lowercase();
    match original.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => format!("{stem}.{}", ext.to_lowercase()),
        _ => stem,
    }
}

#[derive(juniper::GraphQLEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentMode {
    /// The field holds at most one URL; a new upload replaces it.
    Single,
    /// The field holds an ordered list of URLs; uploads append.
    Multiple,
}

/// Per-field upload session. URLs are kept in selection order; a failure
/// keeps what already uploaded and abandons the rest.
pub struct AttachmentField {
    mode: AttachmentMode,
    urls: Vec<String>,
    uploading: bool,
}

impl AttachmentField {
    pub fn new(mode: AttachmentMode) -> Self {
        Self {
            mode,
            urls: Vec::new(),
            uploading: false,
        }
    }

    /// Seed from the field's previously submitted value when editing a row.
    pub fn seeded(mode: AttachmentMode, existing: &str) -> Self {
        let urls = existing
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        Self {
            mode,
            urls,
            uploading: false,
        }
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    /// True while an attach call is in flight; the enclosing form must not
    /// submit a half-uploaded list.
    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    /// Upload the selected files one at a time, in selection order.
    /// Single mode consumes only the first file and replaces the list.
    /// Returns the number of files attached.
    pub async fn attach(
        &mut self,
        files: Vec<FileUpload>,
        store: &dyn BlobStore,
    ) -> Result<usize, AttachmentError> {
        self.uploading = true;
        let mut files = files;
        if self.mode == AttachmentMode::Single {
            files.truncate(1);
        }
        let mut attached = 0;
        for file in files {
            let object = random_object_name(&file.name);
            match store.upload(&object, file.bytes, &file.content_type).await {
                Ok(url) => {
                    if self.mode == AttachmentMode::Single {
                        self.urls.clear();
                    }
                    self.urls.push(url);
                    attached += 1;
                }
                Err(source) => {
                    self.uploading = false;
                    return Err(AttachmentError::Upload {
                        filename: file.name,
                        source,
                    });
                }
            }
        }
        self.uploading = false;
        Ok(attached)
    }

    /// Remove one URL from the field. The blob itself is not deleted.
    pub fn detach(&mut self, index: usize) -> Option<String> {
        if index < self.urls.len() {
            Some(self.urls.remove(index))
        } else {
            None
        }
    }

    /// The single string the field submits: comma-joined for multi-image
    /// fields, the sole URL (or empty) for single-image fields.
    pub fn submitted_value(&self) -> String {
        match self.mode {
            AttachmentMode::Single => self.urls.first().cloned().unwrap_or_default(),
            AttachmentMode::Multiple => self.urls.join(","),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Returns a URL derived from the file contents so tests can tell the
    /// results apart, sleeping a different amount per call to simulate
    /// variable storage latency.
    struct SlowStore {
        delays_ms: Vec<u64>,
        calls: AtomicUsize,
    }

    impl SlowStore {
        fn new(delays_ms: Vec<u64>) -> Self {
            Self {
                delays_ms,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl BlobStore for SlowStore {
        async fn upload(
            &self,
            _object: &str,
            bytes: Vec<u8>,
            _content_type: &str,
        ) -> Result<String, UploadError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            let delay = self.delays_ms[call % self.delays_ms.len()];
            tokio::time::sleep(Duration::from_millis(delay)).await;
            Ok(format!(
                "https://blobs.test/{}",
                String::from_utf8(bytes).unwrap()
            ))
        }
    }

    /// Fails every upload after the first `succeed` calls.
    struct FlakyStore {
        succeed: usize,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl BlobStore for FlakyStore {
        async fn upload(
            &self,
            _object: &str,
            bytes: Vec<u8>,
            _content_type: &str,
        ) -> Result<String, UploadError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.succeed {
                Ok(format!(
                    "https://blobs.test/{}",
                    String::from_utf8(bytes).unwrap()
                ))
            } else {
                Err(UploadError::Rejected {
                    status: 403,
                    message: "bucket not public".to_string(),
                })
            }
        }
    }

    fn file(name: &str, contents: &str) -> FileUpload {
        FileUpload {
            name: name.to_string(),
            content_type: "image/png".to_string(),
            bytes: contents.as_bytes().to_vec(),
        }
    }

    #[tokio::test]
    async fn test_uploads_keep_selection_order_under_variable_latency() {
        // The first file is the slowest; order must still be a, b, c.
        let store = SlowStore::new(vec![30, 1, 10]);
        let mut field = AttachmentField::new(AttachmentMode::Multiple);
        let attached = field
            .attach(vec![file("a.png", "a"), file("b.png", "b"), file("c.png", "c")], &store)
            .await
            .unwrap();
        assert_eq!(attached, 3);
        assert_eq!(
            field.urls(),
            &[
                "https://blobs.test/a".to_string(),
                "https://blobs.test/b".to_string(),
                "https://blobs.test/c".to_string(),
            ]
        );
        assert!(!field.is_uploading());
    }

    #[tokio::test]
    async fn test_failure_keeps_earlier_uploads_and_abandons_the_rest() {
        let store = FlakyStore {
            succeed: 1,
            calls: AtomicUsize::new(0),
        };
        let mut field = AttachmentField::new(AttachmentMode::Multiple);
        let err = field
            .attach(vec![file("a.png", "a"), file("b.png", "b"), file("c.png", "c")], &store)
            .await
            .unwrap_err();
        let AttachmentError::Upload { filename, .. } = err;
        assert_eq!(filename, "b.png");
        // a.png survived; c.png was never attempted.
        assert_eq!(field.urls(), &["https://blobs.test/a".to_string()]);
        assert_eq!(store.calls.load(Ordering::SeqCst), 2);
        assert!(!field.is_uploading());
    }

    #[tokio::test]
    async fn test_single_mode_takes_first_file_and_replaces() {
        let store = SlowStore::new(vec![1]);
        let mut field = AttachmentField::seeded(AttachmentMode::Single, "https://blobs.test/old");
        field
            .attach(vec![file("new.png", "new"), file("ignored.png", "x")], &store)
            .await
            .unwrap();
        assert_eq!(field.urls(), &["https://blobs.test/new".to_string()]);
        assert_eq!(field.submitted_value(), "https://blobs.test/new");
        assert_eq!(store.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_seeding_parses_the_serialized_value() {
        let field = AttachmentField::seeded(AttachmentMode::Multiple, "http://x/1.png, ,http://x/2.png");
        assert_eq!(
            field.urls(),
            &["http://x/1.png".to_string(), "http://x/2.png".to_string()]
        );
    }

    #[test]
    fn test_detach_removes_without_touching_storage() {
        let mut field = AttachmentField::seeded(AttachmentMode::Multiple, "http://x/1.png,http://x/2.png");
        assert_eq!(field.detach(0).as_deref(), Some("http://x/1.png"));
        assert_eq!(field.detach(5), None);
        assert_eq!(field.submitted_value(), "http://x/2.png");
    }

    #[test]
    fn test_empty_single_field_submits_empty_string() {
        let field = AttachmentField::new(AttachmentMode::Single);
        assert_eq!(field.submitted_value(), "");
    }

    #[test]
    fn test_random_object_names_keep_the_extension() {
        let name = random_object_name("Poster.PNG");
        assert!(name.ends_with(".png"));
        assert_eq!(name.len(), 16 + 4);
        assert_ne!(name, random_object_name("Poster.PNG"));

        assert_eq!(random_object_name("noext").len(), 16);
    }
}
