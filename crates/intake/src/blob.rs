//! Blob storage for uploaded photos and signatures
//!
//! A store takes opaque bytes with a file name and content type and hands
//! back the public URL under which the file is served. A store never
//! replaces an existing blob: a taken name gets a random suffix.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::PathBuf;

use guestbook_config::IntakeConfig;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::IntakeError;

/// Storage backend for uploaded files
#[allow(async_fn_in_trait)]
pub trait BlobStore {
    /// Store `bytes` under `filename` (or a free variant of it) and return its public URL
    async fn put(&self, bytes: &[u8], filename: &str, content_type: &str)
    -> Result<String, IntakeError>;

    /// Remove a previously stored blob by its URL
    async fn delete(&self, url: &str) -> Result<(), IntakeError>;
}

/// Reduce a client-supplied name to a single safe path component
pub fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.trim_matches('.').is_empty() {
        "blob".to_string()
    } else {
        cleaned
    }
}

/// Names tried for one blob, the requested one first
const MAX_NAME_ATTEMPTS: usize = 8;

/// `name` with a random tag inserted before its extension
fn disambiguate(name: &str) -> String {
    let tag = Uuid::new_v4().simple().to_string();
    let tag = &tag[..8];
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{stem}_{tag}.{ext}"),
        _ => format!("{name}_{tag}"),
    }
}

fn candidate_names(name: &str) -> impl Iterator<Item = String> + '_ {
    std::iter::once(name.to_string())
        .chain(std::iter::repeat_with(move || disambiguate(name)))
        .take(MAX_NAME_ATTEMPTS)
}

/// Last path segment of a blob URL
fn file_name_from_url(url: &str) -> Option<&str> {
    url.rsplit('/').next().filter(|name| !name.is_empty())
}

/// Blobs written to a directory and served under a base URL
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    dir: PathBuf,
    base_url: String,
}

impl FsBlobStore {
    pub fn new(config: &IntakeConfig) -> Self {
        Self {
            dir: config.blob_dir.clone(),
            base_url: config.blob_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }

    fn url_for(&self, name: &str) -> String {
        format!("{}/{}", self.base_url, name)
    }
}

impl BlobStore for FsBlobStore {
    async fn put(
        &self,
        bytes: &[u8],
        filename: &str,
        content_type: &str,
    ) -> Result<String, IntakeError> {
        let requested = sanitize_file_name(filename);
        tokio::fs::create_dir_all(&self.dir).await?;

        for name in candidate_names(&requested) {
            let opened = tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(self.dir.join(&name))
                .await;
            let mut file = match opened {
                Ok(file) => file,
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    debug!("Blob name {} taken, retrying", name);
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            file.write_all(bytes).await?;
            file.flush().await?;

            let url = self.url_for(&name);
            info!("Stored {} ({} bytes, {})", url, bytes.len(), content_type);
            return Ok(url);
        }
        Err(IntakeError::BlobNameTaken(requested))
    }

    async fn delete(&self, url: &str) -> Result<(), IntakeError> {
        let Some(name) = file_name_from_url(url) else {
            return Err(IntakeError::UnknownBlob(url.to_string()));
        };
        let path = self.dir.join(sanitize_file_name(name));
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                debug!("Deleted blob {}", url);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(IntakeError::UnknownBlob(url.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// A blob held by [`MemoryBlobStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// In-process blob store
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: RwLock<HashMap<String, StoredBlob>>,
}

impl MemoryBlobStore {
    pub const BASE_URL: &'static str = "memory://blobs";

    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, url: &str) -> Option<StoredBlob> {
        self.blobs.read().await.get(url).cloned()
    }

    pub async fn len(&self) -> usize {
        self.blobs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.blobs.read().await.is_empty()
    }
}

impl BlobStore for MemoryBlobStore {
    async fn put(
        &self,
        bytes: &[u8],
        filename: &str,
        content_type: &str,
    ) -> Result<String, IntakeError> {
        let requested = sanitize_file_name(filename);
        let mut blobs = self.blobs.write().await;
        for name in candidate_names(&requested) {
            let url = format!("{}/{}", Self::BASE_URL, name);
            if let Entry::Vacant(slot) = blobs.entry(url.clone()) {
                slot.insert(StoredBlob {
                    bytes: bytes.to_vec(),
                    content_type: content_type.to_string(),
                });
                debug!("Stored {} in memory", url);
                return Ok(url);
            }
        }
        Err(IntakeError::BlobNameTaken(requested))
    }

    async fn delete(&self, url: &str) -> Result<(), IntakeError> {
        match self.blobs.write().await.remove(url) {
            Some(_) => Ok(()),
            None => Err(IntakeError::UnknownBlob(url.to_string())),
        }
    }
}
