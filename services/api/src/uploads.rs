//! Storage for uploaded product images

use std::io;
use std::path::PathBuf;

use tokio::fs;
use tracing::info;
use uuid::Uuid;

/// Writes uploaded files under a directory and hands out public references
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
    url_prefix: String,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            url_prefix: url_prefix.into(),
        }
    }

    /// Persist `bytes` and return the public reference of the stored file
    pub async fn save(&self, file_name: &str, bytes: &[u8]) -> io::Result<String> {
        fs::create_dir_all(&self.dir).await?;

        let stored_name = format!("{}_{}", Uuid::new_v4().simple(), sanitize_file_name(file_name));
        fs::write(self.dir.join(&stored_name), bytes).await?;
        info!("Stored upload {} ({} bytes)", stored_name, bytes.len());

        Ok(format!(
            "{}/{}",
            self.url_prefix.trim_end_matches('/'),
            stored_name
        ))
    }

    /// Remove a file previously returned by [`UploadStore::save`]
    pub async fn discard(&self, reference: &str) -> io::Result<()> {
        let stored_name = sanitize_file_name(reference);
        fs::remove_file(self.dir.join(stored_name)).await
    }
}

/// Keep only the final path component, restricted to a safe character set
fn sanitize_file_name(file_name: &str) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');

    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned.to_string()
    }
}
