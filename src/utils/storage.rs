//! Local storage for uploaded profile photos.
//!
//! Files land under the configured upload directory and are served
//! statically at the configured public prefix. Keys are relative paths
//! and are validated against traversal before touching the filesystem.

use std::path::{Path, PathBuf};

use anyhow::anyhow;
use rand::Rng;
use tokio::fs;
use tracing::warn;

use crate::config::uploads::UploadConfig;
use crate::utils::errors::AppError;

#[derive(Clone, Debug)]
pub struct PhotoStorage {
    base_dir: PathBuf,
    public_prefix: String,
    max_bytes: usize,
}

impl PhotoStorage {
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            base_dir: config.base_dir.clone(),
            public_prefix: config.public_prefix.clone(),
            max_bytes: config.max_bytes,
        }
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Reject empty keys, traversal attempts, and anything outside the
    /// conservative filename alphabet.
    fn validate_key(key: &str) -> Result<(), AppError> {
        if key.is_empty() || key.contains("..") || key.starts_with('/') {
            return Err(AppError::bad_request(anyhow!("Invalid storage key")));
        }

        if !key
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_' || c == '/' || c == '.')
        {
            return Err(AppError::bad_request(anyhow!(
                "Storage key contains invalid characters"
            )));
        }

        Ok(())
    }

    /// Unique filename preserving the original extension, e.g.
    /// `profile-1712345678901-482915736.png`.
    pub fn generate_key(original_filename: &str) -> String {
        let ext = Path::new(original_filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e))
            .unwrap_or_default();
        let millis = chrono::Utc::now().timestamp_millis();
        let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000_000);

        format!("profile-{}-{}{}", millis, suffix, ext)
    }

    /// Persist the bytes under `key` and return the public reference
    /// clients store on the user row.
    pub async fn save(&self, key: &str, content: &[u8]) -> Result<String, AppError> {
        Self::validate_key(key)?;

        if content.len() > self.max_bytes {
            return Err(AppError::payload_too_large(anyhow!(
                "File exceeds maximum size of {} bytes",
                self.max_bytes
            )));
        }

        let file_path = self.base_dir.join(key);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await.map_err(AppError::internal)?;
        }
        fs::write(&file_path, content)
            .await
            .map_err(AppError::internal)?;

        Ok(format!("{}/{}", self.public_prefix.trim_end_matches('/'), key))
    }

    /// Best-effort removal of a previously stored photo. External URLs and
    /// inline data references are left alone, and unlink failures are
    /// logged rather than surfaced.
    pub async fn delete_reference(&self, reference: &str) {
        if !Self::is_local_reference(reference) {
            return;
        }

        let key = match reference.strip_prefix(&self.public_prefix) {
            Some(rest) => rest.trim_start_matches('/'),
            None => return,
        };
        if Self::validate_key(key).is_err() {
            return;
        }

        let file_path = self.base_dir.join(key);
        match fs::remove_file(&file_path).await {
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %file_path.display(), "Failed to remove old photo: {}", e),
        }
    }

    pub fn is_local_reference(reference: &str) -> bool {
        !reference.starts_with("http") && !reference.starts_with("data:")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key_accepts_generated_names() {
        assert!(PhotoStorage::validate_key("profile-1712345678-42.png").is_ok());
        assert!(PhotoStorage::validate_key("profile-1712345678-42").is_ok());
    }

    #[test]
    fn test_validate_key_rejects_path_traversal() {
        assert!(PhotoStorage::validate_key("../../../etc/passwd").is_err());
        assert!(PhotoStorage::validate_key("/etc/passwd").is_err());
        assert!(PhotoStorage::validate_key("").is_err());
    }

    #[test]
    fn test_generate_key_preserves_extension() {
        let key = PhotoStorage::generate_key("me.JPG");
        assert!(key.starts_with("profile-"));
        assert!(key.ends_with(".JPG"));
    }

    #[test]
    fn test_generate_key_without_extension() {
        let key = PhotoStorage::generate_key("photo");
        assert!(key.starts_with("profile-"));
        assert!(!key.contains('.'));
    }

    #[test]
    fn test_is_local_reference() {
        assert!(PhotoStorage::is_local_reference(
            "/uploads/profile-photos/profile-1-2.png"
        ));
        assert!(!PhotoStorage::is_local_reference(
            "https://example.com/avatar.png"
        ));
        assert!(!PhotoStorage::is_local_reference("data:image/png;base64,AAAA"));
    }
}
