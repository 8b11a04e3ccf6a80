use std::env;
use std::path::PathBuf;

/// 20 MiB ceiling for profile photo uploads.
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

#[derive(Clone, Debug)]
pub struct UploadConfig {
    /// Directory photos are written to.
    pub base_dir: PathBuf,
    /// Public path prefix stored on the user row and served statically.
    pub public_prefix: String,
    pub max_bytes: usize,
}

impl UploadConfig {
    pub fn from_env() -> Self {
        Self {
            base_dir: env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("uploads/profile-photos")),
            public_prefix: "/uploads/profile-photos".to_string(),
            max_bytes: MAX_UPLOAD_BYTES,
        }
    }
}
