use anyhow::{Context, Result};
use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use rand::RngExt;
use std::path::{Path, PathBuf};

/// An uploaded image on disk for the length of one analysis.
///
/// The file is removed when the guard drops, whichever way the analysis ends.
#[derive(Debug)]
pub struct TempUpload {
    path: PathBuf,
}

impl TempUpload {
    /// Write `bytes` to `<dir>/<random id><ext>`, keeping the extension of
    /// `file_name` when it is plain alphanumeric.
    pub async fn write(dir: &Path, file_name: Option<&str>, bytes: &[u8]) -> Result<Self> {
        let path = dir.join(format!("{}{}", random_id(), extension_of(file_name)));
        // Guard first, so a half-written file is removed too.
        let upload = Self { path };
        tokio::fs::write(&upload.path, bytes)
            .await
            .with_context(|| format!("failed to write upload to {}", upload.path.display()))?;
        Ok(upload)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored file back as standard base64.
    pub async fn read_base64(&self) -> Result<String> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("failed to read upload {}", self.path.display()))?;
        Ok(STANDARD.encode(bytes))
    }
}

impl Drop for TempUpload {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!(path = %self.path.display(), "removed upload"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to remove upload")
            }
        }
    }
}

/// 16 random bytes, URL-safe base64. Distinct per request.
fn random_id() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; 16] = rng.random();
    URL_SAFE_NO_PAD.encode(bytes)
}

fn extension_of(file_name: Option<&str>) -> String {
    file_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{}", ext))
        .unwrap_or_default()
}
