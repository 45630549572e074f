//! Upload storage
//!
//! Assigns a storage filename to an uploaded file and writes it under
//! the uploads directory. Filenames are a random token plus the
//! original extension, so two uploads can never collide the way
//! timestamp-derived names could.

use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::domain::DomainError;

#[derive(Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create the uploads directory if it does not exist yet.
    pub async fn ensure_dir(&self) -> Result<(), DomainError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| DomainError::Internal(format!("Failed to create uploads dir: {}", e)))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write the bytes under a generated filename and return that
    /// filename for association with the owning record.
    pub async fn store(
        &self,
        original_name: &str,
        data: &[u8],
    ) -> Result<String, DomainError> {
        let filename = generate_filename(original_name);
        let path = self.dir.join(&filename);

        tokio::fs::write(&path, data)
            .await
            .map_err(|e| DomainError::Internal(format!("Failed to write upload: {}", e)))?;

        tracing::debug!("stored upload {} ({} bytes)", filename, data.len());
        Ok(filename)
    }
}

fn generate_filename(original_name: &str) -> String {
    let token = Uuid::new_v4().simple().to_string();
    match Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
    {
        Some(ext) => format!("{}.{}", token, ext),
        None => token,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_original_extension() {
        let name = generate_filename("voice-note.mp3");
        assert!(name.ends_with(".mp3"));
        assert_eq!(name.len(), 32 + 4);
    }

    #[test]
    fn handles_missing_extension() {
        let name = generate_filename("noext");
        assert!(!name.contains('.'));
    }

    #[test]
    fn names_are_unique() {
        assert_ne!(generate_filename("a.png"), generate_filename("a.png"));
    }
}
