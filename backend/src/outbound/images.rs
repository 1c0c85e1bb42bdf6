//! Filesystem image store rooted at the configured upload directory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use tracing::error;

use crate::domain::ports::{ImageStore, ImageStoreError};
use crate::domain::{StoragePath, ValidatedImage};

/// Writes photos through a `cap_std` directory handle, so a stored file can
/// only ever land inside the upload directory.
///
/// The recorded path is the configured directory joined with the filename,
/// e.g. `static/img/uploads/cake.jpg`. A second upload with the same name
/// overwrites the first.
#[derive(Clone)]
pub struct CapStdImageStore {
    dir: Arc<Dir>,
    display_root: PathBuf,
}

impl CapStdImageStore {
    /// Open `upload_dir`, creating it (and its parents) when missing.
    pub fn open(upload_dir: impl AsRef<Path>) -> std::io::Result<Self> {
        let upload_dir = upload_dir.as_ref();
        Dir::create_ambient_dir_all(upload_dir, ambient_authority())?;
        let dir = Dir::open_ambient_dir(upload_dir, ambient_authority())?;
        Ok(Self {
            dir: Arc::new(dir),
            display_root: upload_dir.to_path_buf(),
        })
    }

    fn storage_path(&self, filename: &str) -> StoragePath {
        StoragePath::new(self.display_root.join(filename).to_string_lossy().into_owned())
    }
}

#[async_trait]
impl ImageStore for CapStdImageStore {
    async fn store(&self, image: &ValidatedImage) -> Result<StoragePath, ImageStoreError> {
        let dir = Arc::clone(&self.dir);
        let filename = image.filename().to_owned();
        let bytes = image.bytes().to_vec();

        let target = filename.clone();
        tokio::task::spawn_blocking(move || dir.write(&target, bytes))
            .await
            .map_err(|err| ImageStoreError::write(format!("image write task failed: {err}")))?
            .map_err(|err| {
                error!(%filename, error = %err, "failed to write recipe photo");
                ImageStoreError::write(err.to_string())
            })?;

        Ok(self.storage_path(&filename))
    }
}
