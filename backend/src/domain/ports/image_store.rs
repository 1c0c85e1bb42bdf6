//! Port for persisting uploaded recipe photos.

use async_trait::async_trait;

use crate::domain::{StoragePath, ValidatedImage};

use super::define_port_error;

define_port_error! {
    /// Errors raised by image store adapters.
    pub enum ImageStoreError {
        /// Writing the file failed.
        Write { message: String } => "image write failed: {message}",
    }
}

/// Writes validated photos into the upload area.
///
/// Storing a file under a name that already exists replaces it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Persist `image` and return the path to record on the recipe.
    async fn store(&self, image: &ValidatedImage) -> Result<StoragePath, ImageStoreError>;
}
