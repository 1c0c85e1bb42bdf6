//! Uploaded photo validation and the stored-path reference kept on recipes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Image formats accepted for recipe photos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageExtension {
    /// Portable Network Graphics (`.png`).
    Png,
    /// JPEG under its short suffix (`.jpg`).
    Jpg,
    /// JPEG under its long suffix (`.jpeg`).
    Jpeg,
}

/// The default allow-list for recipe photos.
pub const ALLOWED_IMAGE_EXTENSIONS: &[ImageExtension] =
    &[ImageExtension::Png, ImageExtension::Jpg, ImageExtension::Jpeg];

impl ImageExtension {
    /// Upper-case canonical label.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Png => "PNG",
            Self::Jpg => "JPG",
            Self::Jpeg => "JPEG",
        }
    }

    fn from_label(label: &str) -> Option<Self> {
        match label.to_ascii_uppercase().as_str() {
            "PNG" => Some(Self::Png),
            "JPG" => Some(Self::Jpg),
            "JPEG" => Some(Self::Jpeg),
            _ => None,
        }
    }
}

impl fmt::Display for ImageExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reasons an upload filename is refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageValidationError {
    /// No filename was supplied.
    #[error("image filename must not be empty")]
    EmptyName,
    /// The filename has no `.` or ends with one.
    #[error("image filename `{filename}` has no extension")]
    MissingExtension { filename: String },
    /// The extension is outside the allow-list.
    #[error("image extension `{extension}` is not allowed")]
    UnsupportedExtension { extension: String },
    /// The filename names a directory or climbs out of the upload root.
    #[error("image filename `{filename}` must not contain path components")]
    UnsafeName { filename: String },
}

/// Check `filename` against `allowed` and return its extension.
///
/// The extension is the text after the last `.`, compared
/// case-insensitively. Names carrying path separators or `..` are refused
/// so a stored file never lands outside the upload directory.
///
/// # Examples
/// ```
/// use galleta::domain::{ALLOWED_IMAGE_EXTENSIONS, ImageExtension, validate_image_name};
///
/// assert_eq!(
///     validate_image_name("photo.JPG", ALLOWED_IMAGE_EXTENSIONS),
///     Ok(ImageExtension::Jpg)
/// );
/// assert!(validate_image_name("photo", ALLOWED_IMAGE_EXTENSIONS).is_err());
/// assert!(validate_image_name("photo.gif", ALLOWED_IMAGE_EXTENSIONS).is_err());
/// ```
pub fn validate_image_name(
    filename: &str,
    allowed: &[ImageExtension],
) -> Result<ImageExtension, ImageValidationError> {
    if filename.is_empty() {
        return Err(ImageValidationError::EmptyName);
    }
    if filename.contains(['/', '\\']) || filename == "." || filename == ".." {
        return Err(ImageValidationError::UnsafeName {
            filename: filename.to_owned(),
        });
    }
    let Some((_, label)) = filename.rsplit_once('.') else {
        return Err(ImageValidationError::MissingExtension {
            filename: filename.to_owned(),
        });
    };
    if label.is_empty() {
        return Err(ImageValidationError::MissingExtension {
            filename: filename.to_owned(),
        });
    }

    ImageExtension::from_label(label)
        .filter(|extension| allowed.contains(extension))
        .ok_or_else(|| ImageValidationError::UnsupportedExtension {
            extension: label.to_owned(),
        })
}

/// Photo bytes as received from a client, not yet validated.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// Client-supplied filename, also used as the stored name.
    pub filename: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageUpload")
            .field("filename", &self.filename)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Upload whose filename passed [`validate_image_name`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedImage {
    filename: String,
    extension: ImageExtension,
    bytes: Vec<u8>,
}

impl ValidatedImage {
    /// Validate an upload against the default allow-list.
    pub fn try_from_upload(upload: ImageUpload) -> Result<Self, ImageValidationError> {
        let extension = validate_image_name(&upload.filename, ALLOWED_IMAGE_EXTENSIONS)?;
        Ok(Self {
            filename: upload.filename,
            extension,
            bytes: upload.bytes,
        })
    }

    /// Filename the photo is stored under.
    pub fn filename(&self) -> &str {
        self.filename.as_str()
    }

    /// Extension accepted during validation.
    pub fn extension(&self) -> ImageExtension {
        self.extension
    }

    /// File contents to write.
    pub fn bytes(&self) -> &[u8] {
        self.bytes.as_slice()
    }
}

/// Location recorded in a recipe's `photo` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoragePath(String);

impl StoragePath {
    /// Wrap a path reported by an image store or read back from storage.
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Path as text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for StoragePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<StoragePath> for String {
    fn from(value: StoragePath) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("photo.JPG", ImageExtension::Jpg)]
    #[case("photo.png", ImageExtension::Png)]
    #[case("cake.final.jpeg", ImageExtension::Jpeg)]
    #[case("IMG.PnG", ImageExtension::Png)]
    fn accepted_extensions(#[case] filename: &str, #[case] expected: ImageExtension) {
        assert_eq!(
            validate_image_name(filename, ALLOWED_IMAGE_EXTENSIONS),
            Ok(expected)
        );
    }

    #[rstest]
    #[case("")]
    #[case("photo")]
    #[case("photo.")]
    #[case("photo.gif")]
    #[case("photo.jpg.exe")]
    #[case("../photo.png")]
    #[case("nested/photo.png")]
    #[case("nested\\photo.png")]
    #[case("..")]
    fn rejected_names(#[case] filename: &str) {
        assert!(validate_image_name(filename, ALLOWED_IMAGE_EXTENSIONS).is_err());
    }

    #[rstest]
    fn extension_is_taken_after_last_dot() {
        let err = validate_image_name("photo.png.gif", ALLOWED_IMAGE_EXTENSIONS)
            .expect_err("gif must be refused");
        assert_eq!(
            err,
            ImageValidationError::UnsupportedExtension {
                extension: "gif".to_owned()
            }
        );
    }

    #[rstest]
    fn narrower_allow_list_is_honoured() {
        let result = validate_image_name("photo.jpg", &[ImageExtension::Png]);
        assert!(matches!(
            result,
            Err(ImageValidationError::UnsupportedExtension { .. })
        ));
    }

    #[rstest]
    fn empty_name_is_reported_distinctly() {
        let upload = ImageUpload {
            filename: String::new(),
            bytes: vec![1, 2, 3],
        };
        assert_eq!(
            ValidatedImage::try_from_upload(upload),
            Err(ImageValidationError::EmptyName)
        );
    }

    #[rstest]
    fn upload_debug_omits_bytes() {
        let upload = ImageUpload {
            filename: "a.png".to_owned(),
            bytes: vec![0; 4],
        };
        assert_eq!(
            format!("{upload:?}"),
            "ImageUpload { filename: \"a.png\", len: 4 }"
        );
    }
}
