//! Image kinds accepted by the remote optimizer.
//!
//! Extensions are matched exactly as written on disk, so `photo.JPG` is not a
//! candidate.

use crate::constants::SUPPORTED_IMAGE_EXTENSIONS;
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
}

impl ImageKind {
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "jpg" | "jpeg" => Some(ImageKind::Jpeg),
            "png" => Some(ImageKind::Png),
            _ => None,
        }
    }

    /// Kind for an upload. Anything that is not a JPEG extension is sent as PNG.
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(ImageKind::from_extension)
            .unwrap_or(ImageKind::Png)
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageKind::Jpeg => "image/jpeg",
            ImageKind::Png => "image/png",
        }
    }
}

impl fmt::Display for ImageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ImageKind::Jpeg => "JPEG",
            ImageKind::Png => "PNG",
        };
        write!(f, "{}", name)
    }
}

/// True when the path has one of the supported extensions, without touching the filesystem.
/// A bare dotfile such as `.png` has no extension and never qualifies.
pub fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SUPPORTED_IMAGE_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

/// A shrink candidate: an existing regular file (symlinks followed) with a supported extension.
pub fn is_image_path(path: &Path) -> bool {
    path.is_file() && has_image_extension(path)
}
