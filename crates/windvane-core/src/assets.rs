//! The page's static image assets.
//!
//! Every image the page references must exist under one fixed directory
//! and be a recognizable raster/vector format. Verification is fail-fast:
//! the first bad asset aborts the render, there is no partial page.

use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while resolving page assets.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("missing asset: {path}")]
    Missing { path: PathBuf },

    #[error("unreadable asset {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("not an image asset: {path}")]
    NotAnImage { path: PathBuf },
}

/// Image format of an asset, detected from extension and magic bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Svg,
    Jpeg,
    Gif,
    WebP,
}

impl ImageFormat {
    pub fn mime_type(self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Svg => "image/svg+xml",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Gif => "image/gif",
            ImageFormat::WebP => "image/webp",
        }
    }

    /// Short label used in the rendered image frame.
    pub fn label(self) -> &'static str {
        match self {
            ImageFormat::Png => "PNG",
            ImageFormat::Svg => "SVG",
            ImageFormat::Jpeg => "JPEG",
            ImageFormat::Gif => "GIF",
            ImageFormat::WebP => "WebP",
        }
    }
}

/// Detects the image format of `name`, trying the extension first and the
/// leading bytes second.
pub fn detect_image_format(name: &str, data: &[u8]) -> Option<ImageFormat> {
    let lower = name.to_ascii_lowercase();
    if lower.ends_with(".png") {
        return Some(ImageFormat::Png);
    }
    if lower.ends_with(".svg") {
        return Some(ImageFormat::Svg);
    }
    if lower.ends_with(".jpg") || lower.ends_with(".jpeg") {
        return Some(ImageFormat::Jpeg);
    }
    if lower.ends_with(".gif") {
        return Some(ImageFormat::Gif);
    }
    if lower.ends_with(".webp") {
        return Some(ImageFormat::WebP);
    }

    if data.len() >= 4 {
        if data[0] == 0x89 && data[1] == b'P' && data[2] == b'N' && data[3] == b'G' {
            return Some(ImageFormat::Png);
        }
        if data[0] == 0xFF && data[1] == 0xD8 {
            return Some(ImageFormat::Jpeg);
        }
        if data.starts_with(b"GIF") {
            return Some(ImageFormat::Gif);
        }
        if data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
            return Some(ImageFormat::WebP);
        }
    }

    // SVG is text; look for the root tag near the start.
    let head = &data[..data.len().min(512)];
    if let Ok(text) = std::str::from_utf8(head) {
        let trimmed = text.trim_start_matches('\u{feff}').trim_start();
        if trimmed.starts_with("<svg") || trimmed.starts_with("<?xml") {
            return Some(ImageFormat::Svg);
        }
    }

    None
}

/// The fixed directory holding the page's image files.
#[derive(Clone, Debug)]
pub struct AssetDir {
    root: PathBuf,
}

impl AssetDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Absolute or relative path an asset name resolves to.
    pub fn resolve(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Loads and classifies one image asset.
    ///
    /// Missing and unreadable files are distinguished so the error names
    /// the actual failure; a readable file that is not an image is
    /// rejected the same way.
    pub fn load_image(&self, name: &str) -> Result<ImageInfo, AssetError> {
        let path = self.resolve(name);
        let data = match fs::read(&path) {
            Ok(data) => data,
            Err(source) if source.kind() == io::ErrorKind::NotFound => {
                return Err(AssetError::Missing { path });
            }
            Err(source) => return Err(AssetError::Unreadable { path, source }),
        };
        let format =
            detect_image_format(name, &data).ok_or(AssetError::NotAnImage { path: path.clone() })?;
        Ok(ImageInfo {
            name: name.to_string(),
            path,
            format,
            len: data.len() as u64,
        })
    }
}

/// Metadata for a verified image asset.
#[derive(Clone, Debug)]
pub struct ImageInfo {
    pub name: String,
    pub path: PathBuf,
    pub format: ImageFormat,
    pub len: u64,
}

impl ImageInfo {
    /// Human-readable size, e.g. `823 B` or `14.2 KB`.
    pub fn display_size(&self) -> String {
        if self.len < 1024 {
            format!("{} B", self.len)
        } else if self.len < 1024 * 1024 {
            format!("{:.1} KB", self.len as f64 / 1024.0)
        } else {
            format!("{:.1} MB", self.len as f64 / (1024.0 * 1024.0))
        }
    }
}
