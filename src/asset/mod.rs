//! Logo asset resolution.
//!
//! A logo is obtained by walking an ordered list of [`LogoSource`]s and
//! keeping the first one that yields a recognisable image. Every failure is
//! logged and swallowed: a missing logo is a valid outcome, and the
//! serializers simply leave their image region out.
//!
//! In the browser the list is [raster, refetch] (see [`web`]); the CLI uses
//! a single [`FileLogoSource`].

#[cfg(target_arch = "wasm32")]
pub mod web;

use std::path::PathBuf;

use futures::future::{FutureExt, LocalBoxFuture};

use crate::error::{Result, YardCheckError};

/// Raster formats a logo may arrive in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
}

impl ImageFormat {
    /// Detect the format from the leading magic bytes.
    #[must_use]
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
            Some(Self::Png)
        } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(Self::Jpeg)
        } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
            Some(Self::Gif)
        } else {
            None
        }
    }

    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Gif => "gif",
        }
    }

    #[must_use]
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
        }
    }
}

/// Resolved logo bytes with their sniffed format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoImage {
    bytes: Vec<u8>,
    format: ImageFormat,
}

impl LogoImage {
    /// Wrap raw bytes, rejecting anything that is not PNG, JPEG or GIF.
    ///
    /// # Errors
    /// Returns [`YardCheckError::Asset`] for empty or unrecognised data.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let format = ImageFormat::sniff(&bytes).ok_or_else(|| {
            YardCheckError::Asset(format!("unrecognised image data ({} bytes)", bytes.len()))
        })?;
        Ok(Self { bytes, format })
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn format(&self) -> ImageFormat {
        self.format
    }
}

/// One strategy for obtaining the logo's bytes.
pub trait LogoSource {
    /// Short name used in log messages.
    fn name(&self) -> &'static str;

    /// Produce the raw image bytes.
    fn load(&self) -> LocalBoxFuture<'_, Result<Vec<u8>>>;
}

/// Try each source in order and return the first usable logo.
///
/// A source is only attempted after every earlier one has failed.
pub async fn resolve_logo_bytes(sources: &[Box<dyn LogoSource + '_>]) -> Option<LogoImage> {
    for source in sources {
        let attempt = source.load().await.and_then(LogoImage::from_bytes);
        match attempt {
            Ok(logo) => {
                log::debug!(
                    "logo resolved via {} ({} bytes, {})",
                    source.name(),
                    logo.bytes().len(),
                    logo.format().extension()
                );
                return Some(logo);
            }
            Err(e) => log::debug!("logo source {} failed: {e}", source.name()),
        }
    }
    if !sources.is_empty() {
        log::warn!("no logo source succeeded; exporting without logo");
    }
    None
}

/// Reads the logo from a file on disk.
pub struct FileLogoSource {
    path: PathBuf,
}

impl FileLogoSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LogoSource for FileLogoSource {
    fn name(&self) -> &'static str {
        "file"
    }

    fn load(&self) -> LocalBoxFuture<'_, Result<Vec<u8>>> {
        async move { std::fs::read(&self.path).map_err(YardCheckError::from) }.boxed_local()
    }
}

/// Logo bytes already held in memory.
pub struct StaticLogoSource {
    bytes: Vec<u8>,
}

impl StaticLogoSource {
    #[must_use]
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

impl LogoSource for StaticLogoSource {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn load(&self) -> LocalBoxFuture<'_, Result<Vec<u8>>> {
        futures::future::ready(Ok(self.bytes.clone())).boxed_local()
    }
}
