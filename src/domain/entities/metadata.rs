//! Domain types for fetched image metadata.

use serde::{Deserialize, Serialize};

/// Original pixel dimensions of a remote image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDimensions {
    /// Original width in pixels.
    pub width: u32,
    /// Original height in pixels.
    pub height: u32,
}

impl ImageDimensions {
    /// Creates new dimensions.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Derives a display height from a display width, preserving the
    /// original aspect ratio.
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn height_for_width(&self, display_width: u32) -> u32 {
        let ratio = f64::from(self.height) / f64::from(self.width);
        (f64::from(display_width) * ratio).round() as u32
    }

    /// Aspect ratio expressed as the height share of the width, in percent.
    /// This is the padding value used for ratio-preserving wrappers.
    #[must_use]
    pub fn padding_percent(&self) -> f64 {
        f64::from(self.height) / f64::from(self.width) * 100.0
    }
}

impl std::fmt::Display for ImageDimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Metadata describing a remote image: original dimensions plus an optional
/// placeholder representation.
///
/// `width` and `height` are always the original pixel dimensions of the
/// remote asset, never display overrides. An empty `placeholder` means no
/// placeholder is available for this image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMetadata {
    /// Original width in pixels.
    pub width: u32,
    /// Original height in pixels.
    pub height: u32,
    /// Placeholder as a data URI, or empty when unavailable.
    #[serde(default)]
    pub placeholder: String,
}

impl ImageMetadata {
    /// Creates metadata from dimensions with no placeholder.
    #[must_use]
    pub const fn from_dimensions(dimensions: ImageDimensions) -> Self {
        Self {
            width: dimensions.width,
            height: dimensions.height,
            placeholder: String::new(),
        }
    }

    /// Sets the placeholder data URI.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Returns the original dimensions.
    #[must_use]
    pub const fn dimensions(&self) -> ImageDimensions {
        ImageDimensions::new(self.width, self.height)
    }

    /// Returns true if a placeholder is available.
    #[must_use]
    pub fn has_placeholder(&self) -> bool {
        !self.placeholder.is_empty()
    }
}
