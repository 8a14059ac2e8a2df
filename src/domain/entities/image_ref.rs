//! Domain types for image references supplied by the host renderer.

/// A remote image reference embedded in a document.
///
/// Produced by the host renderer once per embedded image; scoped to a single
/// pipeline invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    /// Resolved absolute URL of the image, as it appears in the document.
    pub url: String,
    /// Raw descriptive (alt) text, possibly carrying a dimension suffix.
    pub alt: String,
}

impl ImageReference {
    /// Creates a new reference from any string-like inputs.
    #[must_use]
    pub fn new(url: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            alt: alt.into(),
        }
    }
}

impl std::fmt::Display for ImageReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.url)
    }
}

/// Descriptive text split into a label and optional display-size overrides.
///
/// Derived deterministically from [`ImageReference::alt`]; overrides are
/// display hints and never replace the original pixel dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedDescriptor {
    /// Human-readable label (may be empty).
    pub label: String,
    /// Explicit display width, when the text carried one.
    pub width: Option<u32>,
    /// Explicit display height, when the text carried one.
    pub height: Option<u32>,
}

impl ParsedDescriptor {
    /// Creates a descriptor carrying only a label.
    #[must_use]
    pub fn label_only(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            width: None,
            height: None,
        }
    }

    /// Returns true if the text carried any explicit dimension override.
    #[must_use]
    pub const fn has_overrides(&self) -> bool {
        self.width.is_some() || self.height.is_some()
    }
}
