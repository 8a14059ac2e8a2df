//! Assembly of replacement markup for an enriched image reference.

use crate::domain::entities::{ImageDimensions, ImageMetadata, ParsedDescriptor};

/// Per-reference layout hints supplied by the orchestrator.
#[derive(Debug, Clone)]
pub struct LayoutHints {
    /// Value of the `sizes` attribute.
    pub sizes: String,
    /// True when this image should load eagerly with high priority
    /// (position at or below the document's eager threshold).
    pub eager: bool,
}

/// Combines parsed overrides, metadata and the responsive descriptor into
/// final markup.
///
/// Display width is the override when present, else the original width;
/// display height is the override when present, else derived from the
/// original aspect ratio. With a placeholder available the image is wrapped
/// in a ratio-preserving element carrying the placeholder as background
/// fill; without one a bare `<img>` is returned.
#[must_use]
pub fn build_markup(
    descriptor: &ParsedDescriptor,
    url: &str,
    metadata: &ImageMetadata,
    srcset: &str,
    layout: &LayoutHints,
) -> String {
    let display_width = descriptor.width.unwrap_or(metadata.width);
    let display_height = descriptor
        .height
        .unwrap_or_else(|| metadata.dimensions().height_for_width(display_width));

    let loading = if layout.eager {
        r#"loading="eager" fetchpriority="high""#
    } else {
        r#"loading="lazy" decoding="async""#
    };

    let alt = escape_attribute(&descriptor.label);
    let sizes = escape_attribute(&layout.sizes);

    if !metadata.has_placeholder() {
        return format!(
            r#"<img src="{url}" srcset="{srcset}" sizes="{sizes}" width="{display_width}" height="{display_height}" alt="{alt}" {loading}>"#
        );
    }

    let padding = ImageDimensions::new(display_width, display_height).padding_percent();

    format!(
        r#"<span style="display:block;position:relative;overflow:hidden;padding-bottom:{padding:.4}%;background-image:url('{placeholder}');background-size:cover;"><img src="{url}" srcset="{srcset}" sizes="{sizes}" width="{display_width}" height="{display_height}" alt="{alt}" {loading} style="position:absolute;top:0;left:0;width:100%;height:100%;"></span>"#,
        placeholder = metadata.placeholder,
    )
}

/// Escapes text for use inside a double-quoted HTML attribute.
fn escape_attribute(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ImageDimensions;

    fn metadata() -> ImageMetadata {
        ImageMetadata::from_dimensions(ImageDimensions::new(1200, 800))
            .with_placeholder("data:image/jpeg;base64,AAAA")
    }

    fn hints(eager: bool) -> LayoutHints {
        LayoutHints {
            sizes: "100vw".to_string(),
            eager,
        }
    }

    #[test]
    fn test_override_width_derives_height() {
        let descriptor = ParsedDescriptor {
            label: "photo".to_string(),
            width: Some(300),
            height: None,
        };
        let out = build_markup(
            &descriptor,
            "https://example.com/a.jpg",
            &metadata(),
            "srcset-here",
            &hints(false),
        );
        assert!(out.contains(r#"width="300""#));
        assert!(out.contains(r#"height="200""#));
        assert!(out.contains(r#"alt="photo""#));
    }

    #[test]
    fn test_no_override_uses_original_dimensions() {
        let descriptor = ParsedDescriptor::label_only("photo");
        let out = build_markup(
            &descriptor,
            "https://example.com/a.jpg",
            &metadata(),
            "s",
            &hints(false),
        );
        assert!(out.contains(r#"width="1200""#));
        assert!(out.contains(r#"height="800""#));
    }

    #[test]
    fn test_explicit_height_wins_over_ratio() {
        let descriptor = ParsedDescriptor {
            label: "photo".to_string(),
            width: Some(300),
            height: Some(150),
        };
        let out = build_markup(
            &descriptor,
            "https://example.com/a.jpg",
            &metadata(),
            "s",
            &hints(false),
        );
        assert!(out.contains(r#"width="300""#));
        assert!(out.contains(r#"height="150""#));
        // wrapper ratio follows the display dimensions
        assert!(out.contains("padding-bottom:50.0000%"));
    }

    #[test]
    fn test_wrapper_carries_placeholder_background() {
        let descriptor = ParsedDescriptor::label_only("photo");
        let out = build_markup(
            &descriptor,
            "https://example.com/a.jpg",
            &metadata(),
            "s",
            &hints(false),
        );
        assert!(out.starts_with("<span "));
        assert!(out.ends_with("</span>"));
        assert!(out.contains("background-image:url('data:image/jpeg;base64,AAAA')"));
        assert!(out.contains("padding-bottom:66.6667%"));
    }

    #[test]
    fn test_no_placeholder_yields_bare_image() {
        let descriptor = ParsedDescriptor::label_only("photo");
        let meta = ImageMetadata::from_dimensions(ImageDimensions::new(1200, 800));
        let out = build_markup(
            &descriptor,
            "https://example.com/a.jpg",
            &meta,
            "s",
            &hints(false),
        );
        assert!(out.starts_with("<img "));
        assert!(!out.contains("<span"));
        assert!(!out.contains("background-image"));
    }

    #[test]
    fn test_lazy_and_eager_hints() {
        let descriptor = ParsedDescriptor::label_only("photo");
        let lazy = build_markup(
            &descriptor,
            "https://example.com/a.jpg",
            &metadata(),
            "s",
            &hints(false),
        );
        assert!(lazy.contains(r#"loading="lazy" decoding="async""#));

        let eager = build_markup(
            &descriptor,
            "https://example.com/a.jpg",
            &metadata(),
            "s",
            &hints(true),
        );
        assert!(eager.contains(r#"loading="eager" fetchpriority="high""#));
    }

    #[test]
    fn test_alt_text_is_escaped() {
        let descriptor = ParsedDescriptor::label_only(r#"a "nice" <photo> & more"#);
        let out = build_markup(
            &descriptor,
            "https://example.com/a.jpg",
            &metadata(),
            "s",
            &hints(false),
        );
        assert!(out.contains(r#"alt="a &quot;nice&quot; &lt;photo&gt; &amp; more""#));
    }
}
