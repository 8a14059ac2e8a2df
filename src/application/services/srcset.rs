//! Building of `srcset` width descriptors.

/// Builds a `srcset` descriptor string from an original width and a list of
/// candidate widths.
///
/// Candidates at or above the original width are dropped, the original width
/// is always appended, and the result is deduplicated and sorted ascending.
/// The entry for the original width uses the unmodified URL; every other
/// entry appends a `w` query parameter. With no usable candidate the
/// descriptor contains just the original URL.
#[must_use]
pub fn build_srcset(url: &str, original_width: u32, candidate_widths: &[u32]) -> String {
    let mut widths: Vec<u32> = candidate_widths
        .iter()
        .copied()
        .filter(|w| *w < original_width)
        .collect();
    widths.push(original_width);
    widths.sort_unstable();
    widths.dedup();

    let entries: Vec<String> = widths
        .into_iter()
        .map(|width| {
            if width == original_width {
                format!("{url} {width}w")
            } else {
                format!("{} {width}w", with_width_param(url, width))
            }
        })
        .collect();

    entries.join(", ")
}

/// Appends a width query parameter, respecting an existing query string.
fn with_width_param(url: &str, width: u32) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}w={width}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_descriptor() {
        let out = build_srcset("https://example.com/a.jpg", 1200, &[320, 640, 960]);
        assert_eq!(
            out,
            "https://example.com/a.jpg?w=320 320w, \
             https://example.com/a.jpg?w=640 640w, \
             https://example.com/a.jpg?w=960 960w, \
             https://example.com/a.jpg 1200w"
        );
    }

    #[test]
    fn test_candidates_at_or_above_original_are_dropped() {
        let out = build_srcset("https://example.com/a.jpg", 800, &[640, 800, 1920]);
        assert_eq!(
            out,
            "https://example.com/a.jpg?w=640 640w, https://example.com/a.jpg 800w"
        );
    }

    #[test]
    fn test_empty_candidates_yield_single_entry() {
        let out = build_srcset("https://example.com/a.jpg", 800, &[]);
        assert_eq!(out, "https://example.com/a.jpg 800w");
    }

    #[test]
    fn test_all_candidates_too_large_yield_single_entry() {
        let out = build_srcset("https://example.com/a.jpg", 300, &[640, 960]);
        assert_eq!(out, "https://example.com/a.jpg 300w");
    }

    #[test]
    fn test_duplicates_and_order() {
        let out = build_srcset("https://example.com/a.jpg", 1000, &[640, 320, 640]);
        assert_eq!(
            out,
            "https://example.com/a.jpg?w=320 320w, \
             https://example.com/a.jpg?w=640 640w, \
             https://example.com/a.jpg 1000w"
        );
    }

    #[test]
    fn test_existing_query_string_uses_ampersand() {
        let out = build_srcset("https://example.com/a.jpg?v=2", 800, &[400]);
        assert_eq!(
            out,
            "https://example.com/a.jpg?v=2&w=400 400w, https://example.com/a.jpg?v=2 800w"
        );
    }

    #[test]
    fn test_widths_strictly_ascending() {
        let out = build_srcset("https://e.com/a.jpg", 1920, &[960, 320, 1280, 640]);
        let widths: Vec<u32> = out
            .split(", ")
            .map(|entry| {
                let w = entry.rsplit(' ').next().unwrap();
                w.trim_end_matches('w').parse().unwrap()
            })
            .collect();
        assert_eq!(widths, vec![320, 640, 960, 1280, 1920]);
        assert!(out.ends_with("https://e.com/a.jpg 1920w"));
    }
}
