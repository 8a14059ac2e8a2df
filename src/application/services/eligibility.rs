//! Gating of image references before they enter the enrichment path.

use regex::Regex;
use tracing::warn;
use url::Url;

use crate::infrastructure::config::PipelineConfig;

/// Decides whether an image reference should be enriched at all.
///
/// References that fail any check fall back to the host's unmodified
/// rendering; the remote service is never consulted for them.
#[derive(Debug)]
pub struct EligibilityFilter {
    enabled: bool,
    domain_patterns: Vec<Regex>,
    ignored_suffixes: Vec<String>,
}

impl EligibilityFilter {
    /// Creates a filter from raw settings.
    ///
    /// Domain patterns support a single `*` wildcard matching any substring,
    /// case-insensitive and anchored to the full hostname. Patterns that do
    /// not compile are skipped with a warning.
    #[must_use]
    pub fn new(enabled: bool, allowed_domains: &[String], ignored_formats: &[String]) -> Self {
        let domain_patterns = allowed_domains
            .iter()
            .filter_map(|pattern| match compile_domain_pattern(pattern) {
                Ok(re) => Some(re),
                Err(e) => {
                    warn!(pattern = %pattern, error = %e, "Skipping unusable domain pattern");
                    None
                }
            })
            .collect();

        let ignored_suffixes = ignored_formats
            .iter()
            .map(|ext| format!(".{}", ext.trim_start_matches('.').to_ascii_lowercase()))
            .collect();

        Self {
            enabled,
            domain_patterns,
            ignored_suffixes,
        }
    }

    /// Creates a filter from the pipeline configuration.
    #[must_use]
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(
            config.enabled,
            &config.allowed_domains,
            &config.ignored_formats,
        )
    }

    /// Returns true when the reference may enter the enrichment path.
    #[must_use]
    pub fn is_eligible(&self, url: &str) -> bool {
        if !self.enabled {
            return false;
        }

        let Ok(parsed) = Url::parse(url) else {
            return false;
        };

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return false;
        }

        let Some(host) = parsed.host_str() else {
            return false;
        };

        if !self.domain_patterns.is_empty()
            && !self.domain_patterns.iter().any(|re| re.is_match(host))
        {
            return false;
        }

        let path = parsed.path().to_ascii_lowercase();
        if self.ignored_suffixes.iter().any(|s| path.ends_with(s)) {
            return false;
        }

        true
    }
}

/// Compiles a hostname pattern into an anchored case-insensitive regex,
/// with `*` matching any substring.
fn compile_domain_pattern(pattern: &str) -> Result<Regex, regex::Error> {
    let escaped: Vec<String> = pattern.split('*').map(regex::escape).collect();
    Regex::new(&format!("(?i)^{}$", escaped.join(".*")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(domains: &[&str], formats: &[&str]) -> EligibilityFilter {
        let domains: Vec<String> = domains.iter().map(ToString::to_string).collect();
        let formats: Vec<String> = formats.iter().map(ToString::to_string).collect();
        EligibilityFilter::new(true, &domains, &formats)
    }

    #[test]
    fn test_disabled_filter_rejects_everything() {
        let f = EligibilityFilter::new(false, &[], &[]);
        assert!(!f.is_eligible("https://example.com/a.jpg"));
    }

    #[test]
    fn test_relative_url_rejected() {
        let f = filter(&[], &[]);
        assert!(!f.is_eligible("/images/a.jpg"));
        assert!(!f.is_eligible("a.jpg"));
    }

    #[test]
    fn test_non_network_scheme_rejected() {
        let f = filter(&[], &[]);
        assert!(!f.is_eligible("file:///tmp/a.jpg"));
        assert!(!f.is_eligible("data:image/png;base64,AAAA"));
        assert!(f.is_eligible("http://example.com/a.jpg"));
        assert!(f.is_eligible("https://example.com/a.jpg"));
    }

    #[test]
    fn test_empty_allow_list_allows_all_hosts() {
        let f = filter(&[], &[]);
        assert!(f.is_eligible("https://anything.example.net/a.jpg"));
    }

    #[test]
    fn test_exact_domain_match() {
        let f = filter(&["cdn.example.com"], &[]);
        assert!(f.is_eligible("https://cdn.example.com/a.jpg"));
        assert!(!f.is_eligible("https://evil.example.com/a.jpg"));
    }

    #[test]
    fn test_wildcard_domain_match() {
        let f = filter(&["*.example.com"], &[]);
        assert!(f.is_eligible("https://cdn.example.com/a.jpg"));
        assert!(f.is_eligible("https://a.b.example.com/a.jpg"));
        assert!(!f.is_eligible("https://example.org/a.jpg"));
        // anchored: the pattern must cover the whole hostname
        assert!(!f.is_eligible("https://example.com.evil.net/a.jpg"));
    }

    #[test]
    fn test_domain_match_is_case_insensitive() {
        let f = filter(&["CDN.Example.com"], &[]);
        assert!(f.is_eligible("https://cdn.EXAMPLE.com/a.jpg"));
    }

    #[test]
    fn test_ignored_format_rejected() {
        let f = filter(&[], &["svg", "gif"]);
        assert!(!f.is_eligible("https://example.com/logo.svg"));
        assert!(!f.is_eligible("https://example.com/anim.GIF"));
        assert!(f.is_eligible("https://example.com/photo.jpg"));
    }

    #[test]
    fn test_ignored_format_checks_path_not_query() {
        let f = filter(&[], &["svg"]);
        assert!(f.is_eligible("https://example.com/photo.jpg?fallback=x.svg"));
    }

    #[test]
    fn test_any_pattern_in_the_list_may_match() {
        let f = filter(&["cdn.example.com", "*.mirror.example.com"], &[]);
        assert!(f.is_eligible("https://cdn.example.com/x.png"));
        assert!(f.is_eligible("https://a.mirror.example.com/x.png"));
        assert!(!f.is_eligible("https://other.com/x.png"));
    }
}
