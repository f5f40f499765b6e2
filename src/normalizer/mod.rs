//! Line normalizer: the first pipeline stage. Drops the print noise that the
//! page extractor faithfully reproduces -- bare page numbers and the running
//! header -- and nothing else. Order is preserved; this stage is a filter.

use lazy_static::lazy_static;
use log::{debug, trace};
use regex::Regex;

use crate::config::subsystems::NormalizerConfig;

lazy_static! {
    static ref PAGE_NUMBER: Regex = Regex::new(r"^\d+$").unwrap();
}

pub struct LineNormalizer {
    running_header: Regex,
}

impl LineNormalizer {
    pub fn new(settings: &NormalizerConfig) -> Self {
        // The header may carry the page number on either side of it
        let pattern = format!(
            r"(?i)^(?:\d+\s*)?{}(?:\s*\d+)?$",
            regex::escape(settings.running_header.trim())
        );
        Self {
            // Pattern is assembled from an escaped literal, cannot fail
            running_header: Regex::new(&pattern).expect("running header pattern"),
        }
    }

    pub fn new_with_defaults() -> Self {
        Self::new(&NormalizerConfig::default())
    }

    fn is_noise(&self, line: &str) -> bool {
        PAGE_NUMBER.is_match(line) || self.running_header.is_match(line)
    }

    /// Filter one page's raw lines. Empty lines and noise are dropped,
    /// everything else passes through trimmed and in order.
    pub fn normalize_page(&self, lines: &[String]) -> Vec<String> {
        let mut kept = Vec::with_capacity(lines.len());
        for raw in lines {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            if self.is_noise(line) {
                trace!("Dropping noise line: {}", line);
                continue;
            }
            kept.push(line.to_string());
        }
        kept
    }

    /// Flatten a whole document's page groups into one cleaned line sequence.
    pub fn normalize(&self, pages: &[Vec<String>]) -> Vec<String> {
        let mut all = Vec::new();
        for (idx, page) in pages.iter().enumerate() {
            let kept = self.normalize_page(page);
            trace!("Page {}: kept {} of {} lines", idx + 1, kept.len(), page.len());
            all.extend(kept);
        }
        debug!("Normalizer kept {} lines from {} pages", all.len(), pages.len());
        all
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn drops_bare_page_numbers() {
        let normalizer = LineNormalizer::new_with_defaults();
        let out = normalizer.normalize_page(&lines(&["123", "1 In the beginning", "456"]));
        assert_eq!(out, vec!["1 In the beginning"]);
    }

    #[test]
    fn drops_running_header_with_flanking_digits() {
        let normalizer = LineNormalizer::new_with_defaults();
        let out = normalizer.normalize_page(&lines(&[
            "IL CORANO",
            "il corano",
            "12 IL CORANO",
            "IL CORANO 13",
            "storia de il corano antico", // prose mentioning the title survives
        ]));
        assert_eq!(out, vec!["storia de il corano antico"]);
    }

    #[test]
    fn trims_and_drops_empty_lines() {
        let normalizer = LineNormalizer::new_with_defaults();
        let out = normalizer.normalize_page(&lines(&["  ", "", "  2 testo  "]));
        assert_eq!(out, vec!["2 testo"]);
    }

    #[test]
    fn keeps_lines_with_embedded_digits() {
        let normalizer = LineNormalizer::new_with_defaults();
        let out = normalizer.normalize_page(&lines(&["sopra di loro, 9 angeli"]));
        assert_eq!(out, vec!["sopra di loro, 9 angeli"]);
    }

    #[test]
    fn custom_header_literal_is_escaped() {
        let settings = NormalizerConfig {
            running_header: "AL-KITAB (I)".to_string(),
        };
        let normalizer = LineNormalizer::new(&settings);
        let out = normalizer.normalize_page(&lines(&["AL-KITAB (I)", "AL-KITAB XI"]));
        assert_eq!(out, vec!["AL-KITAB XI"]);
    }

    #[test]
    fn preserves_order_across_pages() {
        let normalizer = LineNormalizer::new_with_defaults();
        let pages = vec![lines(&["a", "77"]), lines(&[]), lines(&["b"])];
        assert_eq!(normalizer.normalize(&pages), vec!["a", "b"]);
    }
}
