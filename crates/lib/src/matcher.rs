//! # Slide URL Matching
//!
//! A slide page URL has the shape `<provider>/<owner_id>/<slug>/<page>`.
//! The matcher anchors the whole string: no surrounding whitespace, no
//! trailing slash, case-sensitive host.

use crate::constants::MAX_MIX_URLS;
use crate::provider::Provider;
use regex::Regex;

/// The parts of a slide URL the extractor needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideReference {
    pub owner_id: String,
    /// Final path segment. Usually numeric, but kept as an opaque string.
    pub page: String,
}

/// Outcome of checking a multi-line URL list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UrlListReport {
    pub has_invalid: bool,
    pub too_many: bool,
}

#[derive(Debug, Clone)]
pub struct SlideUrlMatcher {
    pattern: Regex,
}

impl SlideUrlMatcher {
    pub fn new(provider: &Provider) -> Result<Self, regex::Error> {
        let pattern = Regex::new(&format!(
            r"^{}/(?P<owner_id>[^/]+)/.+/(?P<page>[^/]+)$",
            regex::escape(&provider.url)
        ))?;
        Ok(Self { pattern })
    }

    /// Parses `url`, returning `None` when it is not a slide page URL.
    pub fn matches(&self, url: &str) -> Option<SlideReference> {
        let caps = self.pattern.captures(url)?;
        Some(SlideReference {
            owner_id: caps["owner_id"].to_string(),
            page: caps["page"].to_string(),
        })
    }

    pub fn is_match(&self, url: &str) -> bool {
        self.pattern.is_match(url)
    }

    /// Checks every line of `text`. Both conditions are evaluated
    /// independently so callers can report them together.
    pub fn check_list(&self, text: &str) -> UrlListReport {
        let lines = split_lines(text);
        UrlListReport {
            has_invalid: lines.iter().any(|line| !self.is_match(line)),
            too_many: lines.len() > MAX_MIX_URLS,
        }
    }
}

/// Splits on `\n` or `\r\n`, dropping trailing empty entries.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines
}
