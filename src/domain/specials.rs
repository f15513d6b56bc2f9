//! Promotional offer detection

use regex::{Regex, RegexBuilder};

// Ordered by priority; the first pattern that matches wins
const SPECIAL_PATTERNS: [&str; 5] = [
    r"(\d+)\s*months?\s*free",
    r"free\s*rent",
    r"move[- ]?in\s*special",
    r"limited\s*time",
    r"waived.*fee",
];

/// Scans page text for known promotional phrasings. A plain OR-of-patterns
/// scan, not a scored classifier.
pub struct SpecialDetector {
    patterns: Vec<Regex>,
}

impl SpecialDetector {
    pub fn new() -> Self {
        let patterns = SPECIAL_PATTERNS
            .iter()
            .map(|p| {
                RegexBuilder::new(p)
                    .case_insensitive(true)
                    .build()
                    .expect("static special pattern")
            })
            .collect();
        Self { patterns }
    }

    /// Text of the first matching promotion, in pattern-list order.
    pub fn detect(&self, page: &str) -> Option<String> {
        self.patterns
            .iter()
            .find_map(|re| re.find(page).map(|m| m.as_str().to_string()))
    }
}

impl Default for SpecialDetector {
    fn default() -> Self {
        Self::new()
    }
}
