//! Price extraction from raw page text

use regex::Regex;

// Plausible apartment rent window, both bounds exclusive
const MIN_PLAUSIBLE: u32 = 500;
const MAX_PLAUSIBLE: u32 = 5000;

/// Apply a target's currency pattern to page text and return the plausible
/// prices sorted ascending. Matches are stripped of `$` and thousands
/// separators; cents are dropped. An empty result means the target yields
/// no price signal this run.
pub fn extract_prices(page: &str, pattern: &Regex) -> Vec<u32> {
    let mut prices: Vec<u32> = pattern
        .find_iter(page)
        .filter_map(|m| parse_price(m.as_str()))
        .filter(|p| *p > MIN_PLAUSIBLE && *p < MAX_PLAUSIBLE)
        .collect();
    prices.sort_unstable();
    prices
}

fn parse_price(raw: &str) -> Option<u32> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    // Integer dollars only; "1545.99" parses as 1545
    cleaned.split('.').next()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern() -> Regex {
        Regex::new(r"\$[\d,]+(?:\.\d{2})?").unwrap()
    }

    #[test]
    fn implausible_prices_are_filtered() {
        let page = "Parking $50/mo. 1BR from $1,545. 2BR from $1,795.";
        assert_eq!(extract_prices(page, &pattern()), vec![1545, 1795]);
    }

    #[test]
    fn prices_come_back_ascending() {
        let page = "$1,795 ... $900 ... $1,545";
        assert_eq!(extract_prices(page, &pattern()), vec![900, 1545, 1795]);
    }

    #[test]
    fn window_bounds_are_exclusive() {
        let page = "$500 $501 $4,999 $5,000";
        assert_eq!(extract_prices(page, &pattern()), vec![501, 4999]);
    }

    #[test]
    fn cents_are_truncated() {
        let page = "starting at $1,545.99 per month";
        assert_eq!(extract_prices(page, &pattern()), vec![1545]);
    }

    #[test]
    fn pages_without_prices_yield_nothing() {
        assert!(extract_prices("now leasing, call for details", &pattern()).is_empty());
    }

    #[test]
    fn duplicate_listings_are_kept() {
        let page = "$1,600 and again $1,600";
        assert_eq!(extract_prices(page, &pattern()), vec![1600, 1600]);
    }
}
