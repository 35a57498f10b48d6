//! Filtering, pagination, search and stats over a product snapshot.
//!
//! Pagination is deliberately permissive. `page` and `limit` are read the
//! way a lenient integer parser reads them (`"2abc"` is 2, `"abc"` is not a
//! number) and the window is cut with array-slice rules: negative bounds
//! count from the end, a not-a-number bound acts as 0, and everything is
//! clamped to the length. Zero or negative values give empty or shifted
//! pages rather than errors.

use std::cmp::Ordering;
use std::ops::Range;

use indexmap::IndexMap;

use super::model::Product;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

/// Reads the integer at the start of `s`: optional leading whitespace, an
/// optional sign, then at least one decimal digit. Trailing input is
/// ignored. `None` stands for "not a number".
pub fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits.bytes().take_while(u8::is_ascii_digit).count();
    if end == 0 {
        return None;
    }
    let magnitude = digits[..end]
        .bytes()
        .fold(0i64, |acc, d| acc.saturating_mul(10).saturating_add(i64::from(d - b'0')));
    Some(if negative { -magnitude } else { magnitude })
}

/// The requested page window, before it is applied to any data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageWindow {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl Default for PageWindow {
    fn default() -> Self {
        Self { page: Some(DEFAULT_PAGE), limit: Some(DEFAULT_LIMIT) }
    }
}

impl PageWindow {
    /// Builds a window from raw query values; an absent value takes its default.
    pub fn from_query(page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            page: page.map_or(Some(DEFAULT_PAGE), parse_leading_int),
            limit: limit.map_or(Some(DEFAULT_LIMIT), parse_leading_int),
        }
    }

    /// `start = (page - 1) * limit`, `end = start + limit`, then slice rules.
    pub fn range(&self, len: usize) -> Range<usize> {
        let start = match (self.page, self.limit) {
            (Some(page), Some(limit)) => Some(page.saturating_sub(1).saturating_mul(limit)),
            _ => None,
        };
        let end = match (start, self.limit) {
            (Some(start), Some(limit)) => Some(start.saturating_add(limit)),
            _ => None,
        };
        let start = slice_bound(start, len);
        let end = slice_bound(end, len);
        start..end.max(start)
    }

    pub fn apply<'a>(&self, items: &'a [Product]) -> &'a [Product] {
        &items[self.range(items.len())]
    }
}

/// Resolves one slice bound against `len`.
fn slice_bound(bound: Option<i64>, len: usize) -> usize {
    let len_i = i64::try_from(len).unwrap_or(i64::MAX);
    let resolved = match bound.unwrap_or(0) {
        b if b < 0 => len_i.saturating_add(b).max(0),
        b => b.min(len_i),
    };
    usize::try_from(resolved).unwrap_or(0)
}

/// Keeps products whose category equals `category`, ignoring case.
pub fn filter_by_category(products: Vec<Product>, category: &str) -> Vec<Product> {
    let wanted = category.to_lowercase();
    products
        .into_iter()
        .filter(|p| p.category.to_lowercase() == wanted)
        .collect()
}

/// Keeps products whose name contains `needle`, ignoring case.
pub fn search_by_name(products: Vec<Product>, needle: &str) -> Vec<Product> {
    let needle = needle.to_lowercase();
    products
        .into_iter()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .collect()
}

/// Product count per category. Keys are the categories exactly as stored.
///
/// Keys are ordered the way a JSON object built in insertion order lists
/// them: array-index keys (`"0"`, `"17"`, never `"07"` or `"-1"`) first,
/// ascending, then every other key in order of first appearance.
pub fn count_by_category(products: &[Product]) -> IndexMap<String, usize> {
    let mut counts = IndexMap::new();
    for product in products {
        *counts.entry(product.category.clone()).or_insert(0) += 1;
    }
    counts.sort_by(|a, _, b, _| match (array_index(a), array_index(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    counts
}

/// `Some(n)` when `key` is the canonical decimal form of an index below `u32::MAX`.
fn array_index(key: &str) -> Option<u32> {
    let n: u32 = key.parse().ok()?;
    (n != u32::MAX && n.to_string() == key).then_some(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::products::store::test_support::fields;

    fn catalog(entries: &[(&str, &str)]) -> Vec<Product> {
        entries
            .iter()
            .enumerate()
            .map(|(i, (name, category))| Product::from_fields(i as u64 + 1, fields(name, category)))
            .collect()
    }

    fn numbered(n: usize) -> Vec<Product> {
        (1..=n).map(|i| Product::from_fields(i as u64, fields(&format!("p{i}"), "x"))).collect()
    }

    #[test]
    fn parses_like_a_lenient_integer_reader() {
        assert_eq!(parse_leading_int("2"), Some(2));
        assert_eq!(parse_leading_int("  12abc"), Some(12));
        assert_eq!(parse_leading_int("-3"), Some(-3));
        assert_eq!(parse_leading_int("+4"), Some(4));
        assert_eq!(parse_leading_int("1.9"), Some(1));
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("-"), None);
    }

    #[test]
    fn second_page_of_fifteen_holds_the_last_five() {
        let items = numbered(15);
        let window = PageWindow::from_query(Some("2"), Some("10"));
        let ids: Vec<_> = window.apply(&items).iter().map(|p| p.id).collect();
        assert_eq!(ids, [11, 12, 13, 14, 15]);
    }

    #[test]
    fn defaults_to_first_ten() {
        let items = numbered(12);
        assert_eq!(PageWindow::from_query(None, None).apply(&items).len(), 10);
    }

    #[test]
    fn not_a_number_yields_empty_page() {
        let items = numbered(5);
        assert!(PageWindow::from_query(Some("x"), None).apply(&items).is_empty());
        assert!(PageWindow::from_query(None, Some("x")).apply(&items).is_empty());
    }

    #[test]
    fn zero_page_counts_from_the_end() {
        // page=0, limit=2 → slice(-2, 0) → empty
        let items = numbered(5);
        assert!(PageWindow::from_query(Some("0"), Some("2")).apply(&items).is_empty());
        // page=1, limit=-2 → slice(0, -2) → first three
        let window = PageWindow::from_query(Some("1"), Some("-2"));
        assert_eq!(window.apply(&items).len(), 3);
    }

    #[test]
    fn window_past_the_end_is_empty() {
        let items = numbered(3);
        assert!(PageWindow::from_query(Some("5"), Some("10")).apply(&items).is_empty());
    }

    #[test]
    fn category_filter_ignores_case() {
        let items = catalog(&[("a", "Books"), ("b", "books"), ("c", "Games")]);
        let names: Vec<_> = filter_by_category(items, "BOOKS").into_iter().map(|p| p.name).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn search_matches_substrings_ignoring_case() {
        let items = catalog(&[("Red Shoe", "x"), ("Blue hat", "x"), ("shoelace", "x")]);
        let names: Vec<_> = search_by_name(items, "SHOE").into_iter().map(|p| p.name).collect();
        assert_eq!(names, ["Red Shoe", "shoelace"]);
    }

    #[test]
    fn counts_exact_categories_in_first_seen_order() {
        let items = catalog(&[("1", "B"), ("2", "A"), ("3", "B"), ("4", "b")]);
        let counts = count_by_category(&items);
        let pairs: Vec<_> = counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        assert_eq!(pairs, [("B", 2), ("A", 1), ("b", 1)]);
    }

    #[test]
    fn index_like_categories_come_first_in_numeric_order() {
        let items = catalog(&[("1", "B"), ("2", "10"), ("3", "2"), ("4", "02"), ("5", "-1"), ("6", "2")]);
        let counts = count_by_category(&items);
        let keys: Vec<_> = counts.keys().map(String::as_str).collect();
        assert_eq!(keys, ["2", "10", "B", "02", "-1"]);
        assert_eq!(counts["2"], 2);
    }
}
