//! Structured listing query decoded from raw query-string pairs.

use crate::store::Market;

/// Permissive upper bound used when a range parameter is absent or unparseable.
pub const UNBOUNDED: f64 = 999_999_999.0;

const DEFAULT_PAGE_SIZE: usize = 20;

// == Sort Order ==
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    PriceAsc,
    PriceDesc,
    SizeAsc,
    SizeDesc,
    /// Completion date, newest first; missing dates sort last
    DateDesc,
    /// Stable pseudo-random order by precomputed score
    Random,
}

impl SortOrder {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "price_asc" => Some(SortOrder::PriceAsc),
            "price_desc" => Some(SortOrder::PriceDesc),
            "size_asc" => Some(SortOrder::SizeAsc),
            "size_desc" => Some(SortOrder::SizeDesc),
            "date_desc" => Some(SortOrder::DateDesc),
            "random" => Some(SortOrder::Random),
            _ => None,
        }
    }
}

// == Listing Query ==
/// Every parameter the listing and map endpoints accept.
///
/// Parsing is permissive throughout: unknown keys are ignored and numeric
/// values that fail to parse fall back to defaults instead of erroring.
#[derive(Debug, Clone)]
pub struct ListingQuery {
    /// Market tab (`type` or `market` parameter, aliases accepted)
    pub tab: Option<Market>,
    pub search: Option<String>,
    /// 1-indexed page number
    pub page: usize,
    /// Page size (`limit` parameter)
    pub limit: usize,
    pub subtypes: Vec<String>,
    pub towns: Vec<String>,
    pub price_min: f64,
    pub price_max: f64,
    pub size_min: f64,
    pub size_max: f64,
    pub beds: Vec<u32>,
    pub beds_exact: bool,
    pub baths: Option<u32>,
    pub amenities: Vec<String>,
    pub sort: Option<SortOrder>,
    pub ids: Vec<i64>,
    pub featured: bool,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            tab: None,
            search: None,
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            subtypes: Vec::new(),
            towns: Vec::new(),
            price_min: 0.0,
            price_max: UNBOUNDED,
            size_min: 0.0,
            size_max: UNBOUNDED,
            beds: Vec::new(),
            beds_exact: false,
            baths: None,
            amenities: Vec::new(),
            sort: None,
            ids: Vec::new(),
            featured: false,
        }
    }
}

impl ListingQuery {
    /// Builds a query from decoded key/value pairs.
    ///
    /// Multi-value parameters accept repeated keys, the `key[]` bracket form
    /// and comma-joined values, in any combination.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let single = |key: &str| -> Option<&str> {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };

        let tab = single("type")
            .or_else(|| single("market"))
            .and_then(Market::from_tab);

        let search = single("search")
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string());

        let mut beds: Vec<u32> = multi_values(pairs, "beds")
            .iter()
            .filter_map(|v| v.parse().ok())
            .collect();
        beds.extend(
            multi_values(pairs, "bedrooms")
                .iter()
                .filter_map(|v| v.parse::<u32>().ok()),
        );

        let baths = single("baths")
            .or_else(|| single("bathrooms"))
            .and_then(|v| v.parse().ok());

        let ids = single("ids")
            .map(|v| {
                v.split(',')
                    .filter_map(|id| id.trim().parse::<i64>().ok())
                    .collect()
            })
            .unwrap_or_default();

        Self {
            tab,
            search,
            page: parse_or(single("page"), 1).max(1),
            limit: parse_or(single("limit"), DEFAULT_PAGE_SIZE).max(1),
            subtypes: multi_values(pairs, "subtype"),
            towns: multi_values(pairs, "town"),
            price_min: parse_or(single("priceMin"), 0.0),
            price_max: parse_or(single("priceMax"), UNBOUNDED),
            size_min: parse_or(single("sizeMin"), 0.0),
            size_max: parse_or(single("sizeMax"), UNBOUNDED),
            beds,
            beds_exact: single("beds_exact") == Some("true"),
            baths,
            amenities: multi_values(pairs, "amenities"),
            sort: single("sort").and_then(SortOrder::parse),
            ids,
            featured: single("featured") == Some("true"),
        }
    }
}

fn parse_or<T: std::str::FromStr>(value: Option<&str>, fallback: T) -> T {
    value.and_then(|v| v.parse().ok()).unwrap_or(fallback)
}

/// Collects every value for `key` and `key[]`, splitting comma-joined lists
/// and dropping empties. First occurrence wins on duplicates.
fn multi_values(pairs: &[(String, String)], key: &str) -> Vec<String> {
    let bracket = format!("{key}[]");
    let mut seen = std::collections::HashSet::new();
    let mut values = Vec::new();
    for (k, v) in pairs {
        if k != key && *k != bracket {
            continue;
        }
        for part in v.split(',') {
            let part = part.trim();
            if !part.is_empty() && seen.insert(part.to_lowercase()) {
                values.push(part.to_string());
            }
        }
    }
    values
}
